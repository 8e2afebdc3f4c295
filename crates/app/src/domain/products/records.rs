//! Product Records

use std::str::FromStr;

use jiff::Timestamp;

use crate::{domain::products::errors::ProductsServiceError, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Parse a caller-supplied product identifier.
///
/// # Errors
///
/// Returns [`ProductsServiceError::InvalidIdentifier`] when `value` is not a UUID.
pub fn parse_product_uuid(value: &str) -> Result<ProductUuid, ProductsServiceError> {
    ProductUuid::from_str(value).map_err(|source| ProductsServiceError::InvalidIdentifier {
        value: value.to_string(),
        source,
    })
}
