//! Product response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::products::records::ProductRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    pub name: String,

    pub description: String,

    pub price: f64,

    /// Category, matched exactly when filtering
    pub category: String,

    /// Units in stock
    pub stock: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// The date and time the product was created (RFC 3339)
    pub created_at: String,

    /// The date and time the product was last updated (RFC 3339)
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.uuid.into(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            stock: product.stock,
            image_url: product.image_url,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
