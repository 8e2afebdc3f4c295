//! Product Errors

use tracing::error;

use catalog_app::products::ProductsServiceError;

use crate::errors::ApiError;

pub(crate) const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Map a service failure to the API error, with `message` describing the
/// operation that failed.
pub(crate) fn into_api_error(message: &'static str, error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::NotFound => ApiError::not_found(PRODUCT_NOT_FOUND),
        error @ (ProductsServiceError::InvalidIdentifier { .. } | ProductsServiceError::Sql(_)) => {
            error!("{message}: {error}");

            ApiError::operation_failed(message, error)
        }
    }
}
