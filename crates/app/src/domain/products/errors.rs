//! Products service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("invalid product id \"{value}\": {source}")]
    InvalidIdentifier {
        value: String,
        #[source]
        source: uuid::Error,
    },

    #[error("{0}")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
