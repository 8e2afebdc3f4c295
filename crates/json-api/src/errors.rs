//! HTTP error type rendered as the failure envelope.

use std::fmt::Display;

use salvo::{
    Response,
    http::StatusCode,
    oapi::{self, Components, Content, EndpointOutRegister, Operation, ToSchema},
    writing::{Json, Scribe},
};
use thiserror::Error;

use crate::envelope::ErrorBody;

/// Generic message for failures that have no more specific description.
pub(crate) const SOMETHING_WENT_WRONG: &str = "Something went wrong!";

const INVALID_BODY: &str = "Invalid JSON body";

/// Errors a handler can answer with.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    /// Required caller input was missing.
    #[error("{message}")]
    BadRequest { message: &'static str },

    /// The request body could not be decoded.
    #[error("Invalid JSON body: {detail}")]
    InvalidBody { detail: String },

    /// No record matched the identifier.
    #[error("{message}")]
    NotFound { message: &'static str },

    /// Storage or internal failure; `detail` is echoed to the caller.
    #[error("{message}: {detail}")]
    OperationFailed {
        message: &'static str,
        detail: String,
    },
}

impl ApiError {
    pub(crate) fn bad_request(message: &'static str) -> Self {
        Self::BadRequest { message }
    }

    pub(crate) fn invalid_body(detail: impl Display) -> Self {
        Self::InvalidBody {
            detail: detail.to_string(),
        }
    }

    pub(crate) fn not_found(message: &'static str) -> Self {
        Self::NotFound { message }
    }

    pub(crate) fn operation_failed(message: &'static str, detail: impl Display) -> Self {
        Self::OperationFailed {
            message,
            detail: detail.to_string(),
        }
    }

    pub(crate) fn internal(detail: impl Display) -> Self {
        Self::operation_failed(SOMETHING_WENT_WRONG, detail)
    }

    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } | Self::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::OperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn into_body(self) -> ErrorBody {
        match self {
            Self::BadRequest { message } | Self::NotFound { message } => {
                ErrorBody::new(message, None)
            }
            Self::InvalidBody { detail } => ErrorBody::new(INVALID_BODY, Some(detail)),
            Self::OperationFailed { message, detail } => ErrorBody::new(message, Some(detail)),
        }
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status_code());
        res.render(Json(self.into_body()));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Missing required input"),
            (StatusCode::NOT_FOUND, "Product not found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Operation failed"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description)
                    .add_content("application/json", Content::new(ErrorBody::to_schema(components))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn missing_query() -> Result<&'static str, ApiError> {
        Err(ApiError::bad_request("Please provide a search query"))
    }

    #[handler]
    async fn failing_storage() -> Result<&'static str, ApiError> {
        Err(ApiError::operation_failed(
            "Error fetching products",
            "pool timed out while waiting for an open connection",
        ))
    }

    #[tokio::test]
    async fn bad_request_renders_message_without_detail() -> TestResult {
        let service = Service::new(Router::with_path("search").get(missing_query));

        let mut res = TestClient::get("http://example.com/search")
            .send(&service)
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body, ErrorBody::new("Please provide a search query", None));

        Ok(())
    }

    #[tokio::test]
    async fn operation_failure_echoes_detail() -> TestResult {
        let service = Service::new(Router::with_path("products").get(failing_storage));

        let mut res = TestClient::get("http://example.com/products")
            .send(&service)
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!body.success);
        assert_eq!(body.message, "Error fetching products");
        assert_eq!(
            body.error.as_deref(),
            Some("pool timed out while waiting for an open connection")
        );

        Ok(())
    }
}
