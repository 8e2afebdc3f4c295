//! Fallback error envelopes.

use salvo::{http::ResBody, prelude::*};
use tracing::error;

use crate::{envelope::ErrorBody, errors::SOMETHING_WENT_WRONG};

const ROUTE_NOT_FOUND: &str = "Route not found";

/// Rewrites framework error responses (unmatched routes, extraction
/// failures, caught panics) into the failure envelope.
///
/// Responses that already carry a body are left alone.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ErrorEnvelope {
    expose_errors: bool,
}

impl ErrorEnvelope {
    /// `expose_errors` controls whether 5xx detail reaches the caller.
    pub(crate) fn new(expose_errors: bool) -> Self {
        Self { expose_errors }
    }

    fn body_for(&self, status: StatusCode, error: Option<&StatusError>) -> ErrorBody {
        let detail = error.map(|error| {
            error
                .cause
                .as_ref()
                .map_or_else(|| error.brief.clone(), ToString::to_string)
        });

        if status == StatusCode::NOT_FOUND {
            return ErrorBody::new(ROUTE_NOT_FOUND, None);
        }

        if status.is_server_error() {
            error!(status = status.as_u16(), detail = ?detail, "unhandled server error");

            return ErrorBody::new(
                SOMETHING_WENT_WRONG,
                detail.filter(|_detail| self.expose_errors),
            );
        }

        let message = error
            .map(|error| error.brief.clone())
            .filter(|brief| !brief.is_empty())
            .or_else(|| status.canonical_reason().map(ToOwned::to_owned))
            .unwrap_or_else(|| status.to_string());

        ErrorBody::new(message, detail.filter(|_detail| self.expose_errors))
    }
}

#[handler]
impl ErrorEnvelope {
    async fn handle(&self, res: &mut Response, ctrl: &mut FlowCtrl) {
        let Some(status) = res.status_code else {
            return;
        };

        if !(status.is_client_error() || status.is_server_error()) {
            return;
        }

        if !matches!(res.body, ResBody::None | ResBody::Error(_)) {
            return;
        }

        let body = match res.take_body() {
            ResBody::Error(error) => self.body_for(status, Some(&error)),
            _ => self.body_for(status, None),
        };

        res.render(Json(body));

        ctrl.skip_rest();
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        catcher::Catcher,
        oapi::extract::JsonBody,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn broken() -> Result<&'static str, StatusError> {
        Err(StatusError::internal_server_error().brief("connection pool exhausted"))
    }

    #[handler]
    async fn echo(body: JsonBody<Value>) -> Json<Value> {
        Json(body.into_inner())
    }

    fn make_service(expose_errors: bool) -> Service {
        Service::new(
            Router::new()
                .push(Router::with_path("broken").get(broken))
                .push(Router::with_path("echo").post(echo)),
        )
        .catcher(Catcher::default().hoop(ErrorEnvelope::new(expose_errors)))
    }

    #[tokio::test]
    async fn unmatched_route_returns_route_not_found() -> TestResult {
        let mut res = TestClient::get("http://example.com/api/nothing-here")
            .send(&make_service(true))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(
            body,
            json!({ "success": false, "message": "Route not found" })
        );

        Ok(())
    }

    #[tokio::test]
    async fn server_error_exposes_detail_outside_production() -> TestResult {
        let mut res = TestClient::get("http://example.com/broken")
            .send(&make_service(true))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body["message"], SOMETHING_WENT_WRONG);
        assert_eq!(body["error"], "connection pool exhausted");

        Ok(())
    }

    #[tokio::test]
    async fn server_error_hides_detail_in_production() -> TestResult {
        let mut res = TestClient::get("http://example.com/broken")
            .send(&make_service(false))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(
            body,
            json!({ "success": false, "message": SOMETHING_WENT_WRONG })
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_body_returns_enveloped_400() -> TestResult {
        let mut res = TestClient::post("http://example.com/echo")
            .add_header("content-type", "application/json", true)
            .body("{\"name\": ")
            .send(&make_service(false))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string(), "expected a message, got {body}");

        Ok(())
    }
}
