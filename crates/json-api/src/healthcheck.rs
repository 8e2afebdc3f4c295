//! Product Catalog JSON API Healthcheck Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use catalog_app::database::StorageStatus;

use crate::{errors::ApiError, extensions::*, observability::observe_storage, state::State};

/// Storage connection summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DatabaseHealth {
    /// connecting, connected or disconnected
    pub status: String,

    /// Most recent connection error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,

    /// Likely cause of the most recent error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
}

impl From<StorageStatus> for DatabaseHealth {
    fn from(status: StorageStatus) -> Self {
        let (last_error, diagnosis) = match status.last_error {
            Some(failure) => (
                Some(failure.message),
                Some(failure.diagnosis.as_str().to_owned()),
            ),
            None => (None, None),
        };

        Self {
            status: status.state.as_str().to_owned(),
            last_error,
            diagnosis,
        }
    }
}

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HealthResponse {
    pub success: bool,

    /// ok or degraded
    pub status: String,

    pub database: DatabaseHealth,

    pub uptime_seconds: u64,

    pub environment: String,

    /// Time of the check (RFC 3339)
    pub timestamp: String,
}

/// Healthcheck handler
///
/// Probes storage and reports 503 while it is unreachable.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Storage connected"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Storage unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let storage = state.app.health.check_storage().await;
    let connected = storage.is_connected();

    observe_storage(connected);

    if !connected {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(HealthResponse {
        success: connected,
        status: if connected { "ok" } else { "degraded" }.to_owned(),
        database: storage.into(),
        uptime_seconds: state.uptime_seconds(),
        environment: state.environment.as_str().to_owned(),
        timestamp: Timestamp::now().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use catalog_app::{
        database::{ConnectionDiagnosis, ConnectionFailure, ConnectionState},
        health::MockHealthService,
    };

    use crate::test_helpers::{connected_status, health_service};

    use super::*;

    fn make_service(health: MockHealthService) -> Service {
        health_service(health, Router::with_path("health").get(handler))
    }

    #[tokio::test]
    async fn test_healthcheck_connected() -> TestResult {
        let mut health = MockHealthService::new();

        health
            .expect_check_storage()
            .once()
            .return_once(connected_status);

        health.expect_storage_status().never();

        let mut res = TestClient::get("http://example.com/health")
            .send(&make_service(health))
            .await;

        let response: HealthResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(response.success);
        assert_eq!(response.status, "ok");
        assert_eq!(response.database.status, "connected");
        assert_eq!(response.environment, "test");

        Ok(())
    }

    #[tokio::test]
    async fn test_healthcheck_unreachable_storage_returns_503() -> TestResult {
        let mut health = MockHealthService::new();

        health.expect_check_storage().once().return_once(|| StorageStatus {
            state: ConnectionState::Disconnected,
            last_error: Some(ConnectionFailure {
                message: "password authentication failed for user \"catalog\"".to_string(),
                diagnosis: ConnectionDiagnosis::Authentication,
                occurred_at: Timestamp::UNIX_EPOCH,
            }),
            checked_at: Some(Timestamp::UNIX_EPOCH),
        });

        health.expect_storage_status().never();

        let mut res = TestClient::get("http://example.com/health")
            .send(&make_service(health))
            .await;

        let response: HealthResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!response.success);
        assert_eq!(response.status, "degraded");
        assert_eq!(
            response.database,
            DatabaseHealth {
                status: "disconnected".to_string(),
                last_error: Some(
                    "password authentication failed for user \"catalog\"".to_string()
                ),
                diagnosis: Some("authentication".to_string()),
            }
        );

        Ok(())
    }
}
