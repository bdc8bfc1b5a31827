//! Liveness and readiness endpoints

use crate::server::service::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Liveness probe
///
/// Returns 200 OK with a static body. No I/O.
pub(super) async fn health() -> Json<Value> {
    debug!("Liveness probe: OK");
    Json(json!({
        "status": "ok",
        "message": "service is running",
    }))
}

/// Readiness probe
///
/// Returns 200 OK when the store health check passes, 503 otherwise.
pub(super) async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let storage = state.commands.storage();
    match storage.health_check().await {
        Ok(()) => {
            debug!("Readiness probe: OK");
            (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "backend": storage.backend_name(),
                })),
            )
        }
        Err(e) => {
            warn!(error = %e, "Readiness probe: NOT READY");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "backend": storage.backend_name(),
                    "message": e.to_string(),
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::commands::CommandHandler;
    use hosts_directory_storage::backends::sqlite::SqliteStorage;
    use hosts_directory_storage::Storage;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_health_is_static() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_ready_when_schema_exists() {
        let storage = SqliteStorage::new(":memory:").await.unwrap();
        storage.initialize().await.unwrap();
        let state = AppState::new(Arc::new(CommandHandler::new(Arc::new(storage))));

        let (status, Json(body)) = ready(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "sqlite");
    }

    #[tokio::test]
    async fn test_not_ready_without_schema() {
        let storage = SqliteStorage::new(":memory:").await.unwrap();
        let state = AppState::new(Arc::new(CommandHandler::new(Arc::new(storage))));

        let (status, Json(body)) = ready(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unavailable");
    }
}
