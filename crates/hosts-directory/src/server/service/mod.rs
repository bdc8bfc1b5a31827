//! HTTP service layer for the hosts-directory server
//!
//! Builds the axum router and holds the request handlers. Handlers delegate
//! to the command handler layer and translate results into JSON envelopes
//! or hosts-file text.

mod health;
mod hosts;
pub mod response;

use crate::server::commands::CommandHandler;
use crate::server::config::CorsConfig;
use axum::http::header::{HeaderValue, InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub(crate) commands: Arc<CommandHandler>,
}

impl AppState {
    pub fn new(commands: Arc<CommandHandler>) -> Self {
        Self { commands }
    }
}

/// Build the CORS layer, or `None` when disabled
///
/// Methods and headers are fixed; only the origin is configurable.
pub fn cors_layer(config: &CorsConfig) -> Result<Option<CorsLayer>, InvalidHeaderValue> {
    if !config.enabled {
        return Ok(None);
    }

    let origin = if config.allow_origin == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::exact(HeaderValue::from_str(&config.allow_origin)?)
    };

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION]),
    ))
}

/// Build the application router
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | GET | `/api/v1/hosts`, `/hosts` | list |
/// | POST | `/api/v1/hosts` | create |
/// | GET, PUT, DELETE | `/api/v1/hosts/{id}` | get, update, delete |
/// | GET | `/health`, `/ready` | probes |
pub fn router(state: AppState, cors: Option<CorsLayer>) -> Router {
    let api = Router::new()
        .route("/hosts", get(hosts::list_hosts).post(hosts::create_host))
        .route(
            "/hosts/{id}",
            get(hosts::get_host)
                .put(hosts::update_host)
                .delete(hosts::delete_host),
        );

    let router = Router::new()
        .nest("/api/v1", api)
        .route("/hosts", get(hosts::list_hosts))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_disabled() {
        let config = CorsConfig {
            enabled: false,
            allow_origin: "*".into(),
        };
        assert!(cors_layer(&config).unwrap().is_none());
    }

    #[test]
    fn test_cors_exact_origin() {
        let config = CorsConfig {
            enabled: true,
            allow_origin: "https://dash.home.arpa".into(),
        };
        assert!(cors_layer(&config).unwrap().is_some());
    }

    #[test]
    fn test_cors_invalid_origin() {
        let config = CorsConfig {
            enabled: true,
            allow_origin: "bad\norigin".into(),
        };
        assert!(cors_layer(&config).is_err());
    }
}
