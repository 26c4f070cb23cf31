//! Application router: drafting and session routes behind shared layers.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::drafting::{drafting_routes, DraftingHandlers};
use super::session::{session_routes, SessionHandlers};

/// Builds the full HTTP application.
pub fn app_router(
    drafting: DraftingHandlers,
    sessions: SessionHandlers,
    server: &ServerConfig,
) -> Router {
    Router::new()
        .merge(drafting_routes(drafting))
        .merge(session_routes(sessions))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the browser client.
///
/// Without configured origins, development allows any origin and
/// production allows none.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if !origins.is_empty() {
        base.allow_origin(AllowOrigin::list(origins))
    } else if server.is_production() {
        tracing::warn!("No CORS origins configured; cross-origin requests are refused");
        base
    } else {
        base.allow_origin(Any)
    }
}
