//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`public`] - slug lookup and vCard download (no auth)
//! - [`profile`] - personal info and profile collections
//! - [`cards`] - card CRUD, default flag, preview, slug availability
//! - [`analytics`] - view summary

pub mod analytics;
pub mod cards;
pub mod health;
pub mod profile;
pub mod public;

use axum::{Router, middleware};
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Routes behind bearer authentication
fn protected_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(profile::router())
        .merge(cards::router())
        .merge(analytics::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

/// Build the application with every route, middleware and state applied
pub fn build_app(state: ServerState) -> Router {
    Router::new()
        // Public
        .merge(health::router())
        .merge(public::router())
        // Owner API
        .merge(protected_router(&state))
        // ========== Tower HTTP Middleware ==========
        .layer(cors_layer(&state.config.cors_origins))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .with_state(state)
}

/// Permissive when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
