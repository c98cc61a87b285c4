//! Analytics API
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/analytics | GET | `?days=1..365`, defaults to the configured window |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/analytics", get(handler::summary))
}
