//! Public card API (no authentication)
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/public/cards/{slug} | GET | records one view |
//! | /api/public/cards/{slug}/vcard | GET | `text/vcard` download |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/public/cards", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{slug}", get(handler::get_card))
        .route("/{slug}/vcard", get(handler::get_vcard))
}
