//! Card API (owner)
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/cards | GET, POST | |
//! | /api/cards/{id} | GET, PUT, DELETE | |
//! | /api/cards/{id}/default | POST | make default |
//! | /api/cards/{id}/preview | GET | projection, no view recorded |
//! | /api/cards/slug-available | GET | `?slug=..&exclude=<card id>` |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cards", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/slug-available", get(handler::slug_available))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/default", post(handler::set_default))
        .route("/{id}/preview", get(handler::preview))
}
