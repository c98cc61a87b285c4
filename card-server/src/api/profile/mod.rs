//! Profile API
//!
//! | Path | Method |
//! |------|--------|
//! | /api/profile/personal | GET, PUT |
//! | /api/profile/completion | GET |
//! | /api/profile/{professional,education,awards,products,photos} | GET, POST |
//! | /api/profile/{professional,education,awards,products,photos}/{id} | PUT, DELETE |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/profile", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/personal", get(handler::get_personal).put(handler::upsert_personal))
        .route("/completion", get(handler::completion))
        .route(
            "/professional",
            get(handler::list_professional).post(handler::create_professional),
        )
        .route(
            "/professional/{id}",
            put(handler::update_professional).delete(handler::delete_professional),
        )
        .route(
            "/education",
            get(handler::list_education).post(handler::create_education),
        )
        .route(
            "/education/{id}",
            put(handler::update_education).delete(handler::delete_education),
        )
        .route("/awards", get(handler::list_awards).post(handler::create_award))
        .route(
            "/awards/{id}",
            put(handler::update_award).delete(handler::delete_award),
        )
        .route(
            "/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            "/products/{id}",
            put(handler::update_product).delete(handler::delete_product),
        )
        .route("/photos", get(handler::list_photos).post(handler::create_photo))
        .route(
            "/photos/{id}",
            put(handler::update_photo).delete(handler::delete_photo),
        )
}
