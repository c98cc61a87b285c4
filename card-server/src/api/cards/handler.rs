//! Card API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::models::{Card, CardCreate, CardUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::cards::{self, CardView};

/// GET /api/cards
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Card>>> {
    Ok(Json(cards::list_cards(&state, &user.id).await?))
}

/// GET /api/cards/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Card>> {
    Ok(Json(cards::get_card(&state, &user.id, &id).await?))
}

/// POST /api/cards
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CardCreate>,
) -> AppResult<Json<Card>> {
    Ok(Json(cards::create_card(&state, &user.id, payload).await?))
}

/// PUT /api/cards/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CardUpdate>,
) -> AppResult<Json<Card>> {
    Ok(Json(cards::update_card(&state, &user.id, &id, payload).await?))
}

/// DELETE /api/cards/{id} - drops the card's view history too
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    cards::delete_card(&state, &user.id, &id).await?;
    Ok(Json(true))
}

/// POST /api/cards/{id}/default
pub async fn set_default(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Card>> {
    Ok(Json(cards::set_default_card(&state, &user.id, &id).await?))
}

/// GET /api/cards/{id}/preview
pub async fn preview(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<CardView>> {
    Ok(Json(cards::preview_card(&state, &user.id, &id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SlugQuery {
    pub slug: String,
    /// Card being edited; its own slug counts as available
    pub exclude: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SlugAvailability {
    pub slug: String,
    pub available: bool,
}

/// GET /api/cards/slug-available?slug=
pub async fn slug_available(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Query(query): Query<SlugQuery>,
) -> AppResult<Json<SlugAvailability>> {
    let available = cards::slug_available(&state, &query.slug, query.exclude.as_deref()).await?;
    Ok(Json(SlugAvailability {
        slug: query.slug,
        available,
    }))
}
