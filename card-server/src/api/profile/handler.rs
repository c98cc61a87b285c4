//! Profile API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::AppResult;
use shared::models::{
    Award, AwardCreate, AwardUpdate, Education, EducationCreate, EducationUpdate, GalleryPhoto,
    GalleryPhotoCreate, GalleryPhotoUpdate, PersonalInfo, PersonalInfoUpsert, ProductService,
    ProductServiceCreate, ProductServiceUpdate, ProfessionalInfo, ProfessionalInfoCreate,
    ProfessionalInfoUpdate, ProfileCompletion,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::profile;

/// GET /api/profile/personal
pub async fn get_personal(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<PersonalInfo>> {
    Ok(Json(profile::get_personal_info(&state, &user.id).await?))
}

/// PUT /api/profile/personal - create or replace
pub async fn upsert_personal(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PersonalInfoUpsert>,
) -> AppResult<Json<PersonalInfo>> {
    Ok(Json(profile::upsert_personal_info(&state, &user.id, payload).await?))
}

/// GET /api/profile/completion
pub async fn completion(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ProfileCompletion>> {
    Ok(Json(profile::completion(&state, &user.id).await?))
}

// ========== Professional ==========

pub async fn list_professional(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ProfessionalInfo>>> {
    Ok(Json(profile::list_professional(&state, &user.id).await?))
}

pub async fn create_professional(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProfessionalInfoCreate>,
) -> AppResult<Json<ProfessionalInfo>> {
    Ok(Json(profile::create_professional(&state, &user.id, payload).await?))
}

pub async fn update_professional(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProfessionalInfoUpdate>,
) -> AppResult<Json<ProfessionalInfo>> {
    Ok(Json(profile::update_professional(&state, &user.id, &id, payload).await?))
}

/// DELETE /api/profile/professional/{id} - also unselects it on every card
pub async fn delete_professional(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    profile::delete_professional(&state, &user.id, &id).await?;
    Ok(Json(true))
}

// ========== Education ==========

pub async fn list_education(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Education>>> {
    Ok(Json(profile::list_education(&state, &user.id).await?))
}

pub async fn create_education(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<EducationCreate>,
) -> AppResult<Json<Education>> {
    Ok(Json(profile::create_education(&state, &user.id, payload).await?))
}

pub async fn update_education(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<EducationUpdate>,
) -> AppResult<Json<Education>> {
    Ok(Json(profile::update_education(&state, &user.id, &id, payload).await?))
}

pub async fn delete_education(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    profile::delete_education(&state, &user.id, &id).await?;
    Ok(Json(true))
}

// ========== Awards ==========

pub async fn list_awards(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Award>>> {
    Ok(Json(profile::list_awards(&state, &user.id).await?))
}

pub async fn create_award(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<AwardCreate>,
) -> AppResult<Json<Award>> {
    Ok(Json(profile::create_award(&state, &user.id, payload).await?))
}

pub async fn update_award(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<AwardUpdate>,
) -> AppResult<Json<Award>> {
    Ok(Json(profile::update_award(&state, &user.id, &id, payload).await?))
}

pub async fn delete_award(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    profile::delete_award(&state, &user.id, &id).await?;
    Ok(Json(true))
}

// ========== Products & services ==========

pub async fn list_products(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ProductService>>> {
    Ok(Json(profile::list_products(&state, &user.id).await?))
}

pub async fn create_product(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductServiceCreate>,
) -> AppResult<Json<ProductService>> {
    Ok(Json(profile::create_product(&state, &user.id, payload).await?))
}

pub async fn update_product(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductServiceUpdate>,
) -> AppResult<Json<ProductService>> {
    Ok(Json(profile::update_product(&state, &user.id, &id, payload).await?))
}

pub async fn delete_product(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    profile::delete_product(&state, &user.id, &id).await?;
    Ok(Json(true))
}

// ========== Photo gallery ==========

pub async fn list_photos(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<GalleryPhoto>>> {
    Ok(Json(profile::list_photos(&state, &user.id).await?))
}

pub async fn create_photo(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<GalleryPhotoCreate>,
) -> AppResult<Json<GalleryPhoto>> {
    Ok(Json(profile::create_photo(&state, &user.id, payload).await?))
}

pub async fn update_photo(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<GalleryPhotoUpdate>,
) -> AppResult<Json<GalleryPhoto>> {
    Ok(Json(profile::update_photo(&state, &user.id, &id, payload).await?))
}

pub async fn delete_photo(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    profile::delete_photo(&state, &user.id, &id).await?;
    Ok(Json(true))
}
