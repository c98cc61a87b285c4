//! Analytics API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::error::AppResult;

use crate::analytics::AnalyticsSummary;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::analytics;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub days: Option<u32>,
}

/// GET /api/analytics - summary over all of the caller's cards
pub async fn summary(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<AnalyticsSummary>> {
    Ok(Json(analytics::summary(&state, &user.id, query.days).await?))
}
