//! Public Card Handlers

use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, Path, State},
    http::{Extensions, HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use shared::error::AppResult;
use shared::models::ViewContext;

use crate::core::ServerState;
use crate::services::cards::{self, CardView};

const VCARD_CONTENT_TYPE: &str = "text/vcard; charset=utf-8";

/// GET /api/public/cards/{slug}
pub async fn get_card(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    extensions: Extensions,
) -> AppResult<Json<CardView>> {
    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let view = cards::public_card(&state, &slug, view_context(&headers, peer)).await?;
    Ok(Json(view))
}

/// GET /api/public/cards/{slug}/vcard
pub async fn get_vcard(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let file = cards::public_vcard(&state, &slug).await?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        file.file_name.replace('"', "_")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"contact.vcf\""));

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(VCARD_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    )
        .into_response())
}

/// Visitor metadata from proxy and browser headers
fn view_context(headers: &HeaderMap, peer: Option<SocketAddr>) -> ViewContext {
    ViewContext {
        ip_address: client_ip(headers, peer),
        user_agent: header_text(headers, header::USER_AGENT.as_str()),
        referrer: header_text(headers, header::REFERER.as_str()),
    }
}

/// First `X-Forwarded-For` hop, then `X-Real-IP`, then the socket peer
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    header_text(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string()))
        .filter(|ip| !ip.is_empty())
        .or_else(|| header_text(headers, "x-real-ip"))
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
