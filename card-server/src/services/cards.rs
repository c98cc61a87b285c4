//! Card service
//!
//! Card CRUD for the owner plus the public slug lookup. A public fetch
//! records one view event; the owner's preview does not.

use serde::Serialize;
use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Card, CardCreate, CardUpdate, DEFAULT_TEMPLATE, FieldSelectionConfig, ViewContext,
};
use shared::util::{generate_unique_slug, is_valid_slug, new_id, now_millis, sanitize_slug};

use super::profile::load_snapshot;
use crate::core::ServerState;
use crate::projection::{self, ProjectedCard};
use crate::store::{CardStore, ProfileStore, StoreError};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_SLUG_LEN, validate_optional_text,
};

const SLUG_ATTEMPTS: usize = 5;

/// A card rendered for display
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub template_type: String,
    pub design_config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub profile: ProjectedCard,
}

impl CardView {
    fn new(card: Card, profile: ProjectedCard) -> Self {
        Self {
            display_address: profile.display_address().map(String::from),
            tagline: profile.tagline().map(String::from),
            id: card.id,
            name: card.name,
            slug: card.slug,
            template_type: card.template_type,
            design_config: card.design_config,
            profile,
        }
    }
}

/// vCard download body and file name
#[derive(Debug, Clone)]
pub struct ContactFile {
    pub file_name: String,
    pub body: String,
}

// ========== Public ==========

/// Resolve an active card by slug, project it and record the view.
///
/// A failed view insert is logged and does not fail the fetch.
pub async fn public_card(state: &ServerState, slug: &str, ctx: ViewContext) -> AppResult<CardView> {
    let card = active_card(state, slug).await?;
    let snapshot = load_snapshot(state, &card.user_id).await?;
    let profile = projection::project(&snapshot, &card.fields_config);

    if let Err(e) = state.cards.record_view(&card.id, &ctx).await {
        tracing::warn!(card_id = %card.id, error = %e, "Failed to record card view");
    }

    Ok(CardView::new(card, profile))
}

/// vCard for an active card; does not count as a view
pub async fn public_vcard(state: &ServerState, slug: &str) -> AppResult<ContactFile> {
    let card = active_card(state, slug).await?;
    let snapshot = load_snapshot(state, &card.user_id).await?;
    let profile = projection::project(&snapshot, &card.fields_config);
    Ok(ContactFile {
        file_name: projection::contact_file_name(&profile),
        body: projection::to_vcard(&profile),
    })
}

async fn active_card(state: &ServerState, slug: &str) -> AppResult<Card> {
    state
        .cards
        .get_active_card_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::card_not_found(slug))
}

// ========== Owner ==========

pub async fn list_cards(state: &ServerState, user_id: &str) -> AppResult<Vec<Card>> {
    Ok(state.cards.list_cards(user_id).await?)
}

pub async fn get_card(state: &ServerState, user_id: &str, id: &str) -> AppResult<Card> {
    state
        .cards
        .get_card(user_id, id)
        .await?
        .ok_or_else(|| AppError::card_not_found(id))
}

/// Owner preview of any own card, active or not
pub async fn preview_card(state: &ServerState, user_id: &str, id: &str) -> AppResult<CardView> {
    let card = get_card(state, user_id, id).await?;
    let snapshot = load_snapshot(state, user_id).await?;
    let profile = projection::project(&snapshot, &card.fields_config);
    Ok(CardView::new(card, profile))
}

/// Create a card. Requires a complete profile; the owner's first card
/// becomes the default.
pub async fn create_card(state: &ServerState, user_id: &str, input: CardCreate) -> AppResult<Card> {
    let complete = state
        .profiles
        .get_personal_info(user_id)
        .await?
        .is_some_and(|p| p.is_complete());
    if !complete {
        return Err(AppError::new(ErrorCode::ProfileIncomplete));
    }

    let name = validate_card_name(&input.name)?;
    validate_optional_text(&input.template_type, "template_type", MAX_SHORT_TEXT_LEN)?;

    let slug = match input.slug.as_deref() {
        Some(requested) => {
            let slug = normalize_slug(requested)?;
            if state.cards.slug_exists(&slug, None).await? {
                return Err(AppError::slug_taken(slug));
            }
            slug
        }
        None => free_slug(state, &name).await?,
    };

    let is_first = state.cards.list_cards(user_id).await?.is_empty();
    let now = now_millis();
    let card = Card {
        id: new_id(),
        user_id: user_id.to_string(),
        name,
        slug,
        template_type: input
            .template_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
        fields_config: input
            .fields_config
            .unwrap_or_else(FieldSelectionConfig::starter),
        design_config: input.design_config,
        is_default: is_first,
        is_active: input.is_active,
        created_at: now,
        updated_at: now,
    };

    state
        .cards
        .create_card(&card)
        .await
        .map_err(|e| slug_conflict(e, &card.slug))?;
    tracing::info!(card_id = %card.id, slug = %card.slug, "Card created");
    Ok(card)
}

pub async fn update_card(
    state: &ServerState,
    user_id: &str,
    id: &str,
    mut input: CardUpdate,
) -> AppResult<Card> {
    let mut card = get_card(state, user_id, id).await?;

    if let Some(name) = input.name.as_deref() {
        input.name = Some(validate_card_name(name)?);
    }
    validate_optional_text(&input.template_type, "template_type", MAX_SHORT_TEXT_LEN)?;
    if let Some(requested) = input.slug.as_deref() {
        let slug = normalize_slug(requested)?;
        if slug != card.slug && state.cards.slug_exists(&slug, Some(&card.id)).await? {
            return Err(AppError::slug_taken(slug));
        }
        input.slug = Some(slug);
    }

    card.apply(input);
    card.updated_at = now_millis();
    state
        .cards
        .update_card(&card)
        .await
        .map_err(|e| slug_conflict(e, &card.slug))?;
    Ok(card)
}

/// Delete a card and its view history
pub async fn delete_card(state: &ServerState, user_id: &str, id: &str) -> AppResult<()> {
    if !state.cards.delete_card(user_id, id).await? {
        return Err(AppError::card_not_found(id));
    }
    tracing::info!(card_id = %id, "Card deleted");
    Ok(())
}

/// Make one card the default, clearing the flag on the owner's others
pub async fn set_default_card(state: &ServerState, user_id: &str, id: &str) -> AppResult<Card> {
    if !state.cards.set_default_card(user_id, id).await? {
        return Err(AppError::card_not_found(id));
    }
    get_card(state, user_id, id).await
}

/// Whether `slug` is well formed and unused (ignoring `exclude_id`)
pub async fn slug_available(
    state: &ServerState,
    slug: &str,
    exclude_id: Option<&str>,
) -> AppResult<bool> {
    let Ok(slug) = normalize_slug(slug) else {
        return Ok(false);
    };
    Ok(!state.cards.slug_exists(&slug, exclude_id).await?)
}

fn validate_card_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::new(ErrorCode::CardNameRequired));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "name is too long ({} chars, max {MAX_NAME_LEN})",
            name.len()
        )));
    }
    Ok(name.to_string())
}

/// Sanitize a user-typed slug and check it is well formed
fn normalize_slug(input: &str) -> AppResult<String> {
    let slug = sanitize_slug(input.trim());
    if slug.len() > MAX_SLUG_LEN || !is_valid_slug(&slug) {
        return Err(AppError::with_message(
            ErrorCode::SlugInvalid,
            format!("Invalid slug: {input}"),
        )
        .with_detail("slug", input));
    }
    Ok(slug)
}

/// Generated slug for a card name that no card uses yet
async fn free_slug(state: &ServerState, name: &str) -> AppResult<String> {
    let mut base: String = name.chars().take(MAX_SLUG_LEN - 10).collect();
    base = base.trim().to_string();
    for _ in 0..SLUG_ATTEMPTS {
        let slug = generate_unique_slug(&base);
        if !state.cards.slug_exists(&slug, None).await? {
            return Ok(slug);
        }
    }
    Err(AppError::internal("Could not generate a free slug"))
}

fn slug_conflict(err: StoreError, slug: &str) -> AppError {
    match err {
        StoreError::Duplicate(_) => AppError::slug_taken(slug),
        other => other.into(),
    }
}
