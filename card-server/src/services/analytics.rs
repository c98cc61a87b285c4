//! Analytics service
//!
//! Loads an owner's view events, resolves their distinct IPs and hands
//! everything to the pure aggregator.

use chrono::Utc;
use shared::error::{AppError, AppResult, ErrorCode};

use crate::analytics::{self, AnalyticsSummary, CardNames, SummaryOptions};
use crate::core::ServerState;
use crate::store::CardStore;

pub const MAX_WINDOW_DAYS: u32 = 365;

/// Dashboard summary over all of the owner's cards.
///
/// `days` overrides the configured by-date window (1..=365).
pub async fn summary(
    state: &ServerState,
    user_id: &str,
    days: Option<u32>,
) -> AppResult<AnalyticsSummary> {
    let window_days = days.unwrap_or(state.config.analytics.window_days);
    if !(1..=MAX_WINDOW_DAYS).contains(&window_days) {
        return Err(AppError::with_message(
            ErrorCode::AnalyticsWindowInvalid,
            format!("days must be between 1 and {MAX_WINDOW_DAYS}"),
        )
        .with_detail("days", window_days));
    }

    let cards = state.cards.list_cards(user_id).await?;
    let names: CardNames = cards
        .iter()
        .map(|c| (c.id.clone(), c.name.clone()))
        .collect();
    let card_ids: Vec<String> = cards.into_iter().map(|c| c.id).collect();

    let events = state.cards.list_views(&card_ids).await?;

    let ips = analytics::distinct_ips(&events);
    let geo = &state.config.geoip;
    let resolved =
        analytics::resolve_locations(state.geo.as_ref(), ips, geo.timeout, geo.concurrency).await;

    tracing::debug!(
        user_id = %user_id,
        events = events.len(),
        located = resolved.len(),
        "Analytics summary"
    );

    Ok(analytics::summarize(
        &events,
        &names,
        &resolved,
        SummaryOptions {
            window_days,
            today: Utc::now().date_naive(),
            top_referrers: state.config.analytics.top_referrers,
            recent_views: state.config.analytics.recent_views,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{GeoError, GeoIpResolver, GeoLocation};
    use crate::core::Config;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use shared::models::{Card, FieldSelectionConfig, ViewEvent};
    use shared::util::now_millis;
    use std::sync::Arc;

    struct FixedResolver;

    #[async_trait]
    impl GeoIpResolver for FixedResolver {
        async fn resolve(&self, ip: &str) -> Result<GeoLocation, GeoError> {
            match ip {
                "1.1.1.1" => Ok(GeoLocation::new(Some("Sydney"), Some("Australia"))),
                _ => Err(GeoError::NoLocation(ip.to_string())),
            }
        }
    }

    fn card(id: &str, user_id: &str, name: &str) -> Card {
        Card {
            id: id.into(),
            user_id: user_id.into(),
            name: name.into(),
            slug: id.into(),
            template_type: "modern".into(),
            fields_config: FieldSelectionConfig::default(),
            design_config: None,
            is_default: false,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn view(id: &str, card_id: &str, ip: Option<&str>, referrer: Option<&str>) -> ViewEvent {
        ViewEvent {
            id: id.into(),
            card_id: card_id.into(),
            viewed_at: now_millis(),
            ip_address: ip.map(String::from),
            user_agent: None,
            referrer: referrer.map(String::from),
        }
    }

    async fn seeded() -> ServerState {
        let store = Arc::new(MemoryStore::new());
        store.create_card(&card("c1", "u1", "Work")).await.unwrap();
        store.create_card(&card("c2", "u1", "Personal")).await.unwrap();
        store.create_card(&card("c3", "u2", "Not mine")).await.unwrap();

        store.insert_view(view("v1", "c1", Some("1.1.1.1"), Some("https://google.com/search?q=jane")));
        store.insert_view(view("v2", "c1", Some("1.1.1.1"), None));
        store.insert_view(view("v3", "c2", Some("9.9.9.9"), Some("https://google.com/")));
        store.insert_view(view("v4", "c3", Some("1.1.1.1"), None));

        ServerState::with_stores(Config::default(), store.clone(), store, Arc::new(FixedResolver))
    }

    #[tokio::test]
    async fn test_summary_scoped_to_owner() {
        let state = seeded().await;
        let s = summary(&state, "u1", None).await.unwrap();

        assert_eq!(s.total_views, 3);
        assert_eq!(s.unique_visitors, 2);
        assert_eq!(s.views_by_card.len(), 2);
        assert_eq!(s.views_by_card[0].card_name, "Work");
        assert_eq!(s.views_by_card[0].views, 2);
        assert_eq!(s.views_by_date.len(), 30);
        assert_eq!(s.views_by_date.last().map(|d| d.views), Some(3));
        assert_eq!(s.recent_views.len(), 3);
    }

    #[tokio::test]
    async fn test_summary_locations_and_referrers() {
        let state = seeded().await;
        let s = summary(&state, "u1", Some(7)).await.unwrap();

        assert_eq!(s.views_by_date.len(), 7);

        assert_eq!(s.views_by_location[0].location, "Sydney, Australia");
        assert_eq!(s.views_by_location[0].views, 2);
        assert_eq!(s.views_by_location[1].location, "Unknown");
        assert_eq!(s.views_by_location[1].views, 1);

        assert_eq!(s.top_referrers[0].referrer, "google.com");
        assert_eq!(s.top_referrers[0].views, 2);
        assert_eq!(s.top_referrers[1].referrer, "Direct");
    }

    #[tokio::test]
    async fn test_summary_without_cards_is_empty() {
        let state = seeded().await;
        let s = summary(&state, "nobody", None).await.unwrap();
        assert_eq!(s.total_views, 0);
        assert!(s.views_by_card.is_empty());
        assert!(s.views_by_date.iter().all(|d| d.views == 0));
    }

    #[tokio::test]
    async fn test_window_out_of_range() {
        let state = seeded().await;
        for days in [0, 366] {
            let err = summary(&state, "u1", Some(days)).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::AnalyticsWindowInvalid);
        }
    }
}
