//! View event aggregation
//!
//! Pure batch functions over one owner's view events. Geo-IP resolution
//! happens beforehand (see [`super::geo`]); here it is only a lookup map.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use shared::models::ViewEvent;
use std::collections::{HashMap, HashSet};

use super::geo::GeoLocation;

pub const UNKNOWN_LOCATION: &str = "Unknown";
pub const DIRECT_REFERRER: &str = "Direct";

/// Card id → current card name
pub type CardNames = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardViews {
    pub card_id: String,
    pub card_name: String,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateViews {
    /// `YYYY-MM-DD`, UTC
    pub date: NaiveDate,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationViews {
    pub location: String,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferrerViews {
    pub referrer: String,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentView {
    pub id: String,
    pub card_id: String,
    pub card_name: Option<String>,
    pub viewed_at: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Everything the analytics page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    pub total_views: u64,
    pub unique_visitors: u64,
    pub views_by_card: Vec<CardViews>,
    pub views_by_date: Vec<DateViews>,
    pub views_by_location: Vec<LocationViews>,
    pub top_referrers: Vec<ReferrerViews>,
    pub recent_views: Vec<RecentView>,
}

/// Knobs for [`summarize`]
#[derive(Debug, Clone, Copy)]
pub struct SummaryOptions {
    pub window_days: u32,
    pub today: NaiveDate,
    pub top_referrers: usize,
    pub recent_views: usize,
}

pub fn total_views(events: &[ViewEvent]) -> u64 {
    events.len() as u64
}

/// Distinct non-blank IPs; events without an IP are not visitors
pub fn unique_visitors(events: &[ViewEvent]) -> u64 {
    events
        .iter()
        .filter_map(client_ip)
        .collect::<HashSet<_>>()
        .len() as u64
}

/// Views per card, busiest first. Events for cards missing from `names`
/// are skipped.
pub fn views_by_card(events: &[ViewEvent], names: &CardNames) -> Vec<CardViews> {
    count_first_seen(
        events
            .iter()
            .filter(|e| names.contains_key(&e.card_id))
            .map(|e| e.card_id.clone()),
    )
    .into_iter()
    .map(|(card_id, views)| CardViews {
        card_name: names.get(&card_id).cloned().unwrap_or_default(),
        card_id,
        views,
    })
    .collect()
}

/// `window_days` consecutive days ending `today`, zero-filled.
///
/// Events outside the window are ignored.
pub fn views_by_date(events: &[ViewEvent], window_days: u32, today: NaiveDate) -> Vec<DateViews> {
    let Some(start) = window_days
        .checked_sub(1)
        .and_then(|back| today.checked_sub_days(Days::new(u64::from(back))))
    else {
        return Vec::new();
    };

    let mut series: Vec<DateViews> = start
        .iter_days()
        .take(window_days as usize)
        .map(|date| DateViews { date, views: 0 })
        .collect();

    for event in events {
        let Some(date) = event_date(event) else {
            continue;
        };
        if date < start || date > today {
            continue;
        }
        let offset = (date - start).num_days() as usize;
        if let Some(bucket) = series.get_mut(offset) {
            bucket.views += 1;
        }
    }
    series
}

/// Views per resolved location, busiest first.
///
/// Events without an IP, or whose IP is absent from `resolved`, fall into
/// [`UNKNOWN_LOCATION`].
pub fn views_by_location(
    events: &[ViewEvent],
    resolved: &HashMap<String, GeoLocation>,
) -> Vec<LocationViews> {
    count_first_seen(events.iter().map(|e| {
        client_ip(e)
            .and_then(|ip| resolved.get(ip))
            .map(GeoLocation::label)
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
    }))
    .into_iter()
    .map(|(location, views)| LocationViews { location, views })
    .collect()
}

/// Referrer hostnames by count; ties keep first-seen order
pub fn top_referrers(events: &[ViewEvent], limit: usize) -> Vec<ReferrerViews> {
    let mut counted = count_first_seen(events.iter().map(|e| referrer_host(e.referrer.as_deref())));
    counted.truncate(limit);
    counted
        .into_iter()
        .map(|(referrer, views)| ReferrerViews { referrer, views })
        .collect()
}

/// Newest `limit` events with their card's current name
pub fn recent_views(events: &[ViewEvent], names: &CardNames, limit: usize) -> Vec<RecentView> {
    let mut sorted: Vec<&ViewEvent> = events.iter().collect();
    sorted.sort_by(|a, b| b.viewed_at.cmp(&a.viewed_at));
    sorted
        .into_iter()
        .take(limit)
        .map(|e| RecentView {
            id: e.id.clone(),
            card_id: e.card_id.clone(),
            card_name: names.get(&e.card_id).cloned(),
            viewed_at: e.viewed_at,
            ip_address: e.ip_address.clone(),
            user_agent: e.user_agent.clone(),
            referrer: e.referrer.clone(),
        })
        .collect()
}

pub fn summarize(
    events: &[ViewEvent],
    names: &CardNames,
    resolved: &HashMap<String, GeoLocation>,
    options: SummaryOptions,
) -> AnalyticsSummary {
    AnalyticsSummary {
        total_views: total_views(events),
        unique_visitors: unique_visitors(events),
        views_by_card: views_by_card(events, names),
        views_by_date: views_by_date(events, options.window_days, options.today),
        views_by_location: views_by_location(events, resolved),
        top_referrers: top_referrers(events, options.top_referrers),
        recent_views: recent_views(events, names, options.recent_views),
    }
}

/// Distinct client IPs in first-seen order
pub fn distinct_ips(events: &[ViewEvent]) -> Vec<String> {
    let mut seen = HashSet::new();
    events
        .iter()
        .filter_map(client_ip)
        .filter(|ip| seen.insert(*ip))
        .map(String::from)
        .collect()
}

/// Hostname of a referrer URL, [`DIRECT_REFERRER`] when empty or unparsable
pub fn referrer_host(referrer: Option<&str>) -> String {
    referrer
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .and_then(|r| url::Url::parse(r).ok())
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| DIRECT_REFERRER.to_string())
}

fn client_ip(event: &ViewEvent) -> Option<&str> {
    event
        .ip_address
        .as_deref()
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
}

fn event_date(event: &ViewEvent) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(event.viewed_at).map(|dt| dt.date_naive())
}

/// Count keys, sorted by count descending with first-seen order on ties
fn count_first_seen(keys: impl Iterator<Item = String>) -> Vec<(String, u64)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();
    for key in keys {
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    // stable sort keeps insertion order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
