//! Card View Event Model

use serde::{Deserialize, Serialize};

/// One recorded public fetch of a card. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ViewEvent {
    pub id: String,
    pub card_id: String,
    /// Unix millis (UTC)
    pub viewed_at: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Visitor metadata captured from the public request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewContext {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}
