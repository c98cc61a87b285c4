//! Award / Certification Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Award {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub issuing_org: String,
    /// ISO date (YYYY-MM-DD)
    pub date_received: Option<String>,
    /// ISO date (YYYY-MM-DD)
    pub expiry_date: Option<String>,
    pub certificate_url: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwardCreate {
    pub title: String,
    pub issuing_org: String,
    pub date_received: Option<String>,
    pub expiry_date: Option<String>,
    pub certificate_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwardUpdate {
    pub title: Option<String>,
    pub issuing_org: Option<String>,
    pub date_received: Option<String>,
    pub expiry_date: Option<String>,
    pub certificate_url: Option<String>,
}

impl Award {
    pub fn apply(&mut self, update: AwardUpdate) {
        if let Some(v) = update.title {
            self.title = v;
        }
        if let Some(v) = update.issuing_org {
            self.issuing_org = v;
        }
        if update.date_received.is_some() {
            self.date_received = update.date_received;
        }
        if update.expiry_date.is_some() {
            self.expiry_date = update.expiry_date;
        }
        if update.certificate_url.is_some() {
            self.certificate_url = update.certificate_url;
        }
    }
}
