//! Personal Info Model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Personal info entity (one per user)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PersonalInfo {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub primary_email: Option<String>,
    pub secondary_email: Option<String>,
    pub mobile_number: Option<String>,
    /// Alternate phone, exposed under the `alternate_mobile` flag
    pub phone_number: Option<String>,
    pub whatsapp_number: Option<String>,
    /// String, array of parts, or object of named parts
    pub home_address: Option<Value>,
    pub bio: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub profile_photo_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PersonalInfo {
    /// A profile is complete once it has a non-blank full name
    pub fn is_complete(&self) -> bool {
        !self.full_name.trim().is_empty()
    }
}

/// Create-or-replace personal info payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfoUpsert {
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub primary_email: Option<String>,
    pub secondary_email: Option<String>,
    pub mobile_number: Option<String>,
    pub phone_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub home_address: Option<Value>,
    pub bio: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub profile_photo_url: Option<String>,
}

/// Profile completion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCompletion {
    pub has_personal_info: bool,
    pub is_complete: bool,
}

impl ProfileCompletion {
    pub fn of(info: Option<&PersonalInfo>) -> Self {
        Self {
            has_personal_info: info.is_some(),
            is_complete: info.is_some_and(PersonalInfo::is_complete),
        }
    }
}
