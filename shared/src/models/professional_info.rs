//! Professional Info Model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Professional entry (zero or more per user)
///
/// `is_primary` is stored as the user set it; nothing enforces a single
/// primary entry and no behavior depends on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProfessionalInfo {
    pub id: String,
    pub user_id: String,
    pub designation: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub company_logo_url: Option<String>,
    pub office_address: Option<Value>,
    pub office_email: Option<String>,
    pub office_phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub department: Option<String>,
    pub office_opening_time: Option<String>,
    pub office_closing_time: Option<String>,
    pub office_days: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub is_primary: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create professional entry payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionalInfoCreate {
    pub designation: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub company_logo_url: Option<String>,
    pub office_address: Option<Value>,
    pub office_email: Option<String>,
    pub office_phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub department: Option<String>,
    pub office_opening_time: Option<String>,
    pub office_closing_time: Option<String>,
    pub office_days: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Update professional entry payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionalInfoUpdate {
    pub designation: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub company_logo_url: Option<String>,
    pub office_address: Option<Value>,
    pub office_email: Option<String>,
    pub office_phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub department: Option<String>,
    pub office_opening_time: Option<String>,
    pub office_closing_time: Option<String>,
    pub office_days: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub is_primary: Option<bool>,
}

impl ProfessionalInfo {
    /// Apply the fields present in `update`
    pub fn apply(&mut self, update: ProfessionalInfoUpdate) {
        macro_rules! set {
            ($($field:ident),*) => {
                $(if let Some(v) = update.$field { self.$field = Some(v); })*
            };
        }
        set!(
            designation,
            company_name,
            company_website,
            company_logo_url,
            office_address,
            office_email,
            office_phone,
            whatsapp_number,
            department,
            office_opening_time,
            office_closing_time,
            office_days,
            instagram_url,
            facebook_url,
            linkedin_url
        );
        if let Some(primary) = update.is_primary {
            self.is_primary = primary;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut entry = ProfessionalInfo {
            designation: Some("Engineer".into()),
            company_name: Some("Acme".into()),
            ..Default::default()
        };
        entry.apply(ProfessionalInfoUpdate {
            designation: Some("Lead Engineer".into()),
            is_primary: Some(true),
            ..Default::default()
        });

        assert_eq!(entry.designation.as_deref(), Some("Lead Engineer"));
        assert_eq!(entry.company_name.as_deref(), Some("Acme"));
        assert!(entry.is_primary);
    }
}
