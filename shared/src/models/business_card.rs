//! Business Card Model

use super::fields_config::FieldSelectionConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TEMPLATE: &str = "modern";

/// Business card entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Card {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Globally unique public URL segment
    pub slug: String,
    pub template_type: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub fields_config: FieldSelectionConfig,
    /// Opaque styling blob owned by the web client
    pub design_config: Option<Value>,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create card payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCreate {
    pub name: String,
    /// Generated from the name when omitted
    pub slug: Option<String>,
    pub template_type: Option<String>,
    pub fields_config: Option<FieldSelectionConfig>,
    pub design_config: Option<Value>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Update card payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub template_type: Option<String>,
    pub fields_config: Option<FieldSelectionConfig>,
    pub design_config: Option<Value>,
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}

impl Card {
    /// Apply the fields present in `update`. Slug checks happen before this.
    pub fn apply(&mut self, update: CardUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(template) = update.template_type {
            self.template_type = template;
        }
        if let Some(config) = update.fields_config {
            self.fields_config = config;
        }
        if update.design_config.is_some() {
            self.design_config = update.design_config;
        }
        if let Some(active) = update.is_active {
            self.is_active = active;
        }
    }
}
