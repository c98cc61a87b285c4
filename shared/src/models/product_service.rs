//! Product / Service Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductService {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub photo_url: Option<String>,
    pub website_link: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductServiceCreate {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub photo_url: Option<String>,
    pub website_link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductServiceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub photo_url: Option<String>,
    pub website_link: Option<String>,
}

impl ProductService {
    pub fn apply(&mut self, update: ProductServiceUpdate) {
        if let Some(v) = update.name {
            self.name = v;
        }
        if update.description.is_some() {
            self.description = update.description;
        }
        if update.category.is_some() {
            self.category = update.category;
        }
        if update.photo_url.is_some() {
            self.photo_url = update.photo_url;
        }
        if update.website_link.is_some() {
            self.website_link = update.website_link;
        }
    }
}
