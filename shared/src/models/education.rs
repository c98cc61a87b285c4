//! Education Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Education {
    pub id: String,
    pub user_id: String,
    pub degree_name: String,
    pub institution: String,
    pub year_completed: Option<i32>,
    pub description: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationCreate {
    pub degree_name: String,
    pub institution: String,
    pub year_completed: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationUpdate {
    pub degree_name: Option<String>,
    pub institution: Option<String>,
    pub year_completed: Option<i32>,
    pub description: Option<String>,
}

impl Education {
    pub fn apply(&mut self, update: EducationUpdate) {
        if let Some(v) = update.degree_name {
            self.degree_name = v;
        }
        if let Some(v) = update.institution {
            self.institution = v;
        }
        if update.year_completed.is_some() {
            self.year_completed = update.year_completed;
        }
        if update.description.is_some() {
            self.description = update.description;
        }
    }
}
