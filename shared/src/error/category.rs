//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Profile errors (3xxx)
    Profile,
    /// Card errors (4xxx)
    Card,
    /// Analytics errors (5xxx)
    Analytics,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            3000..4000 => Self::Profile,
            4000..5000 => Self::Card,
            5000..6000 => Self::Analytics,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1004), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(3101), ErrorCategory::Profile);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Card);
        assert_eq!(ErrorCategory::from_code(5101), ErrorCategory::Analytics);
        assert_eq!(ErrorCategory::from_code(2002), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(7000), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::SlugTaken.category(), ErrorCategory::Card);
        assert_eq!(ErrorCode::ProfileIncomplete.category(), ErrorCategory::Profile);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&ErrorCategory::Analytics).unwrap();
        assert_eq!(json, "\"analytics\"");
    }
}
