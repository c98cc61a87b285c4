//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Profile errors
//! - 4xxx: Card errors
//! - 5xxx: Analytics errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes travel as plain u16 values so the web client can switch on them
/// without sharing Rust types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 3xxx: Profile ====================
    /// Personal info has not been created yet
    ProfileNotFound = 3001,
    /// Personal info is missing the full name
    ProfileIncomplete = 3002,
    /// Professional entry not found
    ProfessionalNotFound = 3101,
    /// Education entry not found
    EducationNotFound = 3201,
    /// Award entry not found
    AwardNotFound = 3301,
    /// Product or service entry not found
    ProductNotFound = 3401,
    /// Gallery photo not found
    PhotoNotFound = 3501,

    // ==================== 4xxx: Card ====================
    /// Card not found (or not active)
    CardNotFound = 4001,
    /// Slug already used by another card
    SlugTaken = 4002,
    /// Slug contains characters outside [a-z0-9-]
    SlugInvalid = 4003,
    /// Card name is empty
    CardNameRequired = 4004,

    // ==================== 5xxx: Analytics ====================
    /// Requested analytics window is out of range
    AnalyticsWindowInvalid = 5001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Profile
            ErrorCode::ProfileNotFound => "Personal info not found",
            ErrorCode::ProfileIncomplete => "Complete your profile before creating a card",
            ErrorCode::ProfessionalNotFound => "Professional entry not found",
            ErrorCode::EducationNotFound => "Education entry not found",
            ErrorCode::AwardNotFound => "Award not found",
            ErrorCode::ProductNotFound => "Product or service not found",
            ErrorCode::PhotoNotFound => "Photo not found",

            // Card
            ErrorCode::CardNotFound => "Card not found",
            ErrorCode::SlugTaken => "This URL slug is already taken",
            ErrorCode::SlugInvalid => "Slug may only contain lowercase letters, numbers and dashes",
            ErrorCode::CardNameRequired => "Card name is required",

            // Analytics
            ErrorCode::AnalyticsWindowInvalid => "Analytics window is out of range",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Returned when a u16 does not map to any [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Profile
            3001 => Ok(ErrorCode::ProfileNotFound),
            3002 => Ok(ErrorCode::ProfileIncomplete),
            3101 => Ok(ErrorCode::ProfessionalNotFound),
            3201 => Ok(ErrorCode::EducationNotFound),
            3301 => Ok(ErrorCode::AwardNotFound),
            3401 => Ok(ErrorCode::ProductNotFound),
            3501 => Ok(ErrorCode::PhotoNotFound),

            // Card
            4001 => Ok(ErrorCode::CardNotFound),
            4002 => Ok(ErrorCode::SlugTaken),
            4003 => Ok(ErrorCode::SlugInvalid),
            4004 => Ok(ErrorCode::CardNameRequired),

            // Analytics
            5001 => Ok(ErrorCode::AnalyticsWindowInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::ProfileIncomplete.code(), 3002);
        assert_eq!(ErrorCode::ProfessionalNotFound.code(), 3101);
        assert_eq!(ErrorCode::CardNotFound.code(), 4001);
        assert_eq!(ErrorCode::SlugTaken.code(), 4002);
        assert_eq!(ErrorCode::AnalyticsWindowInvalid.code(), 5001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1004), Ok(ErrorCode::TokenInvalid));
        assert_eq!(ErrorCode::try_from(4003), Ok(ErrorCode::SlugInvalid));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
        // retired codes no longer decode
        assert_eq!(ErrorCode::try_from(2001), Err(InvalidErrorCode(2001)));
        assert_eq!(ErrorCode::try_from(9004), Err(InvalidErrorCode(9004)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::CardNotFound).unwrap();
        assert_eq!(json, "4001");

        let code: ErrorCode = serde_json::from_str("4002").unwrap();
        assert_eq!(code, ErrorCode::SlugTaken);

        let result: Result<ErrorCode, _> = serde_json::from_str("1234");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_and_message() {
        assert_eq!(format!("{}", ErrorCode::CardNotFound), "4001");
        assert_eq!(ErrorCode::CardNotFound.message(), "Card not found");
        assert_eq!(
            format!("{}", InvalidErrorCode(7)),
            "invalid error code: 7"
        );
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::CardNotFound.is_success());
    }
}
