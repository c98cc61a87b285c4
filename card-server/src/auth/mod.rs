//! Authentication
//!
//! - [`JwtService`] - HS256 token issue/validation
//! - [`CurrentUser`] - caller identity for owner-scoped handlers
//! - [`require_auth`] - bearer token middleware

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtError, JwtService};
pub use middleware::require_auth;
