//! Shared types for the card builder
//!
//! Error codes and response envelopes, domain models (including the
//! per-card field selection), and small utilities used by card-server and
//! mirrored by the web client.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
