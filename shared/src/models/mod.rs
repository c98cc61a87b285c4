//! Data models
//!
//! Shared between card-server and the web client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! IDs are UUID strings, timestamps are Unix millis.

pub mod address;
pub mod award;
pub mod business_card;
pub mod card_view;
pub mod education;
pub mod fields_config;
pub mod gallery_photo;
pub mod personal_info;
pub mod product_service;
pub mod professional_info;

// Re-exports
pub use address::*;
pub use award::*;
pub use business_card::*;
pub use card_view::*;
pub use education::*;
pub use fields_config::*;
pub use gallery_photo::*;
pub use personal_info::*;
pub use product_service::*;
pub use professional_info::*;
