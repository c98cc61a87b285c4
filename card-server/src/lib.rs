//! Card Server - digital business card backend
//!
//! # Overview
//!
//! - **Profile** (`services::profile`): personal info plus the professional,
//!   education, award, product and photo collections
//! - **Cards** (`services::cards`): per-card field selection, public slug
//!   lookup with view recording, vCard export
//! - **Projection** (`projection`): profile + selection → render model
//! - **Analytics** (`analytics`): view aggregation with geo-IP lookup
//! - **Storage** (`store`): PostgreSQL or in-memory behind store traits
//!
//! # Module layout
//!
//! ```text
//! card-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, auth middleware
//! ├── store/         # ProfileStore / CardStore + backends
//! ├── projection/    # card projection, vCard
//! ├── analytics/     # aggregation, geo-IP
//! ├── services/      # handler-facing operations
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, validation
//! ```

pub mod analytics;
pub mod api;
pub mod auth;
pub mod core;
pub mod error;
pub mod projection;
pub mod services;
pub mod store;
pub mod utils;

// Re-exports
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use error::{ServerError, StoreError};
pub use utils::logger::{init_logger, init_logger_with_file};

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
