//! Core module - configuration, state and server
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - shared service handles
//! - [`Server`] - HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::{AnalyticsConfig, Config, GeoIpConfig};
pub use server::Server;
pub use state::ServerState;
