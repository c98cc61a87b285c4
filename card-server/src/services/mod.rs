//! Application services
//!
//! Handler-facing operations over [`ServerState`](crate::core::ServerState).
//! Every function is scoped to the calling owner except the public card
//! lookups in [`cards`].

pub mod analytics;
pub mod cards;
pub mod profile;
