//! View analytics
//!
//! - [`aggregator`]: pure grouping and bucketing of view events
//! - [`geo`]: geo-IP resolver port and the bounded lookup gather

pub mod aggregator;
pub mod geo;

pub use aggregator::*;
pub use geo::{DisabledResolver, GeoError, GeoIpResolver, GeoLocation, IpApiResolver, resolve_locations};
