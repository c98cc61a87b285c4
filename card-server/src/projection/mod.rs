//! Card projection
//!
//! Turns a profile snapshot plus a card's [`FieldSelectionConfig`] into the
//! render-ready [`ProjectedCard`], and serializes projections as vCards.
//! Everything here is synchronous and free of I/O; callers load the snapshot
//! once and pass it in.
//!
//! [`FieldSelectionConfig`]: shared::models::FieldSelectionConfig

mod projector;
pub mod vcard;

pub use projector::*;
pub use vcard::{contact_file_name, to_vcard};
