//! Persistence ports
//!
//! [`ProfileStore`] and [`CardStore`] are injected into [`crate::core::ServerState`]
//! as trait objects. `pg` backs them with PostgreSQL, `memory` with
//! in-process maps (development without a database, and tests).
//!
//! Every profile read and write is scoped by the owning user id; a row owned
//! by someone else behaves exactly like a missing row.

pub mod memory;
pub mod pg;

use async_trait::async_trait;
use shared::models::{
    Award, Card, Education, GalleryPhoto, PersonalInfo, ProductService, ProfessionalInfo,
    ViewContext, ViewEvent,
};

pub use crate::error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use pg::PgStore;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_personal_info(&self, user_id: &str) -> StoreResult<Option<PersonalInfo>>;
    /// Insert or replace the user's single personal info row
    async fn save_personal_info(&self, info: &PersonalInfo) -> StoreResult<()>;

    /// Storage order: oldest first
    async fn list_professional(&self, user_id: &str) -> StoreResult<Vec<ProfessionalInfo>>;
    async fn get_professional(&self, user_id: &str, id: &str)
    -> StoreResult<Option<ProfessionalInfo>>;
    async fn save_professional(&self, entry: &ProfessionalInfo) -> StoreResult<()>;
    async fn delete_professional(&self, user_id: &str, id: &str) -> StoreResult<bool>;

    /// Most recent year first
    async fn list_education(&self, user_id: &str) -> StoreResult<Vec<Education>>;
    async fn get_education(&self, user_id: &str, id: &str) -> StoreResult<Option<Education>>;
    async fn save_education(&self, entry: &Education) -> StoreResult<()>;
    async fn delete_education(&self, user_id: &str, id: &str) -> StoreResult<bool>;

    /// Most recently received first
    async fn list_awards(&self, user_id: &str) -> StoreResult<Vec<Award>>;
    async fn get_award(&self, user_id: &str, id: &str) -> StoreResult<Option<Award>>;
    async fn save_award(&self, entry: &Award) -> StoreResult<()>;
    async fn delete_award(&self, user_id: &str, id: &str) -> StoreResult<bool>;

    /// Newest first
    async fn list_products(&self, user_id: &str) -> StoreResult<Vec<ProductService>>;
    async fn get_product(&self, user_id: &str, id: &str) -> StoreResult<Option<ProductService>>;
    async fn save_product(&self, entry: &ProductService) -> StoreResult<()>;
    async fn delete_product(&self, user_id: &str, id: &str) -> StoreResult<bool>;

    /// `display_order` ascending
    async fn list_photos(&self, user_id: &str) -> StoreResult<Vec<GalleryPhoto>>;
    async fn get_photo(&self, user_id: &str, id: &str) -> StoreResult<Option<GalleryPhoto>>;
    async fn save_photo(&self, entry: &GalleryPhoto) -> StoreResult<()>;
    async fn delete_photo(&self, user_id: &str, id: &str) -> StoreResult<bool>;
}

#[async_trait]
pub trait CardStore: Send + Sync {
    /// Public lookup; inactive cards are reported as missing
    async fn get_active_card_by_slug(&self, slug: &str) -> StoreResult<Option<Card>>;
    async fn get_card(&self, user_id: &str, id: &str) -> StoreResult<Option<Card>>;
    /// Oldest first
    async fn list_cards(&self, user_id: &str) -> StoreResult<Vec<Card>>;
    /// Fails with [`StoreError::Duplicate`] when the slug is taken
    async fn create_card(&self, card: &Card) -> StoreResult<()>;
    /// Fails with [`StoreError::Duplicate`] when the slug is taken
    async fn update_card(&self, card: &Card) -> StoreResult<()>;
    /// Also removes the card's view events
    async fn delete_card(&self, user_id: &str, id: &str) -> StoreResult<bool>;
    /// Mark one card default and clear the flag on the owner's others
    async fn set_default_card(&self, user_id: &str, id: &str) -> StoreResult<bool>;
    /// True when a card other than `exclude_id` uses `slug`
    async fn slug_exists(&self, slug: &str, exclude_id: Option<&str>) -> StoreResult<bool>;

    async fn record_view(&self, card_id: &str, ctx: &ViewContext) -> StoreResult<ViewEvent>;
    /// Newest first
    async fn list_views(&self, card_ids: &[String]) -> StoreResult<Vec<ViewEvent>>;
}
