//! In-memory store
//!
//! Backs both store traits with [`DashMap`]s. Used when no DATABASE_URL is
//! configured in development, and by the test suites.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use shared::models::{
    Award, Card, Education, GalleryPhoto, PersonalInfo, ProductService, ProfessionalInfo,
    ViewContext, ViewEvent,
};
use shared::util::{new_id, now_millis};

use super::{CardStore, ProfileStore, StoreError, StoreResult};

/// Rows keyed by id, each tagged with an insertion sequence so listings keep
/// storage order even when timestamps collide.
struct Table<T> {
    rows: DashMap<String, (u64, T)>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
        }
    }

    fn get(&self, id: &str, owned: impl Fn(&T) -> bool) -> Option<T> {
        self.rows
            .get(id)
            .filter(|row| owned(&row.1))
            .map(|row| row.1.clone())
    }

    /// Insert or replace; replacing keeps the original sequence
    fn put(&self, id: &str, value: T, seq: &AtomicU64) {
        match self.rows.entry(id.to_string()) {
            Entry::Occupied(mut e) => e.get_mut().1 = value,
            Entry::Vacant(e) => {
                e.insert((seq.fetch_add(1, Ordering::Relaxed), value));
            }
        }
    }

    fn remove(&self, id: &str, owned: impl Fn(&T) -> bool) -> bool {
        self.rows.remove_if(id, |_, row| owned(&row.1)).is_some()
    }

    /// Rows matching `filter`, in insertion order
    fn select(&self, filter: impl Fn(&T) -> bool) -> Vec<(u64, T)> {
        let mut rows: Vec<(u64, T)> = self
            .rows
            .iter()
            .filter(|row| filter(&row.1))
            .map(|row| row.value().clone())
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows
    }
}

pub struct MemoryStore {
    seq: AtomicU64,
    personal: DashMap<String, PersonalInfo>,
    professional: Table<ProfessionalInfo>,
    education: Table<Education>,
    awards: Table<Award>,
    products: Table<ProductService>,
    photos: Table<GalleryPhoto>,
    cards: Table<Card>,
    /// slug -> card id
    slugs: DashMap<String, String>,
    views: Table<ViewEvent>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
            personal: DashMap::new(),
            professional: Table::new(),
            education: Table::new(),
            awards: Table::new(),
            products: Table::new(),
            photos: Table::new(),
            cards: Table::new(),
            slugs: DashMap::new(),
            views: Table::new(),
        }
    }

    /// Append a view with an explicit timestamp (seeding analytics in tests)
    pub fn insert_view(&self, event: ViewEvent) {
        self.views.put(&event.id.clone(), event, &self.seq);
    }

    /// Claim `slug` for `card_id`; false when another card holds it
    fn reserve_slug(&self, slug: &str, card_id: &str) -> bool {
        match self.slugs.entry(slug.to_string()) {
            Entry::Occupied(e) => e.get() == card_id,
            Entry::Vacant(e) => {
                e.insert(card_id.to_string());
                true
            }
        }
    }
}

fn owned_by<'a, T: 'a>(user_id: &'a str, owner: fn(&T) -> &str) -> impl Fn(&T) -> bool + 'a {
    move |row| owner(row) == user_id
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_personal_info(&self, user_id: &str) -> StoreResult<Option<PersonalInfo>> {
        Ok(self.personal.get(user_id).map(|r| r.value().clone()))
    }

    async fn save_personal_info(&self, info: &PersonalInfo) -> StoreResult<()> {
        self.personal.insert(info.user_id.clone(), info.clone());
        Ok(())
    }

    // ========== Professional ==========

    async fn list_professional(&self, user_id: &str) -> StoreResult<Vec<ProfessionalInfo>> {
        Ok(self
            .professional
            .select(owned_by(user_id, |p: &ProfessionalInfo| p.user_id.as_str()))
            .into_iter()
            .map(|(_, p)| p)
            .collect())
    }

    async fn get_professional(
        &self,
        user_id: &str,
        id: &str,
    ) -> StoreResult<Option<ProfessionalInfo>> {
        Ok(self
            .professional
            .get(id, owned_by(user_id, |p: &ProfessionalInfo| p.user_id.as_str())))
    }

    async fn save_professional(&self, entry: &ProfessionalInfo) -> StoreResult<()> {
        self.professional.put(&entry.id, entry.clone(), &self.seq);
        Ok(())
    }

    async fn delete_professional(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        Ok(self
            .professional
            .remove(id, owned_by(user_id, |p: &ProfessionalInfo| p.user_id.as_str())))
    }

    // ========== Education ==========

    async fn list_education(&self, user_id: &str) -> StoreResult<Vec<Education>> {
        let mut rows = self
            .education
            .select(owned_by(user_id, |e: &Education| e.user_id.as_str()));
        rows.sort_by_key(|(seq, e)| (e.year_completed.is_none(), Reverse(e.year_completed), *seq));
        Ok(rows.into_iter().map(|(_, e)| e).collect())
    }

    async fn get_education(&self, user_id: &str, id: &str) -> StoreResult<Option<Education>> {
        Ok(self
            .education
            .get(id, owned_by(user_id, |e: &Education| e.user_id.as_str())))
    }

    async fn save_education(&self, entry: &Education) -> StoreResult<()> {
        self.education.put(&entry.id, entry.clone(), &self.seq);
        Ok(())
    }

    async fn delete_education(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        Ok(self
            .education
            .remove(id, owned_by(user_id, |e: &Education| e.user_id.as_str())))
    }

    // ========== Awards ==========

    async fn list_awards(&self, user_id: &str) -> StoreResult<Vec<Award>> {
        let mut rows = self.awards.select(owned_by(user_id, |a: &Award| a.user_id.as_str()));
        rows.sort_by(|(sa, a), (sb, b)| {
            (a.date_received.is_none(), Reverse(&a.date_received), sa).cmp(&(
                b.date_received.is_none(),
                Reverse(&b.date_received),
                sb,
            ))
        });
        Ok(rows.into_iter().map(|(_, a)| a).collect())
    }

    async fn get_award(&self, user_id: &str, id: &str) -> StoreResult<Option<Award>> {
        Ok(self.awards.get(id, owned_by(user_id, |a: &Award| a.user_id.as_str())))
    }

    async fn save_award(&self, entry: &Award) -> StoreResult<()> {
        self.awards.put(&entry.id, entry.clone(), &self.seq);
        Ok(())
    }

    async fn delete_award(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        Ok(self.awards.remove(id, owned_by(user_id, |a: &Award| a.user_id.as_str())))
    }

    // ========== Products / services ==========

    async fn list_products(&self, user_id: &str) -> StoreResult<Vec<ProductService>> {
        let mut rows = self
            .products
            .select(owned_by(user_id, |p: &ProductService| p.user_id.as_str()));
        rows.sort_by_key(|(seq, p)| Reverse((p.created_at, *seq)));
        Ok(rows.into_iter().map(|(_, p)| p).collect())
    }

    async fn get_product(&self, user_id: &str, id: &str) -> StoreResult<Option<ProductService>> {
        Ok(self
            .products
            .get(id, owned_by(user_id, |p: &ProductService| p.user_id.as_str())))
    }

    async fn save_product(&self, entry: &ProductService) -> StoreResult<()> {
        self.products.put(&entry.id, entry.clone(), &self.seq);
        Ok(())
    }

    async fn delete_product(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        Ok(self
            .products
            .remove(id, owned_by(user_id, |p: &ProductService| p.user_id.as_str())))
    }

    // ========== Photos ==========

    async fn list_photos(&self, user_id: &str) -> StoreResult<Vec<GalleryPhoto>> {
        let mut rows = self
            .photos
            .select(owned_by(user_id, |p: &GalleryPhoto| p.user_id.as_str()));
        rows.sort_by_key(|(seq, p)| (p.sort_key(), *seq));
        Ok(rows.into_iter().map(|(_, p)| p).collect())
    }

    async fn get_photo(&self, user_id: &str, id: &str) -> StoreResult<Option<GalleryPhoto>> {
        Ok(self
            .photos
            .get(id, owned_by(user_id, |p: &GalleryPhoto| p.user_id.as_str())))
    }

    async fn save_photo(&self, entry: &GalleryPhoto) -> StoreResult<()> {
        self.photos.put(&entry.id, entry.clone(), &self.seq);
        Ok(())
    }

    async fn delete_photo(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        Ok(self
            .photos
            .remove(id, owned_by(user_id, |p: &GalleryPhoto| p.user_id.as_str())))
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn get_active_card_by_slug(&self, slug: &str) -> StoreResult<Option<Card>> {
        let Some(card_id) = self.slugs.get(slug).map(|r| r.value().clone()) else {
            return Ok(None);
        };
        Ok(self.cards.get(&card_id, |c| c.is_active && c.slug == slug))
    }

    async fn get_card(&self, user_id: &str, id: &str) -> StoreResult<Option<Card>> {
        Ok(self.cards.get(id, owned_by(user_id, |c: &Card| c.user_id.as_str())))
    }

    async fn list_cards(&self, user_id: &str) -> StoreResult<Vec<Card>> {
        Ok(self
            .cards
            .select(owned_by(user_id, |c: &Card| c.user_id.as_str()))
            .into_iter()
            .map(|(_, c)| c)
            .collect())
    }

    async fn create_card(&self, card: &Card) -> StoreResult<()> {
        if !self.reserve_slug(&card.slug, &card.id) {
            return Err(StoreError::Duplicate(format!("slug {}", card.slug)));
        }
        self.cards.put(&card.id, card.clone(), &self.seq);
        Ok(())
    }

    async fn update_card(&self, card: &Card) -> StoreResult<()> {
        let Some(previous) = self.cards.get(&card.id, |_| true) else {
            return Err(StoreError::NotFound(format!("card {}", card.id)));
        };
        if previous.slug != card.slug {
            if !self.reserve_slug(&card.slug, &card.id) {
                return Err(StoreError::Duplicate(format!("slug {}", card.slug)));
            }
            self.slugs
                .remove_if(&previous.slug, |_, owner| owner == &card.id);
        }
        self.cards.put(&card.id, card.clone(), &self.seq);
        Ok(())
    }

    async fn delete_card(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        let Some(card) = self.cards.get(id, owned_by(user_id, |c: &Card| c.user_id.as_str())) else {
            return Ok(false);
        };
        self.cards.remove(id, |_| true);
        self.slugs.remove_if(&card.slug, |_, owner| owner == id);
        self.views.rows.retain(|_, (_, v)| v.card_id != id);
        Ok(true)
    }

    async fn set_default_card(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        if self.get_card(user_id, id).await?.is_none() {
            return Ok(false);
        }
        for mut row in self.cards.rows.iter_mut() {
            let card = &mut row.value_mut().1;
            if card.user_id == user_id {
                card.is_default = card.id == id;
            }
        }
        Ok(true)
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<&str>) -> StoreResult<bool> {
        Ok(self
            .slugs
            .get(slug)
            .is_some_and(|owner| Some(owner.value().as_str()) != exclude_id))
    }

    async fn record_view(&self, card_id: &str, ctx: &ViewContext) -> StoreResult<ViewEvent> {
        let event = ViewEvent {
            id: new_id(),
            card_id: card_id.to_string(),
            viewed_at: now_millis(),
            ip_address: ctx.ip_address.clone(),
            user_agent: ctx.user_agent.clone(),
            referrer: ctx.referrer.clone(),
        };
        self.insert_view(event.clone());
        Ok(event)
    }

    async fn list_views(&self, card_ids: &[String]) -> StoreResult<Vec<ViewEvent>> {
        let mut rows = self.views.select(|v| card_ids.contains(&v.card_id));
        rows.sort_by_key(|(seq, v)| Reverse((v.viewed_at, *seq)));
        Ok(rows.into_iter().map(|(_, v)| v).collect())
    }
}
