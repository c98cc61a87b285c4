//! Field selection model
//!
//! A [`FieldSelectionConfig`] decides what a card exposes: boolean flags for
//! the personal fields, the set of professional entries shown at all, one id
//! set per gated professional sub-field, and id sets for the auxiliary
//! collections.
//!
//! Reads never fail and default to "not selected". A professional sub-field
//! only counts when its entry is selected too, whatever the stored sub-field
//! set says. Toggles are pure and return a new config; deselecting an entry
//! also clears its sub-field ids.
//!
//! The JSON shape keeps the key names used by stored cards:
//!
//! ```json
//! {
//!   "full_name": true,
//!   "primary_email": false,
//!   "professionalIds": ["p1"],
//!   "professional_emails": ["p1"],
//!   "educationIds": []
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Personal scalar field flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    FullName,
    PrimaryEmail,
    SecondaryEmail,
    MobileNumber,
    AlternateMobile,
    WhatsappNumber,
    HomeAddress,
    Bio,
    ProfilePhotoUrl,
    SocialInstagram,
    SocialFacebook,
    SocialLinkedin,
}

impl ScalarField {
    pub const ALL: [ScalarField; 12] = [
        Self::FullName,
        Self::PrimaryEmail,
        Self::SecondaryEmail,
        Self::MobileNumber,
        Self::AlternateMobile,
        Self::WhatsappNumber,
        Self::HomeAddress,
        Self::Bio,
        Self::ProfilePhotoUrl,
        Self::SocialInstagram,
        Self::SocialFacebook,
        Self::SocialLinkedin,
    ];

    /// Stored config key
    pub const fn key(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::PrimaryEmail => "primary_email",
            Self::SecondaryEmail => "secondary_email",
            Self::MobileNumber => "mobile_number",
            Self::AlternateMobile => "alternate_mobile",
            Self::WhatsappNumber => "whatsapp_number",
            Self::HomeAddress => "home_address",
            Self::Bio => "bio",
            Self::ProfilePhotoUrl => "profile_photo_url",
            Self::SocialInstagram => "social_instagram",
            Self::SocialFacebook => "social_facebook",
            Self::SocialLinkedin => "social_linkedin",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Professional sub-field gated per entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfessionalSubField {
    #[serde(rename = "linkedin_urls")]
    Linkedin,
    #[serde(rename = "professional_emails")]
    Email,
    #[serde(rename = "professional_phones")]
    Phone,
    #[serde(rename = "professional_instagrams")]
    Instagram,
    #[serde(rename = "professional_facebooks")]
    Facebook,
}

impl ProfessionalSubField {
    pub const ALL: [ProfessionalSubField; 5] = [
        Self::Linkedin,
        Self::Email,
        Self::Phone,
        Self::Instagram,
        Self::Facebook,
    ];

    /// Stored config key of the id set
    pub const fn key(self) -> &'static str {
        match self {
            Self::Linkedin => "linkedin_urls",
            Self::Email => "professional_emails",
            Self::Phone => "professional_phones",
            Self::Instagram => "professional_instagrams",
            Self::Facebook => "professional_facebooks",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Profile collections a card selects entries from by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Professional,
    Education,
    Award,
    ProductService,
    Photo,
}

impl EntryKind {
    /// Stored config key of the id set
    pub const fn key(self) -> &'static str {
        match self {
            Self::Professional => "professionalIds",
            Self::Education => "educationIds",
            Self::Award => "awardIds",
            Self::ProductService => "productServiceIds",
            Self::Photo => "photoIds",
        }
    }
}

type IdSet = BTreeSet<String>;

/// Per-card visibility configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct FieldSelectionConfig {
    pub full_name: bool,
    pub primary_email: bool,
    pub secondary_email: bool,
    pub mobile_number: bool,
    pub alternate_mobile: bool,
    pub whatsapp_number: bool,
    pub home_address: bool,
    pub bio: bool,
    pub profile_photo_url: bool,
    pub social_instagram: bool,
    pub social_facebook: bool,
    pub social_linkedin: bool,

    #[serde(rename = "professionalIds")]
    pub professional_ids: IdSet,
    pub linkedin_urls: IdSet,
    pub professional_emails: IdSet,
    pub professional_phones: IdSet,
    pub professional_instagrams: IdSet,
    pub professional_facebooks: IdSet,

    #[serde(rename = "educationIds")]
    pub education_ids: IdSet,
    #[serde(rename = "awardIds")]
    pub award_ids: IdSet,
    #[serde(rename = "productServiceIds")]
    pub product_service_ids: IdSet,
    #[serde(rename = "photoIds")]
    pub photo_ids: IdSet,
}

impl FieldSelectionConfig {
    /// Selection for a brand new card: name and primary email shown
    pub fn starter() -> Self {
        Self {
            full_name: true,
            primary_email: true,
            ..Default::default()
        }
    }

    fn flag(&self, field: ScalarField) -> bool {
        match field {
            ScalarField::FullName => self.full_name,
            ScalarField::PrimaryEmail => self.primary_email,
            ScalarField::SecondaryEmail => self.secondary_email,
            ScalarField::MobileNumber => self.mobile_number,
            ScalarField::AlternateMobile => self.alternate_mobile,
            ScalarField::WhatsappNumber => self.whatsapp_number,
            ScalarField::HomeAddress => self.home_address,
            ScalarField::Bio => self.bio,
            ScalarField::ProfilePhotoUrl => self.profile_photo_url,
            ScalarField::SocialInstagram => self.social_instagram,
            ScalarField::SocialFacebook => self.social_facebook,
            ScalarField::SocialLinkedin => self.social_linkedin,
        }
    }

    fn flag_mut(&mut self, field: ScalarField) -> &mut bool {
        match field {
            ScalarField::FullName => &mut self.full_name,
            ScalarField::PrimaryEmail => &mut self.primary_email,
            ScalarField::SecondaryEmail => &mut self.secondary_email,
            ScalarField::MobileNumber => &mut self.mobile_number,
            ScalarField::AlternateMobile => &mut self.alternate_mobile,
            ScalarField::WhatsappNumber => &mut self.whatsapp_number,
            ScalarField::HomeAddress => &mut self.home_address,
            ScalarField::Bio => &mut self.bio,
            ScalarField::ProfilePhotoUrl => &mut self.profile_photo_url,
            ScalarField::SocialInstagram => &mut self.social_instagram,
            ScalarField::SocialFacebook => &mut self.social_facebook,
            ScalarField::SocialLinkedin => &mut self.social_linkedin,
        }
    }

    fn sub_field_set(&self, sub: ProfessionalSubField) -> &IdSet {
        match sub {
            ProfessionalSubField::Linkedin => &self.linkedin_urls,
            ProfessionalSubField::Email => &self.professional_emails,
            ProfessionalSubField::Phone => &self.professional_phones,
            ProfessionalSubField::Instagram => &self.professional_instagrams,
            ProfessionalSubField::Facebook => &self.professional_facebooks,
        }
    }

    fn sub_field_set_mut(&mut self, sub: ProfessionalSubField) -> &mut IdSet {
        match sub {
            ProfessionalSubField::Linkedin => &mut self.linkedin_urls,
            ProfessionalSubField::Email => &mut self.professional_emails,
            ProfessionalSubField::Phone => &mut self.professional_phones,
            ProfessionalSubField::Instagram => &mut self.professional_instagrams,
            ProfessionalSubField::Facebook => &mut self.professional_facebooks,
        }
    }

    fn entry_set(&self, kind: EntryKind) -> &IdSet {
        match kind {
            EntryKind::Professional => &self.professional_ids,
            EntryKind::Education => &self.education_ids,
            EntryKind::Award => &self.award_ids,
            EntryKind::ProductService => &self.product_service_ids,
            EntryKind::Photo => &self.photo_ids,
        }
    }

    fn entry_set_mut(&mut self, kind: EntryKind) -> &mut IdSet {
        match kind {
            EntryKind::Professional => &mut self.professional_ids,
            EntryKind::Education => &mut self.education_ids,
            EntryKind::Award => &mut self.award_ids,
            EntryKind::ProductService => &mut self.product_service_ids,
            EntryKind::Photo => &mut self.photo_ids,
        }
    }

    // ==================== Reads ====================

    pub fn is_scalar_field_selected(&self, field: ScalarField) -> bool {
        self.flag(field)
    }

    /// Lookup by stored key; unknown keys are never selected
    pub fn is_scalar_key_selected(&self, key: &str) -> bool {
        ScalarField::from_key(key).is_some_and(|f| self.flag(f))
    }

    pub fn is_professional_entry_selected(&self, entry_id: &str) -> bool {
        self.professional_ids.contains(entry_id)
    }

    /// True only when the entry itself is selected and the sub-field set
    /// lists it. Stale sub-field ids of a deselected entry read as false.
    pub fn is_professional_sub_field_selected(
        &self,
        entry_id: &str,
        sub: ProfessionalSubField,
    ) -> bool {
        self.is_professional_entry_selected(entry_id) && self.sub_field_set(sub).contains(entry_id)
    }

    pub fn is_entry_selected(&self, kind: EntryKind, entry_id: &str) -> bool {
        self.entry_set(kind).contains(entry_id)
    }

    pub fn is_education_selected(&self, id: &str) -> bool {
        self.education_ids.contains(id)
    }

    pub fn is_award_selected(&self, id: &str) -> bool {
        self.award_ids.contains(id)
    }

    pub fn is_product_selected(&self, id: &str) -> bool {
        self.product_service_ids.contains(id)
    }

    pub fn is_photo_selected(&self, id: &str) -> bool {
        self.photo_ids.contains(id)
    }

    // ==================== Toggles ====================

    pub fn toggle_scalar_field(&self, field: ScalarField) -> Self {
        let mut next = self.clone();
        let flag = next.flag_mut(field);
        *flag = !*flag;
        next
    }

    /// Select or deselect a professional entry.
    ///
    /// Deselecting removes the id from every sub-field set as well.
    pub fn toggle_professional_entry(&self, entry_id: &str) -> Self {
        let mut next = self.clone();
        if !next.professional_ids.remove(entry_id) {
            next.professional_ids.insert(entry_id.to_string());
        } else {
            for sub in ProfessionalSubField::ALL {
                next.sub_field_set_mut(sub).remove(entry_id);
            }
        }
        next
    }

    /// Flip a sub-field for one entry. Recorded even when the entry is not
    /// selected; reads stay false until it is.
    pub fn toggle_professional_sub_field(&self, entry_id: &str, sub: ProfessionalSubField) -> Self {
        let mut next = self.clone();
        toggle_in(next.sub_field_set_mut(sub), entry_id);
        next
    }

    /// Flip membership of an auxiliary (or professional) entry id.
    ///
    /// For [`EntryKind::Professional`] this is [`Self::toggle_professional_entry`].
    pub fn toggle_entry(&self, kind: EntryKind, entry_id: &str) -> Self {
        if kind == EntryKind::Professional {
            return self.toggle_professional_entry(entry_id);
        }
        let mut next = self.clone();
        toggle_in(next.entry_set_mut(kind), entry_id);
        next
    }

    /// Drop every reference to a deleted entry.
    pub fn prune_entry(&self, kind: EntryKind, entry_id: &str) -> Self {
        let mut next = self.clone();
        next.entry_set_mut(kind).remove(entry_id);
        if kind == EntryKind::Professional {
            for sub in ProfessionalSubField::ALL {
                next.sub_field_set_mut(sub).remove(entry_id);
            }
        }
        next
    }

    /// Whether any set still mentions `entry_id` for this kind
    pub fn references(&self, kind: EntryKind, entry_id: &str) -> bool {
        self.entry_set(kind).contains(entry_id)
            || (kind == EntryKind::Professional
                && ProfessionalSubField::ALL
                    .iter()
                    .any(|sub| self.sub_field_set(*sub).contains(entry_id)))
    }
}

fn toggle_in(set: &mut IdSet, id: &str) {
    if !set.remove(id) {
        set.insert(id.to_string());
    }
}

// ==================== Lenient decoding ====================

fn read_flag(map: &Map<String, Value>, key: &str) -> bool {
    matches!(map.get(key), Some(Value::Bool(true)))
}

fn read_ids(map: &Map<String, Value>, key: &str) -> IdSet {
    match map.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => IdSet::new(),
    }
}

impl From<Value> for FieldSelectionConfig {
    /// Anything that is not an object decodes as the empty selection;
    /// non-bool flags read false and non-string ids are dropped.
    fn from(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        Self {
            full_name: read_flag(&map, "full_name"),
            primary_email: read_flag(&map, "primary_email"),
            secondary_email: read_flag(&map, "secondary_email"),
            mobile_number: read_flag(&map, "mobile_number"),
            alternate_mobile: read_flag(&map, "alternate_mobile"),
            whatsapp_number: read_flag(&map, "whatsapp_number"),
            home_address: read_flag(&map, "home_address"),
            bio: read_flag(&map, "bio"),
            profile_photo_url: read_flag(&map, "profile_photo_url"),
            social_instagram: read_flag(&map, "social_instagram"),
            social_facebook: read_flag(&map, "social_facebook"),
            social_linkedin: read_flag(&map, "social_linkedin"),
            professional_ids: read_ids(&map, EntryKind::Professional.key()),
            linkedin_urls: read_ids(&map, ProfessionalSubField::Linkedin.key()),
            professional_emails: read_ids(&map, ProfessionalSubField::Email.key()),
            professional_phones: read_ids(&map, ProfessionalSubField::Phone.key()),
            professional_instagrams: read_ids(&map, ProfessionalSubField::Instagram.key()),
            professional_facebooks: read_ids(&map, ProfessionalSubField::Facebook.key()),
            education_ids: read_ids(&map, EntryKind::Education.key()),
            award_ids: read_ids(&map, EntryKind::Award.key()),
            product_service_ids: read_ids(&map, EntryKind::ProductService.key()),
            photo_ids: read_ids(&map, EntryKind::Photo.key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> FieldSelectionConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_keys_read_as_not_selected() {
        let c = config(json!({}));
        for field in ScalarField::ALL {
            assert!(!c.is_scalar_field_selected(field));
        }
        assert!(!c.is_professional_entry_selected("p1"));
        for sub in ProfessionalSubField::ALL {
            assert!(!c.is_professional_sub_field_selected("p1", sub));
        }
        assert!(!c.is_scalar_key_selected("no_such_field"));
    }

    #[test]
    fn test_malformed_values_decode_safely() {
        let c = config(json!({
            "full_name": "yes",
            "bio": 1,
            "primary_email": true,
            "professionalIds": "p1",
            "professional_emails": ["p1", 7, null, "p2"],
            "educationIds": {"e1": true}
        }));
        assert!(!c.full_name);
        assert!(!c.bio);
        assert!(c.primary_email);
        assert!(c.professional_ids.is_empty());
        assert_eq!(c.professional_emails.len(), 2);
        assert!(c.education_ids.is_empty());

        assert_eq!(config(json!(null)), FieldSelectionConfig::default());
        assert_eq!(config(json!([1, 2])), FieldSelectionConfig::default());
    }

    #[test]
    fn test_sub_field_requires_entry_selection() {
        let c = config(json!({
            "professionalIds": ["p1"],
            "professional_emails": ["p1", "p2"],
            "linkedin_urls": ["p2"]
        }));
        assert!(c.is_professional_sub_field_selected("p1", ProfessionalSubField::Email));
        assert!(!c.is_professional_sub_field_selected("p2", ProfessionalSubField::Email));
        assert!(!c.is_professional_sub_field_selected("p2", ProfessionalSubField::Linkedin));
        assert!(!c.is_professional_sub_field_selected("p1", ProfessionalSubField::Phone));
    }

    #[test]
    fn test_scalar_toggle_is_pure_and_reversible() {
        let original = FieldSelectionConfig::starter();
        let toggled = original.toggle_scalar_field(ScalarField::Bio);

        assert!(!original.bio);
        assert!(toggled.bio);
        assert_eq!(toggled.toggle_scalar_field(ScalarField::Bio), original);

        for field in ScalarField::ALL {
            assert_eq!(
                original.toggle_scalar_field(field).toggle_scalar_field(field),
                original
            );
        }
    }

    #[test]
    fn test_entry_toggle_twice_restores_config() {
        let original = config(json!({"professionalIds": ["p1"], "educationIds": ["e1"]}));
        let round = original
            .toggle_professional_entry("p2")
            .toggle_professional_entry("p2");
        assert_eq!(round, original);

        let round = original
            .toggle_entry(EntryKind::Education, "e1")
            .toggle_entry(EntryKind::Education, "e1");
        assert_eq!(round, original);

        // selected entry without sub-fields round-trips too
        let round = original
            .toggle_professional_entry("p1")
            .toggle_professional_entry("p1");
        assert_eq!(round, original);
    }

    #[test]
    fn test_entry_toggle_twice_drops_sub_fields() {
        let original = config(json!({
            "professionalIds": ["p1"],
            "professional_emails": ["p1"],
        }));
        assert!(original.is_professional_sub_field_selected("p1", ProfessionalSubField::Email));

        let round = original
            .toggle_professional_entry("p1")
            .toggle_professional_entry("p1");

        assert_ne!(round, original);
        assert!(round.is_professional_entry_selected("p1"));
        assert!(round.professional_emails.is_empty());
        assert!(!round.is_professional_sub_field_selected("p1", ProfessionalSubField::Email));
    }

    #[test]
    fn test_deselecting_entry_cascades() {
        let c = FieldSelectionConfig::default()
            .toggle_professional_entry("p1")
            .toggle_professional_sub_field("p1", ProfessionalSubField::Email)
            .toggle_professional_sub_field("p1", ProfessionalSubField::Facebook);
        assert!(c.is_professional_sub_field_selected("p1", ProfessionalSubField::Email));

        let c = c.toggle_professional_entry("p1");
        assert!(!c.is_professional_entry_selected("p1"));
        assert!(c.professional_emails.is_empty());
        assert!(c.professional_facebooks.is_empty());

        // reselecting does not resurrect the sub-fields
        let c = c.toggle_professional_entry("p1");
        assert!(!c.is_professional_sub_field_selected("p1", ProfessionalSubField::Email));
    }

    #[test]
    fn test_sub_field_toggle_on_unselected_entry_is_recorded_but_hidden() {
        let c = FieldSelectionConfig::default()
            .toggle_professional_sub_field("p9", ProfessionalSubField::Phone);
        assert!(c.professional_phones.contains("p9"));
        assert!(!c.is_professional_sub_field_selected("p9", ProfessionalSubField::Phone));

        let c = c.toggle_professional_entry("p9");
        assert!(c.is_professional_sub_field_selected("p9", ProfessionalSubField::Phone));
    }

    #[test]
    fn test_prune_entry() {
        let c = config(json!({
            "professionalIds": ["p1", "p2"],
            "linkedin_urls": ["p1"],
            "photoIds": ["ph1"]
        }));
        assert!(c.references(EntryKind::Professional, "p1"));

        let pruned = c.prune_entry(EntryKind::Professional, "p1");
        assert!(!pruned.references(EntryKind::Professional, "p1"));
        assert!(pruned.is_professional_entry_selected("p2"));

        let pruned = pruned.prune_entry(EntryKind::Photo, "ph1");
        assert!(!pruned.is_photo_selected("ph1"));
    }

    #[test]
    fn test_serializes_with_stored_key_names() {
        let c = FieldSelectionConfig::starter()
            .toggle_professional_entry("p1")
            .toggle_entry(EntryKind::ProductService, "x1");
        let json = serde_json::to_value(&c).unwrap();

        assert_eq!(json["full_name"], json!(true));
        assert_eq!(json["professionalIds"], json!(["p1"]));
        assert_eq!(json["productServiceIds"], json!(["x1"]));
        assert_eq!(json["linkedin_urls"], json!([]));
        assert_eq!(config(json), c);
    }

    #[test]
    fn test_key_lookup() {
        assert_eq!(ScalarField::from_key("alternate_mobile"), Some(ScalarField::AlternateMobile));
        assert_eq!(
            ProfessionalSubField::from_key("professional_phones"),
            Some(ProfessionalSubField::Phone)
        );
        assert_eq!(ProfessionalSubField::from_key("phones"), None);

        let c = FieldSelectionConfig::starter();
        assert!(c.is_scalar_key_selected("full_name"));
        assert!(!c.is_scalar_key_selected("bio"));
    }
}
