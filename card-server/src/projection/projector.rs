//! Profile → card projection

use serde::Serialize;
use shared::models::{
    Award, Education, FieldSelectionConfig, GalleryPhoto, PersonalInfo, ProductService,
    ProfessionalInfo, ProfessionalSubField, ScalarField, format_address,
};

/// Everything a card can draw from, loaded once per request.
///
/// Collections are in storage order.
#[derive(Debug, Clone, Default)]
pub struct ProfileSnapshot {
    pub personal: Option<PersonalInfo>,
    pub professional: Vec<ProfessionalInfo>,
    pub education: Vec<Education>,
    pub awards: Vec<Award>,
    pub products: Vec<ProductService>,
    pub photos: Vec<GalleryPhoto>,
}

/// Personal fields that survived selection. Blank values are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectedPersonal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    /// Normalized to one display line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
}

/// A selected professional entry.
///
/// Descriptive fields follow the entry's own selection; the contact fields
/// (email, phone and the three social links) are gated one by one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectedProfessional {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_opening_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_closing_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
}

/// Card-level defaults taken from the featured professional entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeaturedEntry {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_address: Option<String>,
}

/// Render-ready card view model
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectedCard {
    pub personal: ProjectedPersonal,
    pub featured: Option<FeaturedEntry>,
    pub professional: Vec<ProjectedProfessional>,
    pub education: Vec<Education>,
    pub awards: Vec<Award>,
    pub products: Vec<ProductService>,
    pub photos: Vec<GalleryPhoto>,
}

impl ProjectedCard {
    /// Address line shown on the card face: the featured entry's office,
    /// else the personal home address when that was selected.
    pub fn display_address(&self) -> Option<&str> {
        self.featured
            .as_ref()
            .and_then(|f| f.office_address.as_deref())
            .or(self.personal.home_address.as_deref())
    }

    /// Bio when selected, else the first selected entry's designation
    pub fn tagline(&self) -> Option<&str> {
        self.personal.bio.as_deref().or_else(|| {
            self.professional
                .iter()
                .find_map(|p| p.designation.as_deref())
        })
    }

    pub fn company_logo_url(&self) -> Option<&str> {
        self.featured
            .as_ref()
            .and_then(|f| f.company_logo_url.as_deref())
    }
}

/// Project a profile through a card's field selection.
pub fn project(profile: &ProfileSnapshot, config: &FieldSelectionConfig) -> ProjectedCard {
    ProjectedCard {
        personal: profile
            .personal
            .as_ref()
            .map(|info| project_personal(info, config))
            .unwrap_or_default(),
        featured: featured_entry(&profile.professional, config).map(featured_of),
        professional: profile
            .professional
            .iter()
            .filter(|p| config.is_professional_entry_selected(&p.id))
            .map(|p| project_professional(p, config))
            .collect(),
        education: filter_selected(&profile.education, |e| config.is_education_selected(&e.id)),
        awards: filter_selected(&profile.awards, |a| config.is_award_selected(&a.id)),
        products: filter_selected(&profile.products, |p| config.is_product_selected(&p.id)),
        photos: filter_selected(&profile.photos, |p| config.is_photo_selected(&p.id)),
    }
}

/// First selected entry in storage order, else the first entry overall.
///
/// `is_primary` plays no part; several entries may carry it.
pub fn featured_entry<'a>(
    entries: &'a [ProfessionalInfo],
    config: &FieldSelectionConfig,
) -> Option<&'a ProfessionalInfo> {
    entries
        .iter()
        .find(|p| config.is_professional_entry_selected(&p.id))
        .or_else(|| entries.first())
}

fn featured_of(entry: &ProfessionalInfo) -> FeaturedEntry {
    FeaturedEntry {
        id: entry.id.clone(),
        designation: non_blank(&entry.designation),
        company_name: non_blank(&entry.company_name),
        company_logo_url: non_blank(&entry.company_logo_url),
        office_address: entry.office_address.as_ref().and_then(format_address),
    }
}

fn project_personal(info: &PersonalInfo, config: &FieldSelectionConfig) -> ProjectedPersonal {
    let pick = |field: ScalarField, value: &Option<String>| {
        if config.is_scalar_field_selected(field) {
            non_blank(value)
        } else {
            None
        }
    };

    // full_name is a required column, never null
    let full_name = if config.is_scalar_field_selected(ScalarField::FullName) {
        non_blank_str(&info.full_name)
    } else {
        None
    };

    let home_address = if config.is_scalar_field_selected(ScalarField::HomeAddress) {
        info.home_address.as_ref().and_then(format_address)
    } else {
        None
    };

    ProjectedPersonal {
        full_name,
        primary_email: pick(ScalarField::PrimaryEmail, &info.primary_email),
        secondary_email: pick(ScalarField::SecondaryEmail, &info.secondary_email),
        mobile_number: pick(ScalarField::MobileNumber, &info.mobile_number),
        alternate_mobile: pick(ScalarField::AlternateMobile, &info.phone_number),
        whatsapp_number: pick(ScalarField::WhatsappNumber, &info.whatsapp_number),
        home_address,
        bio: pick(ScalarField::Bio, &info.bio),
        profile_photo_url: pick(ScalarField::ProfilePhotoUrl, &info.profile_photo_url),
        instagram_url: pick(ScalarField::SocialInstagram, &info.instagram_url),
        facebook_url: pick(ScalarField::SocialFacebook, &info.facebook_url),
        linkedin_url: pick(ScalarField::SocialLinkedin, &info.linkedin_url),
    }
}

fn project_professional(
    entry: &ProfessionalInfo,
    config: &FieldSelectionConfig,
) -> ProjectedProfessional {
    let gated = |sub: ProfessionalSubField, value: &Option<String>| {
        if config.is_professional_sub_field_selected(&entry.id, sub) {
            non_blank(value)
        } else {
            None
        }
    };

    ProjectedProfessional {
        id: entry.id.clone(),
        designation: non_blank(&entry.designation),
        company_name: non_blank(&entry.company_name),
        company_website: non_blank(&entry.company_website),
        company_logo_url: non_blank(&entry.company_logo_url),
        department: non_blank(&entry.department),
        office_address: entry.office_address.as_ref().and_then(format_address),
        whatsapp_number: non_blank(&entry.whatsapp_number),
        office_opening_time: non_blank(&entry.office_opening_time),
        office_closing_time: non_blank(&entry.office_closing_time),
        office_days: non_blank(&entry.office_days),
        office_email: gated(ProfessionalSubField::Email, &entry.office_email),
        office_phone: gated(ProfessionalSubField::Phone, &entry.office_phone),
        linkedin_url: gated(ProfessionalSubField::Linkedin, &entry.linkedin_url),
        instagram_url: gated(ProfessionalSubField::Instagram, &entry.instagram_url),
        facebook_url: gated(ProfessionalSubField::Facebook, &entry.facebook_url),
    }
}

fn filter_selected<T: Clone>(items: &[T], selected: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|item| selected(item)).cloned().collect()
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(non_blank_str)
}

fn non_blank_str(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn personal() -> PersonalInfo {
        PersonalInfo {
            id: "pi-1".into(),
            user_id: "u1".into(),
            full_name: "Jane Doe".into(),
            primary_email: Some("jane@x.com".into()),
            mobile_number: Some("   ".into()),
            bio: Some("Builder of things".into()),
            home_address: Some(json!(["12 Elm Rd", "", "Springfield", 42])),
            ..Default::default()
        }
    }

    fn professional(id: &str, email: &str) -> ProfessionalInfo {
        ProfessionalInfo {
            id: id.into(),
            user_id: "u1".into(),
            designation: Some(format!("Engineer {id}")),
            company_name: Some(format!("Company {id}")),
            company_website: Some(format!("https://{id}.example")),
            company_logo_url: Some(format!("https://cdn.example/{id}.png")),
            office_email: Some(email.into()),
            office_phone: Some("+1 555 0100".into()),
            linkedin_url: Some(format!("https://linkedin.com/in/{id}")),
            office_address: Some(json!({"street": "1 Work Way", "city": "Metropolis"})),
            ..Default::default()
        }
    }

    fn config(value: serde_json::Value) -> FieldSelectionConfig {
        FieldSelectionConfig::from(value)
    }

    fn snapshot() -> ProfileSnapshot {
        ProfileSnapshot {
            personal: Some(personal()),
            professional: vec![professional("p1", "p1@work.com"), professional("p2", "p2@work.com")],
            ..Default::default()
        }
    }

    #[test]
    fn test_unselected_scalar_is_omitted() {
        let card = project(
            &snapshot(),
            &config(json!({"full_name": true, "primary_email": false})),
        );
        assert_eq!(card.personal.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(card.personal.primary_email, None);

        let out = serde_json::to_value(&card.personal).unwrap();
        assert!(out.get("primary_email").is_none());
    }

    #[test]
    fn test_blank_values_are_absent() {
        let card = project(&snapshot(), &config(json!({"mobile_number": true})));
        assert_eq!(card.personal.mobile_number, None);
    }

    #[test]
    fn test_sub_field_requires_selected_entry() {
        let card = project(
            &snapshot(),
            &config(json!({
                "professionalIds": ["p1"],
                "professional_emails": ["p1", "p2"],
            })),
        );

        assert_eq!(card.professional.len(), 1);
        let p1 = &card.professional[0];
        assert_eq!(p1.id, "p1");
        assert_eq!(p1.office_email.as_deref(), Some("p1@work.com"));
        // phone not in professional_phones
        assert_eq!(p1.office_phone, None);
        // ungated descriptive fields
        assert_eq!(p1.company_name.as_deref(), Some("Company p1"));
        assert_eq!(p1.designation.as_deref(), Some("Engineer p1"));
        assert_eq!(p1.company_website.as_deref(), Some("https://p1.example"));
        assert_eq!(p1.office_address.as_deref(), Some("1 Work Way, Metropolis"));

        let text = serde_json::to_string(&card).unwrap();
        assert!(!text.contains("p2@work.com"));
    }

    #[test]
    fn test_featured_entry_prefers_first_selected() {
        let card = project(&snapshot(), &config(json!({"professionalIds": ["p2"]})));
        assert_eq!(card.featured.as_ref().map(|f| f.id.as_str()), Some("p2"));
        assert_eq!(card.company_logo_url(), Some("https://cdn.example/p2.png"));
    }

    #[test]
    fn test_featured_entry_falls_back_to_first_overall() {
        let card = project(&snapshot(), &config(json!({})));
        assert!(card.professional.is_empty());
        assert_eq!(card.featured.as_ref().map(|f| f.id.as_str()), Some("p1"));

        let empty = ProfileSnapshot::default();
        assert_eq!(project(&empty, &config(json!({}))).featured, None);
    }

    #[test]
    fn test_dangling_ids_are_skipped() {
        let card = project(
            &snapshot(),
            &config(json!({"professionalIds": ["gone", "p2"], "educationIds": ["gone"]})),
        );
        let ids: Vec<_> = card.professional.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2"]);
        assert!(card.education.is_empty());
    }

    #[test]
    fn test_entries_keep_storage_order() {
        let card = project(&snapshot(), &config(json!({"professionalIds": ["p2", "p1"]})));
        let ids: Vec<_> = card.professional.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_auxiliary_collections_filtered_by_membership() {
        let mut profile = snapshot();
        profile.education = vec![
            Education {
                id: "e1".into(),
                degree_name: "BSc".into(),
                institution: "State U".into(),
                ..Default::default()
            },
            Education {
                id: "e2".into(),
                degree_name: "MSc".into(),
                institution: "Tech U".into(),
                ..Default::default()
            },
        ];
        profile.photos = vec![GalleryPhoto {
            id: "ph1".into(),
            photo_url: "https://cdn.example/a.jpg".into(),
            ..Default::default()
        }];

        let card = project(
            &profile,
            &config(json!({"educationIds": ["e2"], "photoIds": ["ph1"]})),
        );
        assert_eq!(card.education.len(), 1);
        assert_eq!(card.education[0].id, "e2");
        assert_eq!(card.photos.len(), 1);
        assert!(card.awards.is_empty());
        assert!(card.products.is_empty());
    }

    #[test]
    fn test_home_address_normalized() {
        let card = project(&snapshot(), &config(json!({"home_address": true})));
        assert_eq!(card.personal.home_address.as_deref(), Some("12 Elm Rd, Springfield"));
    }

    #[test]
    fn test_display_address_and_tagline() {
        let card = project(
            &snapshot(),
            &config(json!({"home_address": true, "professionalIds": ["p1"]})),
        );
        assert_eq!(card.display_address(), Some("1 Work Way, Metropolis"));
        assert_eq!(card.tagline(), Some("Engineer p1"));

        let mut profile = snapshot();
        profile.professional.clear();
        let card = project(&profile, &config(json!({"home_address": true, "bio": true})));
        assert_eq!(card.display_address(), Some("12 Elm Rd, Springfield"));
        assert_eq!(card.tagline(), Some("Builder of things"));
    }

    #[test]
    fn test_missing_personal_info_projects_empty() {
        let profile = ProfileSnapshot::default();
        let card = project(&profile, &FieldSelectionConfig::starter());
        assert_eq!(card, ProjectedCard::default());
    }
}
