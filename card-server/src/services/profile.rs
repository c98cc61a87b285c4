//! Profile service
//!
//! Owner-scoped CRUD over personal info and the profile collections.
//! Deleting an entry also removes its id from every card config of the owner.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Award, AwardCreate, AwardUpdate, Education, EducationCreate, EducationUpdate, EntryKind,
    GalleryPhoto, GalleryPhotoCreate, GalleryPhotoUpdate, PersonalInfo, PersonalInfoUpsert,
    ProductService, ProductServiceCreate, ProductServiceUpdate, ProfessionalInfo,
    ProfessionalInfoCreate, ProfessionalInfoUpdate, ProfileCompletion,
};
use shared::util::{new_id, now_millis};

use crate::core::ServerState;
use crate::projection::ProfileSnapshot;
use crate::store::{CardStore, ProfileStore};
use crate::utils::validation::{
    MAX_BIO_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN,
    validate_address, validate_optional_text, validate_required_text,
};

/// Load everything a card can show, in storage order
pub async fn load_snapshot(state: &ServerState, user_id: &str) -> AppResult<ProfileSnapshot> {
    let store = &state.profiles;
    let (personal, professional, education, awards, products, photos) = tokio::try_join!(
        store.get_personal_info(user_id),
        store.list_professional(user_id),
        store.list_education(user_id),
        store.list_awards(user_id),
        store.list_products(user_id),
        store.list_photos(user_id),
    )?;
    Ok(ProfileSnapshot {
        personal,
        professional,
        education,
        awards,
        products,
        photos,
    })
}

// ========== Personal info ==========

pub async fn get_personal_info(state: &ServerState, user_id: &str) -> AppResult<PersonalInfo> {
    state
        .profiles
        .get_personal_info(user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound))
}

/// Create or replace the caller's personal info
pub async fn upsert_personal_info(
    state: &ServerState,
    user_id: &str,
    input: PersonalInfoUpsert,
) -> AppResult<PersonalInfo> {
    let existing = state.profiles.get_personal_info(user_id).await?;
    let now = now_millis();
    let (id, created_at) = existing
        .map(|p| (p.id, p.created_at))
        .unwrap_or_else(|| (new_id(), now));

    let info = PersonalInfo {
        id,
        user_id: user_id.to_string(),
        full_name: input.full_name.trim().to_string(),
        date_of_birth: input.date_of_birth,
        primary_email: input.primary_email,
        secondary_email: input.secondary_email,
        mobile_number: input.mobile_number,
        phone_number: input.phone_number,
        whatsapp_number: input.whatsapp_number,
        home_address: input.home_address,
        bio: input.bio,
        instagram_url: input.instagram_url,
        facebook_url: input.facebook_url,
        linkedin_url: input.linkedin_url,
        profile_photo_url: input.profile_photo_url,
        created_at,
        updated_at: now,
    };
    validate_personal(&info)?;

    state.profiles.save_personal_info(&info).await?;
    tracing::info!(user_id = %user_id, "Personal info saved");
    Ok(info)
}

pub async fn completion(state: &ServerState, user_id: &str) -> AppResult<ProfileCompletion> {
    let info = state.profiles.get_personal_info(user_id).await?;
    Ok(ProfileCompletion::of(info.as_ref()))
}

fn validate_personal(info: &PersonalInfo) -> AppResult<()> {
    validate_required_text(&info.full_name, "full_name", MAX_NAME_LEN)?;
    validate_optional_text(&info.date_of_birth, "date_of_birth", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&info.primary_email, "primary_email", MAX_EMAIL_LEN)?;
    validate_optional_text(&info.secondary_email, "secondary_email", MAX_EMAIL_LEN)?;
    validate_optional_text(&info.mobile_number, "mobile_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&info.phone_number, "phone_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&info.whatsapp_number, "whatsapp_number", MAX_SHORT_TEXT_LEN)?;
    validate_address(&info.home_address, "home_address")?;
    validate_optional_text(&info.bio, "bio", MAX_BIO_LEN)?;
    validate_optional_text(&info.instagram_url, "instagram_url", MAX_URL_LEN)?;
    validate_optional_text(&info.facebook_url, "facebook_url", MAX_URL_LEN)?;
    validate_optional_text(&info.linkedin_url, "linkedin_url", MAX_URL_LEN)?;
    validate_optional_text(&info.profile_photo_url, "profile_photo_url", MAX_URL_LEN)?;
    Ok(())
}

// ========== Professional ==========

pub async fn list_professional(
    state: &ServerState,
    user_id: &str,
) -> AppResult<Vec<ProfessionalInfo>> {
    Ok(state.profiles.list_professional(user_id).await?)
}

pub async fn create_professional(
    state: &ServerState,
    user_id: &str,
    input: ProfessionalInfoCreate,
) -> AppResult<ProfessionalInfo> {
    let now = now_millis();
    let entry = ProfessionalInfo {
        id: new_id(),
        user_id: user_id.to_string(),
        designation: input.designation,
        company_name: input.company_name,
        company_website: input.company_website,
        company_logo_url: input.company_logo_url,
        office_address: input.office_address,
        office_email: input.office_email,
        office_phone: input.office_phone,
        whatsapp_number: input.whatsapp_number,
        department: input.department,
        office_opening_time: input.office_opening_time,
        office_closing_time: input.office_closing_time,
        office_days: input.office_days,
        instagram_url: input.instagram_url,
        facebook_url: input.facebook_url,
        linkedin_url: input.linkedin_url,
        is_primary: input.is_primary,
        created_at: now,
        updated_at: now,
    };
    validate_professional(&entry)?;
    state.profiles.save_professional(&entry).await?;
    Ok(entry)
}

pub async fn update_professional(
    state: &ServerState,
    user_id: &str,
    id: &str,
    input: ProfessionalInfoUpdate,
) -> AppResult<ProfessionalInfo> {
    let mut entry = state
        .profiles
        .get_professional(user_id, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProfessionalNotFound))?;
    entry.apply(input);
    entry.updated_at = now_millis();
    validate_professional(&entry)?;
    state.profiles.save_professional(&entry).await?;
    Ok(entry)
}

pub async fn delete_professional(state: &ServerState, user_id: &str, id: &str) -> AppResult<()> {
    if !state.profiles.delete_professional(user_id, id).await? {
        return Err(AppError::new(ErrorCode::ProfessionalNotFound));
    }
    prune_card_configs(state, user_id, EntryKind::Professional, id).await
}

fn validate_professional(entry: &ProfessionalInfo) -> AppResult<()> {
    validate_optional_text(&entry.designation, "designation", MAX_NAME_LEN)?;
    validate_optional_text(&entry.company_name, "company_name", MAX_NAME_LEN)?;
    validate_optional_text(&entry.department, "department", MAX_NAME_LEN)?;
    validate_optional_text(&entry.company_website, "company_website", MAX_URL_LEN)?;
    validate_optional_text(&entry.company_logo_url, "company_logo_url", MAX_URL_LEN)?;
    validate_address(&entry.office_address, "office_address")?;
    validate_optional_text(&entry.office_email, "office_email", MAX_EMAIL_LEN)?;
    validate_optional_text(&entry.office_phone, "office_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&entry.whatsapp_number, "whatsapp_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&entry.office_opening_time, "office_opening_time", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&entry.office_closing_time, "office_closing_time", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&entry.office_days, "office_days", MAX_NOTE_LEN)?;
    validate_optional_text(&entry.instagram_url, "instagram_url", MAX_URL_LEN)?;
    validate_optional_text(&entry.facebook_url, "facebook_url", MAX_URL_LEN)?;
    validate_optional_text(&entry.linkedin_url, "linkedin_url", MAX_URL_LEN)?;
    Ok(())
}

// ========== Education ==========

pub async fn list_education(state: &ServerState, user_id: &str) -> AppResult<Vec<Education>> {
    Ok(state.profiles.list_education(user_id).await?)
}

pub async fn create_education(
    state: &ServerState,
    user_id: &str,
    input: EducationCreate,
) -> AppResult<Education> {
    let entry = Education {
        id: new_id(),
        user_id: user_id.to_string(),
        degree_name: input.degree_name,
        institution: input.institution,
        year_completed: input.year_completed,
        description: input.description,
        created_at: now_millis(),
    };
    validate_education(&entry)?;
    state.profiles.save_education(&entry).await?;
    Ok(entry)
}

pub async fn update_education(
    state: &ServerState,
    user_id: &str,
    id: &str,
    input: EducationUpdate,
) -> AppResult<Education> {
    let mut entry = state
        .profiles
        .get_education(user_id, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EducationNotFound))?;
    entry.apply(input);
    validate_education(&entry)?;
    state.profiles.save_education(&entry).await?;
    Ok(entry)
}

pub async fn delete_education(state: &ServerState, user_id: &str, id: &str) -> AppResult<()> {
    if !state.profiles.delete_education(user_id, id).await? {
        return Err(AppError::new(ErrorCode::EducationNotFound));
    }
    prune_card_configs(state, user_id, EntryKind::Education, id).await
}

fn validate_education(entry: &Education) -> AppResult<()> {
    validate_required_text(&entry.degree_name, "degree_name", MAX_NAME_LEN)?;
    validate_required_text(&entry.institution, "institution", MAX_NAME_LEN)?;
    validate_optional_text(&entry.description, "description", MAX_NOTE_LEN)?;
    if let Some(year) = entry.year_completed
        && !(1900..=2100).contains(&year)
    {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("year_completed {year} is out of range"),
        ));
    }
    Ok(())
}

// ========== Awards ==========

pub async fn list_awards(state: &ServerState, user_id: &str) -> AppResult<Vec<Award>> {
    Ok(state.profiles.list_awards(user_id).await?)
}

pub async fn create_award(
    state: &ServerState,
    user_id: &str,
    input: AwardCreate,
) -> AppResult<Award> {
    let entry = Award {
        id: new_id(),
        user_id: user_id.to_string(),
        title: input.title,
        issuing_org: input.issuing_org,
        date_received: input.date_received,
        expiry_date: input.expiry_date,
        certificate_url: input.certificate_url,
        created_at: now_millis(),
    };
    validate_award(&entry)?;
    state.profiles.save_award(&entry).await?;
    Ok(entry)
}

pub async fn update_award(
    state: &ServerState,
    user_id: &str,
    id: &str,
    input: AwardUpdate,
) -> AppResult<Award> {
    let mut entry = state
        .profiles
        .get_award(user_id, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AwardNotFound))?;
    entry.apply(input);
    validate_award(&entry)?;
    state.profiles.save_award(&entry).await?;
    Ok(entry)
}

pub async fn delete_award(state: &ServerState, user_id: &str, id: &str) -> AppResult<()> {
    if !state.profiles.delete_award(user_id, id).await? {
        return Err(AppError::new(ErrorCode::AwardNotFound));
    }
    prune_card_configs(state, user_id, EntryKind::Award, id).await
}

fn validate_award(entry: &Award) -> AppResult<()> {
    validate_required_text(&entry.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&entry.issuing_org, "issuing_org", MAX_NAME_LEN)?;
    validate_optional_text(&entry.date_received, "date_received", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&entry.expiry_date, "expiry_date", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&entry.certificate_url, "certificate_url", MAX_URL_LEN)?;
    Ok(())
}

// ========== Products / services ==========

pub async fn list_products(state: &ServerState, user_id: &str) -> AppResult<Vec<ProductService>> {
    Ok(state.profiles.list_products(user_id).await?)
}

pub async fn create_product(
    state: &ServerState,
    user_id: &str,
    input: ProductServiceCreate,
) -> AppResult<ProductService> {
    let entry = ProductService {
        id: new_id(),
        user_id: user_id.to_string(),
        name: input.name,
        description: input.description,
        category: input.category,
        photo_url: input.photo_url,
        website_link: input.website_link,
        created_at: now_millis(),
    };
    validate_product(&entry)?;
    state.profiles.save_product(&entry).await?;
    Ok(entry)
}

pub async fn update_product(
    state: &ServerState,
    user_id: &str,
    id: &str,
    input: ProductServiceUpdate,
) -> AppResult<ProductService> {
    let mut entry = state
        .profiles
        .get_product(user_id, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    entry.apply(input);
    validate_product(&entry)?;
    state.profiles.save_product(&entry).await?;
    Ok(entry)
}

pub async fn delete_product(state: &ServerState, user_id: &str, id: &str) -> AppResult<()> {
    if !state.profiles.delete_product(user_id, id).await? {
        return Err(AppError::new(ErrorCode::ProductNotFound));
    }
    prune_card_configs(state, user_id, EntryKind::ProductService, id).await
}

fn validate_product(entry: &ProductService) -> AppResult<()> {
    validate_required_text(&entry.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&entry.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&entry.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&entry.photo_url, "photo_url", MAX_URL_LEN)?;
    validate_optional_text(&entry.website_link, "website_link", MAX_URL_LEN)?;
    Ok(())
}

// ========== Photos ==========

pub async fn list_photos(state: &ServerState, user_id: &str) -> AppResult<Vec<GalleryPhoto>> {
    Ok(state.profiles.list_photos(user_id).await?)
}

pub async fn create_photo(
    state: &ServerState,
    user_id: &str,
    input: GalleryPhotoCreate,
) -> AppResult<GalleryPhoto> {
    let entry = GalleryPhoto {
        id: new_id(),
        user_id: user_id.to_string(),
        photo_url: input.photo_url,
        caption: input.caption,
        display_order: input.display_order,
        created_at: now_millis(),
    };
    validate_photo(&entry)?;
    state.profiles.save_photo(&entry).await?;
    Ok(entry)
}

pub async fn update_photo(
    state: &ServerState,
    user_id: &str,
    id: &str,
    input: GalleryPhotoUpdate,
) -> AppResult<GalleryPhoto> {
    let mut entry = state
        .profiles
        .get_photo(user_id, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PhotoNotFound))?;
    entry.apply(input);
    validate_photo(&entry)?;
    state.profiles.save_photo(&entry).await?;
    Ok(entry)
}

pub async fn delete_photo(state: &ServerState, user_id: &str, id: &str) -> AppResult<()> {
    if !state.profiles.delete_photo(user_id, id).await? {
        return Err(AppError::new(ErrorCode::PhotoNotFound));
    }
    prune_card_configs(state, user_id, EntryKind::Photo, id).await
}

fn validate_photo(entry: &GalleryPhoto) -> AppResult<()> {
    validate_required_text(&entry.photo_url, "photo_url", MAX_URL_LEN)?;
    validate_optional_text(&entry.caption, "caption", MAX_NOTE_LEN)?;
    Ok(())
}

/// Remove a deleted entry's id from every card config of the owner
async fn prune_card_configs(
    state: &ServerState,
    user_id: &str,
    kind: EntryKind,
    entry_id: &str,
) -> AppResult<()> {
    let cards = state.cards.list_cards(user_id).await?;
    for mut card in cards
        .into_iter()
        .filter(|c| c.fields_config.references(kind, entry_id))
    {
        card.fields_config = card.fields_config.prune_entry(kind, entry_id);
        card.updated_at = now_millis();
        state.cards.update_card(&card).await?;
        tracing::debug!(card_id = %card.id, kind = kind.key(), entry_id = %entry_id, "Pruned card config");
    }
    Ok(())
}
