//! PostgreSQL store

use async_trait::async_trait;
use shared::models::{
    Award, Card, Education, GalleryPhoto, PersonalInfo, ProductService, ProfessionalInfo,
    ViewContext, ViewEvent,
};
use shared::util::{new_id, now_millis};
use sqlx::PgPool;
use sqlx::types::Json;

use super::{CardStore, ProfileStore, StoreError, StoreResult};

const PERSONAL_COLUMNS: &str = "id, user_id, full_name, date_of_birth, primary_email,
    secondary_email, mobile_number, phone_number, whatsapp_number, home_address, bio,
    instagram_url, facebook_url, linkedin_url, profile_photo_url, created_at, updated_at";

const PROFESSIONAL_COLUMNS: &str = "id, user_id, designation, company_name, company_website,
    company_logo_url, office_address, office_email, office_phone, whatsapp_number, department,
    office_opening_time, office_closing_time, office_days, instagram_url, facebook_url,
    linkedin_url, is_primary, created_at, updated_at";

const CARD_COLUMNS: &str = "id, user_id, name, slug, template_type, fields_config,
    design_config, is_default, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and run pending migrations
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn get_personal_info(&self, user_id: &str) -> StoreResult<Option<PersonalInfo>> {
        let sql = format!("SELECT {PERSONAL_COLUMNS} FROM personal_info WHERE user_id = $1");
        Ok(sqlx::query_as::<_, PersonalInfo>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn save_personal_info(&self, info: &PersonalInfo) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO personal_info (id, user_id, full_name, date_of_birth, primary_email,
                secondary_email, mobile_number, phone_number, whatsapp_number, home_address,
                bio, instagram_url, facebook_url, linkedin_url, profile_photo_url,
                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = $3, date_of_birth = $4, primary_email = $5, secondary_email = $6,
                mobile_number = $7, phone_number = $8, whatsapp_number = $9,
                home_address = $10, bio = $11, instagram_url = $12, facebook_url = $13,
                linkedin_url = $14, profile_photo_url = $15, updated_at = $17",
        )
        .bind(&info.id)
        .bind(&info.user_id)
        .bind(&info.full_name)
        .bind(&info.date_of_birth)
        .bind(&info.primary_email)
        .bind(&info.secondary_email)
        .bind(&info.mobile_number)
        .bind(&info.phone_number)
        .bind(&info.whatsapp_number)
        .bind(&info.home_address)
        .bind(&info.bio)
        .bind(&info.instagram_url)
        .bind(&info.facebook_url)
        .bind(&info.linkedin_url)
        .bind(&info.profile_photo_url)
        .bind(info.created_at)
        .bind(info.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ========== Professional ==========

    async fn list_professional(&self, user_id: &str) -> StoreResult<Vec<ProfessionalInfo>> {
        let sql = format!(
            "SELECT {PROFESSIONAL_COLUMNS} FROM professional_info
            WHERE user_id = $1 ORDER BY created_at, seq"
        );
        Ok(sqlx::query_as::<_, ProfessionalInfo>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_professional(
        &self,
        user_id: &str,
        id: &str,
    ) -> StoreResult<Option<ProfessionalInfo>> {
        let sql = format!(
            "SELECT {PROFESSIONAL_COLUMNS} FROM professional_info WHERE id = $1 AND user_id = $2"
        );
        Ok(sqlx::query_as::<_, ProfessionalInfo>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn save_professional(&self, entry: &ProfessionalInfo) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO professional_info (id, user_id, designation, company_name,
                company_website, company_logo_url, office_address, office_email, office_phone,
                whatsapp_number, department, office_opening_time, office_closing_time,
                office_days, instagram_url, facebook_url, linkedin_url, is_primary,
                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20)
            ON CONFLICT (id) DO UPDATE SET
                designation = $3, company_name = $4, company_website = $5,
                company_logo_url = $6, office_address = $7, office_email = $8,
                office_phone = $9, whatsapp_number = $10, department = $11,
                office_opening_time = $12, office_closing_time = $13, office_days = $14,
                instagram_url = $15, facebook_url = $16, linkedin_url = $17,
                is_primary = $18, updated_at = $20
            WHERE professional_info.user_id = $2",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.designation)
        .bind(&entry.company_name)
        .bind(&entry.company_website)
        .bind(&entry.company_logo_url)
        .bind(&entry.office_address)
        .bind(&entry.office_email)
        .bind(&entry.office_phone)
        .bind(&entry.whatsapp_number)
        .bind(&entry.department)
        .bind(&entry.office_opening_time)
        .bind(&entry.office_closing_time)
        .bind(&entry.office_days)
        .bind(&entry.instagram_url)
        .bind(&entry.facebook_url)
        .bind(&entry.linkedin_url)
        .bind(entry.is_primary)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_professional(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM professional_info WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ========== Education ==========

    async fn list_education(&self, user_id: &str) -> StoreResult<Vec<Education>> {
        Ok(sqlx::query_as::<_, Education>(
            "SELECT id, user_id, degree_name, institution, year_completed, description, created_at
            FROM education WHERE user_id = $1
            ORDER BY year_completed DESC NULLS LAST, created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_education(&self, user_id: &str, id: &str) -> StoreResult<Option<Education>> {
        Ok(sqlx::query_as::<_, Education>(
            "SELECT id, user_id, degree_name, institution, year_completed, description, created_at
            FROM education WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn save_education(&self, entry: &Education) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO education (id, user_id, degree_name, institution, year_completed,
                description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                degree_name = $3, institution = $4, year_completed = $5, description = $6
            WHERE education.user_id = $2",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.degree_name)
        .bind(&entry.institution)
        .bind(entry.year_completed)
        .bind(&entry.description)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_education(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM education WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ========== Awards ==========

    async fn list_awards(&self, user_id: &str) -> StoreResult<Vec<Award>> {
        Ok(sqlx::query_as::<_, Award>(
            "SELECT id, user_id, title, issuing_org, date_received, expiry_date,
                certificate_url, created_at
            FROM awards WHERE user_id = $1
            ORDER BY date_received DESC NULLS LAST, created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_award(&self, user_id: &str, id: &str) -> StoreResult<Option<Award>> {
        Ok(sqlx::query_as::<_, Award>(
            "SELECT id, user_id, title, issuing_org, date_received, expiry_date,
                certificate_url, created_at
            FROM awards WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn save_award(&self, entry: &Award) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO awards (id, user_id, title, issuing_org, date_received, expiry_date,
                certificate_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                title = $3, issuing_org = $4, date_received = $5, expiry_date = $6,
                certificate_url = $7
            WHERE awards.user_id = $2",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.title)
        .bind(&entry.issuing_org)
        .bind(&entry.date_received)
        .bind(&entry.expiry_date)
        .bind(&entry.certificate_url)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_award(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM awards WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ========== Products / services ==========

    async fn list_products(&self, user_id: &str) -> StoreResult<Vec<ProductService>> {
        Ok(sqlx::query_as::<_, ProductService>(
            "SELECT id, user_id, name, description, category, photo_url, website_link, created_at
            FROM products_services WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_product(&self, user_id: &str, id: &str) -> StoreResult<Option<ProductService>> {
        Ok(sqlx::query_as::<_, ProductService>(
            "SELECT id, user_id, name, description, category, photo_url, website_link, created_at
            FROM products_services WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn save_product(&self, entry: &ProductService) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO products_services (id, user_id, name, description, category,
                photo_url, website_link, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                name = $3, description = $4, category = $5, photo_url = $6, website_link = $7
            WHERE products_services.user_id = $2",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.name)
        .bind(&entry.description)
        .bind(&entry.category)
        .bind(&entry.photo_url)
        .bind(&entry.website_link)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_product(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products_services WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ========== Photos ==========

    async fn list_photos(&self, user_id: &str) -> StoreResult<Vec<GalleryPhoto>> {
        Ok(sqlx::query_as::<_, GalleryPhoto>(
            "SELECT id, user_id, photo_url, caption, display_order, created_at
            FROM photo_gallery WHERE user_id = $1
            ORDER BY display_order ASC NULLS LAST, created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_photo(&self, user_id: &str, id: &str) -> StoreResult<Option<GalleryPhoto>> {
        Ok(sqlx::query_as::<_, GalleryPhoto>(
            "SELECT id, user_id, photo_url, caption, display_order, created_at
            FROM photo_gallery WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn save_photo(&self, entry: &GalleryPhoto) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO photo_gallery (id, user_id, photo_url, caption, display_order, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                photo_url = $3, caption = $4, display_order = $5
            WHERE photo_gallery.user_id = $2",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.photo_url)
        .bind(&entry.caption)
        .bind(entry.display_order)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_photo(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM photo_gallery WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CardStore for PgStore {
    async fn get_active_card_by_slug(&self, slug: &str) -> StoreResult<Option<Card>> {
        let sql =
            format!("SELECT {CARD_COLUMNS} FROM business_cards WHERE slug = $1 AND is_active");
        Ok(sqlx::query_as::<_, Card>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn get_card(&self, user_id: &str, id: &str) -> StoreResult<Option<Card>> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM business_cards WHERE id = $1 AND user_id = $2");
        Ok(sqlx::query_as::<_, Card>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_cards(&self, user_id: &str) -> StoreResult<Vec<Card>> {
        let sql = format!(
            "SELECT {CARD_COLUMNS} FROM business_cards WHERE user_id = $1 ORDER BY created_at, seq"
        );
        Ok(sqlx::query_as::<_, Card>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_card(&self, card: &Card) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO business_cards (id, user_id, name, slug, template_type, fields_config,
                design_config, is_default, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(&card.id)
        .bind(&card.user_id)
        .bind(&card.name)
        .bind(&card.slug)
        .bind(&card.template_type)
        .bind(Json(&card.fields_config))
        .bind(&card.design_config)
        .bind(card.is_default)
        .bind(card.is_active)
        .bind(card.created_at)
        .bind(card.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_card(&self, card: &Card) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE business_cards SET name = $3, slug = $4, template_type = $5,
                fields_config = $6, design_config = $7, is_default = $8, is_active = $9,
                updated_at = $10
            WHERE id = $1 AND user_id = $2",
        )
        .bind(&card.id)
        .bind(&card.user_id)
        .bind(&card.name)
        .bind(&card.slug)
        .bind(&card.template_type)
        .bind(Json(&card.fields_config))
        .bind(&card.design_config)
        .bind(card.is_default)
        .bind(card.is_active)
        .bind(card.updated_at)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("card {}", card.id)));
        }
        Ok(())
    }

    async fn delete_card(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        // card_analytics rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM business_cards WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_default_card(&self, user_id: &str, id: &str) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let exists: Option<(String,)> =
            sqlx::query_as("SELECT id FROM business_cards WHERE id = $1 AND user_id = $2 FOR UPDATE")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }
        let now = now_millis();
        sqlx::query(
            "UPDATE business_cards SET is_default = (id = $2), updated_at = $3
            WHERE user_id = $1 AND (is_default OR id = $2)",
        )
        .bind(user_id)
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<&str>) -> StoreResult<bool> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM business_cards
                WHERE slug = $1 AND ($2::TEXT IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
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
        sqlx::query(
            "INSERT INTO card_analytics (id, card_id, viewed_at, ip_address, user_agent, referrer)
            VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&event.id)
        .bind(&event.card_id)
        .bind(event.viewed_at)
        .bind(&event.ip_address)
        .bind(&event.user_agent)
        .bind(&event.referrer)
        .execute(&self.pool)
        .await?;
        Ok(event)
    }

    async fn list_views(&self, card_ids: &[String]) -> StoreResult<Vec<ViewEvent>> {
        if card_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(sqlx::query_as::<_, ViewEvent>(
            "SELECT id, card_id, viewed_at, ip_address, user_agent, referrer
            FROM card_analytics WHERE card_id = ANY($1)
            ORDER BY viewed_at DESC",
        )
        .bind(card_ids)
        .fetch_all(&self.pool)
        .await?)
    }
}
