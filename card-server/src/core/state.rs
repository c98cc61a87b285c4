use std::sync::Arc;

use crate::analytics::{DisabledResolver, GeoIpResolver, IpApiResolver};
use crate::auth::JwtService;
use crate::core::Config;
use crate::error::ServerError;
use crate::store::{CardStore, MemoryStore, PgStore, ProfileStore};

/// Server state - shared handles to every service
///
/// Cloning is cheap: every field is an `Arc`.
///
/// | Field | Type | Notes |
/// |-------|------|-------|
/// | config | Config | immutable |
/// | profiles | dyn ProfileStore | Postgres or in-memory |
/// | cards | dyn CardStore | same backend as `profiles` |
/// | geo | dyn GeoIpResolver | disabled resolver when `GEOIP_ENABLED=false` |
/// | jwt | JwtService | bearer token validation |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub profiles: Arc<dyn ProfileStore>,
    pub cards: Arc<dyn CardStore>,
    pub geo: Arc<dyn GeoIpResolver>,
    pub jwt: Arc<JwtService>,
}

impl ServerState {
    /// Build state from configuration.
    ///
    /// Connects to Postgres (running migrations) when `DATABASE_URL` is set;
    /// otherwise falls back to the in-memory store, which is only allowed in
    /// development.
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        let (profiles, cards): (Arc<dyn ProfileStore>, Arc<dyn CardStore>) =
            match &config.database_url {
                Some(url) => {
                    let store = Arc::new(PgStore::connect(url).await?);
                    tracing::info!("Connected to PostgreSQL, migrations applied");
                    (store.clone() as Arc<dyn ProfileStore>, store as Arc<dyn CardStore>)
                }
                None if config.is_development() => {
                    tracing::warn!("DATABASE_URL not set, using in-memory store");
                    let store = Arc::new(MemoryStore::new());
                    (store.clone() as Arc<dyn ProfileStore>, store as Arc<dyn CardStore>)
                }
                None => {
                    return Err(ServerError::Config(format!(
                        "DATABASE_URL must be set in {} environment",
                        config.environment
                    )));
                }
            };

        let geo: Arc<dyn GeoIpResolver> = if config.geoip.enabled {
            Arc::new(IpApiResolver::new())
        } else {
            tracing::info!("Geo-IP lookups disabled");
            Arc::new(DisabledResolver)
        };

        Ok(Self::with_stores(config.clone(), profiles, cards, geo))
    }

    /// Assemble state from ready-made parts (tests, embedding)
    pub fn with_stores(
        config: Config,
        profiles: Arc<dyn ProfileStore>,
        cards: Arc<dyn CardStore>,
        geo: Arc<dyn GeoIpResolver>,
    ) -> Self {
        let jwt = Arc::new(JwtService::new(&config.jwt_secret));
        Self {
            config: Arc::new(config),
            profiles,
            cards,
            geo,
            jwt,
        }
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt.clone()
    }
}
