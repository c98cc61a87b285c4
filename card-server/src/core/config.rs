//! Server configuration

use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Card server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL; `None` runs on the in-memory store
    pub database_url: Option<String>,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 secret for user bearer tokens
    pub jwt_secret: String,
    /// Log filter used when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
    /// Daily rolling log files are written here when set
    pub log_dir: Option<String>,
    /// Comma separated allowed origins; empty means permissive
    pub cors_origins: Vec<String>,
    pub geoip: GeoIpConfig,
    pub analytics: AnalyticsConfig,
}

/// Geo-IP lookup tuning
#[derive(Debug, Clone)]
pub struct GeoIpConfig {
    /// When false every IP resolves to "Unknown" without network calls
    pub enabled: bool,
    /// Per-lookup timeout
    pub timeout: Duration,
    /// Max lookups in flight per aggregation run
    pub concurrency: usize,
}

#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Days in the zero-filled views-by-date series
    pub window_days: u32,
    pub top_referrers: usize,
    pub recent_views: usize,
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: Duration::from_millis(3000),
            concurrency: 8,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            top_referrers: 10,
            recent_views: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            http_port: 8080,
            environment: "development".into(),
            jwt_secret: "dev-JWT_SECRET-not-for-production".into(),
            log_level: "card_server=info,tower_http=info".into(),
            log_json: false,
            log_dir: None,
            cors_origins: Vec::new(),
            geoip: GeoIpConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let defaults = Self::default();

        let database_url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        if database_url.is_none() && environment != "development" {
            return Err(format!("DATABASE_URL must be set in {environment} environment").into());
        }

        let window_days = env_parse("ANALYTICS_WINDOW_DAYS").unwrap_or(defaults.analytics.window_days);
        if !(1..=365).contains(&window_days) {
            return Err("ANALYTICS_WINDOW_DAYS must be between 1 and 365".into());
        }

        Ok(Self {
            database_url,
            http_port: env_parse("HTTP_PORT").unwrap_or(defaults.http_port),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: env_parse("LOG_JSON").unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            geoip: GeoIpConfig {
                enabled: env_parse("GEOIP_ENABLED").unwrap_or(defaults.geoip.enabled),
                timeout: env_parse("GEOIP_TIMEOUT_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.geoip.timeout),
                concurrency: env_parse::<usize>("GEOIP_CONCURRENCY")
                    .unwrap_or(defaults.geoip.concurrency)
                    .max(1),
            },
            analytics: AnalyticsConfig {
                window_days,
                ..defaults.analytics
            },
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
