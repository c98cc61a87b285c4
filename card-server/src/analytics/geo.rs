//! Geo-IP resolution
//!
//! One lookup per distinct IP per aggregation run, issued concurrently with a
//! bounded number in flight. Each lookup has its own timeout; a failed or
//! timed-out lookup only drops that IP, which the aggregator then buckets as
//! "Unknown".

use async_trait::async_trait;
use futures::{StreamExt, stream};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;

/// City and country of an IP
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoLocation {
    pub city: Option<String>,
    pub country: Option<String>,
}

impl GeoLocation {
    pub fn new(city: Option<&str>, country: Option<&str>) -> Self {
        let clean = |s: Option<&str>| s.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        Self {
            city: clean(city),
            country: clean(country),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.country.is_none()
    }

    /// `"City, Country"`, or whichever half is known, or `"Unknown"`
    pub fn label(&self) -> String {
        match (&self.city, &self.country) {
            (Some(city), Some(country)) => format!("{city}, {country}"),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => super::UNKNOWN_LOCATION.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Lookup request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No location for {0}")]
    NoLocation(String),

    #[error("Lookup timed out")]
    Timeout,

    #[error("Geo-IP lookup disabled")]
    Disabled,
}

#[async_trait]
pub trait GeoIpResolver: Send + Sync {
    async fn resolve(&self, ip: &str) -> Result<GeoLocation, GeoError>;
}

/// Resolver used when lookups are turned off
pub struct DisabledResolver;

#[async_trait]
impl GeoIpResolver for DisabledResolver {
    async fn resolve(&self, _ip: &str) -> Result<GeoLocation, GeoError> {
        Err(GeoError::Disabled)
    }
}

const IPAPI_CO_URL: &str = "https://ipapi.co";
const IP_API_COM_URL: &str = "http://ip-api.com";

#[derive(Deserialize)]
struct IpapiCoResponse {
    #[serde(default)]
    error: bool,
    city: Option<String>,
    country_name: Option<String>,
}

#[derive(Deserialize)]
struct IpApiComResponse {
    city: Option<String>,
    country: Option<String>,
}

/// Public geo-IP services: ipapi.co first, ip-api.com as fallback
pub struct IpApiResolver {
    client: reqwest::Client,
}

impl IpApiResolver {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn ipapi_co(&self, ip: &str) -> Result<GeoLocation, GeoError> {
        let resp: IpapiCoResponse = self
            .client
            .get(format!("{IPAPI_CO_URL}/{ip}/json/"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if resp.error {
            return Err(GeoError::NoLocation(ip.to_string()));
        }
        non_empty(
            ip,
            GeoLocation::new(resp.city.as_deref(), resp.country_name.as_deref()),
        )
    }

    async fn ip_api_com(&self, ip: &str) -> Result<GeoLocation, GeoError> {
        let resp: IpApiComResponse = self
            .client
            .get(format!("{IP_API_COM_URL}/json/{ip}?fields=country,city"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        non_empty(
            ip,
            GeoLocation::new(resp.city.as_deref(), resp.country.as_deref()),
        )
    }
}

impl Default for IpApiResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeoIpResolver for IpApiResolver {
    async fn resolve(&self, ip: &str) -> Result<GeoLocation, GeoError> {
        if !is_public_ip(ip) {
            return Err(GeoError::NoLocation(ip.to_string()));
        }
        match self.ipapi_co(ip).await {
            Ok(location) => Ok(location),
            Err(e) => {
                tracing::debug!(ip = %ip, error = %e, "ipapi.co lookup failed, trying ip-api.com");
                self.ip_api_com(ip).await
            }
        }
    }
}

fn non_empty(ip: &str, location: GeoLocation) -> Result<GeoLocation, GeoError> {
    if location.is_empty() {
        Err(GeoError::NoLocation(ip.to_string()))
    } else {
        Ok(location)
    }
}

/// Loopback, private and unparsable addresses have no public location
fn is_public_ip(ip: &str) -> bool {
    match ip.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => {
            !(v4.is_loopback() || v4.is_private() || v4.is_link_local() || v4.is_unspecified())
        }
        Ok(IpAddr::V6(v6)) => !(v6.is_loopback() || v6.is_unspecified()),
        Err(_) => false,
    }
}

/// Resolve every IP, at most `concurrency` at a time.
///
/// The returned map holds only successful lookups.
pub async fn resolve_locations(
    resolver: &dyn GeoIpResolver,
    ips: Vec<String>,
    timeout: Duration,
    concurrency: usize,
) -> HashMap<String, GeoLocation> {
    let lookups = ips.into_iter().map(|ip| async move {
        let result = match tokio::time::timeout(timeout, resolver.resolve(&ip)).await {
            Ok(result) => result,
            Err(_) => Err(GeoError::Timeout),
        };
        (ip, result)
    });

    let results: Vec<(String, Result<GeoLocation, GeoError>)> = stream::iter(lookups)
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut resolved = HashMap::with_capacity(results.len());
    for (ip, result) in results {
        match result {
            Ok(location) => {
                resolved.insert(ip, location);
            }
            Err(GeoError::Disabled) => {}
            Err(e) => tracing::warn!(ip = %ip, error = %e, "Geo-IP lookup failed"),
        }
    }
    resolved
}
