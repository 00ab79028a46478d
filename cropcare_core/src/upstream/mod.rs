//! Outbound collaborators used by the recommendation service.
//!
//! Each collaborator sits behind an async trait so the service can be wired
//! with live HTTP implementations or offline ones. Every call the service
//! makes goes through [`bounded`].

pub mod geocode;
pub mod prices;
pub mod suppliers;

pub use geocode::{Geocoder, NominatimGeocoder, OfflineGeocoder};
pub use prices::{Availability, MockPriceSource, PriceQuote, PriceSource, PriceSummary};
pub use suppliers::{
    filter_suppliers, OverpassDirectory, Supplier, SupplierDirectory, VerifiedDirectory,
};

use crate::config::UpstreamConfig;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometres, rounded to two decimals
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let (lat1, lon1) = (self.latitude.to_radians(), self.longitude.to_radians());
        let (lat2, lon2) = (other.latitude.to_radians(), other.longitude.to_radians());
        let dlat = lat2 - lat1;
        let dlon = lon2 - lon1;

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        round2(c * EARTH_RADIUS_KM)
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Run a collaborator call under a deadline.
///
/// Expiry becomes [`Error::UpstreamTimeout`] naming the collaborator.
pub async fn bounded<T, F>(collaborator: &str, limit: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(collaborator, ?limit, "collaborator call timed out");
            Err(Error::UpstreamTimeout {
                collaborator: collaborator.to_string(),
                after: limit,
            })
        }
    }
}

/// Shared HTTP client for the live collaborators
pub fn http_client(config: &UpstreamConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .build()?;
    Ok(client)
}
