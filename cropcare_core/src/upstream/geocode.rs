//! Free-text location to coordinates.

use super::Coordinates;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Coordinates for a location string, `None` when nothing matched
    async fn locate(&self, query: &str) -> Result<Option<Coordinates>>;
}

/// Geocoder backed by the Nominatim search API
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

fn first_place(places: &[Place]) -> Result<Option<Coordinates>> {
    let Some(place) = places.first() else {
        return Ok(None);
    };
    let parse = |value: &str| {
        value
            .parse::<f64>()
            .map_err(|_| Error::Upstream(format!("geocoder returned bad coordinate '{}'", value)))
    };
    Ok(Some(Coordinates::new(parse(&place.lat)?, parse(&place.lon)?)))
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn locate(&self, query: &str) -> Result<Option<Coordinates>> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "geocoder answered {}",
                response.status()
            )));
        }
        let places: Vec<Place> = response.json().await?;
        let coords = first_place(&places)?;
        tracing::debug!(query, ?coords, "geocoded location");
        Ok(coords)
    }
}

/// Geocoder over a fixed table of Ghanaian towns, for use without network
#[derive(Clone, Debug, Default)]
pub struct OfflineGeocoder;

const KNOWN_TOWNS: [(&str, f64, f64); 6] = [
    ("accra", 5.6037, -0.1870),
    ("kumasi", 6.6885, -1.6244),
    ("tamale", 9.4008, -0.8393),
    ("cape coast", 5.1053, -1.2466),
    ("tema", 5.6698, -0.0166),
    ("takoradi", 4.8845, -1.7554),
];

#[async_trait]
impl Geocoder for OfflineGeocoder {
    async fn locate(&self, query: &str) -> Result<Option<Coordinates>> {
        let wanted = query.to_lowercase();
        Ok(KNOWN_TOWNS
            .iter()
            .find(|(town, _, _)| wanted.contains(town))
            .map(|&(_, lat, lon)| Coordinates::new(lat, lon)))
    }
}
