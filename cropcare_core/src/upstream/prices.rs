//! Treatment price quotes.
//!
//! There is no live price feed yet; [`MockPriceSource`] produces stable
//! quotes seeded from a SHA-256 of the treatment and supplier names, so the
//! same product always gets the same price from the same supplier.

use super::round2;
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    LimitedStock,
    OutOfStock,
    PreOrder,
}

impl Availability {
    const ALL: [Availability; 4] = [
        Availability::InStock,
        Availability::LimitedStock,
        Availability::OutOfStock,
        Availability::PreOrder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::InStock => "in_stock",
            Availability::LimitedStock => "limited_stock",
            Availability::OutOfStock => "out_of_stock",
            Availability::PreOrder => "pre_order",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One supplier's price for a product
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub product_name: String,
    pub price_ghs: f64,
    pub quantity: String,
    pub supplier: String,
    pub location: String,
    pub last_updated: DateTime<Utc>,
    pub availability: Availability,
}

/// Average and range over a set of quotes
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub average_ghs: f64,
    pub min_ghs: f64,
    pub max_ghs: f64,
}

impl PriceSummary {
    /// `None` when no quote carries a positive price
    pub fn summarize(quotes: &[PriceQuote]) -> Option<Self> {
        let prices: Vec<f64> = quotes
            .iter()
            .map(|q| q.price_ghs)
            .filter(|p| *p > 0.0)
            .collect();
        if prices.is_empty() {
            return None;
        }
        let sum: f64 = prices.iter().sum();
        Some(Self {
            average_ghs: round2(sum / prices.len() as f64),
            min_ghs: prices.iter().copied().fold(f64::INFINITY, f64::min),
            max_ghs: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Up to `limit` quotes for a treatment, optionally pinned to a location
    async fn prices(
        &self,
        treatment: &str,
        location: Option<&str>,
        limit: usize,
    ) -> Result<Vec<PriceQuote>>;
}

const BASE_PRICES: [(&str, f64); 10] = [
    ("mancozeb", 35.0),
    ("copper", 45.0),
    ("imidacloprid", 40.0),
    ("neem", 25.0),
    ("abamectin", 50.0),
    ("chlorantraniliprole", 65.0),
    ("metalaxyl", 60.0),
    ("streptomycin", 55.0),
    ("thiamethoxam", 50.0),
    ("malathion", 35.0),
];

const DEFAULT_BASE_PRICE: f64 = 40.0;

const SUPPLIERS: [&str; 8] = [
    "Yara Ghana Limited",
    "Chemico Limited",
    "Dizengoff Ghana Limited",
    "Agro-Chemical Association",
    "Local Agricultural Store",
    "Farm Supply Center",
    "Crop Protection Ltd",
    "Ghana Agro Supplies",
];

const LOCATIONS: [&str; 6] = ["Accra", "Kumasi", "Tamale", "Cape Coast", "Tema", "Takoradi"];

const QUANTITIES: [&str; 6] = ["500ml", "1L", "1kg", "5kg", "250ml", "2.5L"];

/// Base price for the first keyword found in the treatment name
pub fn base_price(treatment: &str) -> f64 {
    let name = treatment.to_lowercase();
    BASE_PRICES
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map_or(DEFAULT_BASE_PRICE, |&(_, price)| price)
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut start_of_word = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if start_of_word {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(c);
            start_of_word = true;
        }
    }
    out
}

/// Deterministic stand-in for a market price feed
#[derive(Clone, Debug, Default)]
pub struct MockPriceSource;

impl MockPriceSource {
    /// Quotes as of `now`. Identical inputs give identical quotes.
    pub fn quotes_at(
        &self,
        treatment: &str,
        location: Option<&str>,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<PriceQuote> {
        let key = treatment.trim().to_lowercase();
        let base = base_price(&key);

        SUPPLIERS
            .iter()
            .take(limit)
            .map(|supplier| {
                let digest = Sha256::digest(format!("{}|{}", key, supplier).as_bytes());
                let spread = f64::from(u16::from_be_bytes([digest[0], digest[1]])) / f64::from(u16::MAX);
                let variation = 0.8 + spread * 0.5;
                let quantity = QUANTITIES[usize::from(digest[2]) % QUANTITIES.len()];
                let supplier_location = location
                    .map(str::to_string)
                    .unwrap_or_else(|| LOCATIONS[usize::from(digest[3]) % LOCATIONS.len()].to_string());

                PriceQuote {
                    product_name: format!("{} - {}", title_case(&key), quantity),
                    price_ghs: round2(base * variation),
                    quantity: quantity.to_string(),
                    supplier: supplier.to_string(),
                    location: supplier_location,
                    last_updated: now - ChronoDuration::days(i64::from(digest[4] % 8)),
                    availability: Availability::ALL[usize::from(digest[5]) % Availability::ALL.len()],
                }
            })
            .collect()
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn prices(
        &self,
        treatment: &str,
        location: Option<&str>,
        limit: usize,
    ) -> Result<Vec<PriceQuote>> {
        Ok(self.quotes_at(treatment, location, limit, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_base_price_by_keyword() {
        assert_eq!(base_price("Mancozeb fungicide"), 35.0);
        assert_eq!(base_price("Copper-based fungicide"), 45.0);
        assert_eq!(base_price("Kaolin clay"), 40.0);
    }

    #[test]
    fn test_quotes_are_deterministic_and_bounded() {
        let source = MockPriceSource;
        let first = source.quotes_at("Neem oil treatment", None, 8, fixed_now());
        let second = source.quotes_at("neem oil treatment ", None, 8, fixed_now());
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);

        for quote in &first {
            assert!(quote.price_ghs >= 25.0 * 0.8 - 0.01);
            assert!(quote.price_ghs <= 25.0 * 1.3 + 0.01);
            assert!(quote.product_name.starts_with("Neem Oil Treatment - "));
            assert!(fixed_now() - quote.last_updated <= ChronoDuration::days(7));
        }
    }

    #[test]
    fn test_location_and_limit() {
        let quotes = MockPriceSource.quotes_at("Malathion", Some("Tamale"), 3, fixed_now());
        assert_eq!(quotes.len(), 3);
        assert!(quotes.iter().all(|q| q.location == "Tamale"));
        assert_eq!(quotes[0].supplier, "Yara Ghana Limited");
    }

    #[test]
    fn test_summary() {
        let mut quotes = MockPriceSource.quotes_at("Abamectin", None, 4, fixed_now());
        quotes[0].price_ghs = 40.0;
        quotes[1].price_ghs = 60.0;
        quotes[2].price_ghs = 50.0;
        quotes[3].price_ghs = 0.0;

        let summary = PriceSummary::summarize(&quotes).unwrap();
        assert_eq!(summary.average_ghs, 50.0);
        assert_eq!(summary.min_ghs, 40.0);
        assert_eq!(summary.max_ghs, 60.0);
        assert!(PriceSummary::summarize(&[]).is_none());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("bt-based biopesticide"), "Bt-Based Biopesticide");
    }
}
