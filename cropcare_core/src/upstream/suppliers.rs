//! Agricultural supplier lookup.

use super::{round2, Coordinates};
use crate::{Error, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Verified suppliers are only offered within this distance
const VERIFIED_MAX_DISTANCE_KM: f64 = 200.0;

/// Below this many shops the verified list is appended
const MIN_SHOPS: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_km: Option<f64>,
    pub products: Vec<String>,
    pub rating: Option<f64>,
    pub verified: bool,
}

impl Supplier {
    fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }
}

#[async_trait]
pub trait SupplierDirectory: Send + Sync {
    /// Suppliers around `origin`, nearest first
    async fn nearby(&self, origin: Coordinates, radius_km: u32) -> Result<Vec<Supplier>>;
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

static VERIFIED_SUPPLIERS: Lazy<Vec<Supplier>> = Lazy::new(|| {
    let verified = |name: &str,
                    address: &str,
                    phone: &str,
                    email: Option<&str>,
                    lat: f64,
                    lon: f64,
                    products: &[&str],
                    rating: f64| Supplier {
        name: name.into(),
        address: address.into(),
        phone: Some(phone.into()),
        email: email.map(Into::into),
        latitude: Some(lat),
        longitude: Some(lon),
        distance_km: None,
        products: strings(products),
        rating: Some(rating),
        verified: true,
    };
    vec![
        verified(
            "Yara Ghana Limited",
            "Tema Industrial Area, Tema, Ghana",
            "+233-303-211-004",
            Some("info.ghana@yara.com"),
            5.6698,
            -0.0166,
            &["fertilizers", "soil_amendments", "crop_nutrition"],
            4.5,
        ),
        verified(
            "Chemico Limited",
            "Spintex Road, Accra, Ghana",
            "+233-302-815-380",
            Some("info@chemico.com.gh"),
            5.6037,
            -0.1870,
            &["pesticides", "fungicides", "herbicides", "insecticides"],
            4.2,
        ),
        verified(
            "Dizengoff Ghana Limited",
            "East Legon, Accra, Ghana",
            "+233-302-511-379",
            Some("info@dizengoff.com.gh"),
            5.6500,
            -0.1500,
            &["irrigation_equipment", "greenhouse_technology", "seeds"],
            4.3,
        ),
        verified(
            "Agro-Chemical Association of Ghana",
            "Osu, Accra, Ghana",
            "+233-302-761-742",
            None,
            5.5500,
            -0.1800,
            &["pesticides", "fungicides", "herbicides", "fertilizers"],
            4.0,
        ),
    ]
});

/// Product list implied by an OpenStreetMap shop or amenity type
pub fn products_for_shop_type(shop_type: &str) -> Vec<String> {
    let products: &[&str] = match shop_type {
        "agrarian" => &["fertilizers", "pesticides", "seeds", "farm_tools"],
        "farm" => &["fertilizers", "pesticides", "seeds", "farm_tools", "irrigation_equipment"],
        "pharmacy" => &["pesticides", "fungicides", "herbicides"],
        "hardware" => &["farm_tools", "irrigation_equipment"],
        "garden_centre" => &["fertilizers", "pesticides", "seeds", "organic_treatments"],
        _ => &["general_agricultural_supplies"],
    };
    strings(products)
}

fn by_distance(suppliers: &mut [Supplier]) {
    suppliers.sort_by(|a, b| {
        a.distance_km
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.distance_km.unwrap_or(f64::INFINITY))
    });
}

/// Sort shops by distance and top up thin results with verified suppliers.
pub fn finalize_suppliers(origin: Coordinates, mut shops: Vec<Supplier>) -> Vec<Supplier> {
    by_distance(&mut shops);
    if shops.len() < MIN_SHOPS {
        shops.extend(VERIFIED_SUPPLIERS.iter().filter_map(|supplier| {
            let distance = origin.distance_km(&supplier.coordinates()?);
            (distance < VERIFIED_MAX_DISTANCE_KM).then(|| Supplier {
                distance_km: Some(distance),
                ..supplier.clone()
            })
        }));
        by_distance(&mut shops);
    }
    shops
}

/// Keep suppliers that stock `product_type` (case-insensitive) and, when
/// asked, only verified ones. Order is preserved.
pub fn filter_suppliers(
    suppliers: Vec<Supplier>,
    product_type: Option<&str>,
    verified_only: bool,
) -> Vec<Supplier> {
    let wanted = product_type.map(str::to_lowercase);
    suppliers
        .into_iter()
        .filter(|s| !verified_only || s.verified)
        .filter(|s| match &wanted {
            Some(product) => s.products.iter().any(|p| p.to_lowercase() == *product),
            None => true,
        })
        .collect()
}

// ============================================================================
// Overpass
// ============================================================================

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

fn overpass_query(origin: Coordinates, radius_km: u32) -> String {
    let radius_m = u64::from(radius_km) * 1000;
    let (lat, lon) = (origin.latitude, origin.longitude);
    format!(
        "[out:json];\n(\n  node[\"shop\"=\"agrarian\"](around:{r},{lat},{lon});\n  node[\"shop\"=\"farm\"](around:{r},{lat},{lon});\n  node[\"amenity\"=\"pharmacy\"](around:{r},{lat},{lon});\n);\nout center;\n",
        r = radius_m,
        lat = lat,
        lon = lon
    )
}

fn shops_from_elements(origin: Coordinates, elements: Vec<Element>) -> Vec<Supplier> {
    elements
        .into_iter()
        .map(|el| {
            let shop_type = el
                .tags
                .get("shop")
                .or_else(|| el.tags.get("amenity"))
                .map(String::as_str)
                .unwrap_or_default();
            let distance_km = match (el.lat, el.lon) {
                (Some(lat), Some(lon)) => Some(origin.distance_km(&Coordinates::new(lat, lon))),
                _ => None,
            };
            Supplier {
                name: el
                    .tags
                    .get("name")
                    .cloned()
                    .unwrap_or_else(|| "Unknown Shop".to_string()),
                address: match (el.lat, el.lon) {
                    (Some(lat), Some(lon)) => format!("Lat: {}, Lon: {}", round2(lat), round2(lon)),
                    _ => "Address unavailable".to_string(),
                },
                phone: el.tags.get("phone").cloned(),
                email: el.tags.get("email").cloned(),
                latitude: el.lat,
                longitude: el.lon,
                distance_km,
                products: products_for_shop_type(shop_type),
                rating: None,
                verified: false,
            }
        })
        .collect()
}

/// Supplier directory backed by the Overpass API
pub struct OverpassDirectory {
    client: reqwest::Client,
    url: String,
}

impl OverpassDirectory {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SupplierDirectory for OverpassDirectory {
    async fn nearby(&self, origin: Coordinates, radius_km: u32) -> Result<Vec<Supplier>> {
        let query = overpass_query(origin, radius_km);
        let response = self
            .client
            .post(&self.url)
            .form(&[("data", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "supplier directory answered {}",
                response.status()
            )));
        }
        let body: OverpassResponse = response.json().await?;
        let shops = shops_from_elements(origin, body.elements);
        tracing::debug!(count = shops.len(), radius_km, "overpass shops found");
        Ok(finalize_suppliers(origin, shops))
    }
}

/// Directory that only offers the verified supplier list
#[derive(Clone, Debug, Default)]
pub struct VerifiedDirectory;

#[async_trait]
impl SupplierDirectory for VerifiedDirectory {
    async fn nearby(&self, origin: Coordinates, _radius_km: u32) -> Result<Vec<Supplier>> {
        Ok(finalize_suppliers(origin, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCRA: Coordinates = Coordinates {
        latitude: 5.6037,
        longitude: -0.1870,
    };

    #[test]
    fn test_shop_products() {
        assert!(products_for_shop_type("pharmacy").contains(&"fungicides".to_string()));
        assert_eq!(products_for_shop_type("bakery"), vec!["general_agricultural_supplies"]);
    }

    #[test]
    fn test_parse_overpass_elements() {
        let body: OverpassResponse = serde_json::from_str(
            r#"{"elements": [
                {"lat": 5.61, "lon": -0.19, "tags": {"name": "Agro Shop", "shop": "agrarian"}},
                {"lat": 5.70, "lon": -0.20, "tags": {"amenity": "pharmacy"}},
                {"tags": {"shop": "farm"}}
            ]}"#,
        )
        .unwrap();
        let shops = shops_from_elements(ACCRA, body.elements);

        assert_eq!(shops.len(), 3);
        assert_eq!(shops[0].name, "Agro Shop");
        assert_eq!(shops[1].name, "Unknown Shop");
        assert_eq!(shops[1].products, products_for_shop_type("pharmacy"));
        assert_eq!(shops[2].distance_km, None);
        assert!(shops.iter().all(|s| !s.verified));
    }

    #[test]
    fn test_thin_results_get_verified_suppliers() {
        let suppliers = finalize_suppliers(ACCRA, Vec::new());
        assert_eq!(suppliers.len(), 4);
        assert!(suppliers.iter().all(|s| s.verified));
        assert_eq!(suppliers[0].name, "Chemico Limited");
        assert_eq!(suppliers[0].distance_km, Some(0.0));
        for pair in suppliers.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn test_far_origin_gets_no_verified_suppliers() {
        let tamale = Coordinates::new(9.4008, -0.8393);
        assert!(finalize_suppliers(tamale, Vec::new()).is_empty());
    }

    #[test]
    fn test_enough_shops_skip_fallback() {
        let shop = |name: &str, d: f64| Supplier {
            name: name.into(),
            address: String::new(),
            phone: None,
            email: None,
            latitude: None,
            longitude: None,
            distance_km: Some(d),
            products: vec![],
            rating: None,
            verified: false,
        };
        let suppliers = finalize_suppliers(ACCRA, vec![shop("c", 3.0), shop("a", 1.0), shop("b", 2.0)]);
        let names: Vec<_> = suppliers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filter_by_product_type() {
        let suppliers = finalize_suppliers(ACCRA, Vec::new());
        let names: Vec<_> = filter_suppliers(suppliers, Some("Fungicides"), false)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Chemico Limited", "Agro-Chemical Association of Ghana"]);
    }

    #[test]
    fn test_filter_verified_only() {
        let mut suppliers = finalize_suppliers(ACCRA, Vec::new());
        suppliers[0].verified = false;
        let unverified = suppliers[0].name.clone();

        let kept = filter_suppliers(suppliers.clone(), None, true);
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|s| s.name != unverified));
        assert_eq!(filter_suppliers(suppliers, None, false).len(), 4);
    }

    #[test]
    fn test_query_uses_metres() {
        let query = overpass_query(ACCRA, 20);
        assert!(query.contains("around:20000,5.6037,-0.187"));
    }
}
