//! Full recommendation orchestration.
//!
//! Resolution and ranking failures propagate to the caller. Collaborator
//! failures never do: they are recorded as [`UpstreamIssue`]s and the
//! affected section of the report is left empty.

use crate::advisory::{self, Contact, Resource};
use crate::cache::{fingerprint, TieredCache};
use crate::catalog::Catalog;
use crate::config::{Config, UpstreamConfig};
use crate::engine::{BudgetRange, RecommendationEngine};
use crate::resolver::{normalize, Resolver};
use crate::types::{CropType, DiseaseRecord, SeverityLevel, Treatment, TreatmentType};
use crate::upstream::{
    bounded, http_client, round2, Coordinates, Geocoder, MockPriceSource, NominatimGeocoder,
    filter_suppliers, OfflineGeocoder, OverpassDirectory, PriceQuote, PriceSource, PriceSummary,
    Supplier, SupplierDirectory, VerifiedDirectory,
};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

// ============================================================================
// Requests and reports
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub disease: String,
    pub location: String,
    /// Defaults to moderate
    pub severity: Option<SeverityLevel>,
    pub organic_preference: bool,
    pub budget: Option<BudgetRange>,
}

impl RecommendationRequest {
    pub fn new(disease: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            disease: disease.into(),
            location: location.into(),
            severity: None,
            organic_preference: false,
            budget: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Timeout,
    Failed,
    /// The collaborator answered but found nothing
    NotFound,
}

/// A collaborator that could not contribute to a report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpstreamIssue {
    pub collaborator: String,
    pub kind: IssueKind,
    pub detail: String,
}

impl UpstreamIssue {
    fn from_error(collaborator: &str, err: &Error) -> Self {
        let kind = match err {
            Error::UpstreamTimeout { .. } => IssueKind::Timeout,
            _ => IssueKind::Failed,
        };
        tracing::warn!(collaborator, "collaborator degraded: {}", err);
        Self {
            collaborator: collaborator.to_string(),
            kind,
            detail: err.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub disease: String,
    pub crop: CropType,
    pub location: String,
    pub severity: SeverityLevel,
    pub organic_preference: bool,
    pub disease_info: DiseaseRecord,
    pub severity_indicators: Vec<String>,
    pub recommended_treatments: Vec<Treatment>,
    pub nearby_suppliers: Vec<Supplier>,
    pub price_estimates: Vec<PriceQuote>,
    pub total_estimated_cost_ghs: Option<f64>,
    pub emergency_contacts: Vec<Contact>,
    pub additional_resources: Vec<Resource>,
    pub issues: Vec<UpstreamIssue>,
}

impl RecommendationReport {
    /// True when a collaborator timed out or failed.
    ///
    /// A location the geocoder does not know is not a partial result.
    pub fn is_partial(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue.kind, IssueKind::Timeout | IssueKind::Failed))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricesReport {
    pub treatment: String,
    pub location: Option<String>,
    pub quotes: Vec<PriceQuote>,
    pub summary: Option<PriceSummary>,
}

/// Result of a standalone supplier search
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplierSearch {
    pub location: String,
    pub radius_km: u32,
    pub product_type: Option<String>,
    pub verified_only: bool,
    pub suppliers: Vec<Supplier>,
    pub total_count: usize,
}

/// The fields of a treatment shown in a quick recommendation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreatmentSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TreatmentType,
    pub application_method: String,
    pub dosage: String,
}

impl From<&Treatment> for TreatmentSummary {
    fn from(treatment: &Treatment) -> Self {
        Self {
            name: treatment.name.clone(),
            kind: treatment.kind,
            application_method: treatment.application_method.clone(),
            dosage: treatment.dosage.clone(),
        }
    }
}

/// Catalog-only summary: no suppliers, prices or contacts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuickRecommendation {
    pub disease: String,
    pub crop: CropType,
    pub severity: SeverityLevel,
    pub top_treatments: Vec<TreatmentSummary>,
    pub key_symptoms: Vec<String>,
    pub prevention_tip: Option<String>,
}

// ============================================================================
// Service
// ============================================================================

const MIN_RADIUS_KM: u32 = 1;
const MAX_RADIUS_KM: u32 = 100;
const QUICK_TREATMENTS: usize = 3;
const QUICK_SYMPTOMS: usize = 3;

/// The outbound collaborators a service talks to
#[derive(Clone)]
pub struct Collaborators {
    pub geocoder: Arc<dyn Geocoder>,
    pub suppliers: Arc<dyn SupplierDirectory>,
    pub prices: Arc<dyn PriceSource>,
}

impl Collaborators {
    /// Nominatim, Overpass and the mock price source
    pub fn live(config: &UpstreamConfig) -> Result<Self> {
        let client = http_client(config)?;
        Ok(Self {
            geocoder: Arc::new(NominatimGeocoder::new(
                client.clone(),
                config.nominatim_url.clone(),
            )),
            suppliers: Arc::new(OverpassDirectory::new(client, config.overpass_url.clone())),
            prices: Arc::new(MockPriceSource),
        })
    }

    /// No network access at all
    pub fn offline() -> Self {
        Self {
            geocoder: Arc::new(OfflineGeocoder),
            suppliers: Arc::new(VerifiedDirectory),
            prices: Arc::new(MockPriceSource),
        }
    }
}

pub struct RecommendationService {
    resolver: Resolver,
    engine: RecommendationEngine,
    cache: Arc<TieredCache>,
    collaborators: Collaborators,
    upstream: UpstreamConfig,
    disease_info_ttl: Duration,
    suppliers_ttl: Duration,
    prices_ttl: Duration,
}

impl RecommendationService {
    pub fn new(
        catalog: Arc<Catalog>,
        cache: Arc<TieredCache>,
        collaborators: Collaborators,
        config: &Config,
    ) -> Self {
        let disease_info_ttl = config.cache.disease_info_ttl();
        Self {
            resolver: Resolver::new(
                catalog,
                Arc::clone(&cache),
                disease_info_ttl,
                config.resolver.suggestion_limit,
            ),
            engine: RecommendationEngine::new(Arc::clone(&cache), config.cache.default_ttl()),
            cache,
            collaborators,
            upstream: config.upstream.clone(),
            disease_info_ttl,
            suppliers_ttl: config.cache.suppliers_ttl(),
            prices_ttl: config.cache.prices_ttl(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.resolver.catalog()
    }

    pub fn cache(&self) -> &TieredCache {
        &self.cache
    }

    /// Full record for a free-text disease identifier
    pub async fn disease_info(&self, raw: &str) -> Result<&DiseaseRecord> {
        self.resolver.resolve(raw).await
    }

    /// Disease names grouped by crop
    pub async fn supported_diseases(&self) -> BTreeMap<CropType, Vec<String>> {
        if let Some(cached) = self.cache.get("supported_diseases").await {
            return cached;
        }
        let diseases = self.catalog().supported_diseases();
        self.cache
            .set("supported_diseases", &diseases, Some(self.disease_info_ttl))
            .await;
        diseases
    }

    /// Price quotes for one treatment
    pub async fn prices(
        &self,
        treatment: &str,
        location: Option<&str>,
        limit: usize,
    ) -> Result<PricesReport> {
        let treatment = treatment.trim();
        if treatment.is_empty() {
            return Err(Error::invalid_input("treatment", "treatment name must not be empty"));
        }
        let limit_key = limit.to_string();
        let key = fingerprint(
            "prices",
            &[&treatment.to_lowercase(), location.unwrap_or("any"), &limit_key],
        );

        self.cache
            .get_or_compute(&key, Some(self.prices_ttl), || async {
                let quotes = bounded(
                    "price source",
                    self.upstream.timeout(),
                    self.collaborators.prices.prices(treatment, location, limit),
                )
                .await?;
                Ok::<_, Error>(PricesReport {
                    treatment: treatment.to_string(),
                    location: location.map(str::to_string),
                    summary: PriceSummary::summarize(&quotes),
                    quotes,
                })
            })
            .await
    }

    async fn suppliers_near(&self, origin: Coordinates, radius: u32) -> Result<Vec<Supplier>> {
        let key = fingerprint(
            "suppliers",
            &[
                &format!("{:.4}", origin.latitude),
                &format!("{:.4}", origin.longitude),
                &radius.to_string(),
            ],
        );
        self.cache
            .get_or_compute(&key, Some(self.suppliers_ttl), || {
                bounded(
                    "supplier directory",
                    self.upstream.timeout(),
                    self.collaborators.suppliers.nearby(origin, radius),
                )
            })
            .await
    }

    /// Suppliers around a named location, optionally filtered.
    ///
    /// Fails with `LocationNotFound` when the location does not geocode.
    pub async fn suppliers(
        &self,
        location: &str,
        radius_km: u32,
        product_type: Option<&str>,
        verified_only: bool,
    ) -> Result<SupplierSearch> {
        let location = location.trim();
        if location.is_empty() {
            return Err(Error::invalid_input("location", "location must not be empty"));
        }
        if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&radius_km) {
            return Err(Error::invalid_input(
                "radius_km",
                format!("must be between {} and {}", MIN_RADIUS_KM, MAX_RADIUS_KM),
            ));
        }
        let product_type = product_type.map(str::trim).filter(|p| !p.is_empty());

        let radius_key = radius_km.to_string();
        let verified_key = verified_only.to_string();
        let key = fingerprint(
            "suppliers",
            &[location, &radius_key, product_type.unwrap_or("any"), &verified_key],
        );

        self.cache
            .get_or_compute(&key, Some(self.suppliers_ttl), || async {
                let origin = bounded(
                    "geocoder",
                    self.upstream.timeout(),
                    self.collaborators.geocoder.locate(location),
                )
                .await?
                .ok_or_else(|| Error::LocationNotFound(location.to_string()))?;

                let nearby = self.suppliers_near(origin, radius_km).await?;
                let suppliers = filter_suppliers(nearby, product_type, verified_only);
                tracing::info!(location, count = suppliers.len(), "supplier search finished");
                Ok::<_, Error>(SupplierSearch {
                    location: location.to_string(),
                    radius_km,
                    product_type: product_type.map(str::to_string),
                    verified_only,
                    total_count: suppliers.len(),
                    suppliers,
                })
            })
            .await
    }

    /// Top treatments with key symptoms and a prevention tip.
    ///
    /// Uses the catalog only; the request's location is ignored.
    pub async fn quick(&self, request: &RecommendationRequest) -> Result<QuickRecommendation> {
        let severity = request.severity.unwrap_or_default();
        let record = self.resolver.resolve(&request.disease).await?;
        let treatments = self
            .engine
            .recommend(record, severity, request.organic_preference, request.budget.as_ref())
            .await;

        Ok(QuickRecommendation {
            disease: record.name.clone(),
            crop: record.crop,
            severity,
            top_treatments: treatments
                .iter()
                .take(QUICK_TREATMENTS)
                .map(TreatmentSummary::from)
                .collect(),
            key_symptoms: record.symptoms.iter().take(QUICK_SYMPTOMS).cloned().collect(),
            prevention_tip: record.prevention_methods.first().cloned(),
        })
    }

    /// Resolve, rank, then enrich with suppliers, prices and contacts.
    pub async fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationReport> {
        let location = request.location.trim();
        if location.is_empty() {
            return Err(Error::invalid_input("location", "location must not be empty"));
        }
        let severity = request.severity.unwrap_or_default();
        let organic = request.organic_preference;

        let normalized = normalize(&request.disease);
        let organic_key = organic.to_string();
        let mut key_parts = vec![normalized.as_str(), location, severity.as_str(), organic_key.as_str()];
        let budget_key = request.budget.map(|b| b.to_string());
        if let Some(budget) = &budget_key {
            key_parts.push(budget.as_str());
        }
        let key = fingerprint("recommend", &key_parts);

        if let Some(cached) = self.cache.get::<RecommendationReport>(&key).await {
            tracing::info!(disease = %request.disease, "recommendation served from cache");
            return Ok(cached);
        }

        let record = self.resolver.resolve(&request.disease).await?;
        let treatments = self
            .engine
            .recommend(record, severity, organic, request.budget.as_ref())
            .await;

        let mut issues = Vec::new();
        let nearby_suppliers = match bounded(
            "geocoder",
            self.upstream.timeout(),
            self.collaborators.geocoder.locate(location),
        )
        .await
        {
            Ok(Some(origin)) => match self
                .suppliers_near(origin, self.upstream.supplier_radius_km)
                .await
            {
                Ok(mut suppliers) => {
                    suppliers.truncate(self.upstream.max_suppliers);
                    suppliers
                }
                Err(e) => {
                    issues.push(UpstreamIssue::from_error("supplier directory", &e));
                    Vec::new()
                }
            },
            Ok(None) => {
                issues.push(UpstreamIssue {
                    collaborator: "geocoder".into(),
                    kind: IssueKind::NotFound,
                    detail: format!("no coordinates for '{}'", location),
                });
                Vec::new()
            }
            Err(e) => {
                issues.push(UpstreamIssue::from_error("geocoder", &e));
                Vec::new()
            }
        };

        let priced = &treatments[..treatments.len().min(self.upstream.priced_treatments)];
        let mut price_estimates = Vec::new();
        // Only treatments whose prices came back count toward the total
        let mut total = 0.0;
        for treatment in priced {
            match self
                .prices(&treatment.name, Some(location), self.upstream.prices_per_treatment)
                .await
            {
                Ok(report) => {
                    price_estimates.extend(report.quotes);
                    total += treatment.cost_estimate.unwrap_or(0.0);
                }
                Err(e) => issues.push(UpstreamIssue::from_error("price source", &e)),
            }
        }
        let total_estimated_cost_ghs = (total > 0.0).then(|| round2(total));

        let report = RecommendationReport {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            disease: record.name.clone(),
            crop: record.crop,
            location: location.to_string(),
            severity,
            organic_preference: organic,
            disease_info: record.clone(),
            severity_indicators: record.severity_indicators(severity).to_vec(),
            recommended_treatments: treatments,
            nearby_suppliers,
            price_estimates,
            total_estimated_cost_ghs,
            emergency_contacts: advisory::emergency_contacts(location),
            additional_resources: advisory::additional_resources(record.crop),
            issues,
        };

        if report.is_partial() {
            tracing::warn!(
                disease = %record.canonical_key,
                issues = report.issues.len(),
                "partial recommendation, not cached"
            );
        } else {
            self.cache.set(&key, &report, None).await;
        }
        tracing::info!(
            disease = %record.canonical_key,
            treatments = report.recommended_treatments.len(),
            suppliers = report.nearby_suppliers.len(),
            "recommendation generated"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::logging;
    use async_trait::async_trait;

    struct StalledGeocoder;

    #[async_trait]
    impl Geocoder for StalledGeocoder {
        async fn locate(&self, _query: &str) -> Result<Option<Coordinates>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }
    }

    struct BrokenPrices;

    #[async_trait]
    impl PriceSource for BrokenPrices {
        async fn prices(
            &self,
            _treatment: &str,
            _location: Option<&str>,
            _limit: usize,
        ) -> Result<Vec<PriceQuote>> {
            Err(Error::Upstream("price feed offline".into()))
        }
    }

    /// Fails only for copper products
    struct NoCopperPrices;

    #[async_trait]
    impl PriceSource for NoCopperPrices {
        async fn prices(
            &self,
            treatment: &str,
            location: Option<&str>,
            limit: usize,
        ) -> Result<Vec<PriceQuote>> {
            if treatment.to_lowercase().contains("copper") {
                return Err(Error::Upstream("no copper listings".into()));
            }
            MockPriceSource.prices(treatment, location, limit).await
        }
    }

    fn service_with(collaborators: Collaborators) -> RecommendationService {
        let mut config = Config::default();
        config.upstream.timeout_ms = 100;
        RecommendationService::new(
            Arc::new(build_default_catalog().unwrap()),
            Arc::new(TieredCache::memory_only(&config.cache)),
            collaborators,
            &config,
        )
    }

    fn request(disease: &str, location: &str) -> RecommendationRequest {
        RecommendationRequest::new(disease, location)
    }

    #[tokio::test]
    async fn test_full_offline_report() {
        logging::init_test();
        let service = service_with(Collaborators::offline());
        let report = service.recommend(&request("Anthracnose ", "Accra")).await.unwrap();

        assert_eq!(report.crop, CropType::Cashew);
        assert_eq!(report.severity, SeverityLevel::Moderate);
        assert_eq!(report.recommended_treatments[0].name, "Mancozeb fungicide");
        assert_eq!(report.nearby_suppliers.len(), 4);
        // 3 treatments priced, 3 quotes each
        assert_eq!(report.price_estimates.len(), 9);
        assert_eq!(report.total_estimated_cost_ghs, Some(105.0));
        assert_eq!(report.emergency_contacts.len(), 4);
        assert_eq!(
            report.severity_indicators,
            vec!["Multiple spots on leaves, some fruit affected".to_string()]
        );
        assert!(!report.is_partial());
    }

    #[tokio::test]
    async fn test_complete_report_is_cached() {
        let service = service_with(Collaborators::offline());
        let first = service.recommend(&request("anthracnose", "Accra")).await.unwrap();
        let second = service.recommend(&request("ANTHRACNOSE", "Accra")).await.unwrap();
        assert_eq!(first.report_id, second.report_id);
    }

    #[tokio::test]
    async fn test_unknown_location_is_not_partial() {
        let service = service_with(Collaborators::offline());
        let report = service.recommend(&request("gumosis", "Lagos")).await.unwrap();

        assert!(report.nearby_suppliers.is_empty());
        assert_eq!(report.issues[0].kind, IssueKind::NotFound);
        assert!(!report.is_partial());
    }

    #[tokio::test(start_paused = true)]
    async fn test_geocoder_timeout_yields_partial_report() {
        let mut collaborators = Collaborators::offline();
        collaborators.geocoder = Arc::new(StalledGeocoder);
        let service = service_with(collaborators);

        let first = service.recommend(&request("red_rust", "Accra")).await.unwrap();
        assert!(first.is_partial());
        assert_eq!(first.issues[0].kind, IssueKind::Timeout);
        assert!(first.nearby_suppliers.is_empty());
        assert!(!first.recommended_treatments.is_empty());

        // Partial reports are never memoized
        let second = service.recommend(&request("red_rust", "Accra")).await.unwrap();
        assert_ne!(first.report_id, second.report_id);
    }

    #[tokio::test]
    async fn test_price_failures_are_recorded() {
        let mut collaborators = Collaborators::offline();
        collaborators.prices = Arc::new(BrokenPrices);
        let service = service_with(collaborators);

        let report = service.recommend(&request("leaf_miner", "Kumasi")).await.unwrap();
        assert!(report.price_estimates.is_empty());
        assert_eq!(report.issues.len(), 2);
        assert!(report.issues.iter().all(|i| i.collaborator == "price source"));
        assert_eq!(report.total_estimated_cost_ghs, None);
        assert!(report.is_partial());
    }

    #[tokio::test]
    async fn test_total_cost_skips_unpriced_treatments() {
        let mut collaborators = Collaborators::offline();
        collaborators.prices = Arc::new(NoCopperPrices);
        let service = service_with(collaborators);

        let report = service.recommend(&request("anthracnose", "Accra")).await.unwrap();
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.price_estimates.len(), 6);
        // Mancozeb 35 + Neem 25; copper lookup failed
        assert_eq!(report.total_estimated_cost_ghs, Some(60.0));
    }

    #[tokio::test]
    async fn test_supplier_search_filters() {
        let service = service_with(Collaborators::offline());

        let all = service.suppliers("Accra", 20, None, false).await.unwrap();
        assert_eq!(all.total_count, 4);

        let fungicides = service
            .suppliers("Accra", 20, Some("fungicides"), true)
            .await
            .unwrap();
        let names: Vec<_> = fungicides.suppliers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Chemico Limited", "Agro-Chemical Association of Ghana"]);
        assert_eq!(fungicides.product_type.as_deref(), Some("fungicides"));
    }

    #[tokio::test]
    async fn test_supplier_search_is_memoized() {
        let service = service_with(Collaborators::offline());
        service.suppliers("Tema", 10, Some("seeds"), false).await.unwrap();
        let before = service.cache().stats().await.hits;
        service.suppliers("Tema", 10, Some("seeds"), false).await.unwrap();
        assert_eq!(service.cache().stats().await.hits, before + 1);
    }

    #[tokio::test]
    async fn test_supplier_search_rejects_bad_input() {
        let service = service_with(Collaborators::offline());

        let err = service.suppliers("Lagos", 10, None, false).await.unwrap_err();
        assert!(matches!(err, Error::LocationNotFound(ref l) if l == "Lagos"));

        let err = service.suppliers("Accra", 0, None, false).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { ref field, .. } if field == "radius_km"));
        let err = service.suppliers("Accra", 101, None, false).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { ref field, .. } if field == "radius_km"));
    }

    #[tokio::test]
    async fn test_quick_recommendation() {
        let service = service_with(Collaborators::offline());

        let mut req = request("anthracnose", "Ghana");
        req.severity = Some(SeverityLevel::Severe);
        let quick = service.quick(&req).await.unwrap();
        assert_eq!(quick.top_treatments.len(), 3);
        assert_eq!(quick.top_treatments[0].name, "Mancozeb fungicide");
        assert_eq!(quick.top_treatments[0].kind, TreatmentType::Chemical);
        assert_eq!(quick.key_symptoms.len(), 3);
        assert_eq!(quick.prevention_tip.as_deref(), Some("Proper spacing for air circulation"));

        req.severity = Some(SeverityLevel::Low);
        assert_eq!(service.quick(&req).await.unwrap().top_treatments.len(), 2);
    }

    #[tokio::test]
    async fn test_not_found_propagates() {
        let service = service_with(Collaborators::offline());
        let err = service.recommend(&request("rust_leaf", "Accra")).await.unwrap_err();
        assert!(err.suggestions().contains(&"red_rust".to_string()));
    }

    #[tokio::test]
    async fn test_empty_location_rejected() {
        let service = service_with(Collaborators::offline());
        let err = service.recommend(&request("mosaic", "  ")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { ref field, .. } if field == "location"));
    }

    #[tokio::test]
    async fn test_organic_budget_request() {
        let service = service_with(Collaborators::offline());
        let mut req = request("fall_armyworm", "Tamale");
        req.organic_preference = true;
        req.budget = Some(BudgetRange { min: 0.0, max: 20.0 });

        let report = service.recommend(&req).await.unwrap();
        // Only organic option costs 25, outside the budget
        assert!(report.recommended_treatments.is_empty());
        assert_eq!(report.total_estimated_cost_ghs, None);
        assert!(report.price_estimates.is_empty());
    }

    #[tokio::test]
    async fn test_supported_diseases_memoized() {
        let service = service_with(Collaborators::offline());
        let first = service.supported_diseases().await;
        let second = service.supported_diseases().await;
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert_eq!(service.cache().stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_prices_report() {
        let service = service_with(Collaborators::offline());
        let report = service.prices("Mancozeb", Some("Accra"), 5).await.unwrap();
        assert_eq!(report.quotes.len(), 5);
        assert!(report.summary.is_some());
        assert!(service.prices(" ", None, 5).await.is_err());
    }
}
