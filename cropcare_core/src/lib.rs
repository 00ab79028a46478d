#![forbid(unsafe_code)]

//! Core domain model and business logic for the CropCare treatment advisor.
//!
//! This crate provides:
//! - Domain types (crops, diseases, treatments, severity levels)
//! - The read-only disease catalog
//! - Disease identifier resolution with suggestions
//! - Treatment ranking
//! - A two-tier cache (Redis with an in-process fallback)
//! - Upstream collaborators (geocoding, supplier directory, prices)
//! - The recommendation service tying it all together

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod resolver;
pub mod engine;
pub mod cache;
pub mod upstream;
pub mod advisory;
pub mod service;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, Catalog};
pub use config::Config;
pub use resolver::{normalize, Resolver};
pub use engine::{recommend, BudgetRange, RecommendationEngine};
pub use cache::{CacheHealth, CacheStats, TieredCache, TierStatus};
pub use service::{
    Collaborators, IssueKind, PricesReport, QuickRecommendation, RecommendationReport,
    RecommendationRequest, RecommendationService, SupplierSearch, TreatmentSummary, UpstreamIssue,
};
pub use upstream::Coordinates;
