//! Treatment recommendation engine.
//!
//! Ranking rules:
//! - **Organic preference**: keep ORGANIC treatments; if there are none, keep
//!   ORGANIC and BIOLOGICAL; an empty result is valid
//! - **Budget** (optional): drop treatments whose known cost falls outside
//!   the range; unknown costs are kept
//! - **Order**: effectiveness descending, then cost ascending (unknown cost
//!   compares as 0), then catalog order
//! - **Size**: truncate to the severity cap (2 / 3 / 5 / 5)

use crate::cache::{fingerprint, TieredCache};
use crate::types::{DiseaseRecord, SeverityLevel, Treatment, TreatmentType};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Inclusive cost range in Ghana Cedis
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    pub fn contains(&self, cost: f64) -> bool {
        cost >= self.min && cost <= self.max
    }

    fn admits(&self, treatment: &Treatment) -> bool {
        treatment.cost_estimate.map_or(true, |cost| self.contains(cost))
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for BudgetRange {
    type Err = Error;

    /// Parses `"min-max"` or `"max"`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::invalid_input("budget", format!("expected 'min-max' or 'max', got '{}'", s));
        let parse = |part: &str| -> Result<f64> {
            let value: f64 = part.trim().parse().map_err(|_| invalid())?;
            if value.is_finite() && value >= 0.0 {
                Ok(value)
            } else {
                Err(invalid())
            }
        };

        let range = match s.split_once('-') {
            Some((min, max)) => BudgetRange {
                min: parse(min)?,
                max: parse(max)?,
            },
            None => BudgetRange {
                min: 0.0,
                max: parse(s)?,
            },
        };
        if range.min > range.max {
            return Err(Error::invalid_input(
                "budget",
                format!("minimum {} exceeds maximum {}", range.min, range.max),
            ));
        }
        Ok(range)
    }
}

/// Rank a record's treatments for a severity and organic preference.
///
/// Pure: identical arguments always yield an identical ordered result.
pub fn recommend(record: &DiseaseRecord, severity: SeverityLevel, organic: bool) -> Vec<Treatment> {
    recommend_within_budget(record, severity, organic, None)
}

/// [`recommend`] with an optional budget applied before sorting.
pub fn recommend_within_budget(
    record: &DiseaseRecord,
    severity: SeverityLevel,
    organic: bool,
    budget: Option<&BudgetRange>,
) -> Vec<Treatment> {
    let mut working: Vec<Treatment> = if organic {
        organic_working_set(&record.treatments)
    } else {
        record.treatments.clone()
    };

    if let Some(budget) = budget {
        working.retain(|t| budget.admits(t));
    }

    // sort_by is stable, so catalog order breaks remaining ties
    working.sort_by(|a, b| {
        b.effectiveness
            .total_cmp(&a.effectiveness)
            .then(a.ranking_cost().total_cmp(&b.ranking_cost()))
    });
    working.truncate(severity.treatment_cap());
    working
}

fn organic_working_set(treatments: &[Treatment]) -> Vec<Treatment> {
    let organic: Vec<Treatment> = treatments
        .iter()
        .filter(|t| t.kind == TreatmentType::Organic)
        .cloned()
        .collect();
    if !organic.is_empty() {
        return organic;
    }
    treatments
        .iter()
        .filter(|t| matches!(t.kind, TreatmentType::Organic | TreatmentType::Biological))
        .cloned()
        .collect()
}

/// Memoizing front for [`recommend_within_budget`]
pub struct RecommendationEngine {
    cache: Arc<TieredCache>,
    ttl: Duration,
}

impl RecommendationEngine {
    pub fn new(cache: Arc<TieredCache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    pub async fn recommend(
        &self,
        record: &DiseaseRecord,
        severity: SeverityLevel,
        organic: bool,
        budget: Option<&BudgetRange>,
    ) -> Vec<Treatment> {
        let budget_key = budget.map_or_else(|| "any".to_string(), |b| b.to_string());
        let organic_key = organic.to_string();
        let key = fingerprint(
            "treatments",
            &[&record.canonical_key, severity.as_str(), &organic_key, &budget_key],
        );

        if let Some(cached) = self.cache.get::<Vec<Treatment>>(&key).await {
            return cached;
        }

        let treatments = recommend_within_budget(record, severity, organic, budget);
        tracing::info!(
            disease = %record.canonical_key,
            %severity,
            organic,
            count = treatments.len(),
            "ranked treatments"
        );
        self.cache.set(&key, &treatments, Some(self.ttl)).await;
        treatments
    }
}
