//! Disease identifier resolution.
//!
//! [`normalize`], [`match_disease`] and [`suggest`] are pure functions over a
//! [`Catalog`]. [`Resolver`] adds memoization of the resolved canonical key.

use crate::cache::{fingerprint, TieredCache};
use crate::catalog::Catalog;
use crate::types::{CropType, DiseaseRecord};
use crate::{Error, Result};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Pure matching
// ============================================================================

/// Canonical form of a disease identifier.
///
/// Lowercases, maps whitespace, `-` and `.` to `_`, collapses runs of `_`
/// and strips `_` from both ends. Idempotent.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars().flat_map(char::to_lowercase) {
        let c = if c.is_whitespace() || c == '-' || c == '.' {
            '_'
        } else {
            c
        };
        if c == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

fn strip_crop_prefix(key: &str) -> &str {
    for crop in CropType::ALL {
        if let Some(rest) = key
            .strip_prefix(crop.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return rest;
        }
    }
    key
}

fn loosely_matches(input: &str, candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }
    input == candidate
        || candidate.contains(input)
        || input.contains(candidate)
        || input.replace('_', "") == candidate.replace('_', "")
}

/// Find the record for an already-normalized identifier.
///
/// Precedence, first match wins: exact key, crop-qualified key (crops in
/// alphabetical order), loose match on the key without its crop prefix, then
/// loose match on the record name. Loose matches scan the catalog in
/// insertion order, so the first loosely matching record wins even when a
/// later one is closer.
pub fn match_disease<'a>(catalog: &'a Catalog, normalized: &str) -> Option<&'a DiseaseRecord> {
    if normalized.is_empty() {
        return None;
    }

    if let Some(record) = catalog.get(normalized) {
        return Some(record);
    }

    for crop in CropType::ALL {
        if let Some(record) = catalog.get(&format!("{}_{}", crop, normalized)) {
            return Some(record);
        }
    }

    if let Some(record) = catalog
        .iter()
        .find(|r| loosely_matches(normalized, strip_crop_prefix(&r.canonical_key)))
    {
        return Some(record);
    }

    catalog
        .iter()
        .find(|r| loosely_matches(normalized, &normalize(&r.name)))
}

/// Similarity score of a candidate name against normalized input
fn similarity(input: &str, candidate: &str) -> u32 {
    if candidate.is_empty() || input.is_empty() {
        return 0;
    }
    if input == candidate {
        return 100;
    }
    if candidate.contains(input) || input.contains(candidate) {
        return 80;
    }
    if input
        .split('_')
        .any(|token| !token.is_empty() && candidate.contains(token))
    {
        return 60;
    }

    let input_len = input.chars().count();
    let candidate_len = candidate.chars().count();
    if input_len.abs_diff(candidate_len) <= 3 {
        let input_chars: HashSet<char> = input.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let shared = input_chars.intersection(&candidate_chars).count();
        if shared as f64 >= 3f64.min(input_len as f64 / 2.0) {
            return 40;
        }
    }
    0
}

/// Ranked suggestions for an identifier that matched nothing.
///
/// Scores each distinct disease name once, in catalog order, keeps non-zero
/// scores and returns at most `limit` names, best first. Ties keep catalog
/// order.
pub fn suggest(catalog: &Catalog, normalized: &str, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut scored: Vec<(u32, String)> = catalog
        .iter()
        .map(|r| normalize(&r.name))
        .filter(|name| seen.insert(name.clone()))
        .map(|name| (similarity(normalized, &name), name))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, name)| name).collect()
}

// ============================================================================
// Memoizing resolver
// ============================================================================

/// Resolves free-text identifiers to catalog records, memoizing the result.
pub struct Resolver {
    catalog: Arc<Catalog>,
    cache: Arc<TieredCache>,
    disease_info_ttl: Duration,
    suggestion_limit: usize,
}

impl Resolver {
    pub fn new(
        catalog: Arc<Catalog>,
        cache: Arc<TieredCache>,
        disease_info_ttl: Duration,
        suggestion_limit: usize,
    ) -> Self {
        Self {
            catalog,
            cache,
            disease_info_ttl,
            suggestion_limit,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve a raw identifier, or fail with `NotFound` and suggestions.
    pub async fn resolve(&self, raw: &str) -> Result<&DiseaseRecord> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(Error::invalid_input(
                "disease",
                "disease identifier must not be empty",
            ));
        }

        let key = fingerprint("disease_info", &[&normalized]);
        if let Some(canonical) = self.cache.get::<String>(&key).await {
            if let Some(record) = self.catalog.get(&canonical) {
                return Ok(record);
            }
            tracing::warn!(key = %key, canonical = %canonical, "cached key not in catalog, resolving again");
        }

        match match_disease(&self.catalog, &normalized) {
            Some(record) => {
                tracing::info!(input = %raw, resolved = %record.canonical_key, "resolved disease");
                self.cache
                    .set(&key, &record.canonical_key, Some(self.disease_info_ttl))
                    .await;
                Ok(record)
            }
            None => {
                let suggestions = suggest(&self.catalog, &normalized, self.suggestion_limit);
                tracing::warn!(input = %raw, ?suggestions, "disease not found");
                Err(Error::NotFound {
                    identifier: raw.trim().to_string(),
                    suggestions,
                })
            }
        }
    }
}
