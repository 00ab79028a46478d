//! Core domain types for crop disease treatment recommendations.
//!
//! This module defines the fundamental types used throughout the system:
//! - Crops, treatment kinds, and severity levels
//! - Treatments and the disease records that own them

use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Crop Types
// ============================================================================

/// Supported crop
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CropType {
    Cashew,
    Cassava,
    Maize,
    Tomato,
}

impl CropType {
    /// Every crop in alphabetical order. Crop-qualified lookups iterate this.
    pub const ALL: [CropType; 4] = [
        CropType::Cashew,
        CropType::Cassava,
        CropType::Maize,
        CropType::Tomato,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Cashew => "cashew",
            CropType::Cassava => "cassava",
            CropType::Maize => "maize",
            CropType::Tomato => "tomato",
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CropType::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| Error::invalid_input("crop_type", format!("unknown crop '{}'", s)))
    }
}

// ============================================================================
// Treatment Types
// ============================================================================

/// Kind of treatment
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentType {
    Chemical,
    Organic,
    Biological,
    Cultural,
}

impl TreatmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentType::Chemical => "chemical",
            TreatmentType::Organic => "organic",
            TreatmentType::Biological => "biological",
            TreatmentType::Cultural => "cultural",
        }
    }
}

impl fmt::Display for TreatmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TreatmentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chemical" => Ok(TreatmentType::Chemical),
            "organic" => Ok(TreatmentType::Organic),
            "biological" => Ok(TreatmentType::Biological),
            "cultural" => Ok(TreatmentType::Cultural),
            _ => Err(Error::invalid_input(
                "treatment_type",
                format!("unknown treatment type '{}'", s),
            )),
        }
    }
}

// ============================================================================
// Severity
// ============================================================================

/// How badly a crop is affected
///
/// The ordering only drives how many treatments get presented.
#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Low,
    #[default]
    Moderate,
    High,
    Severe,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Low,
        SeverityLevel::Moderate,
        SeverityLevel::High,
        SeverityLevel::Severe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "low",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::High => "high",
            SeverityLevel::Severe => "severe",
        }
    }

    /// Maximum number of treatments presented at this severity
    pub fn treatment_cap(&self) -> usize {
        match self {
            SeverityLevel::Low => 2,
            SeverityLevel::Moderate => 3,
            SeverityLevel::High | SeverityLevel::Severe => 5,
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SeverityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| {
                Error::invalid_input(
                    "severity",
                    format!("unknown level '{}' (expected low, moderate, high or severe)", s),
                )
            })
    }
}

// ============================================================================
// Treatments and Disease Records
// ============================================================================

/// A single treatment option for a disease
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Treatment {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TreatmentType,
    #[serde(default)]
    pub active_ingredients: Vec<String>,
    pub application_method: String,
    pub dosage: String,
    pub frequency: String,
    #[serde(default)]
    pub precautions: Vec<String>,
    /// Percentage in [0, 100]
    pub effectiveness: f64,
    /// Estimated cost in Ghana Cedis, when known
    pub cost_estimate: Option<f64>,
}

impl Treatment {
    /// Cost used for ordering. Unknown cost sorts as zero.
    pub fn ranking_cost(&self) -> f64 {
        self.cost_estimate.unwrap_or(0.0)
    }
}

/// Everything the catalog knows about one disease on one crop
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DiseaseRecord {
    /// Unique, normalized catalog key (e.g. `anthracnose`, `maize_leaf_blight`)
    pub canonical_key: String,
    /// Human-readable disease name; may repeat across crops
    pub name: String,
    pub crop: CropType,
    pub scientific_name: Option<String>,
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub causes: Vec<String>,
    #[serde(default)]
    pub prevention_methods: Vec<String>,
    /// Catalog-authoring order
    #[serde(default)]
    pub treatments: Vec<Treatment>,
    #[serde(default)]
    pub severity_indicators: BTreeMap<SeverityLevel, Vec<String>>,
    pub economic_impact: Option<String>,
    #[serde(default)]
    pub seasonal_occurrence: Vec<String>,
}

impl DiseaseRecord {
    /// Indicator descriptions for a severity, empty when none are cataloged
    pub fn severity_indicators(&self, severity: SeverityLevel) -> &[String] {
        self.severity_indicators
            .get(&severity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(SeverityLevel::Low < SeverityLevel::Moderate);
        assert!(SeverityLevel::High < SeverityLevel::Severe);
        assert_eq!(SeverityLevel::default(), SeverityLevel::Moderate);
    }

    #[test]
    fn test_severity_caps() {
        assert_eq!(SeverityLevel::Low.treatment_cap(), 2);
        assert_eq!(SeverityLevel::Moderate.treatment_cap(), 3);
        assert_eq!(SeverityLevel::High.treatment_cap(), 5);
        assert_eq!(SeverityLevel::Severe.treatment_cap(), 5);
    }

    #[test]
    fn test_parse_severity() {
        assert_eq!(" HIGH ".parse::<SeverityLevel>().unwrap(), SeverityLevel::High);
        let err = "extreme".parse::<SeverityLevel>().unwrap_err();
        assert!(matches!(err, Error::InvalidInput { ref field, .. } if field == "severity"));
    }

    #[test]
    fn test_parse_crop() {
        assert_eq!("Maize".parse::<CropType>().unwrap(), CropType::Maize);
        assert!("rice".parse::<CropType>().is_err());
    }

    #[test]
    fn test_crop_order_is_alphabetical() {
        let names: Vec<_> = CropType::ALL.iter().map(|c| c.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_treatment_serializes_kind_as_type() {
        let treatment = Treatment {
            name: "Neem oil".into(),
            kind: TreatmentType::Organic,
            active_ingredients: vec![],
            application_method: "Foliar spray".into(),
            dosage: "5ml/L".into(),
            frequency: "Weekly".into(),
            precautions: vec![],
            effectiveness: 70.0,
            cost_estimate: None,
        };
        let json = serde_json::to_value(&treatment).unwrap();
        assert_eq!(json["type"], "organic");
        assert_eq!(treatment.ranking_cost(), 0.0);
    }
}
