//! The read-only disease catalog and its built-in content.
//!
//! A [`Catalog`] is constructed once, fully formed, and shared behind an
//! `Arc` by everything that reads it. Iteration follows insertion order,
//! which the resolver relies on for deterministic loose matching.

use crate::resolver::normalize;
use crate::types::*;
use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};

/// Immutable mapping of canonical keys to disease records
#[derive(Clone, Debug)]
pub struct Catalog {
    records: Vec<DiseaseRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from records in authoring order.
    ///
    /// Fails if two records share a canonical key; collisions between crops
    /// must be resolved by crop-prefixing the key, never by overwrite.
    pub fn from_records(records: Vec<DiseaseRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.canonical_key.clone(), position).is_some() {
                return Err(Error::CatalogValidation(format!(
                    "duplicate canonical key '{}'",
                    record.canonical_key
                )));
            }
        }
        Ok(Self { records, index })
    }

    pub fn get(&self, canonical_key: &str) -> Option<&DiseaseRecord> {
        self.index.get(canonical_key).map(|&i| &self.records[i])
    }

    pub fn contains_key(&self, canonical_key: &str) -> bool {
        self.index.contains_key(canonical_key)
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &DiseaseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Disease names grouped by crop, each list in catalog order
    pub fn supported_diseases(&self) -> BTreeMap<CropType, Vec<String>> {
        let mut by_crop: BTreeMap<CropType, Vec<String>> = BTreeMap::new();
        for record in &self.records {
            by_crop
                .entry(record.crop)
                .or_default()
                .push(record.name.clone());
        }
        by_crop
    }

    pub fn diseases_for_crop(&self, crop: CropType) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.crop == crop)
            .map(|r| r.name.clone())
            .collect()
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut per_crop: HashMap<(CropType, String), usize> = HashMap::new();

        for record in &self.records {
            let key = &record.canonical_key;
            if key.is_empty() {
                errors.push("Disease record has empty canonical key".to_string());
                continue;
            }
            if normalize(key) != *key {
                errors.push(format!("Canonical key '{}' is not normalized", key));
            }
            if record.name.is_empty() {
                errors.push(format!("Disease '{}' has empty name", key));
            }
            *per_crop
                .entry((record.crop, normalize(&record.name)))
                .or_default() += 1;

            for treatment in &record.treatments {
                if !(0.0..=100.0).contains(&treatment.effectiveness) {
                    errors.push(format!(
                        "Disease '{}': treatment '{}' effectiveness {} outside [0, 100]",
                        key, treatment.name, treatment.effectiveness
                    ));
                }
                if let Some(cost) = treatment.cost_estimate {
                    if cost < 0.0 {
                        errors.push(format!(
                            "Disease '{}': treatment '{}' has negative cost {}",
                            key, treatment.name, cost
                        ));
                    }
                }
            }
        }

        for ((crop, name), count) in per_crop {
            if count > 1 {
                errors.push(format!(
                    "Crop '{}' has {} records named '{}'",
                    crop, count, name
                ));
            }
        }

        errors
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn indicators(
    low: &str,
    moderate: &str,
    high: &str,
    severe: &str,
) -> BTreeMap<SeverityLevel, Vec<String>> {
    BTreeMap::from([
        (SeverityLevel::Low, vec![low.to_string()]),
        (SeverityLevel::Moderate, vec![moderate.to_string()]),
        (SeverityLevel::High, vec![high.to_string()]),
        (SeverityLevel::Severe, vec![severe.to_string()]),
    ])
}

/// Builds the default catalog of Ghanaian cashew, cassava, maize and tomato diseases
pub fn build_default_catalog() -> Result<Catalog> {
    Catalog::from_records(default_records())
}

fn default_records() -> Vec<DiseaseRecord> {
    let mut records = Vec::new();

    // ========================================================================
    // Cashew
    // ========================================================================

    records.push(DiseaseRecord {
        canonical_key: "anthracnose".into(),
        name: "anthracnose".into(),
        crop: CropType::Cashew,
        scientific_name: Some("Colletotrichum gloeosporioides".into()),
        symptoms: strings(&[
            "Dark brown to black spots on leaves",
            "Circular lesions with concentric rings",
            "Premature leaf drop",
            "Fruit rot with sunken lesions",
        ]),
        causes: strings(&[
            "Fungal infection",
            "High humidity and warm temperatures",
            "Infected plant debris",
        ]),
        prevention_methods: strings(&[
            "Proper spacing for air circulation",
            "Avoid overhead watering",
            "Remove infected plant debris",
        ]),
        treatments: vec![
            Treatment {
                name: "Copper-based fungicide".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Copper hydroxide", "Copper oxychloride"]),
                application_method: "Foliar spray".into(),
                dosage: "2-3g per liter of water".into(),
                frequency: "Every 14 days during rainy season".into(),
                precautions: strings(&[
                    "Wear protective clothing",
                    "Avoid spraying during windy conditions",
                ]),
                effectiveness: 85.0,
                cost_estimate: Some(45.0),
            },
            Treatment {
                name: "Mancozeb fungicide".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Mancozeb"]),
                application_method: "Foliar spray".into(),
                dosage: "2.5g per liter of water".into(),
                frequency: "Every 10-14 days".into(),
                precautions: strings(&["Use protective equipment", "Do not spray before rain"]),
                effectiveness: 90.0,
                cost_estimate: Some(35.0),
            },
            Treatment {
                name: "Neem oil treatment".into(),
                kind: TreatmentType::Organic,
                active_ingredients: strings(&["Azadirachtin"]),
                application_method: "Foliar spray".into(),
                dosage: "5ml per liter of water".into(),
                frequency: "Weekly application".into(),
                precautions: strings(&["Apply in evening to avoid leaf burn"]),
                effectiveness: 70.0,
                cost_estimate: Some(25.0),
            },
        ],
        severity_indicators: indicators(
            "Few scattered spots on older leaves",
            "Multiple spots on leaves, some fruit affected",
            "Extensive leaf spotting, significant fruit rot",
            "Severe defoliation, major crop loss",
        ),
        economic_impact: Some("Can cause 20-40% yield loss if not managed properly".into()),
        seasonal_occurrence: strings(&["Rainy season", "High humidity periods"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "gumosis".into(),
        name: "gumosis".into(),
        crop: CropType::Cashew,
        scientific_name: Some("Phytophthora spp.".into()),
        symptoms: strings(&[
            "Gum exudation from bark",
            "Dark staining on trunk",
            "Bark cracking and peeling",
        ]),
        causes: strings(&["Fungal infection (Phytophthora)", "Poor drainage"]),
        prevention_methods: strings(&[
            "Improve drainage around trees",
            "Avoid mechanical damage to bark",
        ]),
        treatments: vec![
            Treatment {
                name: "Metalaxyl + Mancozeb".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Metalaxyl", "Mancozeb"]),
                application_method: "Trunk injection or soil drench".into(),
                dosage: "2g per liter for soil application".into(),
                frequency: "Monthly during wet season".into(),
                precautions: strings(&["Avoid contact with skin"]),
                effectiveness: 85.0,
                cost_estimate: Some(60.0),
            },
            Treatment {
                name: "Bordeaux mixture".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Copper sulfate", "Lime"]),
                application_method: "Trunk painting".into(),
                dosage: "1% solution".into(),
                frequency: "Every 2 months".into(),
                precautions: strings(&["Prepare fresh solution"]),
                effectiveness: 75.0,
                cost_estimate: Some(20.0),
            },
        ],
        severity_indicators: indicators(
            "Minor gum exudation",
            "Visible gum flow, some bark damage",
            "Extensive gumming, bark cracking",
            "Tree decline, major branch dieback",
        ),
        economic_impact: Some("Can kill trees if not treated, causing 100% loss".into()),
        seasonal_occurrence: strings(&["Wet season", "High rainfall periods"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "leaf_miner".into(),
        name: "leaf_miner".into(),
        crop: CropType::Cashew,
        scientific_name: Some("Eteoryctis gemoniella".into()),
        symptoms: strings(&[
            "Serpentine mines in leaves",
            "White or brown tunnels in leaf tissue",
            "Premature leaf drop",
        ]),
        causes: strings(&["Moth larvae feeding inside leaves"]),
        prevention_methods: strings(&["Prune heavily infested shoots", "Encourage natural enemies"]),
        treatments: vec![
            Treatment {
                name: "Imidacloprid".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Imidacloprid"]),
                application_method: "Foliar spray".into(),
                dosage: "0.5ml per liter of water".into(),
                frequency: "Every 15 days".into(),
                precautions: strings(&["Avoid spraying during bee activity"]),
                effectiveness: 90.0,
                cost_estimate: Some(40.0),
            },
            Treatment {
                name: "Neem-based insecticide".into(),
                kind: TreatmentType::Organic,
                active_ingredients: strings(&["Azadirachtin"]),
                application_method: "Foliar spray".into(),
                dosage: "5ml per liter of water".into(),
                frequency: "Weekly".into(),
                precautions: strings(&["Apply in evening hours"]),
                effectiveness: 75.0,
                cost_estimate: Some(30.0),
            },
        ],
        severity_indicators: indicators(
            "Few mines on scattered leaves",
            "Multiple mines on many leaves",
            "Extensive mining, leaf yellowing",
            "Severe defoliation, tree stress",
        ),
        economic_impact: Some(
            "Can reduce yield by 15-25% through reduced photosynthesis".into(),
        ),
        seasonal_occurrence: strings(&["Dry season", "Hot weather periods"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "red_rust".into(),
        name: "red_rust".into(),
        crop: CropType::Cashew,
        scientific_name: Some("Cephaleuros virescens".into()),
        symptoms: strings(&[
            "Orange-red spots on leaves",
            "Velvety appearance on leaf surface",
            "Premature leaf yellowing",
        ]),
        causes: strings(&["Parasitic alga", "Humid, shaded canopy"]),
        prevention_methods: strings(&["Open the canopy by pruning"]),
        treatments: vec![
            Treatment {
                name: "Copper fungicide".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Copper hydroxide"]),
                application_method: "Foliar spray".into(),
                dosage: "2g per liter of water".into(),
                frequency: "Every 21 days".into(),
                precautions: strings(&["Avoid spraying during hot hours"]),
                effectiveness: 80.0,
                cost_estimate: Some(35.0),
            },
            Treatment {
                name: "Potassium bicarbonate".into(),
                kind: TreatmentType::Organic,
                active_ingredients: strings(&["Potassium bicarbonate"]),
                application_method: "Foliar spray".into(),
                dosage: "5g per liter of water".into(),
                frequency: "Weekly".into(),
                precautions: strings(&["Test on small area first"]),
                effectiveness: 65.0,
                cost_estimate: Some(15.0),
            },
        ],
        severity_indicators: indicators(
            "Few red spots on leaves",
            "Multiple spots, some leaf yellowing",
            "Extensive spotting, significant yellowing",
            "Severe defoliation, branch dieback",
        ),
        economic_impact: Some(
            "Can reduce photosynthesis and weaken trees, affecting long-term productivity".into(),
        ),
        seasonal_occurrence: strings(&["Humid periods", "Rainy season"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "cashew_healthy".into(),
        name: "healthy".into(),
        crop: CropType::Cashew,
        scientific_name: None,
        symptoms: strings(&["No visible disease symptoms", "Healthy green foliage"]),
        causes: vec![],
        prevention_methods: strings(&["Balanced nutrition", "Regular scouting"]),
        treatments: vec![Treatment {
            name: "Preventive nutrition".into(),
            kind: TreatmentType::Cultural,
            active_ingredients: strings(&["NPK fertilizer"]),
            application_method: "Soil application".into(),
            dosage: "200g per mature tree".into(),
            frequency: "Twice per year".into(),
            precautions: strings(&["Apply during rainy season"]),
            effectiveness: 95.0,
            cost_estimate: Some(25.0),
        }],
        severity_indicators: BTreeMap::new(),
        economic_impact: Some("Optimal productivity expected".into()),
        seasonal_occurrence: strings(&["Year-round with proper management"]),
    });

    // ========================================================================
    // Cassava
    // ========================================================================

    records.push(DiseaseRecord {
        canonical_key: "bacterial_blight".into(),
        name: "bacterial_blight".into(),
        crop: CropType::Cassava,
        scientific_name: Some("Xanthomonas axonopodis pv. manihotis".into()),
        symptoms: strings(&[
            "Angular leaf spots with yellow halos",
            "Wilting of leaves",
            "Stem cankers",
        ]),
        causes: strings(&["Bacterial infection", "Infected planting material"]),
        prevention_methods: strings(&["Use clean cuttings", "Rotate crops"]),
        treatments: vec![
            Treatment {
                name: "Copper bactericide".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Copper hydroxide"]),
                application_method: "Foliar spray".into(),
                dosage: "2.5g per liter of water".into(),
                frequency: "Every 14 days".into(),
                precautions: strings(&["Avoid spraying during rain"]),
                effectiveness: 75.0,
                cost_estimate: Some(40.0),
            },
            Treatment {
                name: "Streptomycin sulfate".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Streptomycin sulfate"]),
                application_method: "Foliar spray".into(),
                dosage: "1g per liter of water".into(),
                frequency: "Weekly during outbreak".into(),
                precautions: strings(&["Rotate with other bactericides"]),
                effectiveness: 85.0,
                cost_estimate: Some(55.0),
            },
        ],
        severity_indicators: indicators(
            "Few leaf spots",
            "Multiple spots, some wilting",
            "Extensive spotting, stem cankers",
            "Plant death, field spread",
        ),
        economic_impact: Some("Can cause 50-100% yield loss in susceptible varieties".into()),
        seasonal_occurrence: strings(&["Rainy season", "High humidity periods"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "brown_spot".into(),
        name: "brown_spot".into(),
        crop: CropType::Cassava,
        scientific_name: Some("Cercospora henningsii".into()),
        symptoms: strings(&[
            "Brown circular spots on leaves",
            "Yellow halos around spots",
            "Premature leaf drop",
        ]),
        causes: strings(&["Fungal infection", "Humid conditions"]),
        prevention_methods: strings(&["Remove fallen leaves"]),
        treatments: vec![
            Treatment {
                name: "Mancozeb fungicide".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Mancozeb"]),
                application_method: "Foliar spray".into(),
                dosage: "2g per liter of water".into(),
                frequency: "Every 14 days".into(),
                precautions: strings(&["Avoid drift to water sources"]),
                effectiveness: 85.0,
                cost_estimate: Some(35.0),
            },
            Treatment {
                name: "Baking soda spray".into(),
                kind: TreatmentType::Organic,
                active_ingredients: strings(&["Sodium bicarbonate"]),
                application_method: "Foliar spray".into(),
                dosage: "5g per liter of water".into(),
                frequency: "Weekly".into(),
                precautions: strings(&["Apply in cool hours"]),
                effectiveness: 60.0,
                cost_estimate: Some(10.0),
            },
        ],
        severity_indicators: indicators(
            "Few spots on lower leaves",
            "Multiple spots, some yellowing",
            "Extensive spotting, leaf drop",
            "Severe defoliation, plant stress",
        ),
        economic_impact: Some(
            "Can reduce yield by 20-30% through reduced photosynthesis".into(),
        ),
        seasonal_occurrence: strings(&["Humid conditions", "Rainy season"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "green_mite".into(),
        name: "green_mite".into(),
        crop: CropType::Cassava,
        scientific_name: Some("Mononychellus tanajoa".into()),
        symptoms: strings(&[
            "Chlorotic spots on leaves",
            "Bronzing of leaf surface",
            "Leaf curling and distortion",
        ]),
        causes: strings(&["Mite infestation", "Prolonged dry weather"]),
        prevention_methods: strings(&["Plant tolerant varieties", "Release predatory mites"]),
        treatments: vec![
            Treatment {
                name: "Abamectin".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Abamectin"]),
                application_method: "Foliar spray".into(),
                dosage: "1ml per liter of water".into(),
                frequency: "Every 10 days".into(),
                precautions: strings(&["Highly toxic to bees"]),
                effectiveness: 90.0,
                cost_estimate: Some(50.0),
            },
            Treatment {
                name: "Neem oil + soap".into(),
                kind: TreatmentType::Organic,
                active_ingredients: strings(&["Neem oil", "Insecticidal soap"]),
                application_method: "Foliar spray".into(),
                dosage: "10ml neem oil + 5ml soap per liter".into(),
                frequency: "Every 5 days".into(),
                precautions: strings(&["Ensure good coverage"]),
                effectiveness: 75.0,
                cost_estimate: Some(25.0),
            },
            Treatment {
                name: "Predatory mites".into(),
                kind: TreatmentType::Biological,
                active_ingredients: strings(&["Typhlodromalus aripo"]),
                application_method: "Field release".into(),
                dosage: "Per extension officer guidance".into(),
                frequency: "Once per season".into(),
                precautions: strings(&["Avoid broad-spectrum sprays after release"]),
                effectiveness: 75.0,
                cost_estimate: None,
            },
        ],
        severity_indicators: indicators(
            "Few chlorotic spots",
            "Visible bronzing, some curling",
            "Extensive bronzing, leaf distortion",
            "Severe defoliation, plant stunting",
        ),
        economic_impact: Some("Can cause 30-50% yield reduction in severe infestations".into()),
        seasonal_occurrence: strings(&["Dry season", "Hot weather"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "mosaic".into(),
        name: "mosaic".into(),
        crop: CropType::Cassava,
        scientific_name: Some("Cassava mosaic virus".into()),
        symptoms: strings(&[
            "Mosaic pattern on leaves",
            "Yellow and green patches",
            "Leaf distortion",
        ]),
        causes: strings(&["Viral infection spread by whiteflies", "Infected cuttings"]),
        prevention_methods: strings(&["Use virus-free cuttings", "Rogue infected plants"]),
        treatments: vec![
            Treatment {
                name: "Whitefly control".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Imidacloprid"]),
                application_method: "Foliar spray".into(),
                dosage: "0.5ml per liter of water".into(),
                frequency: "Every 14 days".into(),
                precautions: strings(&["Avoid spraying during bee activity"]),
                effectiveness: 70.0,
                cost_estimate: Some(45.0),
            },
            Treatment {
                name: "Reflective mulch".into(),
                kind: TreatmentType::Cultural,
                active_ingredients: vec![],
                application_method: "Field covering".into(),
                dosage: "Cover rows at planting".into(),
                frequency: "Once per season".into(),
                precautions: vec![],
                effectiveness: 60.0,
                cost_estimate: Some(30.0),
            },
        ],
        severity_indicators: indicators(
            "Mild mosaic on few plants",
            "Clear mosaic on many plants",
            "Leaf distortion, stunting",
            "Severe stunting, little root yield",
        ),
        economic_impact: Some("Can reduce root yield by up to 90%".into()),
        seasonal_occurrence: strings(&["Year-round", "Peaks with whitefly populations"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "cassava_healthy".into(),
        name: "healthy".into(),
        crop: CropType::Cassava,
        scientific_name: None,
        symptoms: strings(&["Healthy green foliage", "No disease symptoms"]),
        causes: vec![],
        prevention_methods: strings(&["Use clean planting material"]),
        treatments: vec![Treatment {
            name: "Balanced fertilization".into(),
            kind: TreatmentType::Cultural,
            active_ingredients: strings(&["NPK fertilizer"]),
            application_method: "Soil application".into(),
            dosage: "100g per plant".into(),
            frequency: "Once at 4-6 weeks after planting".into(),
            precautions: vec![],
            effectiveness: 95.0,
            cost_estimate: Some(20.0),
        }],
        severity_indicators: BTreeMap::new(),
        economic_impact: Some("Optimal productivity expected".into()),
        seasonal_occurrence: vec![],
    });

    // ========================================================================
    // Maize
    // ========================================================================

    records.push(DiseaseRecord {
        canonical_key: "fall_armyworm".into(),
        name: "fall_armyworm".into(),
        crop: CropType::Maize,
        scientific_name: Some("Spodoptera frugiperda".into()),
        symptoms: strings(&[
            "Holes in leaves",
            "Feeding damage on whorl",
            "Frass (insect droppings) visible",
        ]),
        causes: strings(&["Larval infestation", "Migrating moth populations"]),
        prevention_methods: strings(&["Early planting", "Regular scouting of whorls"]),
        treatments: vec![
            Treatment {
                name: "Chlorantraniliprole".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Chlorantraniliprole"]),
                application_method: "Foliar spray into whorl".into(),
                dosage: "0.4ml per liter of water".into(),
                frequency: "Every 14 days".into(),
                precautions: strings(&["Follow label instructions"]),
                effectiveness: 95.0,
                cost_estimate: Some(65.0),
            },
            Treatment {
                name: "Bt-based biopesticide".into(),
                kind: TreatmentType::Biological,
                active_ingredients: strings(&["Bacillus thuringiensis"]),
                application_method: "Foliar spray".into(),
                dosage: "2g per liter of water".into(),
                frequency: "Every 7 days".into(),
                precautions: strings(&["Apply late afternoon"]),
                effectiveness: 80.0,
                cost_estimate: Some(40.0),
            },
            Treatment {
                name: "Neem + soap solution".into(),
                kind: TreatmentType::Organic,
                active_ingredients: strings(&["Neem oil", "Soap"]),
                application_method: "Foliar spray".into(),
                dosage: "10ml neem + 5ml soap per liter".into(),
                frequency: "Every 5 days".into(),
                precautions: strings(&["Ensure whorl coverage"]),
                effectiveness: 65.0,
                cost_estimate: Some(25.0),
            },
        ],
        severity_indicators: indicators(
            "Few window-pane lesions",
            "Ragged holes on many plants",
            "Heavy whorl damage",
            "Destroyed growing points",
        ),
        economic_impact: Some("Can cause 20-50% yield loss".into()),
        seasonal_occurrence: strings(&["Early rainy season"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "grasshopper".into(),
        name: "grasshopper".into(),
        crop: CropType::Maize,
        scientific_name: Some("Various Acrididae species".into()),
        symptoms: strings(&["Chewed leaf margins", "Defoliation", "Stem damage"]),
        causes: strings(&["Grasshopper swarms", "Weedy field margins"]),
        prevention_methods: strings(&["Clear weeds around fields"]),
        treatments: vec![
            Treatment {
                name: "Malathion".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Malathion"]),
                application_method: "Foliar spray".into(),
                dosage: "2ml per liter of water".into(),
                frequency: "As needed".into(),
                precautions: strings(&["Use protective equipment"]),
                effectiveness: 90.0,
                cost_estimate: Some(35.0),
            },
            Treatment {
                name: "Diatomaceous earth".into(),
                kind: TreatmentType::Organic,
                active_ingredients: strings(&["Diatomaceous earth"]),
                application_method: "Dusting".into(),
                dosage: "Light dusting on foliage".into(),
                frequency: "After rain".into(),
                precautions: strings(&["Avoid inhaling dust"]),
                effectiveness: 70.0,
                cost_estimate: Some(20.0),
            },
        ],
        severity_indicators: indicators(
            "Occasional chewed margins",
            "Noticeable leaf loss",
            "Widespread defoliation",
            "Crop stripped",
        ),
        economic_impact: Some("Outbreaks can destroy entire fields".into()),
        seasonal_occurrence: strings(&["Dry spells"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "leaf_beetle".into(),
        name: "leaf_beetle".into(),
        crop: CropType::Maize,
        scientific_name: Some("Diabrotica spp.".into()),
        symptoms: strings(&["Holes in leaves", "Skeletonized leaves", "Root damage (larvae)"]),
        causes: strings(&["Beetle infestation", "Continuous maize cropping"]),
        prevention_methods: strings(&["Crop rotation", "Encourage beneficial insects"]),
        treatments: vec![
            Treatment {
                name: "Thiamethoxam".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Thiamethoxam"]),
                application_method: "Seed treatment or foliar spray".into(),
                dosage: "0.3ml per liter for foliar".into(),
                frequency: "As needed".into(),
                precautions: strings(&["Toxic to bees"]),
                effectiveness: 85.0,
                cost_estimate: Some(50.0),
            },
            Treatment {
                name: "Kaolin clay".into(),
                kind: TreatmentType::Organic,
                active_ingredients: strings(&["Kaolin clay"]),
                application_method: "Foliar spray".into(),
                dosage: "50g per liter of water".into(),
                frequency: "Weekly during beetle activity".into(),
                precautions: strings(&["May affect photosynthesis if overused"]),
                effectiveness: 60.0,
                cost_estimate: Some(15.0),
            },
        ],
        severity_indicators: indicators(
            "Few holes in leaves",
            "Visible leaf damage",
            "Extensive leaf damage, root feeding",
            "Severe defoliation, plant lodging",
        ),
        economic_impact: Some(
            "Can reduce yield by 15-40% through leaf and root damage".into(),
        ),
        seasonal_occurrence: strings(&["Growing season", "Warm weather"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "maize_leaf_blight".into(),
        name: "leaf_blight".into(),
        crop: CropType::Maize,
        scientific_name: Some("Exserohilum turcicum".into()),
        symptoms: strings(&[
            "Long cigar-shaped grey-green lesions",
            "Lesions turning tan",
            "Lower leaves affected first",
        ]),
        causes: strings(&["Fungal infection", "Cool, humid weather"]),
        prevention_methods: strings(&["Plant resistant hybrids", "Bury crop residue"]),
        treatments: vec![
            Treatment {
                name: "Azoxystrobin fungicide".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Azoxystrobin"]),
                application_method: "Foliar spray".into(),
                dosage: "1ml per liter of water".into(),
                frequency: "Every 14 days from first lesions".into(),
                precautions: strings(&["Do not exceed two sprays per season"]),
                effectiveness: 85.0,
                cost_estimate: Some(55.0),
            },
            Treatment {
                name: "Trichoderma seed treatment".into(),
                kind: TreatmentType::Biological,
                active_ingredients: strings(&["Trichoderma harzianum"]),
                application_method: "Seed dressing".into(),
                dosage: "10g per kg of seed".into(),
                frequency: "At planting".into(),
                precautions: vec![],
                effectiveness: 60.0,
                cost_estimate: None,
            },
        ],
        severity_indicators: indicators(
            "Scattered lesions on lower leaves",
            "Lesions reaching the ear leaf",
            "Most leaves blighted",
            "Premature plant death",
        ),
        economic_impact: Some("Can cause 30-50% yield loss when infection is early".into()),
        seasonal_occurrence: strings(&["Rainy season"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "maize_healthy".into(),
        name: "healthy".into(),
        crop: CropType::Maize,
        scientific_name: None,
        symptoms: strings(&["Uniform green stand", "No lesions or feeding damage"]),
        causes: vec![],
        prevention_methods: strings(&["Timely weeding", "Balanced fertilization"]),
        treatments: vec![Treatment {
            name: "Split nitrogen application".into(),
            kind: TreatmentType::Cultural,
            active_ingredients: strings(&["Urea"]),
            application_method: "Side dressing".into(),
            dosage: "50kg per hectare per split".into(),
            frequency: "Two splits per season".into(),
            precautions: vec![],
            effectiveness: 90.0,
            cost_estimate: Some(30.0),
        }],
        severity_indicators: BTreeMap::new(),
        economic_impact: Some("Optimal productivity expected".into()),
        seasonal_occurrence: vec![],
    });

    // ========================================================================
    // Tomato
    // ========================================================================

    records.push(DiseaseRecord {
        canonical_key: "tomato_leaf_blight".into(),
        name: "leaf_blight".into(),
        crop: CropType::Tomato,
        scientific_name: Some("Alternaria solani".into()),
        symptoms: strings(&[
            "Brown spots with concentric rings",
            "Yellowing around lesions",
            "Lower leaves drop first",
        ]),
        causes: strings(&["Fungal infection", "Warm, wet weather"]),
        prevention_methods: strings(&["Stake plants", "Mulch to prevent soil splash"]),
        treatments: vec![
            Treatment {
                name: "Chlorothalonil".into(),
                kind: TreatmentType::Chemical,
                active_ingredients: strings(&["Chlorothalonil"]),
                application_method: "Foliar spray".into(),
                dosage: "2ml per liter of water".into(),
                frequency: "Every 7-10 days".into(),
                precautions: strings(&["Observe pre-harvest interval"]),
                effectiveness: 85.0,
                cost_estimate: Some(40.0),
            },
            Treatment {
                name: "Copper soap".into(),
                kind: TreatmentType::Organic,
                active_ingredients: strings(&["Copper octanoate"]),
                application_method: "Foliar spray".into(),
                dosage: "10ml per liter of water".into(),
                frequency: "Every 7 days".into(),
                precautions: strings(&["Do not mix with lime"]),
                effectiveness: 65.0,
                cost_estimate: Some(30.0),
            },
        ],
        severity_indicators: indicators(
            "Few spots on lower leaves",
            "Spots spreading up the plant",
            "Heavy defoliation",
            "Fruit exposed to sunscald, plant collapse",
        ),
        economic_impact: Some("Can cause 30-80% yield loss".into()),
        seasonal_occurrence: strings(&["Rainy season"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "leaf_curl".into(),
        name: "leaf_curl".into(),
        crop: CropType::Tomato,
        scientific_name: Some("Tomato yellow leaf curl virus".into()),
        symptoms: strings(&[
            "Upward curling of leaves",
            "Yellow leaf margins",
            "Stunted plants",
        ]),
        causes: strings(&["Viral infection spread by whiteflies"]),
        prevention_methods: strings(&["Use insect-proof nurseries", "Remove infected plants"]),
        treatments: vec![
            Treatment {
                name: "Yellow sticky traps".into(),
                kind: TreatmentType::Cultural,
                active_ingredients: vec![],
                application_method: "Traps hung above canopy".into(),
                dosage: "20 traps per acre".into(),
                frequency: "Replace every 2 weeks".into(),
                precautions: vec![],
                effectiveness: 55.0,
                cost_estimate: Some(20.0),
            },
            Treatment {
                name: "Beauveria bassiana".into(),
                kind: TreatmentType::Biological,
                active_ingredients: strings(&["Beauveria bassiana"]),
                application_method: "Foliar spray".into(),
                dosage: "2g per liter of water".into(),
                frequency: "Every 7 days".into(),
                precautions: strings(&["Apply in high humidity"]),
                effectiveness: 65.0,
                cost_estimate: Some(35.0),
            },
        ],
        severity_indicators: indicators(
            "Isolated curled plants",
            "Curling on many plants",
            "Flower drop, stunting",
            "No marketable fruit",
        ),
        economic_impact: Some("Can cause total loss in early infections".into()),
        seasonal_occurrence: strings(&["Dry season"]),
    });

    records.push(DiseaseRecord {
        canonical_key: "tomato_healthy".into(),
        name: "healthy".into(),
        crop: CropType::Tomato,
        scientific_name: None,
        symptoms: strings(&["Vigorous growth", "No leaf spots or curling"]),
        causes: vec![],
        prevention_methods: strings(&["Crop rotation", "Drip irrigation"]),
        treatments: vec![],
        severity_indicators: BTreeMap::new(),
        economic_impact: None,
        seasonal_occurrence: vec![],
    });

    records
}
