//! Static catalog of case studies grouped by category.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// One named metric on a case card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub key: String,
    pub value: f64,
}

/// A single case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub title: String,
    /// Vertical label shown under the title.
    pub vertical: String,
    /// Chart input, nominally in [0, 1].
    pub series: Vec<f64>,
    /// Metrics in display order.
    pub metrics: Vec<Metric>,
}

/// A tab of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub cases: Vec<CaseRecord>,
}

/// Ordered mapping from category key to its case records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetGroup {
    categories: Vec<Category>,
}

impl DatasetGroup {
    /// Build a catalog, rejecting empty or duplicate categories and empty series.
    pub fn new(categories: Vec<Category>) -> Result<Self, DeckError> {
        if categories.is_empty() {
            return Err(DeckError::Config("catalog has no categories".into()));
        }
        for (i, category) in categories.iter().enumerate() {
            if category.key.trim().is_empty() {
                return Err(DeckError::Config(format!("category {i} has an empty key")));
            }
            if categories[..i].iter().any(|c| c.key == category.key) {
                return Err(DeckError::Config(format!(
                    "duplicate category key: {}",
                    category.key
                )));
            }
            if let Some(case) = category.cases.iter().find(|c| c.series.is_empty()) {
                return Err(DeckError::Config(format!(
                    "case '{}' in '{}' has an empty series",
                    case.title, category.key
                )));
            }
        }
        Ok(Self { categories })
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        #[derive(Deserialize)]
        struct Raw {
            categories: Vec<Category>,
        }
        let raw: Raw = serde_json::from_str(json)
            .map_err(|e| DeckError::Config(format!("invalid catalog JSON: {e}")))?;
        Self::new(raw.categories)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            DeckError::Config(format!("cannot read catalog {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, DeckError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DeckError::Config(format!("cannot serialize catalog: {e}")))
    }

    /// Category keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.key.as_str())
    }

    /// All categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Case records of a category.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[CaseRecord]> {
        self.categories
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.cases.as_slice())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Index of a category in display order.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.key == key)
    }

    /// The first category; a catalog always has one.
    #[must_use]
    pub fn first_key(&self) -> &str {
        &self.categories[0].key
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// The catalog shipped with the dashboard.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                Category {
                    key: "gambling".into(),
                    cases: vec![
                        case(
                            "Casino Blitz Campaign",
                            "Gambling",
                            &[0.2, 0.5, 0.3, 0.8, 0.6, 0.9, 0.7],
                            [340.0, 45_280.0, 2_100_000.0, 8.4],
                        ),
                        case(
                            "Sports Betting Rush",
                            "Sports",
                            &[0.3, 0.4, 0.6, 0.5, 0.7, 0.6, 0.8],
                            [280.0, 32_150.0, 1_800_000.0, 6.2],
                        ),
                    ],
                },
                Category {
                    key: "nutra".into(),
                    cases: vec![
                        case(
                            "Weight Loss Revolution",
                            "Health",
                            &[0.4, 0.6, 0.8, 0.7, 0.9, 0.8, 0.95],
                            [420.0, 67_890.0, 3_200_000.0, 12.1],
                        ),
                        case(
                            "Muscle Builder Pro",
                            "Fitness",
                            &[0.3, 0.5, 0.4, 0.7, 0.6, 0.8, 0.75],
                            [310.0, 38_670.0, 2_500_000.0, 9.3],
                        ),
                    ],
                },
                Category {
                    key: "crypto".into(),
                    cases: vec![
                        case(
                            "DeFi Token Launch",
                            "Cryptocurrency",
                            &[0.5, 0.7, 0.6, 0.9, 0.8, 0.95, 0.9],
                            [580.0, 92_340.0, 4_100_000.0, 15.7],
                        ),
                        case(
                            "NFT Marketplace Boost",
                            "Digital Assets",
                            &[0.4, 0.5, 0.7, 0.6, 0.8, 0.75, 0.85],
                            [390.0, 54_210.0, 2_800_000.0, 11.4],
                        ),
                    ],
                },
            ],
        }
    }
}

impl Default for DatasetGroup {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Metric keys of the built-in case studies, in display order.
const STANDARD_METRICS: [&str; 4] = ["roas", "profit", "impressions", "ctr"];

fn case(title: &str, vertical: &str, series: &[f64], values: [f64; 4]) -> CaseRecord {
    CaseRecord {
        title: title.into(),
        vertical: vertical.into(),
        series: series.to_vec(),
        metrics: STANDARD_METRICS
            .iter()
            .zip(values)
            .map(|(key, value)| Metric {
                key: (*key).into(),
                value,
            })
            .collect(),
    }
}
