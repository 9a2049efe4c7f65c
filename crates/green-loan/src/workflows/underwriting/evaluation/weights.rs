use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::domain::{ProjectType, RegistrySource};
use super::config::EvaluationConfigError;

/// Category usable as a quality-table key, with the mandatory fallback entry.
pub trait QualityKey: Ord + Clone + fmt::Display {
    fn fallback() -> Self;
}

impl QualityKey for RegistrySource {
    fn fallback() -> Self {
        RegistrySource::Other
    }
}

impl QualityKey for ProjectType {
    fn fallback() -> Self {
        ProjectType::Other
    }
}

/// Static trust weights keyed by category. Lookups of absent keys use the fallback weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualityTable<K: Ord> {
    weights: BTreeMap<K, f64>,
}

impl<K: QualityKey> QualityTable<K> {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self {
            weights: pairs.into_iter().collect(),
        }
    }

    /// Weight for `key`, or the fallback weight when the key is not listed.
    ///
    /// Tables are validated when the engine is built, so the fallback entry is present; an
    /// unvalidated table without it scores as zero quality.
    pub fn weight(&self, key: &K) -> f64 {
        self.weights
            .get(key)
            .or_else(|| self.weights.get(&K::fallback()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.weights.contains_key(key)
    }

    pub fn insert(&mut self, key: K, weight: f64) -> Option<f64> {
        self.weights.insert(key, weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &f64)> {
        self.weights.iter()
    }

    pub(crate) fn validate(&self, table: &'static str) -> Result<(), EvaluationConfigError> {
        if !self.weights.contains_key(&K::fallback()) {
            return Err(EvaluationConfigError::MissingFallback {
                table,
                key: K::fallback().to_string(),
            });
        }

        for (key, weight) in &self.weights {
            if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
                return Err(EvaluationConfigError::WeightOutOfRange {
                    table,
                    key: key.to_string(),
                    weight: *weight,
                });
            }
        }

        Ok(())
    }
}

pub(crate) fn default_registry_quality() -> QualityTable<RegistrySource> {
    QualityTable::from_pairs([
        (RegistrySource::GoldStandard, 0.95),
        (RegistrySource::Verra, 0.90),
        (RegistrySource::Other, 0.80),
    ])
}

pub(crate) fn default_project_quality() -> QualityTable<ProjectType> {
    QualityTable::from_pairs([
        (ProjectType::Reforestation, 0.90),
        (ProjectType::Renewable, 0.95),
        (ProjectType::Cookstove, 0.85),
        (ProjectType::Other, 0.80),
    ])
}
