use serde::{Deserialize, Serialize};

use super::super::domain::{ProjectType, RegistrySource};
use super::weights::{default_project_quality, default_registry_quality, QualityTable};

/// Lending policy dials and weight tables applied by the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Verified credits required per 1000 currency units of loan.
    pub credits_per_thousand: f64,
    /// Largest tolerated reported-vs-verified gap ratio for a clean approval.
    pub gap_tolerance: f64,
    /// Annual rate for the lowest pricing tier, as a fraction (0.06 = 6%).
    pub base_interest_rate: f64,
    /// Rate added per pricing tier above the base.
    pub interest_rate_step: f64,
    pub registry_quality: QualityTable<RegistrySource>,
    pub project_quality: QualityTable<ProjectType>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            credits_per_thousand: 10.0,
            gap_tolerance: 0.10,
            base_interest_rate: 0.06,
            interest_rate_step: 0.03,
            registry_quality: default_registry_quality(),
            project_quality: default_project_quality(),
        }
    }
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<(), EvaluationConfigError> {
        non_negative("credits_per_thousand", self.credits_per_thousand)?;
        non_negative("base_interest_rate", self.base_interest_rate)?;
        non_negative("interest_rate_step", self.interest_rate_step)?;

        if !self.gap_tolerance.is_finite() || self.gap_tolerance <= 0.0 {
            return Err(EvaluationConfigError::NonPositiveTolerance(
                self.gap_tolerance,
            ));
        }

        self.registry_quality.validate("registry_quality")?;
        self.project_quality.validate("project_quality")?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), EvaluationConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EvaluationConfigError::NegativeValue { field, value })
    }
}

/// Malformed policy detected while building the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationConfigError {
    #[error("{table} is missing the mandatory '{key}' fallback entry")]
    MissingFallback { table: &'static str, key: String },
    #[error("{table} weight for '{key}' must be within [0, 1] (found {weight})")]
    WeightOutOfRange {
        table: &'static str,
        key: String,
        weight: f64,
    },
    #[error("gap tolerance must be a positive number (found {0})")]
    NonPositiveTolerance(f64),
    #[error("{field} must be a non-negative number (found {value})")]
    NegativeValue { field: &'static str, value: f64 },
}
