mod config;
mod policy;
mod requirement;
mod scoring;
mod signals;
mod weights;

pub use config::{EvaluationConfig, EvaluationConfigError};
pub use policy::DecisionReason;
pub use requirement::required_credits;
pub use scoring::{greenwashing_score, price, PricingTier, MAX_SCORE};
pub use signals::{gap_ratio, SignalSet};
pub use weights::{QualityKey, QualityTable};

use super::domain::{ApplicantId, ApplicationInput, DecisionStatus};
use policy::decide_outcome;
use requirement::round_to;
use serde::{Deserialize, Serialize};

/// Stateless evaluator that applies a validated lending policy to an application.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    config: EvaluationConfig,
}

impl EvaluationEngine {
    pub fn new(config: EvaluationConfig) -> Result<Self, EvaluationConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn assess(&self, input: &ApplicationInput) -> Assessment {
        let required = required_credits(input.loan_amount, self.config.credits_per_thousand);
        let signals = signals::extract_signals(input, &self.config);
        let score = greenwashing_score(&signals, self.config.gap_tolerance);
        let verdict = decide_outcome(
            input.verified_credits,
            required,
            &signals,
            score,
            &self.config,
        );

        Assessment {
            applicant_id: input.applicant_id.clone(),
            status: verdict.status,
            reason: verdict.reason,
            interest_rate: verdict.interest_rate,
            pricing_tier: verdict.tier,
            required_credits: required,
            credit_shortfall: round_to((required - input.verified_credits).max(0.0), 2),
            greenwashing_score: score,
            signals,
        }
    }
}

/// Deterministic outcome of one assessment, before it is recorded in the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub applicant_id: ApplicantId,
    pub status: DecisionStatus,
    pub reason: DecisionReason,
    pub interest_rate: f64,
    pub pricing_tier: PricingTier,
    pub required_credits: f64,
    pub credit_shortfall: f64,
    pub greenwashing_score: f64,
    pub signals: SignalSet,
}
