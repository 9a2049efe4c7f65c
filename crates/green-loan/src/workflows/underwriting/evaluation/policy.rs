use serde::{Deserialize, Serialize};

use super::super::domain::DecisionStatus;
use super::config::EvaluationConfig;
use super::scoring::{price, PricingTier};
use super::signals::SignalSet;

const CLEAN_SCORE_CEILING: f64 = 50.0;
const PENALTY_SCORE_CEILING: f64 = 75.0;

/// Why the cascade settled on a status, for adverse-action and audit notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    CleanSignals,
    ModerateGreenwashingRisk,
    InsufficientCreditsOrHighRisk,
}

impl DecisionReason {
    pub fn summary(&self) -> &'static str {
        match self {
            DecisionReason::CleanSignals => "credits sufficient and clean signals",
            DecisionReason::ModerateGreenwashingRisk => "moderate greenwashing risk",
            DecisionReason::InsufficientCreditsOrHighRisk => {
                "insufficient verified credits or high greenwashing risk"
            }
        }
    }
}

pub(crate) struct Verdict {
    pub status: DecisionStatus,
    pub reason: DecisionReason,
    pub interest_rate: f64,
    pub tier: PricingTier,
}

pub(crate) fn decide_outcome(
    verified_credits: f64,
    required_credits: f64,
    signals: &SignalSet,
    score: f64,
    config: &EvaluationConfig,
) -> Verdict {
    let tier = PricingTier::for_score(score);
    let sufficient = verified_credits >= required_credits;
    let gap_within_tolerance = signals.gap_ratio <= config.gap_tolerance;

    if sufficient && gap_within_tolerance && score < CLEAN_SCORE_CEILING {
        return Verdict {
            status: DecisionStatus::Approved,
            reason: DecisionReason::CleanSignals,
            interest_rate: price(tier, config.base_interest_rate, config.interest_rate_step),
            tier,
        };
    }

    if sufficient && score < PENALTY_SCORE_CEILING {
        return Verdict {
            status: DecisionStatus::ApprovedWithPenalty,
            reason: DecisionReason::ModerateGreenwashingRisk,
            interest_rate: price(tier, config.base_interest_rate, config.interest_rate_step),
            tier,
        };
    }

    Verdict {
        status: DecisionStatus::Rejected,
        reason: DecisionReason::InsufficientCreditsOrHighRisk,
        interest_rate: 0.0,
        tier,
    }
}
