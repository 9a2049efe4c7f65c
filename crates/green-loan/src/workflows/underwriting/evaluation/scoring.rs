use serde::{Deserialize, Serialize};

use super::requirement::round_to;
use super::signals::SignalSet;

const GAP_WEIGHT: f64 = 0.5;
const QUALITY_WEIGHT: f64 = 0.3;
const BIOLOGY_WEIGHT: f64 = 0.2;

pub const MAX_SCORE: f64 = 100.0;

/// Bounded greenwashing score in `[0, 100]`; higher means claims look more overstated.
pub fn greenwashing_score(signals: &SignalSet, gap_tolerance: f64) -> f64 {
    let gap_component = f64::min(1.0, signals.gap_ratio / gap_tolerance);
    let quality_component = 1.0 - 0.5 * (signals.registry_quality + signals.project_quality);
    let biology_component = 1.0 - signals.biology_confidence;

    let raw = GAP_WEIGHT * gap_component
        + QUALITY_WEIGHT * quality_component
        + BIOLOGY_WEIGHT * biology_component;

    round_to(MAX_SCORE * raw.clamp(0.0, 1.0), 2)
}

/// Risk tier selected by the score; each tier above `Base` adds one rate step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingTier {
    Base,
    Elevated,
    High,
    Severe,
}

impl PricingTier {
    pub fn for_score(score: f64) -> Self {
        if score < 25.0 {
            PricingTier::Base
        } else if score < 50.0 {
            PricingTier::Elevated
        } else if score < 75.0 {
            PricingTier::High
        } else {
            PricingTier::Severe
        }
    }

    pub fn steps(&self) -> u8 {
        match self {
            PricingTier::Base => 0,
            PricingTier::Elevated => 1,
            PricingTier::High => 2,
            PricingTier::Severe => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PricingTier::Base => "base",
            PricingTier::Elevated => "elevated",
            PricingTier::High => "high",
            PricingTier::Severe => "severe",
        }
    }
}

/// Annual rate for `tier`, rounded to six decimal places.
pub fn price(tier: PricingTier, base_rate: f64, step: f64) -> f64 {
    round_to(base_rate + f64::from(tier.steps()) * step, 6).max(0.0)
}
