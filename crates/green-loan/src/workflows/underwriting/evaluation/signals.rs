use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicationInput, ProjectType};
use super::config::EvaluationConfig;

const REFORESTATION_UNCERTAINTY: f64 = 0.95;
const MISSING_REMOTE_SENSING: f64 = 0.90;
const FAILED_SOIL_TESTS: f64 = 0.80;

/// Normalized risk signals derived from one application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSet {
    pub gap_ratio: f64,
    pub registry_quality: f64,
    pub project_quality: f64,
    pub biology_confidence: f64,
}

pub(crate) fn extract_signals(input: &ApplicationInput, config: &EvaluationConfig) -> SignalSet {
    SignalSet {
        gap_ratio: gap_ratio(input.reported_credits, input.verified_credits),
        registry_quality: config.registry_quality.weight(&input.registry),
        project_quality: config.project_quality.weight(&input.project_type),
        biology_confidence: biology_confidence(input),
    }
}

/// Overstatement of reported credits relative to the verified quantity.
///
/// Nothing reported means nothing overstated (0). Claims with no verification at all score
/// the maximal mismatch of 1.0.
pub fn gap_ratio(reported: f64, verified: f64) -> f64 {
    if reported <= 0.0 {
        0.0
    } else if verified > 0.0 {
        ((reported - verified) / verified).max(0.0)
    } else {
        1.0
    }
}

pub(crate) fn biology_confidence(input: &ApplicationInput) -> f64 {
    let mut confidence = 1.0;

    if input.project_type == ProjectType::Reforestation {
        confidence *= REFORESTATION_UNCERTAINTY;
    }
    if !input.evidence.has_remote_sensing() {
        confidence *= MISSING_REMOTE_SENSING;
    }
    if input.evidence.soil_tests_failed() {
        confidence *= FAILED_SOIL_TESTS;
    }

    f64::clamp(confidence, 0.0, 1.0)
}
