use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::audit::{AuditError, AuditRecord, AuditReference, AuditTrail};
use super::domain::{ApplicationInput, DecisionStatus};
use super::evaluation::{
    Assessment, EvaluationConfig, EvaluationConfigError, EvaluationEngine, PricingTier,
    SignalSet,
};
use super::intake::{input_from_submission, ApplicationSubmission, IntakeError};

/// Credit decision returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub status: DecisionStatus,
    pub reason: String,
    /// Annual rate as a fraction; always 0 for rejections.
    pub interest_rate: f64,
    pub pricing_tier: PricingTier,
    pub required_credits: f64,
    pub credit_shortfall: f64,
    pub greenwashing_score: f64,
    pub audit_ref: AuditReference,
}

impl Decision {
    fn from_assessment(assessment: &Assessment, audit_ref: AuditReference) -> Self {
        Self {
            status: assessment.status,
            reason: assessment.reason.summary().to_string(),
            interest_rate: assessment.interest_rate,
            pricing_tier: assessment.pricing_tier,
            required_credits: assessment.required_credits,
            credit_shortfall: assessment.credit_shortfall,
            greenwashing_score: assessment.greenwashing_score,
            audit_ref,
        }
    }
}

/// Decision plus the signals behind it, for transparency displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub input: ApplicationInput,
    pub decision: Decision,
    pub signals: SignalSet,
}

/// Facade composing intake validation, the decision engine, and the audit trail.
pub struct UnderwritingService<L> {
    engine: Arc<EvaluationEngine>,
    audit: Arc<L>,
}

impl<L> UnderwritingService<L>
where
    L: AuditTrail + 'static,
{
    /// Builds the service, failing fast on a malformed policy.
    pub fn new(audit: Arc<L>, config: EvaluationConfig) -> Result<Self, UnderwritingServiceError> {
        let engine = Arc::new(EvaluationEngine::new(config)?);
        Ok(Self { engine, audit })
    }

    pub fn engine(&self) -> &EvaluationEngine {
        &self.engine
    }

    /// Validate raw borrower input, then evaluate it.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<Evaluation, UnderwritingServiceError> {
        let input = input_from_submission(submission)?;
        self.evaluate(&input)
    }

    /// Score a validated application and record the decision in the audit trail.
    pub fn evaluate(
        &self,
        input: &ApplicationInput,
    ) -> Result<Evaluation, UnderwritingServiceError> {
        let assessment = self.engine.assess(input);
        debug!(
            applicant = %input.applicant_id,
            gap_ratio = assessment.signals.gap_ratio,
            registry_quality = assessment.signals.registry_quality,
            project_quality = assessment.signals.project_quality,
            biology_confidence = assessment.signals.biology_confidence,
            "greenwashing signals extracted"
        );

        let audit_ref =
            self.audit
                .append(&input.applicant_id, assessment.status, &assessment.signals)?;

        info!(
            applicant = %input.applicant_id,
            status = %assessment.status,
            score = assessment.greenwashing_score,
            rate = assessment.interest_rate,
            reference = %audit_ref,
            "loan application evaluated"
        );

        Ok(Evaluation {
            input: input.clone(),
            decision: Decision::from_assessment(&assessment, audit_ref),
            signals: assessment.signals,
        })
    }

    pub fn audit_records(&self) -> Result<Vec<AuditRecord>, UnderwritingServiceError> {
        Ok(self.audit.records()?)
    }
}

/// Error raised by the underwriting service.
#[derive(Debug, thiserror::Error)]
pub enum UnderwritingServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Configuration(#[from] EvaluationConfigError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
