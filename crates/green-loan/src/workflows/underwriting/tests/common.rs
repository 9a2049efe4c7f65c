use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::underwriting::audit::{
    AuditError, AuditRecord, AuditReference, AuditTrail, InMemoryAuditLog, SteppingClock,
};
use crate::workflows::underwriting::domain::{
    ApplicantId, ApplicationInput, DecisionStatus, EvidenceFlags, ProjectType, RegistrySource,
};
use crate::workflows::underwriting::evaluation::{EvaluationConfig, EvaluationEngine, SignalSet};
use crate::workflows::underwriting::intake::ApplicationSubmission;
use crate::workflows::underwriting::service::UnderwritingService;

pub(super) fn clock_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 24, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn stepping_log() -> InMemoryAuditLog<SteppingClock> {
    InMemoryAuditLog::with_clock(SteppingClock::new(clock_start(), Duration::milliseconds(1)))
}

pub(super) fn engine() -> EvaluationEngine {
    EvaluationEngine::new(EvaluationConfig::default()).expect("default policy is valid")
}

/// Clean small-ticket borrower resembling the "Maersk 2022 style" preset.
pub(super) fn clean_input() -> ApplicationInput {
    ApplicationInput {
        applicant_id: ApplicantId("Maersk".to_string()),
        loan_amount: 1000.0,
        reported_credits: 3000.0,
        verified_credits: 3500.0,
        registry: RegistrySource::Other,
        project_type: ProjectType::Other,
        evidence: EvidenceFlags {
            remote_sensing: Some(false),
            soil_tests_passed: Some(true),
        },
    }
}

/// Large loan backed by few verified credits.
pub(super) fn shortfall_input() -> ApplicationInput {
    ApplicationInput {
        applicant_id: ApplicantId("Shortfall Holdings".to_string()),
        loan_amount: 250_000.0,
        reported_credits: 500.0,
        verified_credits: 200.0,
        registry: RegistrySource::Other,
        project_type: ProjectType::Reforestation,
        evidence: EvidenceFlags {
            remote_sensing: Some(false),
            soil_tests_passed: Some(false),
        },
    }
}

pub(super) fn submission() -> ApplicationSubmission {
    ApplicationSubmission {
        company: "Maersk".to_string(),
        loan_amount: 1000.0,
        reported_credits: 3000.0,
        verified_credits: 3500.0,
        registry: "Other".to_string(),
        project_type: "Other".to_string(),
        remote_sensing: Some(false),
        soil_tests_ok: Some(true),
    }
}

pub(super) fn build_service() -> (
    UnderwritingService<InMemoryAuditLog<SteppingClock>>,
    Arc<InMemoryAuditLog<SteppingClock>>,
) {
    let audit = Arc::new(stepping_log());
    let service = UnderwritingService::new(audit.clone(), EvaluationConfig::default())
        .expect("default policy is valid");
    (service, audit)
}

/// Audit stub that hands out a constant reference and keeps no state.
pub(super) struct NullAudit;

impl AuditTrail for NullAudit {
    fn append(
        &self,
        _applicant_id: &ApplicantId,
        _status: DecisionStatus,
        _signals: &SignalSet,
    ) -> Result<AuditReference, AuditError> {
        Ok(AuditReference("evt_0_stub".to_string()))
    }

    fn records(&self) -> Result<Vec<AuditRecord>, AuditError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableAudit;

impl AuditTrail for UnavailableAudit {
    fn append(
        &self,
        _applicant_id: &ApplicantId,
        _status: DecisionStatus,
        _signals: &SignalSet,
    ) -> Result<AuditReference, AuditError> {
        Err(AuditError::Unavailable("ledger offline".to_string()))
    }

    fn records(&self) -> Result<Vec<AuditRecord>, AuditError> {
        Err(AuditError::Unavailable("ledger offline".to_string()))
    }
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
