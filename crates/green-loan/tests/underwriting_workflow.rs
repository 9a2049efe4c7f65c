//! End-to-end scenarios for green loan underwriting through the public service facade.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use green_loan::workflows::underwriting::{
    audit_note, to_csv, ApplicationSubmission, AuditTrail, DecisionStatus, EvaluationConfig,
    InMemoryAuditLog, SteppingClock, UnderwritingService, UnderwritingServiceError,
};

fn service() -> (
    UnderwritingService<InMemoryAuditLog<SteppingClock>>,
    Arc<InMemoryAuditLog<SteppingClock>>,
) {
    let start = Utc
        .with_ymd_and_hms(2024, 11, 5, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    let audit = Arc::new(InMemoryAuditLog::with_clock(SteppingClock::new(
        start,
        Duration::milliseconds(250),
    )));
    let service = UnderwritingService::new(audit.clone(), EvaluationConfig::default())
        .expect("default policy is valid");
    (service, audit)
}

fn submission(
    company: &str,
    loan_amount: f64,
    reported_credits: f64,
    verified_credits: f64,
    registry: &str,
    project_type: &str,
) -> ApplicationSubmission {
    ApplicationSubmission {
        company: company.to_string(),
        loan_amount,
        reported_credits,
        verified_credits,
        registry: registry.to_string(),
        project_type: project_type.to_string(),
        remote_sensing: None,
        soil_tests_ok: None,
    }
}

#[test]
fn small_loan_with_surplus_credits_is_approved() {
    let (service, _) = service();
    let mut request = submission("Maersk", 1000.0, 3000.0, 3500.0, "Other", "Other");
    request.remote_sensing = Some(false);
    request.soil_tests_ok = Some(true);

    let evaluation = service.submit(request).expect("evaluation succeeds");

    assert_eq!(evaluation.decision.status, DecisionStatus::Approved);
    assert_eq!(evaluation.decision.required_credits, 10.0);
    assert_eq!(evaluation.decision.interest_rate, 0.06);
    assert_eq!(evaluation.signals.gap_ratio, 0.0);
    assert!(evaluation.decision.greenwashing_score < 25.0);
}

#[test]
fn large_loan_without_enough_verified_credits_is_rejected() {
    let (service, _) = service();
    let mut request = submission("Shortfall Co", 250_000.0, 500.0, 200.0, "Other", "Reforestation");
    request.remote_sensing = Some(false);
    request.soil_tests_ok = Some(false);

    let evaluation = service.submit(request).expect("evaluation succeeds");

    assert_eq!(evaluation.decision.required_credits, 2500.0);
    assert_eq!(evaluation.decision.status, DecisionStatus::Rejected);
    assert_eq!(evaluation.decision.interest_rate, 0.0);
    assert_eq!(
        evaluation.decision.reason,
        "insufficient verified credits or high greenwashing risk"
    );
}

#[test]
fn unverified_claims_have_maximal_gap() {
    let (service, _) = service();

    let evaluation = service
        .submit(submission("Claims Only", 5000.0, 100.0, 0.0, "Verra", "Cookstove"))
        .expect("evaluation succeeds");

    assert_eq!(evaluation.signals.gap_ratio, 1.0);
    assert_eq!(evaluation.decision.status, DecisionStatus::Rejected);
}

#[test]
fn unknown_labels_fall_back_to_other_weights() {
    let (service, _) = service();

    let unknown = service
        .submit(submission("Biochar Ltd", 1000.0, 50.0, 50.0, "Puro.earth", "Biochar"))
        .expect("evaluation succeeds");
    let other = service
        .submit(submission("Biochar Ltd", 1000.0, 50.0, 50.0, "Other", "Other"))
        .expect("evaluation succeeds");

    assert_eq!(unknown.signals, other.signals);
    assert_eq!(unknown.decision.greenwashing_score, other.decision.greenwashing_score);
}

#[test]
fn every_evaluation_lands_in_the_audit_trail() {
    let (service, audit) = service();

    let first = service
        .submit(submission("Tech Co", 250_000.0, 1_400_000.0, 1_200_000.0, "Gold Standard", "Reforestation"))
        .expect("evaluation succeeds");
    let second = service
        .submit(submission("Tech Co", 250_000.0, 1_400_000.0, 1_200_000.0, "Gold Standard", "Reforestation"))
        .expect("evaluation succeeds");

    assert_ne!(first.decision.audit_ref, second.decision.audit_ref);
    assert_eq!(first.decision.status, second.decision.status);

    let records = audit.records().expect("records readable");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].fingerprint, records[1].fingerprint);
    assert_eq!(records[1].reference, second.decision.audit_ref);
}

#[test]
fn invalid_submissions_are_rejected_before_auditing() {
    let (service, audit) = service();

    let result = service.submit(submission("Negative", -1.0, 0.0, 0.0, "Other", "Other"));

    assert!(matches!(result, Err(UnderwritingServiceError::Intake(_))));
    assert!(audit.records().expect("records readable").is_empty());
}

#[test]
fn exports_render_for_a_completed_evaluation() {
    let (service, _) = service();
    let evaluation = service
        .submit(submission("Maersk", 1000.0, 3000.0, 3500.0, "Other", "Other"))
        .expect("evaluation succeeds");

    let csv = to_csv([&evaluation]).expect("csv renders");
    let note = audit_note(&evaluation);

    assert!(csv.contains(&evaluation.decision.audit_ref.0));
    assert!(note.contains("**Registry:** Other"));
}

#[test]
fn policy_json_overrides_tables() {
    let config: EvaluationConfig = serde_json::from_str(
        r#"{
            "credits_per_thousand": 20.0,
            "project_quality": {"Renewable": 1.0, "Other": 0.5}
        }"#,
    )
    .expect("policy parses");
    let audit = Arc::new(InMemoryAuditLog::new());
    let service = UnderwritingService::new(audit, config).expect("policy is valid");

    let evaluation = service
        .submit(submission("Cookstove Co", 1000.0, 10.0, 10.0, "Verra", "Cookstove"))
        .expect("evaluation succeeds");

    assert_eq!(evaluation.decision.required_credits, 20.0);
    assert_eq!(evaluation.signals.project_quality, 0.5);
    assert_eq!(evaluation.decision.status, DecisionStatus::Rejected);
}
