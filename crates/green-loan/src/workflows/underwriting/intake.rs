use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicantId, ApplicationInput, EvidenceFlags, ProjectType, RegistrySource,
};

/// Raw borrower input as collected by a form, CLI, or HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub company: String,
    pub loan_amount: f64,
    pub reported_credits: f64,
    pub verified_credits: f64,
    pub registry: String,
    pub project_type: String,
    #[serde(default)]
    pub remote_sensing: Option<bool>,
    #[serde(default)]
    pub soil_tests_ok: Option<bool>,
}

/// Input rejected before it reaches the decision engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("{field} is required")]
    BlankField { field: &'static str },
    #[error("{field} must not be negative (found {value})")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFiniteAmount { field: &'static str },
}

pub(crate) fn input_from_submission(
    submission: ApplicationSubmission,
) -> Result<ApplicationInput, IntakeError> {
    let company = required_text("company", &submission.company)?;
    let registry = required_text("registry", &submission.registry)?;
    let project_type = required_text("project_type", &submission.project_type)?;

    Ok(ApplicationInput {
        applicant_id: ApplicantId(company.to_string()),
        loan_amount: amount("loan_amount", submission.loan_amount)?,
        reported_credits: amount("reported_credits", submission.reported_credits)?,
        verified_credits: amount("verified_credits", submission.verified_credits)?,
        registry: RegistrySource::parse(registry),
        project_type: ProjectType::parse(project_type),
        evidence: EvidenceFlags {
            remote_sensing: submission.remote_sensing,
            soil_tests_passed: submission.soil_tests_ok,
        },
    })
}

fn required_text<'a>(field: &'static str, value: &'a str) -> Result<&'a str, IntakeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(IntakeError::BlankField { field })
    } else {
        Ok(trimmed)
    }
}

fn amount(field: &'static str, value: f64) -> Result<f64, IntakeError> {
    if !value.is_finite() {
        return Err(IntakeError::NonFiniteAmount { field });
    }
    if value < 0.0 {
        return Err(IntakeError::NegativeAmount { field, value });
    }
    Ok(value)
}
