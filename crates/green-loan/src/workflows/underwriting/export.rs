use serde::Serialize;

use super::evaluation::MAX_SCORE;
use super::service::Evaluation;

/// Tabular row for spreadsheet exports of an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSnapshot {
    #[serde(rename = "Company name")]
    pub company: String,
    #[serde(rename = "Loan requested")]
    pub loan_amount: f64,
    #[serde(rename = "Reported credits")]
    pub reported_credits: f64,
    #[serde(rename = "Verified credits")]
    pub verified_credits: f64,
    #[serde(rename = "Registry")]
    pub registry: String,
    #[serde(rename = "Project type")]
    pub project_type: String,
    #[serde(rename = "Remote sensing evidence")]
    pub remote_sensing: &'static str,
    #[serde(rename = "Soil tests ok")]
    pub soil_tests_ok: &'static str,
    #[serde(rename = "Decision")]
    pub decision: &'static str,
    #[serde(rename = "Reason")]
    pub reason: String,
    #[serde(rename = "Required credits")]
    pub required_credits: f64,
    #[serde(rename = "APR")]
    pub apr: String,
    #[serde(rename = "Greenwashing score")]
    pub greenwashing_score: f64,
    #[serde(rename = "Audit ref")]
    pub audit_ref: String,
}

impl EvaluationSnapshot {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        let input = &evaluation.input;
        let decision = &evaluation.decision;

        Self {
            company: input.applicant_id.0.clone(),
            loan_amount: input.loan_amount,
            reported_credits: input.reported_credits,
            verified_credits: input.verified_credits,
            registry: input.registry.to_string(),
            project_type: input.project_type.to_string(),
            remote_sensing: yes_no(input.evidence.has_remote_sensing()),
            soil_tests_ok: yes_no(!input.evidence.soil_tests_failed()),
            decision: decision.status.label(),
            reason: decision.reason.clone(),
            required_credits: decision.required_credits,
            apr: format_apr(decision.interest_rate),
            greenwashing_score: decision.greenwashing_score,
            audit_ref: decision.audit_ref.to_string(),
        }
    }
}

/// Export failure while rendering CSV.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv output: {0}")]
    Flush(String),
    #[error("csv output was not valid utf-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Render evaluations as CSV with a header row.
pub fn to_csv<'a>(
    evaluations: impl IntoIterator<Item = &'a Evaluation>,
) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for evaluation in evaluations {
        writer.serialize(EvaluationSnapshot::from_evaluation(evaluation))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Human-readable markdown note for the credit file.
pub fn audit_note(evaluation: &Evaluation) -> String {
    let input = &evaluation.input;
    let decision = &evaluation.decision;
    let company = if input.applicant_id.0.is_empty() {
        "N/A"
    } else {
        input.applicant_id.0.as_str()
    };

    let lines = [
        format!("**Company:** {company}"),
        String::new(),
        format!("**Loan requested:** {}", group_thousands(input.loan_amount, 2)),
        format!("**Claimed credits:** {}", group_thousands(input.reported_credits, 0)),
        format!("**Verified credits:** {}", group_thousands(input.verified_credits, 0)),
        format!("**Registry:** {}", input.registry),
        format!("**Project type:** {}", input.project_type),
        format!(
            "**Remote sensing:** {}",
            yes_no(input.evidence.has_remote_sensing())
        ),
        format!(
            "**Soil tests:** {}",
            yes_no(!input.evidence.soil_tests_failed())
        ),
        format!("**Decision:** {}", decision.status),
        format!("**Reason:** {}", decision.reason),
        format!(
            "**Required credits:** {}",
            group_thousands(decision.required_credits, 2)
        ),
        format!("**APR:** {}", format_apr(decision.interest_rate)),
        format!(
            "**Greenwashing score:** {:.2} out of {MAX_SCORE:.0}",
            decision.greenwashing_score
        ),
        format!("**Audit ref:** `{}`", decision.audit_ref),
    ];

    lines.join("\n")
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub(crate) fn format_apr(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

pub(crate) fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
