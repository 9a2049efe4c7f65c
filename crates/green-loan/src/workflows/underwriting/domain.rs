use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for the borrowing entity (legal name or internal id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Third-party body certifying the applicant's credits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegistrySource {
    GoldStandard,
    Verra,
    Other,
    None,
    /// Label the intake layer did not recognize; scored with the fallback weight.
    Unrecognized(String),
}

impl RegistrySource {
    pub fn parse(label: &str) -> Self {
        match normalize_label(label).as_str() {
            "gold standard" | "goldstandard" | "gs" => Self::GoldStandard,
            "verra" | "vcs" => Self::Verra,
            "other" => Self::Other,
            "none" => Self::None,
            _ => Self::Unrecognized(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::GoldStandard => "Gold Standard",
            Self::Verra => "Verra",
            Self::Other => "Other",
            Self::None => "None",
            Self::Unrecognized(label) => label,
        }
    }
}

impl From<String> for RegistrySource {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RegistrySource> for String {
    fn from(value: RegistrySource) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category of the project generating the credits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectType {
    Reforestation,
    Renewable,
    Cookstove,
    Other,
    None,
    Unrecognized(String),
}

impl ProjectType {
    pub fn parse(label: &str) -> Self {
        match normalize_label(label).as_str() {
            "reforestation" => Self::Reforestation,
            "renewable" | "renewables" | "renewable energy" => Self::Renewable,
            "cookstove" | "cookstoves" | "cook stove" => Self::Cookstove,
            "other" => Self::Other,
            "none" => Self::None,
            _ => Self::Unrecognized(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Reforestation => "Reforestation",
            Self::Renewable => "Renewable",
            Self::Cookstove => "Cookstove",
            Self::Other => "Other",
            Self::None => "None",
            Self::Unrecognized(label) => label,
        }
    }
}

impl From<String> for ProjectType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ProjectType> for String {
    fn from(value: ProjectType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_ascii_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Field evidence backing the claimed credits. `None` means the data was not supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceFlags {
    #[serde(default)]
    pub remote_sensing: Option<bool>,
    #[serde(default)]
    pub soil_tests_passed: Option<bool>,
}

impl EvidenceFlags {
    /// Recent satellite or similar monitoring was supplied.
    pub fn has_remote_sensing(&self) -> bool {
        self.remote_sensing.unwrap_or(false)
    }

    /// Soil tests count as passed unless explicitly reported as failed.
    pub fn soil_tests_failed(&self) -> bool {
        self.soil_tests_passed == Some(false)
    }
}

/// Validated applicant input handed to the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationInput {
    pub applicant_id: ApplicantId,
    pub loan_amount: f64,
    pub reported_credits: f64,
    pub verified_credits: f64,
    pub registry: RegistrySource,
    pub project_type: ProjectType,
    #[serde(default)]
    pub evidence: EvidenceFlags,
}

/// Terminal outcome of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionStatus {
    Approved,
    ApprovedWithPenalty,
    Rejected,
}

impl DecisionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DecisionStatus::Approved => "APPROVED",
            DecisionStatus::ApprovedWithPenalty => "APPROVED_WITH_PENALTY",
            DecisionStatus::Rejected => "REJECTED",
        }
    }

    /// Higher is more favorable to the borrower.
    pub fn favorability(&self) -> u8 {
        match self {
            DecisionStatus::Approved => 2,
            DecisionStatus::ApprovedWithPenalty => 1,
            DecisionStatus::Rejected => 0,
        }
    }

    pub fn is_approved(&self) -> bool {
        !matches!(self, DecisionStatus::Rejected)
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
