//! Green loan underwriting: intake, greenwashing assessment, pricing, and the audit trail.
//!
//! The evaluation engine is pure; the service facade owns the audit trail and is the only
//! place decisions acquire a reference.

pub mod audit;
pub mod domain;
pub mod evaluation;
pub mod export;
pub(crate) mod intake;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use audit::{
    AuditClock, AuditError, AuditRecord, AuditReference, AuditTrail, InMemoryAuditLog,
    SteppingClock, SystemClock,
};
pub use domain::{
    ApplicantId, ApplicationInput, DecisionStatus, EvidenceFlags, ProjectType, RegistrySource,
};
pub use evaluation::{
    Assessment, DecisionReason, EvaluationConfig, EvaluationConfigError, EvaluationEngine,
    PricingTier, QualityTable, SignalSet, MAX_SCORE,
};
pub use export::{audit_note, to_csv, EvaluationSnapshot, ExportError};
pub use intake::{ApplicationSubmission, IntakeError};
pub use router::underwriting_router;
pub use service::{Decision, Evaluation, UnderwritingService, UnderwritingServiceError};
