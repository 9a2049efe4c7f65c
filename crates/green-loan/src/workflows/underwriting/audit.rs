use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicantId, DecisionStatus};
use super::evaluation::SignalSet;

/// Traceability tag for one evaluation: `evt_<unix millis>_<applicant without spaces>`.
///
/// Two evaluations of the same applicant within one millisecond share a reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditReference(pub String);

impl AuditReference {
    pub fn compose(timestamp: DateTime<Utc>, applicant_id: &ApplicantId) -> Self {
        let compact: String = applicant_id
            .0
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect();
        Self(format!("evt_{}_{}", timestamp.timestamp_millis(), compact))
    }
}

impl fmt::Display for AuditReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append-only entry describing one decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub reference: AuditReference,
    pub applicant_id: ApplicantId,
    pub status: DecisionStatus,
    pub signals: SignalSet,
    pub timestamp: DateTime<Utc>,
    /// Display-only FNV-1a digest of applicant and status. Not an integrity check.
    pub fingerprint: String,
}

/// Storage boundary for decision records so the service can be exercised in isolation.
pub trait AuditTrail: Send + Sync {
    fn append(
        &self,
        applicant_id: &ApplicantId,
        status: DecisionStatus,
        signals: &SignalSet,
    ) -> Result<AuditReference, AuditError>;

    fn records(&self) -> Result<Vec<AuditRecord>, AuditError>;
}

/// Audit trail failure.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit log unavailable: {0}")]
    Unavailable(String),
}

/// Time source for audit references.
pub trait AuditClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl AuditClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock advancing by `step` on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    step: Duration,
    ticks: AtomicI32,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            start,
            step,
            ticks: AtomicI32::new(0),
        }
    }
}

impl AuditClock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
        self.start
            .checked_add_signed(self.step * tick)
            .unwrap_or(self.start)
    }
}

/// Mutex-guarded in-memory log. Appends are serialized, so a shared instance never loses
/// records; the log grows for the lifetime of the instance.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog<C = SystemClock> {
    clock: C,
    records: Mutex<Vec<AuditRecord>>,
}

impl InMemoryAuditLog<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: AuditClock> InMemoryAuditLog<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: AuditClock> AuditTrail for InMemoryAuditLog<C> {
    fn append(
        &self,
        applicant_id: &ApplicantId,
        status: DecisionStatus,
        signals: &SignalSet,
    ) -> Result<AuditReference, AuditError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| AuditError::Unavailable("audit mutex poisoned".to_string()))?;

        let timestamp = self.clock.now();
        let reference = AuditReference::compose(timestamp, applicant_id);
        guard.push(AuditRecord {
            reference: reference.clone(),
            applicant_id: applicant_id.clone(),
            status,
            signals: *signals,
            timestamp,
            fingerprint: fingerprint(applicant_id, status),
        });

        Ok(reference)
    }

    fn records(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| AuditError::Unavailable("audit mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

pub fn fingerprint(applicant_id: &ApplicantId, status: DecisionStatus) -> String {
    let bytes = applicant_id
        .0
        .as_bytes()
        .iter()
        .chain(std::iter::once(&0x1f))
        .chain(status.label().as_bytes());

    let hash = bytes.fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    });
    format!("{hash:#018x}")
}
