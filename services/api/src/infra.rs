use green_loan::workflows::underwriting::{
    EvaluationConfig, InMemoryAuditLog, SystemClock, UnderwritingService,
    UnderwritingServiceError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type AuditLog = InMemoryAuditLog<SystemClock>;
pub(crate) type CliService = UnderwritingService<AuditLog>;

/// Service backed by a process-lifetime in-memory audit trail.
pub(crate) fn build_service(
    config: EvaluationConfig,
) -> Result<CliService, UnderwritingServiceError> {
    UnderwritingService::new(Arc::new(InMemoryAuditLog::new()), config)
}
