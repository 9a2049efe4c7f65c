use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::audit::AuditTrail;
use super::export::{audit_note, to_csv};
use super::intake::ApplicationSubmission;
use super::service::{Evaluation, UnderwritingService, UnderwritingServiceError};

/// Router builder exposing HTTP endpoints for evaluation, export, and the audit trail.
pub fn underwriting_router<L>(service: Arc<UnderwritingService<L>>) -> Router
where
    L: AuditTrail + 'static,
{
    Router::new()
        .route("/api/v1/loans/evaluations", post(evaluate_handler::<L>))
        .route("/api/v1/loans/evaluations/csv", post(csv_handler::<L>))
        .route("/api/v1/loans/evaluations/note", post(note_handler::<L>))
        .route("/api/v1/loans/audit", get(audit_handler::<L>))
        .with_state(service)
}

pub(crate) async fn evaluate_handler<L>(
    State(service): State<Arc<UnderwritingService<L>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    L: AuditTrail + 'static,
{
    match service.submit(submission) {
        Ok(evaluation) => (StatusCode::OK, axum::Json(evaluation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn csv_handler<L>(
    State(service): State<Arc<UnderwritingService<L>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    L: AuditTrail + 'static,
{
    let evaluation = match service.submit(submission) {
        Ok(evaluation) => evaluation,
        Err(error) => return error_response(error),
    };

    match to_csv([&evaluation]) {
        Ok(body) => attachment(&evaluation, "text/csv; charset=utf-8", "evaluator", "csv", body),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn note_handler<L>(
    State(service): State<Arc<UnderwritingService<L>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    L: AuditTrail + 'static,
{
    match service.submit(submission) {
        Ok(evaluation) => {
            let body = audit_note(&evaluation);
            attachment(&evaluation, "text/markdown; charset=utf-8", "audit", "md", body)
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn audit_handler<L>(State(service): State<Arc<UnderwritingService<L>>>) -> Response
where
    L: AuditTrail + 'static,
{
    match service.audit_records() {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

fn attachment(
    evaluation: &Evaluation,
    content_type: &'static str,
    prefix: &str,
    extension: &str,
    body: String,
) -> Response {
    let stem: String = evaluation
        .decision
        .audit_ref
        .0
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-'))
        .collect();
    let disposition = format!("attachment; filename=\"{prefix}_{stem}.{extension}\"");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn error_response(error: UnderwritingServiceError) -> Response {
    let status = match &error {
        UnderwritingServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        UnderwritingServiceError::Configuration(_) | UnderwritingServiceError::Audit(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
