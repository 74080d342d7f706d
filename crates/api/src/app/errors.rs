use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use graindash_core::DomainError;
use graindash_reporting::ReportError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation { field, message } => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "validation_error",
                "field": field,
                "message": message,
            })),
        )
            .into_response(),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "operation not found"),
        DomainError::Storage(msg) => {
            tracing::error!(error = %msg, "ledger storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", "ledger unavailable")
        }
    }
}

pub fn report_error_to_response(err: ReportError) -> axum::response::Response {
    match err {
        ReportError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_report_request", msg),
        // Details are logged by the exporter; the client gets a generic message.
        ReportError::Generation(_) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "generation_error",
            "the report could not be generated",
        ),
    }
}

pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_query", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
