use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::{header, HeaderValue},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use graindash_reporting::ExportOutcome;

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/reports/export", get(export_report))
}

pub async fn export_report(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::ExportReportQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let (range, format) = match query.into_request() {
        Ok(r) => r,
        Err(e) => return errors::report_error_to_response(e),
    };

    let exported = tokio::task::spawn_blocking({
        let services = services.clone();
        move || services.export_report(&range, format)
    })
    .await;
    let exported = match exported {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "report export task failed");
            return errors::report_error_to_response(graindash_reporting::ReportError::generation(
                e.to_string(),
            ));
        }
    };

    let artifact = match exported {
        Ok(ExportOutcome::Ready(artifact)) => artifact,
        Ok(ExportOutcome::NoData) => {
            return Json(json!({
                "kind": "notice",
                "notice": "no_data",
                "message": "no operations recorded in the selected period",
                "start": range.start(),
                "end": range.end(),
            }))
            .into_response();
        }
        Err(e) => return errors::report_error_to_response(e),
    };

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    let Ok(disposition) = HeaderValue::from_str(&disposition) else {
        return errors::report_error_to_response(graindash_reporting::ReportError::generation(
            "artifact name is not a valid header value",
        ));
    };

    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(artifact.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}
