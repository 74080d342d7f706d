use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use graindash_metrics::DashboardMetrics;

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard/metrics", get(metrics))
        .route("/dashboard/flow", get(flow))
        .route("/dashboard/monthly", get(monthly))
}

pub async fn metrics(Extension(services): Extension<Arc<AppServices>>) -> Json<DashboardMetrics> {
    Json(services.dashboard_metrics())
}

/// Per-type chart series plus the signed balance.
pub async fn flow(Extension(services): Extension<Arc<AppServices>>) -> Json<serde_json::Value> {
    let flow = services.dashboard_metrics().flow;
    Json(json!({
        "series": flow.series(),
        "balance": flow.balance,
    }))
}

pub async fn monthly(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::MonthlyFlowQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let months = match query.into_months() {
        Ok(m) => m,
        Err(e) => return errors::domain_error_to_response(e),
    };

    Json(json!({
        "months": months,
        "items": services.monthly_flow(months),
    }))
    .into_response()
}
