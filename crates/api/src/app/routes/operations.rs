use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use graindash_core::OperationId;
use graindash_ledger::Operation;

use crate::app::dto::{self, OperationFilter};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/operations", get(list_operations).post(create_operation))
        .route(
            "/operations/:id",
            get(get_operation).put(update_operation).delete(delete_operation),
        )
}

pub async fn list_operations(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::ListOperationsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let filter = match query.into_filter() {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let items = filtered(services.as_ref(), &filter);
    Json(json!({ "items": items })).into_response()
}

fn filtered(services: &AppServices, filter: &OperationFilter) -> Vec<Operation> {
    let store = services.store();
    let mut items = match (&filter.range, filter.kind) {
        (Some(range), kind) => {
            let mut ops = store.list_by_date_range(range.start_at(), range.end_at());
            if let Some(kind) = kind {
                ops.retain(|op| op.kind() == kind);
            }
            ops
        }
        (None, Some(kind)) => store.list_by_type(kind),
        (None, None) => store.list(),
    };
    if let Some(limit) = filter.limit {
        items.truncate(limit);
    }
    items
}

pub async fn get_operation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(raw_id): Path<String>,
) -> axum::response::Response {
    let id = match raw_id.parse::<OperationId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().get(id) {
        Some(op) => Json(op).into_response(),
        None => errors::domain_error_to_response(graindash_core::DomainError::NotFound),
    }
}

pub async fn create_operation(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateOperationRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().create(draft) {
        Ok(op) => (StatusCode::CREATED, Json(op)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_operation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(raw_id): Path<String>,
    body: Result<Json<dto::UpdateOperationRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match raw_id.parse::<OperationId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let patch = match body.into_patch() {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().update(id, patch) {
        Ok(op) => Json(op).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_operation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(raw_id): Path<String>,
) -> axum::response::Response {
    let id = match raw_id.parse::<OperationId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let deleted = services.store().delete(id);
    Json(json!({ "deleted": deleted })).into_response()
}
