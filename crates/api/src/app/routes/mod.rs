use axum::Router;

pub mod dashboard;
pub mod operations;
pub mod reports;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .merge(operations::router())
        .merge(dashboard::router())
        .merge(reports::router())
}
