// Router assembly and middleware chain
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    aggregate, daily_averages, get_metric, health_check, list_by_type, list_types, query_metrics,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    // Layers wrap outward: trace sees every request, the timeout sits closest
    // to the handlers so an expired request drops its in-flight query.
    Router::new()
        .route("/healthz", get(health_check))
        .route("/metrics", get(query_metrics))
        .route("/metrics/types", get(list_types))
        .route("/metrics/aggregate", get(aggregate))
        .route("/metrics/daily-averages", get(daily_averages))
        .route("/metrics/by-type/:type", get(list_by_type))
        .route("/metrics/:id", get(get_metric))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
