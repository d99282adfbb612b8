// HTTP request handlers
use crate::domain::metric::MetricId;
use crate::infrastructure::http_response::paged_json_response;
use crate::infrastructure::json_mapper::{
    aggregation_to_json, bucket_to_json, metric_to_json, page_to_json, AggregationJson,
    DailyBucketJson, MetricJson,
};
use crate::presentation::api_error::ApiError;
use crate::presentation::app_state::AppState;
use crate::presentation::validation::{AggregateParams, MetricsQueryParams, PageParams};
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Token for one request. It fires when the returned guard is dropped, which
/// also happens when the handler future itself is dropped mid-flight.
fn request_token() -> (CancellationToken, DropGuard) {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    (token, guard)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Filtered, sorted, paged metric listing
pub async fn query_metrics(
    State(state): State<Arc<AppState>>,
    params: Result<Query<MetricsQueryParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let query = params.validate()?;
    let (token, _guard) = request_token();

    let page = state.query_service.query(&query, &token).await?;
    Ok(paged_json_response(page_to_json(page)))
}

pub async fn get_metric(
    State(state): State<Arc<AppState>>,
    id: Result<Path<MetricId>, PathRejection>,
) -> Result<Json<MetricJson>, ApiError> {
    let Path(id) = id?;
    let (token, _guard) = request_token();

    match state.query_service.get_by_id(id, &token).await? {
        Some(metric) => Ok(Json(metric_to_json(metric))),
        None => Err(ApiError::NotFound(format!("Metric {} not found", id))),
    }
}

pub async fn list_types(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let (token, _guard) = request_token();
    let types = state.query_service.list_distinct_types(&token).await?;
    Ok(Json(types))
}

pub async fn list_by_type(
    State(state): State<Arc<AppState>>,
    metric_type: Result<Path<String>, PathRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Path(metric_type) = metric_type?;
    let Query(params) = params?;
    let page = params.validate()?;
    let (token, _guard) = request_token();

    let result = state
        .query_service
        .list_by_type(&metric_type, page, &token)
        .await?;
    Ok(paged_json_response(page_to_json(result)))
}

/// Counts per type for the filtered metrics
pub async fn aggregate(
    State(state): State<Arc<AppState>>,
    params: Result<Query<AggregateParams>, QueryRejection>,
) -> Result<Json<AggregationJson>, ApiError> {
    let Query(params) = params?;
    let filter = params.validate()?;
    let (token, _guard) = request_token();

    let result = state.aggregation_service.aggregate(&filter, &token).await?;
    Ok(Json(aggregation_to_json(result)))
}

/// Per day, type and name averages of numeric payload fields
pub async fn daily_averages(
    State(state): State<Arc<AppState>>,
    params: Result<Query<AggregateParams>, QueryRejection>,
) -> Result<Json<Vec<DailyBucketJson>>, ApiError> {
    let Query(params) = params?;
    let request = params.validate_daily()?;
    let (token, _guard) = request_token();

    let buckets = state
        .rollup_service
        .daily_averages(
            request.from,
            request.to,
            request.metric_type.as_deref(),
            request.name.as_deref(),
            &token,
        )
        .await?;
    Ok(Json(buckets.into_iter().map(bucket_to_json).collect()))
}
