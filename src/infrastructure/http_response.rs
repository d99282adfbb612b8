// HTTP response utilities for JSON bodies with pagination headers
use crate::infrastructure::json_mapper::PagedJson;
use axum::{
    http::{HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");
pub const TOTAL_PAGES: HeaderName = HeaderName::from_static("x-total-pages");
pub const PAGE: HeaderName = HeaderName::from_static("x-page");
pub const PAGE_SIZE: HeaderName = HeaderName::from_static("x-page-size");

/// Serialize a page as JSON and mirror its counters into response headers
pub fn paged_json_response<T: Serialize>(page: PagedJson<T>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT, HeaderValue::from(page.total_count));
    headers.insert(TOTAL_PAGES, HeaderValue::from(page.total_pages));
    headers.insert(PAGE, HeaderValue::from(page.page));
    headers.insert(PAGE_SIZE, HeaderValue::from(page.page_size));

    (headers, Json(page)).into_response()
}
