// Request parameter validation
//
// Everything the query services treat as a precondition is checked here,
// before any service call.
use crate::domain::query::{MetricFilter, MetricQuery, PageRequest, SortField, SortOrder, SortSpec};
use crate::presentation::api_error::ApiError;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsQueryParams {
    #[serde(rename = "type")]
    pub metric_type: Option<String>,
    pub name: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateParams {
    #[serde(rename = "type")]
    pub metric_type: Option<String>,
    pub name: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

/// Validated daily rollup request
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAveragesRequest {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub metric_type: Option<String>,
    pub name: Option<String>,
}

impl MetricsQueryParams {
    pub fn validate(self) -> Result<MetricQuery, ApiError> {
        let filter = build_filter(self.metric_type, self.name, self.from_date, self.to_date)?;

        let field = match non_empty(self.sort_by) {
            Some(value) => SortField::parse(&value).ok_or_else(|| {
                ApiError::BadRequest(format!(
                    "sortBy must be one of type, name, createdAt (got '{}')",
                    value
                ))
            })?,
            None => SortField::default(),
        };
        let order = match non_empty(self.sort_order) {
            Some(value) => SortOrder::parse(&value).ok_or_else(|| {
                ApiError::BadRequest(format!("sortOrder must be asc or desc (got '{}')", value))
            })?,
            None => SortOrder::default(),
        };

        Ok(MetricQuery {
            filter,
            sort: SortSpec::new(field, order),
            page: page_request(self.page, self.page_size)?,
        })
    }
}

impl PageParams {
    pub fn validate(self) -> Result<PageRequest, ApiError> {
        page_request(self.page, self.page_size)
    }
}

impl AggregateParams {
    pub fn validate(self) -> Result<MetricFilter, ApiError> {
        build_filter(self.metric_type, self.name, self.from_date, self.to_date)
    }

    /// Both dates are mandatory for the daily rollup
    pub fn validate_daily(self) -> Result<DailyAveragesRequest, ApiError> {
        let filter = self.validate()?;
        let from = filter
            .from
            .ok_or_else(|| ApiError::BadRequest("fromDate is required".to_string()))?;
        let to = filter
            .to
            .ok_or_else(|| ApiError::BadRequest("toDate is required".to_string()))?;

        Ok(DailyAveragesRequest {
            from,
            to,
            metric_type: filter.metric_type,
            name: filter.name_contains,
        })
    }
}

fn build_filter(
    metric_type: Option<String>,
    name: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
) -> Result<MetricFilter, ApiError> {
    let from = non_empty(from_date)
        .map(|v| parse_date("fromDate", &v, DayEdge::Start))
        .transpose()?;
    let to = non_empty(to_date)
        .map(|v| parse_date("toDate", &v, DayEdge::End))
        .transpose()?;

    if let (Some(from), Some(to)) = (from, to) {
        if to < from {
            return Err(ApiError::BadRequest(
                "toDate must not be earlier than fromDate".to_string(),
            ));
        }
    }

    Ok(MetricFilter {
        metric_type: non_empty(metric_type),
        name_contains: non_empty(name),
        from,
        to,
    })
}

fn page_request(page: Option<String>, page_size: Option<String>) -> Result<PageRequest, ApiError> {
    let page = match non_empty(page) {
        Some(value) => parse_number("page", &value)?,
        None => 1,
    };
    let page_size = match non_empty(page_size) {
        Some(value) => parse_number("pageSize", &value)?,
        None => DEFAULT_PAGE_SIZE,
    };

    if page < 1 {
        return Err(ApiError::BadRequest("page must be at least 1".to_string()));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::BadRequest(format!(
            "pageSize must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    Ok(PageRequest::new(page, page_size))
}

fn parse_number(field: &str, value: &str) -> Result<u32, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("{} must be a positive integer", field)))
}

/// Which end of a bare calendar day a date-only bound resolves to
#[derive(Debug, Clone, Copy)]
enum DayEdge {
    Start,
    End,
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` days. A bare day covers
/// the whole UTC day: a lower bound starts at midnight, an upper bound ends
/// one nanosecond before the next midnight.
fn parse_date(field: &str, value: &str, edge: DayEdge) -> Result<DateTime<Utc>, ApiError> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(match edge {
            DayEdge::Start => day.and_time(NaiveTime::MIN).and_utc(),
            DayEdge::End => day
                .succ_opt()
                .map(|next| next.and_time(NaiveTime::MIN).and_utc() - TimeDelta::nanoseconds(1))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        });
    }
    Err(ApiError::BadRequest(format!(
        "{} must be an RFC 3339 timestamp or YYYY-MM-DD date",
        field
    )))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
