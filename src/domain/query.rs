// Query criteria domain models
use super::metric::Metric;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Predicates over the metric collection. Every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricFilter {
    pub metric_type: Option<String>,
    pub name_contains: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl MetricFilter {
    pub fn matches(&self, metric: &Metric) -> bool {
        if let Some(metric_type) = &self.metric_type {
            if &metric.metric_type != metric_type {
                return false;
            }
        }
        if let Some(fragment) = &self.name_contains {
            if !metric.name.contains(fragment.as_str()) {
                return false;
            }
        }
        if let Some(from) = self.from {
            if metric.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if metric.created_at > to {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Type,
    Name,
    #[default]
    CreatedAt,
}

impl SortField {
    /// Parses a client supplied field name. Matching ignores ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "type" => Some(Self::Type),
            "name" => Some(Self::Name),
            "createdat" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Total order used for paging: the requested key in the requested
    /// direction, then `id` ascending for equal keys.
    pub fn compare(&self, a: &Metric, b: &Metric) -> Ordering {
        let primary = match self.field {
            SortField::Type => a.metric_type.cmp(&b.metric_type),
            SortField::Name => a.name.cmp(&b.name),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let primary = match self.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Offset/limit slice handed to a metric source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    pub fn window(&self) -> Window {
        let offset = u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size);
        Window {
            offset,
            limit: u64::from(self.page_size),
        }
    }

    pub fn total_pages(&self, total_count: u64) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        total_count.div_ceil(u64::from(self.page_size))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

/// Full criteria for one paged query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricQuery {
    pub filter: MetricFilter,
    pub sort: SortSpec,
    pub page: PageRequest,
}
