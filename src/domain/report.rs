// Result models produced by the query, aggregation and rollup use cases
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> PagedResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCount {
    pub metric_type: String,
    pub count: u64,
}

impl TypeCount {
    pub fn new(metric_type: impl Into<String>, count: u64) -> Self {
        Self {
            metric_type: metric_type.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    pub total_count: u64,
    pub per_type: Vec<TypeCount>,
}

/// One (day, type, name) group of the daily rollup.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRollupBucket {
    pub date: NaiveDate,
    pub metric_type: String,
    pub name: String,
    pub count: u64,
    pub average_values: BTreeMap<String, f64>,
}
