// Domain layer - Plain data with no I/O
pub mod metric;
pub mod query;
pub mod report;
