// Domain layer - Fleet, filter, and chart models
pub mod filter;
pub mod hospital;
pub mod metric;
pub mod metric_detail;
pub mod robot;
pub mod time_series;
