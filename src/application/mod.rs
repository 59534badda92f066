// Application layer - Use cases and generators
pub mod metric_detail_service;
pub mod metric_detail_view;
pub mod noise_source;
pub mod series_generator;
pub mod summary_generator;
