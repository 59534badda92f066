// Fleet metric detail service - synthetic per-robot-type dashboards
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
