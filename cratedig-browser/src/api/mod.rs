//! HTTP API handlers

pub mod health;
pub mod records;

pub use health::health_routes;
pub use records::{get_record, get_record_details, list_records};
