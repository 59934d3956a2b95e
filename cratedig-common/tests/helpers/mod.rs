//! Shared test utilities

pub mod log_capture;
