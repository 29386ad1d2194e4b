//! Shared helpers for backend unit and integration tests: logging setup,
//! problem+json assertions and unique test data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
