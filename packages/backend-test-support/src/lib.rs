//! Backend test support utilities
//!
//! Shared by the backend's integration test binaries: logging setup, unique
//! fixture data, and Problem Details assertions.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
