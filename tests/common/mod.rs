//! Common utilities for integration tests
#![allow(dead_code)]

pub mod test_helpers;

// Re-export commonly used items
pub use test_helpers::{assert_grids_close, configured_mesh, init_logging, max_boundary_deviation};
