#![allow(dead_code)]

pub mod app_builder;
pub mod factory;
pub mod test_state;

// Re-export only what current tests actually import
pub use app_builder::create_test_app;
pub use test_state::build_test_state;
