//! Shared test fixtures for classgrid crates.
//!
//! This crate provides catalog builders and small, hand-checked catalogs.
//! It only depends on `classgrid-core` so every other crate can use it as a
//! dev-dependency.
//!
//! - [`catalog`] - Session helpers and a pair-oriented catalog builder
//! - [`scenarios`] - Reference catalogs with known search results
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! classgrid-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use classgrid_test::scenarios::{scenario_a_catalog, scenario_c_catalog};
//! use classgrid_test::CatalogBuilder;
//! ```

pub mod catalog;
pub mod scenarios;

// Re-export commonly used items at crate root for convenience
pub use catalog::{lecture, CatalogBuilder};
pub use scenarios::{campus_catalog, scenario_a_catalog, scenario_c_catalog};
