//! Search entry point that hides the engine wiring.

use std::sync::atomic::AtomicBool;

use classgrid_config::SearchConfig;
use classgrid_core::{Result, SubjectCatalog};
use classgrid_solver::{SearchEngine, SearchOutcome};

/// Runs the search described by `config` over `catalog`.
///
/// With the `console` feature enabled, console output is initialized on
/// first use.
pub fn run_search(config: &SearchConfig, catalog: &SubjectCatalog) -> Result<SearchOutcome> {
    run_search_with_flag(config, catalog, None)
}

/// Like [`run_search`], returning [`Cancelled`](classgrid_core::ClassgridError::Cancelled)
/// once `terminate` is raised.
pub fn run_search_with_flag(
    config: &SearchConfig,
    catalog: &SubjectCatalog,
    terminate: Option<&AtomicBool>,
) -> Result<SearchOutcome> {
    #[cfg(feature = "console")]
    classgrid_console::init();

    SearchEngine::from_config(config)?.search_with_flag(catalog, terminate)
}
