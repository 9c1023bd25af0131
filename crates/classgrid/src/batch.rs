//! Independent searches run in parallel.
//!
//! Each request owns its engine and catalog and runs as one task on the
//! rayon pool; nothing is shared between requests.

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use classgrid_core::{Result, SubjectCatalog};
use classgrid_solver::{SearchEngine, SearchOutcome};
use rayon::prelude::*;
use tracing::info;

/// One search request of a batch.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub engine: SearchEngine,
    pub catalog: SubjectCatalog,
}

impl SearchRequest {
    pub fn new(engine: SearchEngine, catalog: SubjectCatalog) -> Self {
        Self { engine, catalog }
    }
}

/// Runs every request; results come back in request order.
pub fn search_batch(requests: &[SearchRequest]) -> Vec<Result<SearchOutcome>> {
    run_batch(requests, None)
}

/// Like [`search_batch`]; requests still running when `terminate` is raised
/// end with [`Cancelled`](classgrid_core::ClassgridError::Cancelled).
pub fn search_batch_with_flag(
    requests: &[SearchRequest],
    terminate: &AtomicBool,
) -> Vec<Result<SearchOutcome>> {
    run_batch(requests, Some(terminate))
}

fn run_batch(
    requests: &[SearchRequest],
    terminate: Option<&AtomicBool>,
) -> Vec<Result<SearchOutcome>> {
    let start = Instant::now();
    info!(event = "batch_start", requests = requests.len());

    let results: Vec<Result<SearchOutcome>> = requests
        .par_iter()
        .map(|request| request.engine.search_with_flag(&request.catalog, terminate))
        .collect();

    info!(
        event = "batch_end",
        requests = requests.len(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        duration_ms = start.elapsed().as_millis() as u64,
    );
    results
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use classgrid_core::{ClassgridError, Constraints, GroupRef};
    use classgrid_test::{scenario_a_catalog, scenario_c_catalog};

    use super::*;

    fn requests() -> Vec<SearchRequest> {
        vec![
            SearchRequest::new(
                SearchEngine::new(["X", "Y"], Constraints::default()),
                scenario_a_catalog(),
            ),
            SearchRequest::new(
                SearchEngine::new(["NOPE"], Constraints::default()),
                scenario_a_catalog(),
            ),
            SearchRequest::new(
                SearchEngine::new(["Z"], Constraints::default()),
                scenario_c_catalog(),
            ),
            SearchRequest::new(
                SearchEngine::new(
                    ["X", "Y"],
                    Constraints::new().with_blacklisted(GroupRef::new("X", 20)),
                ),
                scenario_a_catalog(),
            ),
        ]
    }

    #[test]
    fn test_results_follow_request_order() {
        let results = search_batch(&requests());

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().len(), 2);
        assert_eq!(results[1].as_ref().unwrap_err().unsatisfiable_subjects(), ["NOPE"]);
        assert_eq!(results[2].as_ref().unwrap().best().unwrap().dead_hours, 3);
        assert_eq!(results[3].as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_batch() {
        assert!(search_batch(&[]).is_empty());
    }

    #[test]
    fn test_raised_flag_cancels_every_request() {
        let terminate = AtomicBool::new(true);
        let results = search_batch_with_flag(&requests()[..1], &terminate);

        assert!(matches!(results[0], Err(ClassgridError::Cancelled)));
    }
}
