//! Validation run for the collaborative-filtering math.
//!
//! Runs four checks in order against a rating table (normally the sample
//! dataset) and collects their results into a [`ValidationReport`]:
//! 1. Cosine similarity of fixed reference vectors
//! 2. User-user similarity
//! 3. Item-item similarity
//! 4. User-based recommendation generation

pub mod checks;
pub mod report;

pub use report::{CheckOutcome, CheckResult, Measurement, ValidationReport};

use anyhow::Result;
use data_loader::RatingTable;
use std::time::Instant;
use tracing::{info, warn};

/// Run every check against `table`.
///
/// Failed expectations are recorded in the report; an `Err` means a check
/// could not run at all.
pub fn run_validation(table: &RatingTable) -> Result<ValidationReport> {
    run_validation_with(table, |_| {})
}

/// Like [`run_validation`], calling `on_check` as soon as each check finishes
pub fn run_validation_with(
    table: &RatingTable,
    mut on_check: impl FnMut(&CheckResult),
) -> Result<ValidationReport> {
    let start_time = Instant::now();
    let mut report = ValidationReport::new();

    let mut record = |check: CheckResult| {
        on_check(&check);
        report.push(check);
    };
    record(checks::check_cosine_similarity());
    record(checks::check_user_similarity(table)?);
    record(checks::check_item_similarity(table)?);
    record(checks::check_recommendations(table)?);

    for check in report.failed_checks() {
        warn!(
            "Check {} ({}) failed: {}",
            check.number,
            check.name,
            check.failures().join("; ")
        );
    }

    info!(
        "Ran {} checks in {:.2?}, passed: {}",
        report.checks.len(),
        start_time.elapsed(),
        report.passed()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::sample_ratings;

    #[test]
    fn test_sample_validation_passes() {
        let report = run_validation(&sample_ratings()).unwrap();

        assert_eq!(report.checks.len(), 4);
        let numbers: Vec<usize> = report.checks.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert!(report.passed());
    }

    #[test]
    fn test_callback_sees_checks_in_order() {
        let mut seen = Vec::new();
        run_validation_with(&sample_ratings(), |check| seen.push(check.name.clone())).unwrap();
        assert_eq!(
            seen,
            vec![
                "Cosine Similarity Calculation",
                "User-Based CF Logic",
                "Item-Based CF Logic",
                "Recommendation Generation Logic",
            ]
        );
    }

    #[test]
    fn test_validation_errors_on_foreign_dataset() {
        let table = data_loader::synthetic::generate(5, 5, 0.5, 3).unwrap();
        assert!(run_validation(&table).is_err());
    }
}
