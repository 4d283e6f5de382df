//! Aggregate counts over classified rows.

use crate::model::{ClassificationResult, LineStatus, ValidationSummary};

/// Tally row statuses into a summary. A run passes only when every expected
/// line is a full match; structural mismatches fail the run even though the
/// wording is present.
pub fn compute_summary(rows: &[ClassificationResult], extra_actual: usize) -> ValidationSummary {
    let mut matched = 0;
    let mut structural_mismatches = 0;
    let mut content_mismatches = 0;
    let mut plain_mismatches = 0;

    for row in rows {
        match row.status {
            LineStatus::Match => matched += 1,
            LineStatus::StructuralMismatch => structural_mismatches += 1,
            LineStatus::ContentMismatch => content_mismatches += 1,
            LineStatus::Mismatch => plain_mismatches += 1,
        }
    }

    ValidationSummary {
        total_expected: rows.len(),
        matched,
        structural_mismatches,
        content_mismatches,
        plain_mismatches,
        extra_actual,
        pass: matched == rows.len(),
    }
}
