//! Discrepancy classification over the alignment script.
//!
//! An unmatched expected line is not automatically a content problem. The
//! classifier runs a second, label-independent search over the page's
//! normalized wording to decide whether the text itself is present (and only
//! the labeling disagrees) or genuinely missing.

use crate::extract::strip_labels;
use crate::model::{AlignmentOp, ClassificationResult, LineStatus, TaggedLine};
use crate::normalize::normalize;

/// Classification output: one row per expected line plus the count of
/// actual-side lines no expected line accounted for.
pub struct Classified {
    pub rows: Vec<ClassificationResult>,
    pub extra_count: usize,
}

/// Classify a structured-mode alignment script.
///
/// `page_text` is the labeled page text as returned by the labeling service;
/// the containment check strips its tokens first so the search is over
/// wording only.
pub fn classify(ops: &[AlignmentOp], page_text: &str) -> Classified {
    let page_wording = normalize(&strip_labels(page_text));

    let mut rows = Vec::new();
    let mut extra_count = 0usize;

    for op in ops {
        match op {
            AlignmentOp::Match { expected, .. } => {
                rows.push(ClassificationResult {
                    status: LineStatus::Match,
                    expected: expected.clone(),
                    detail: "content and label identical on the live page".to_string(),
                });
            }
            AlignmentOp::Delete { expected } => {
                rows.push(classify_unmatched(expected, &page_wording));
            }
            AlignmentOp::Insert { .. } => extra_count += 1,
        }
    }

    Classified { rows, extra_count }
}

fn classify_unmatched(expected: &TaggedLine, page_wording: &str) -> ClassificationResult {
    let key = normalize(&expected.content);

    // The empty key is contained in any page, so a content-less line that
    // failed to align can only be a structural problem.
    let wording_present = contains_wording(page_wording, &key);

    if wording_present {
        ClassificationResult {
            status: LineStatus::StructuralMismatch,
            expected: expected.clone(),
            detail: format!(
                "wording found on the page, but under a different label than [{}]",
                expected.label
            ),
        }
    } else {
        ClassificationResult {
            status: LineStatus::ContentMismatch,
            expected: expected.clone(),
            detail: "not found on the page; content is missing, mistyped, or altered"
                .to_string(),
        }
    }
}

/// Substring containment over normalized wording. Both sides are already
/// normalized, so a plain `contains` is exact.
fn contains_wording(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

/// Classify in unstructured mode: no labels, no alignment. Each expected
/// paragraph either appears somewhere in the page's normalized text or it
/// does not.
pub fn classify_unstructured(expected: &[TaggedLine], page_text: &str) -> Classified {
    let page_wording = normalize(page_text);

    let rows = expected
        .iter()
        .map(|line| {
            // Plain containment, nothing more: a paragraph that normalizes
            // to the empty key is contained in any page and matches.
            let key = normalize(&line.content);
            if contains_wording(&page_wording, &key) {
                ClassificationResult {
                    status: LineStatus::Match,
                    expected: line.clone(),
                    detail: "wording found on the live page".to_string(),
                }
            } else {
                ClassificationResult {
                    status: LineStatus::Mismatch,
                    expected: line.clone(),
                    detail: "wording not found on the live page".to_string(),
                }
            }
        })
        .collect();

    // Without labels there is no line inventory to count extras against.
    Classified { rows, extra_count: 0 }
}
