//! Line-level alignment of expected vs. actual tagged-line sequences.
//!
//! Produces a minimal ordered edit script (Myers diff via the `similar`
//! crate) restricted to match/delete/insert. Equality is exact
//! `[LABEL] content` rendering: a true match must agree on both label and
//! wording, which is stricter than the classifier's later normalized
//! containment search.

use similar::{capture_diff_slices, Algorithm, DiffOp};

use crate::model::{AlignmentOp, TaggedLine};

/// Align two tagged-line sequences into an edit script.
///
/// Every expected line lands in exactly one Match or Delete op, every actual
/// line in exactly one Match or Insert op, with relative order preserved on
/// both sides. Deterministic for identical inputs.
pub fn align(expected: &[TaggedLine], actual: &[TaggedLine]) -> Vec<AlignmentOp> {
    let expected_keys: Vec<String> = expected.iter().map(TaggedLine::render).collect();
    let actual_keys: Vec<String> = actual.iter().map(TaggedLine::render).collect();

    let mut ops = Vec::new();

    for op in capture_diff_slices(Algorithm::Myers, &expected_keys, &actual_keys) {
        match op {
            DiffOp::Equal { old_index, new_index, len } => {
                for i in 0..len {
                    ops.push(AlignmentOp::Match {
                        expected: expected[old_index + i].clone(),
                        actual: actual[new_index + i].clone(),
                    });
                }
            }
            DiffOp::Delete { old_index, old_len, .. } => {
                for line in &expected[old_index..old_index + old_len] {
                    ops.push(AlignmentOp::Delete { expected: line.clone() });
                }
            }
            DiffOp::Insert { new_index, new_len, .. } => {
                for line in &actual[new_index..new_index + new_len] {
                    ops.push(AlignmentOp::Insert { actual: line.clone() });
                }
            }
            DiffOp::Replace { old_index, old_len, new_index, new_len } => {
                // No substitution op in the script: a replaced region is
                // its deletions followed by its insertions.
                for line in &expected[old_index..old_index + old_len] {
                    ops.push(AlignmentOp::Delete { expected: line.clone() });
                }
                for line in &actual[new_index..new_index + new_len] {
                    ops.push(AlignmentOp::Insert { actual: line.clone() });
                }
            }
        }
    }

    ops
}
