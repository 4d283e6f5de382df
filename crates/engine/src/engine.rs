//! Run orchestration: extract, align, classify, summarize.

use chrono::Utc;

use crate::align::align;
use crate::classify::{classify, classify_unstructured, Classified};
use crate::config::{EngineConfig, Mode};
use crate::extract::{extract_expected, paragraphs, parse_labeled_page};
use crate::model::{RunMeta, ValidationInput, ValidationResult};
use crate::summary::compute_summary;

/// Run one reconciliation. Pure and infallible: bad inputs produce mismatch
/// rows, never errors.
pub fn run(config: &EngineConfig, input: &ValidationInput) -> ValidationResult {
    let classified = match config.mode {
        Mode::Structured => {
            let expected = extract_expected(&input.reference_lines);
            let actual = parse_labeled_page(&input.page_text);
            let ops = align(&expected, &actual);
            classify(&ops, &input.page_text)
        }
        Mode::Unstructured => {
            let expected = paragraphs(&input.reference_lines);
            classify_unstructured(&expected, &input.page_text)
        }
    };

    let Classified { rows, extra_count } = classified;
    let summary = compute_summary(&rows, extra_count);

    ValidationResult {
        meta: RunMeta {
            config_name: config.name.clone(),
            mode: config.mode.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: Utc::now().to_rfc3339(),
        },
        summary,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineStatus;

    fn input(reference: &[&str], page: &str) -> ValidationInput {
        ValidationInput {
            reference_lines: reference.iter().map(|s| s.to_string()).collect(),
            page_text: page.to_string(),
        }
    }

    fn structured() -> EngineConfig {
        EngineConfig::adhoc("test", Mode::Structured)
    }

    #[test]
    fn identical_line_is_a_match_and_passes() {
        let result = run(
            &structured(),
            &input(&["title (h1): Welcome"], "[TITLE_H1] Welcome"),
        );
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].status, LineStatus::Match);
        assert!(result.summary.pass);
    }

    #[test]
    fn relabeled_line_is_structural() {
        let result = run(
            &structured(),
            &input(&["title (h1): Welcome"], "[PARAGRAPH] Welcome"),
        );
        assert_eq!(result.rows[0].status, LineStatus::StructuralMismatch);
        assert!(!result.summary.pass);
    }

    #[test]
    fn altered_wording_is_content_mismatch() {
        let result = run(
            &structured(),
            &input(&["paragraph: Hello wrold"], "[PARAGRAPH] Hello world"),
        );
        assert_eq!(result.rows[0].status, LineStatus::ContentMismatch);
    }

    #[test]
    fn empty_reference_passes_and_counts_extras() {
        let result = run(&structured(), &input(&[], "[PARAGRAPH] Ad copy"));
        assert!(result.rows.is_empty());
        assert_eq!(result.summary.extra_actual, 1);
        assert!(result.summary.pass);
    }

    #[test]
    fn unstructured_containment_match_and_miss() {
        let config = EngineConfig::adhoc("test", Mode::Unstructured);

        let result = run(
            &config,
            &input(&["Our mission is clear."], "About us. OUR MISSION IS CLEAR — always."),
        );
        assert_eq!(result.rows[0].status, LineStatus::Match);
        assert!(result.summary.pass);

        let result = run(&config, &input(&["Our mission is clear."], "Something else."));
        assert_eq!(result.rows[0].status, LineStatus::Mismatch);
        assert_eq!(result.summary.plain_mismatches, 1);
        assert_eq!(result.summary.extra_actual, 0);
    }

    #[test]
    fn classification_is_total_over_expected_lines() {
        let result = run(
            &structured(),
            &input(
                &["a: 1", "b: 2", "c: 3", "", "d: 4"],
                "[A] 1\n[X] other\n[C] 3",
            ),
        );
        assert_eq!(result.rows.len(), 4);
        assert_eq!(result.summary.total_expected, 4);
    }

    #[test]
    fn rows_are_deterministic_across_runs() {
        let config = structured();
        let i = input(&["a: 1", "b: 2"], "[B] 2\n[A] 1");
        let first = run(&config, &i);
        let second = run(&config, &i);
        let a = serde_json::to_string(&first.rows).unwrap();
        let b = serde_json::to_string(&second.rows).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn meta_records_config_and_mode() {
        let result = run(&structured(), &input(&[], ""));
        assert_eq!(result.meta.config_name, "test");
        assert_eq!(result.meta.mode, "structured");
        assert!(!result.meta.engine_version.is_empty());
    }
}
