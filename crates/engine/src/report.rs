//! Text report rendering.
//!
//! Pure string construction; writing the report anywhere is the caller's
//! concern.

use crate::config::ReportConfig;
use crate::model::{LineStatus, ValidationResult};

/// Render a human-readable report: pass/fail banner, one table row per
/// expected line in original order, then the extra-content disclosure.
pub fn render_report(result: &ValidationResult, config: &ReportConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Content check: {} ({} mode)\n",
        result.meta.config_name, result.meta.mode
    ));

    if result.summary.pass {
        out.push_str("✅ No mismatches detected.\n");
    } else {
        let failing = result.summary.total_expected - result.summary.matched;
        out.push_str(&format!(
            "❌ Mismatches detected: {failing} of {} expected line(s) did not match.\n",
            result.summary.total_expected
        ));
    }
    out.push('\n');

    out.push_str("| Status | Expected Content | Detail |\n");
    out.push_str("|:---|:---|:---|\n");

    for row in &result.rows {
        let content = truncate(&row.expected.content, config.max_content_len);
        out.push_str(&format!(
            "| {} {} | {} | {} |\n",
            row.status.glyph(),
            row.status,
            flatten(&content),
            flatten(&row.detail),
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "Note: {} extra page line(s) not present in the reference document were \
         excluded from per-line reporting.\n",
        result.summary.extra_actual
    ));

    out
}

/// Truncate on a character boundary, appending "..." when anything was cut.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// Table cells must stay on one line and not break the column markup.
fn flatten(text: &str) -> String {
    text.replace(['\n', '\r'], " ").replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ClassificationResult, RunMeta, TaggedLine, ValidationSummary,
    };
    use crate::summary::compute_summary;

    fn result(rows: Vec<ClassificationResult>, extra: usize) -> ValidationResult {
        let summary: ValidationSummary = compute_summary(&rows, extra);
        ValidationResult {
            meta: RunMeta {
                config_name: "Homepage".to_string(),
                mode: "structured".to_string(),
                engine_version: "0.0.0".to_string(),
                run_at: "2026-08-23T00:00:00Z".to_string(),
            },
            summary,
            rows,
        }
    }

    fn row(status: LineStatus, content: &str, detail: &str) -> ClassificationResult {
        ClassificationResult {
            status,
            expected: TaggedLine::expected("PARAGRAPH", content),
            detail: detail.to_string(),
        }
    }

    #[test]
    fn pass_banner_when_everything_matches() {
        let report = render_report(
            &result(vec![row(LineStatus::Match, "Welcome", "identical")], 0),
            &ReportConfig::default(),
        );
        assert!(report.contains("✅ No mismatches detected."));
        assert!(report.contains("| ✅ MATCH | Welcome | identical |"));
    }

    #[test]
    fn fail_banner_counts_failing_lines() {
        let rows = vec![
            row(LineStatus::Match, "a", ""),
            row(LineStatus::ContentMismatch, "b", "not found"),
            row(LineStatus::StructuralMismatch, "c", "relabeled"),
        ];
        let report = render_report(&result(rows, 0), &ReportConfig::default());
        assert!(report.contains("❌ Mismatches detected: 2 of 3"));
        assert!(report.contains("⚠️ STRUCTURAL_MISMATCH"));
    }

    #[test]
    fn rows_keep_expected_order() {
        let rows = vec![
            row(LineStatus::Match, "first", ""),
            row(LineStatus::Mismatch, "second", ""),
        ];
        let report = render_report(&result(rows, 0), &ReportConfig::default());
        let first = report.find("first").unwrap();
        let second = report.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn long_content_is_truncated_with_ellipsis() {
        let long = "x".repeat(140);
        let report = render_report(
            &result(vec![row(LineStatus::Match, &long, "")], 0),
            &ReportConfig::default(),
        );
        let cell = "x".repeat(100) + "...";
        assert!(report.contains(&cell));
        assert!(!report.contains(&"x".repeat(101)));
    }

    #[test]
    fn truncation_length_is_configurable() {
        let report = render_report(
            &result(vec![row(LineStatus::Match, "abcdefghij", "")], 0),
            &ReportConfig { max_content_len: 4 },
        );
        assert!(report.contains("| abcd... |"));
    }

    #[test]
    fn disclosure_footer_always_present() {
        let report = render_report(&result(vec![], 7), &ReportConfig::default());
        assert!(report.contains("7 extra page line(s)"));

        let report = render_report(&result(vec![], 0), &ReportConfig::default());
        assert!(report.contains("0 extra page line(s)"));
    }

    #[test]
    fn pipes_and_newlines_in_content_do_not_break_the_table() {
        let report = render_report(
            &result(vec![row(LineStatus::Match, "a|b\nc", "d|e")], 0),
            &ReportConfig::default(),
        );
        assert!(report.contains("| a\\|b c | d\\|e |"));
    }
}
