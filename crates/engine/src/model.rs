use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which side of the comparison a tagged line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Expected,
    Actual,
}

/// A label/content pair, the atomic unit of comparison.
///
/// `label` is an open vocabulary: any canonical uppercase token the reference
/// document or the labeling service produces is accepted. `content` is kept
/// verbatim (typos and casing preserved) so the report shows what was
/// actually written; normalization happens only at comparison time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedLine {
    pub label: String,
    pub content: String,
    pub origin: Origin,
}

impl TaggedLine {
    pub fn expected(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self { label: label.into(), content: content.into(), origin: Origin::Expected }
    }

    pub fn actual(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self { label: label.into(), content: content.into(), origin: Origin::Actual }
    }

    /// Canonical `[LABEL] content` rendering. This is the equality key the
    /// aligner uses, so expected and actual sides must render identically.
    pub fn render(&self) -> String {
        if self.content.is_empty() {
            format!("[{}]", self.label)
        } else {
            format!("[{}] {}", self.label, self.content)
        }
    }
}

/// Pre-extracted inputs for one reconciliation run.
///
/// `page_text` carries `[LABEL]` tokens in structured mode and plain visible
/// text in unstructured mode.
pub struct ValidationInput {
    pub reference_lines: Vec<String>,
    pub page_text: String,
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// One step of the line-level edit script between expected and actual.
///
/// Concatenating the expected lines of Match + Delete ops reconstructs the
/// expected sequence exactly once each; Match + Insert reconstructs the
/// actual sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignmentOp {
    Match { expected: TaggedLine, actual: TaggedLine },
    Delete { expected: TaggedLine },
    Insert { actual: TaggedLine },
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    Match,
    StructuralMismatch,
    ContentMismatch,
    /// Unstructured mode only: absent, with no label to blame.
    Mismatch,
}

impl LineStatus {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Match => "✅",
            Self::StructuralMismatch => "⚠️",
            Self::ContentMismatch | Self::Mismatch => "❌",
        }
    }
}

impl std::fmt::Display for LineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "MATCH"),
            Self::StructuralMismatch => write!(f, "STRUCTURAL_MISMATCH"),
            Self::ContentMismatch => write!(f, "CONTENT_MISMATCH"),
            Self::Mismatch => write!(f, "MISMATCH"),
        }
    }
}

/// One row of the final report. Produced for every expected line; extra
/// actual-side content is only counted, never itemized.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    pub status: LineStatus,
    pub expected: TaggedLine,
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub total_expected: usize,
    pub matched: usize,
    pub structural_mismatches: usize,
    pub content_mismatches: usize,
    pub plain_mismatches: usize,
    /// Actual-side lines with no corresponding expected line.
    pub extra_actual: usize,
    /// True iff every expected line matched.
    pub pass: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub config_name: String,
    pub mode: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub meta: RunMeta,
    pub summary: ValidationSummary,
    pub rows: Vec<ClassificationResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_wraps_label_in_brackets() {
        let line = TaggedLine::expected("TITLE_H1", "Welcome");
        assert_eq!(line.render(), "[TITLE_H1] Welcome");
    }

    #[test]
    fn render_empty_content_is_bare_label() {
        let line = TaggedLine::expected("CAPTION", "");
        assert_eq!(line.render(), "[CAPTION]");
    }

    #[test]
    fn render_is_the_match_equality_key() {
        let expected = TaggedLine::expected("TEASER_SECTION", "Read more");
        let actual = TaggedLine::actual("TEASER_SECTION", "Read more");
        assert_eq!(expected.render(), actual.render());

        let relabeled = TaggedLine::actual("PARAGRAPH", "Read more");
        assert_ne!(expected.render(), relabeled.render());
    }

    #[test]
    fn status_tokens_are_fixed() {
        assert_eq!(LineStatus::Match.to_string(), "MATCH");
        assert_eq!(LineStatus::StructuralMismatch.to_string(), "STRUCTURAL_MISMATCH");
        assert_eq!(LineStatus::ContentMismatch.to_string(), "CONTENT_MISMATCH");
        assert_eq!(LineStatus::Mismatch.to_string(), "MISMATCH");
    }
}
