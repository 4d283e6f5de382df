//! Extraction of tagged lines from raw reference lines and labeled page text.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::TaggedLine;

/// Label assigned when a line carries no explicit label.
pub const DEFAULT_LABEL: &str = "PARAGRAPH";

/// `[LABEL]` tokens as emitted by the labeling service: uppercase, digits,
/// underscores. Anything else in brackets is treated as ordinary content.
fn label_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([A-Z][A-Z0-9_]*)\]").unwrap())
}

/// Canonicalize a raw label: trim, uppercase, spaces to underscores, parens
/// removed. `title (h1)` → `TITLE_H1`, `Menu Item` → `MENU_ITEM`.
pub fn canonicalize_label(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .replace(' ', "_")
        .replace(['(', ')'], "")
}

/// Parse reference lines in structured mode.
///
/// The first colon splits each non-blank line into label and content, both
/// trimmed; a line without a colon is all content. A label with no body
/// still yields a tagged line with empty content; empty content is a valid
/// match target.
pub fn extract_expected(lines: &[String]) -> Vec<TaggedLine> {
    let mut out = Vec::new();

    for raw in lines {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let (label, content) = match raw.find(':') {
            Some(idx) => {
                let label = canonicalize_label(&raw[..idx]);
                let content = raw[idx + 1..].trim().to_string();
                if label.is_empty() {
                    (DEFAULT_LABEL.to_string(), content)
                } else {
                    (label, content)
                }
            }
            None => (DEFAULT_LABEL.to_string(), raw.to_string()),
        };

        out.push(TaggedLine::expected(label, content));
    }

    out
}

/// Parse reference lines in unstructured mode: whole paragraphs, no colon
/// splitting (paragraph prose may legitimately contain colons).
pub fn paragraphs(lines: &[String]) -> Vec<TaggedLine> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| TaggedLine::expected(DEFAULT_LABEL, l))
        .collect()
}

/// Parse labeled page text from the labeling service.
///
/// Every `[LABEL]` token starts a new tagged line whose content runs to the
/// next token or end of line. Text with no recognizable token is tolerated
/// as a label-less `PARAGRAPH` line.
pub fn parse_labeled_page(text: &str) -> Vec<TaggedLine> {
    let re = label_token();
    let mut out = Vec::new();

    for line in text.lines() {
        let matches: Vec<_> = re.find_iter(line).collect();

        if matches.is_empty() {
            let content = line.trim();
            if !content.is_empty() {
                out.push(TaggedLine::actual(DEFAULT_LABEL, content));
            }
            continue;
        }

        // Anything before the first token is label-less content.
        let head = line[..matches[0].start()].trim();
        if !head.is_empty() {
            out.push(TaggedLine::actual(DEFAULT_LABEL, head));
        }

        for (i, m) in matches.iter().enumerate() {
            let end = matches.get(i + 1).map(|n| n.start()).unwrap_or(line.len());
            let label = &line[m.start() + 1..m.end() - 1];
            let content = line[m.end()..end].trim();
            out.push(TaggedLine::actual(label, content));
        }
    }

    out
}

/// Remove every `[LABEL]` token, leaving only page wording. Used by the
/// classifier's label-independent secondary search.
pub fn strip_labels(text: &str) -> String {
    label_token().replace_all(text, " ").into_owned()
}
