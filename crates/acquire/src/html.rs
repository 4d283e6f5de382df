//! Visible-text extraction from raw HTML.
//!
//! Regex-based, tolerant of malformed markup. Chrome blocks the reader never
//! sees (scripts, styles, nav, footers) are removed wholesale; remaining tags
//! become separators and common entities are decoded.

use std::sync::OnceLock;

use regex::Regex;

/// Elements whose entire subtree is invisible or page chrome.
const NOISE_TAGS: &[&str] = &[
    "script", "style", "head", "noscript", "nav", "footer", "header", "aside",
];

fn noise_blocks() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        NOISE_TAGS
            .iter()
            .map(|tag| {
                Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).unwrap()
            })
            .collect()
    })
}

fn comments() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").unwrap())
}

fn block_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<(?:br\s*/?|/p|/div|/li|/tr|/h[1-6]|/section|/article)\s*>").unwrap()
    })
}

fn any_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").unwrap())
}

/// Extract the text a reader would see on the rendered page.
///
/// Block-level closings become line breaks so distinct page elements stay on
/// distinct lines; inline markup collapses to spaces.
pub fn visible_text(html: &str) -> String {
    let mut text = comments().replace_all(html, " ").into_owned();
    for re in noise_blocks() {
        text = re.replace_all(&text, " ").into_owned();
    }
    let text = block_breaks().replace_all(&text, "\n");
    let text = any_tag().replace_all(&text, " ");
    let text = decode_entities(&text);

    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            out.push_str(&collapsed);
            out.push('\n');
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// Decode the entities that actually occur in marketing pages. Unknown
/// entities are left alone rather than guessed at.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_keeps_text() {
        let html = "<html><body><h1>Welcome</h1><p>Our <b>bold</b> promise.</p></body></html>";
        let text = visible_text(html);
        assert!(text.contains("Welcome"));
        assert!(text.contains("Our bold promise."));
        assert!(!text.contains('<'));
    }

    #[test]
    fn removes_script_and_style_bodies() {
        let html = "<p>keep</p><script>var hidden = 1;</script><style>.x{color:red}</style>";
        let text = visible_text(html);
        assert!(text.contains("keep"));
        assert!(!text.contains("hidden"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn removes_chrome_blocks() {
        let html = "<nav><a href=\"/\">Home</a></nav>\
                    <main><p>body copy</p></main>\
                    <footer>© 2026 Example Corp</footer>";
        let text = visible_text(html);
        assert!(text.contains("body copy"));
        assert!(!text.contains("Home"));
        assert!(!text.contains("Example Corp"));
    }

    #[test]
    fn removes_head_and_comments() {
        let html = "<head><title>SEO title</title><meta name=\"x\"></head>\
                    <!-- hidden note --><p>visible</p>";
        let text = visible_text(html);
        assert_eq!(text, "visible");
    }

    #[test]
    fn block_closings_separate_lines() {
        let html = "<h1>Title</h1><p>First.</p><p>Second.</p>";
        let text = visible_text(html);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["Title", "First.", "Second."]);
    }

    #[test]
    fn decodes_common_entities() {
        let html = "<p>Fish &amp; Chips &mdash; &quot;fresh&quot;&nbsp;daily</p>";
        let text = visible_text(html);
        assert!(text.contains("Fish & Chips"));
        assert!(text.contains("\"fresh\" daily"));
        // Unknown entities survive untouched.
        assert!(text.contains("&mdash;"));
    }

    #[test]
    fn case_insensitive_noise_matching() {
        let html = "<SCRIPT>alert(1)</SCRIPT><P>ok</P>";
        let text = visible_text(html);
        assert_eq!(text, "ok");
    }

    #[test]
    fn tolerates_unclosed_tags() {
        let html = "<p>first<p>second";
        let text = visible_text(html);
        assert!(text.contains("first"));
        assert!(text.contains("second"));
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(visible_text(""), "");
        assert_eq!(visible_text("<div></div>"), "");
    }
}
