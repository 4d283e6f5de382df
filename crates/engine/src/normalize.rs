//! Text normalization for loose equality and containment checks.
//!
//! The normalized form is a derived key, never persisted or displayed:
//! lowercased, stripped to ASCII alphanumerics, single-spaced. Two pieces of
//! content are "content-equal" iff their normalized forms are equal.

/// Normalize text for searching: lowercase, drop everything outside
/// `[a-z0-9]` and whitespace, collapse whitespace runs, trim.
///
/// Lowercasing happens before the ASCII filter so characters that lowercase
/// into ASCII survive. Non-ASCII letters are removed outright; accented
/// copy will not match its unaccented rendering (known limitation).
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else if c.is_whitespace() {
            pending_space = true;
        }
    }

    out
}
