use std::fmt;

/// Failures while acquiring inputs for a run. The engine itself never sees
/// these; the CLI maps each variant to an exit code.
#[derive(Debug)]
pub enum AcquireError {
    /// Network failure, timeout, or non-2xx while fetching the page.
    Fetch(String),
    /// Reference document unreadable or corrupt.
    Parse(String),
    /// Labeling service rejected our credentials (or none were given).
    LabelAuth(String),
    /// Labeling service failed, or its output was unusable.
    LabelService(String),
    /// Bad caller-supplied input (URL, path, flag values).
    Input(String),
}

impl fmt::Display for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireError::Fetch(msg) => write!(f, "fetch error: {msg}"),
            AcquireError::Parse(msg) => write!(f, "reference document error: {msg}"),
            AcquireError::LabelAuth(msg) => write!(f, "labeling service auth error: {msg}"),
            AcquireError::LabelService(msg) => write!(f, "labeling service error: {msg}"),
            AcquireError::Input(msg) => write!(f, "input error: {msg}"),
        }
    }
}

impl std::error::Error for AcquireError {}
