use std::fmt;

/// Engine-level failures. The comparison itself is infallible; only
/// configuration loading can error.
#[derive(Debug)]
pub enum EngineError {
    /// TOML could not be parsed.
    ConfigParse(String),
    /// TOML parsed but the values are unusable.
    ConfigValidation(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            EngineError::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
