use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub name: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub report: ReportConfig,
}

/// How expected lines are compared against the page.
///
/// Structured mode pairs `LABEL: content` reference lines against the
/// labeling service's `[LABEL]` output and distinguishes structural from
/// content discrepancies. Unstructured mode is a plain containment check of
/// reference paragraphs in the page's visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Structured,
    Unstructured,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Structured
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structured => write!(f, "structured"),
            Self::Unstructured => write!(f, "unstructured"),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Expected-content cells longer than this are truncated with "...".
    #[serde(default = "default_max_content_len")]
    pub max_content_len: usize,
}

fn default_max_content_len() -> usize {
    100
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { max_content_len: default_max_content_len() }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl EngineConfig {
    pub fn from_toml(input: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            toml::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.name.trim().is_empty() {
            return Err(EngineError::ConfigValidation("name must not be empty".into()));
        }
        if self.report.max_content_len == 0 {
            return Err(EngineError::ConfigValidation(
                "report.max_content_len must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Config for ad-hoc runs driven entirely by CLI flags.
    pub fn adhoc(name: impl Into<String>, mode: Mode) -> Self {
        Self { name: name.into(), mode, report: ReportConfig::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let config = EngineConfig::from_toml(r#"name = "Homepage check""#).unwrap();
        assert_eq!(config.name, "Homepage check");
        assert_eq!(config.mode, Mode::Structured);
        assert_eq!(config.report.max_content_len, 100);
    }

    #[test]
    fn parse_full() {
        let input = r#"
name = "Landing page"
mode = "unstructured"

[report]
max_content_len = 60
"#;
        let config = EngineConfig::from_toml(input).unwrap();
        assert_eq!(config.mode, Mode::Unstructured);
        assert_eq!(config.report.max_content_len, 60);
    }

    #[test]
    fn reject_unknown_mode() {
        let err = EngineConfig::from_toml(r#"name = "x"
mode = "strctured""#);
        assert!(err.is_err(), "typo in mode should fail deserialization");
    }

    #[test]
    fn reject_empty_name() {
        let err = EngineConfig::from_toml(r#"name = "  ""#).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn reject_zero_truncation() {
        let input = r#"
name = "x"

[report]
max_content_len = 0
"#;
        let err = EngineConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("max_content_len"));
    }

    #[test]
    fn mode_display_tokens() {
        assert_eq!(Mode::Structured.to_string(), "structured");
        assert_eq!(Mode::Unstructured.to_string(), "unstructured");
    }
}
