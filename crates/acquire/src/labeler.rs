//! External AI labeling service.
//!
//! The service takes visible page text and returns the same wording with a
//! `[LABEL]` token prefixed to each structural element. It is generative and
//! non-deterministic, so it lives behind a trait; the engine and the tests
//! only ever see canned labeled text.

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use copycheck_engine::extract::strip_labels;
use copycheck_engine::normalize::normalize;

use crate::error::AcquireError;

const MAX_RETRIES: u32 = 3;

/// Capability of turning plain page text into labeled page text.
pub trait LabelText {
    fn label_text(&self, text: &str) -> Result<String, AcquireError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct LabelRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct LabelResponse {
    labeled_text: String,
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Labeling service client: POST the page text as JSON, bearer auth, retry
/// with backoff on 429/5xx.
pub struct HttpLabeler {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    max_retries: u32,
}

impl HttpLabeler {
    pub fn new(endpoint: &str, api_key: &str, timeout_secs: u64) -> Result<Self, AcquireError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("copycheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AcquireError::LabelService(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            max_retries: MAX_RETRIES,
        })
    }

    #[cfg(test)]
    fn without_retries(endpoint: &str, api_key: &str) -> Self {
        let mut labeler = Self::new(endpoint, api_key, 5).unwrap();
        labeler.max_retries = 0;
        labeler
    }
}

impl LabelText for HttpLabeler {
    fn label_text(&self, text: &str) -> Result<String, AcquireError> {
        let mut backoff_secs = 1u64;

        for attempt in 0..=self.max_retries {
            let result = self
                .http
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&LabelRequest { text })
                .send();

            match result {
                Ok(resp) => {
                    let status = resp.status().as_u16();

                    if status == 401 || status == 403 {
                        return Err(AcquireError::LabelAuth(format!(
                            "labeling service rejected credentials (HTTP {status})"
                        )));
                    }

                    if status >= 400 && status < 500 && status != 429 {
                        return Err(AcquireError::LabelService(format!(
                            "labeling service rejected the request (HTTP {status})"
                        )));
                    }

                    if status == 429 || status >= 500 {
                        if attempt == self.max_retries {
                            return Err(AcquireError::LabelService(format!(
                                "labeling service failed with HTTP {status} after {} attempts",
                                self.max_retries + 1
                            )));
                        }
                        eprintln!(
                            "warning: labeler retry {}/{} in {}s (HTTP {})",
                            attempt + 1,
                            self.max_retries,
                            backoff_secs,
                            status,
                        );
                        thread::sleep(Duration::from_secs(backoff_secs));
                        backoff_secs *= 2;
                        continue;
                    }

                    let body: LabelResponse = resp.json().map_err(|e| {
                        AcquireError::LabelService(format!(
                            "unusable labeling service response: {e}"
                        ))
                    })?;

                    // Wording-preservation contract: the service may only
                    // add labels. Paraphrased output would make the engine
                    // report discrepancies that are not on the page.
                    if !wording_preserved(text, &body.labeled_text) {
                        return Err(AcquireError::LabelService(
                            "labeling service altered the page wording instead of only adding labels"
                                .to_string(),
                        ));
                    }

                    return Ok(body.labeled_text);
                }
                Err(e) => {
                    if attempt == self.max_retries {
                        return Err(AcquireError::LabelService(format!(
                            "labeling service unreachable after {} attempts: {e}",
                            self.max_retries + 1
                        )));
                    }
                    eprintln!(
                        "warning: labeler retry {}/{} in {}s ({})",
                        attempt + 1,
                        self.max_retries,
                        backoff_secs,
                        e,
                    );
                    thread::sleep(Duration::from_secs(backoff_secs));
                    backoff_secs *= 2;
                }
            }
        }

        unreachable!()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the labeling service API key: flag value > environment variable >
/// error.
///
/// An explicitly passed flag wins outright: a blank flag value is an error,
/// not a fallthrough to the environment, so `--api-key ""` cannot silently
/// pick up a stale exported key.
pub fn resolve_api_key(flag: Option<String>, env_var: &str) -> Result<String, AcquireError> {
    if let Some(key) = flag {
        let trimmed = key.trim().to_string();
        if !trimmed.is_empty() {
            return Ok(trimmed);
        }
    } else if let Ok(key) = std::env::var(env_var) {
        let trimmed = key.trim().to_string();
        if !trimmed.is_empty() {
            return Ok(trimmed);
        }
    }

    Err(AcquireError::LabelAuth(format!(
        "missing labeling service API key (use --api-key or set {env_var})"
    )))
}

/// Check that the service only added labels and did not rewrite the wording.
/// Generative services occasionally paraphrase; `HttpLabeler` rejects such
/// output outright.
pub fn wording_preserved(original: &str, labeled: &str) -> bool {
    normalize(&strip_labels(labeled)) == normalize(original)
}
