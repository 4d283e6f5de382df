//! Live page fetching.

use std::thread;
use std::time::Duration;

use crate::error::AcquireError;
use crate::html::visible_text;

const MAX_RETRIES: u32 = 3;
const USER_AGENT: &str = concat!("copycheck/", env!("CARGO_PKG_VERSION"));

/// HTTP client for page retrieval with retry, backoff, and status
/// classification. Auth and other 4xx fail immediately; 429 and 5xx retry
/// with exponential backoff.
pub struct PageClient {
    http: reqwest::blocking::Client,
    max_retries: u32,
}

impl PageClient {
    pub fn new(timeout_secs: u64) -> Result<Self, AcquireError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AcquireError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, max_retries: MAX_RETRIES })
    }

    #[cfg(test)]
    fn without_retries(timeout_secs: u64) -> Self {
        let mut client = Self::new(timeout_secs).unwrap();
        client.max_retries = 0;
        client
    }

    /// Fetch a URL and return the raw response body.
    pub fn fetch_raw(&self, url: &str) -> Result<String, AcquireError> {
        let mut backoff_secs = 1u64;

        for attempt in 0..=self.max_retries {
            let result = self.http.get(url).send();

            match result {
                Ok(resp) => {
                    let status = resp.status().as_u16();

                    if status >= 400 && status < 500 && status != 429 {
                        return Err(AcquireError::Fetch(format!(
                            "GET {url} returned HTTP {status}"
                        )));
                    }

                    if status == 429 || status >= 500 {
                        if attempt == self.max_retries {
                            return Err(AcquireError::Fetch(format!(
                                "GET {url} failed with HTTP {status} after {} attempts",
                                self.max_retries + 1
                            )));
                        }
                        eprintln!(
                            "warning: retry {}/{} in {}s (HTTP {})",
                            attempt + 1,
                            self.max_retries,
                            backoff_secs,
                            status,
                        );
                        thread::sleep(Duration::from_secs(backoff_secs));
                        backoff_secs *= 2;
                        continue;
                    }

                    return resp
                        .text()
                        .map_err(|e| AcquireError::Fetch(format!("failed to read body: {e}")));
                }
                Err(e) => {
                    if attempt == self.max_retries {
                        return Err(AcquireError::Fetch(format!(
                            "GET {url} failed after {} attempts: {e}",
                            self.max_retries + 1
                        )));
                    }
                    eprintln!(
                        "warning: retry {}/{} in {}s ({})",
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

    /// Fetch a page and reduce it to the text a reader would see.
    pub fn fetch_page(&self, url: &str) -> Result<String, AcquireError> {
        let html = self.fetch_raw(url)?;
        Ok(visible_text(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn fetch_page_strips_markup() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/landing");
            then.status(200)
                .body("<html><head><title>t</title></head><body><h1>Welcome</h1></body></html>");
        });

        let client = PageClient::without_retries(5);
        let text = client.fetch_page(&server.url("/landing")).unwrap();
        assert_eq!(text, "Welcome");
    }

    #[test]
    fn non_2xx_is_a_fetch_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404).body("not found");
        });

        let client = PageClient::without_retries(5);
        let err = client.fetch_page(&server.url("/gone")).unwrap_err();
        assert!(matches!(err, AcquireError::Fetch(_)));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn server_errors_exhaust_retries() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/flaky");
            then.status(503);
        });

        let client = PageClient::without_retries(5);
        let err = client.fetch_raw(&server.url("/flaky")).unwrap_err();
        assert!(err.to_string().contains("503"));
        mock.assert_hits(1);
    }

    #[test]
    fn connection_refused_is_a_fetch_error() {
        let client = PageClient::without_retries(1);
        let err = client.fetch_raw("http://127.0.0.1:9/none").unwrap_err();
        assert!(matches!(err, AcquireError::Fetch(_)));
    }
}
