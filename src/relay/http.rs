use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;

use super::{RelayError, RelayOutcome, SubmissionRelay};
use crate::config::Config;
use crate::submission::Submission;

/// Forwards submissions as a JSON object to a fixed collection URL.
pub struct HttpRelay {
    client: reqwest::Client,
    url: Url,
}

impl HttpRelay {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::from(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, url })
    }

    pub fn from_config(config: &Config) -> Result<Self, RelayError> {
        Self::new(config.relay_url.clone(), config.relay_timeout)
    }
}

#[async_trait]
impl SubmissionRelay for HttpRelay {
    fn target(&self) -> &str {
        self.url.as_str()
    }

    async fn forward(&self, submission: &Submission) -> Result<RelayOutcome, RelayError> {
        let resp = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(submission)
            .send()
            .await
            .map_err(|e| RelayError::from(format!("Relay request failed: {e}")))?;

        let outcome = RelayOutcome::from_status_code(resp.status().as_u16());

        // Drain the body so the connection can be reused; only kept for logs
        let resp_body = resp
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(1024)
            .collect::<String>();

        if !outcome.is_accepted() {
            tracing::debug!(
                status = outcome.status_code,
                body = %resp_body,
                "Relay target response"
            );
        }

        Ok(outcome)
    }
}
