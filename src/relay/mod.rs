pub mod http;

use async_trait::async_trait;

use crate::submission::Submission;

pub use self::http::HttpRelay;

/// What the external collection service said about one forwarded submission.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayOutcome {
    pub status: RelayStatus,
    pub status_code: u16,
}

impl RelayOutcome {
    pub fn from_status_code(status_code: u16) -> Self {
        let status = if (200..300).contains(&status_code) {
            RelayStatus::Accepted
        } else {
            RelayStatus::Rejected
        };
        Self {
            status,
            status_code,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == RelayStatus::Accepted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayStatus {
    Accepted,
    Rejected,
}

/// The forwarding call never completed: connect, DNS, TLS, timeout.
#[derive(Debug)]
pub struct RelayError {
    pub message: String,
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RelayError {}

impl From<String> for RelayError {
    fn from(s: String) -> Self {
        RelayError { message: s }
    }
}

#[async_trait]
pub trait SubmissionRelay: Send + Sync {
    /// Where submissions go, for logs.
    fn target(&self) -> &str;

    /// Forward one submission. Exactly one outbound attempt, no retries.
    async fn forward(&self, submission: &Submission) -> Result<RelayOutcome, RelayError>;
}
