//! Programmatic side of the form: the HTTP submission client, the post-success
//! cooldown and the per-session orchestration that ties them to validation.

pub mod cooldown;
pub mod notify;
pub mod session;

use std::time::Duration;

use crate::form::{FieldErrors, FormStep};
use crate::submission::envelope::RecordEnvelope;

pub use cooldown::{CooldownGuard, CooldownState, CooldownStatus, CooldownTicker};
pub use notify::{LogNotifier, Notification, Notifier, Severity};
pub use session::FormSession;

/// Outcome of one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success,
    ValidationFailure(FieldErrors),
    TransportFailure(String),
    ServerFailure { status: u16, body: String },
    /// Rejected locally while the cooldown runs. No request was made.
    CooldownRejected { remaining_secs: u64 },
    /// Another submit from the same session is still outstanding.
    Busy,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success)
    }
}

/// Posts envelopes to the submit API. One request per call, never retried.
#[derive(Clone)]
pub struct SubmissionClient {
    http: reqwest::Client,
    base_url: String,
}

impl SubmissionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, String> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build submission client: {e}"))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, step: FormStep) -> String {
        format!("{}{}", self.base_url, step.endpoint())
    }

    pub async fn send(&self, step: FormStep, envelope: &RecordEnvelope) -> SubmissionResult {
        let url = self.endpoint(step);

        let resp = match self.http.post(&url).json(envelope).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!("Error submitting form to {url}: {e}");
                return SubmissionResult::TransportFailure(e.to_string());
            }
        };

        let status = resp.status();
        if status.is_success() {
            return SubmissionResult::Success;
        }

        let body = resp
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(1024)
            .collect::<String>();
        tracing::error!("Server rejected {step} submission with {status}: {body}");

        SubmissionResult::ServerFailure {
            status: status.as_u16(),
            body,
        }
    }
}
