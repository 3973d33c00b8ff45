use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::form::mapper::map_submission;
use crate::form::{FieldValue, FormStep, FormSubmission, validate, validate_field};
use crate::submission::envelope::RecordEnvelope;

use super::cooldown::{CooldownGuard, CooldownStatus, CooldownTicker};
use super::notify::{Notification, Notifier};
use super::{SubmissionClient, SubmissionResult};

/// One applicant's form session: validation, mapping, submission, feedback and
/// cooldown, with at most one request outstanding at a time.
///
/// Dropping the session cancels a running cooldown countdown.
pub struct FormSession {
    step: FormStep,
    client: SubmissionClient,
    notifier: Arc<dyn Notifier>,
    cooldown: Arc<CooldownGuard>,
    ticker: Mutex<Option<CooldownTicker>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag however the request ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FormSession {
    pub fn new(step: FormStep, client: SubmissionClient, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_cooldown(step, client, notifier, super::cooldown::DEFAULT_WINDOW)
    }

    pub fn with_cooldown(
        step: FormStep,
        client: SubmissionClient,
        notifier: Arc<dyn Notifier>,
        window: Duration,
    ) -> Self {
        Self {
            step,
            client,
            notifier,
            cooldown: Arc::new(CooldownGuard::new(window)),
            ticker: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn cooldown(&self) -> &CooldownGuard {
        &self.cooldown
    }

    /// While true the submit control should stay disabled.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Re-validate a single field as it changes.
    pub fn check_field(&self, name: &str, value: Option<&FieldValue>) -> Result<(), String> {
        match self.step.definition().field(name) {
            Some(field) => validate_field(field, value),
            None => Ok(()),
        }
    }

    pub async fn submit(&self, submission: &FormSubmission) -> SubmissionResult {
        if let Err(errors) = validate(self.step.definition(), submission) {
            tracing::debug!("{} submission has invalid fields: {errors}", self.step);
            return SubmissionResult::ValidationFailure(errors);
        }

        if let Err(remaining_secs) = self.cooldown.check() {
            self.notifier.notify(Notification::cooldown(remaining_secs));
            return SubmissionResult::CooldownRejected { remaining_secs };
        }

        if self.in_flight.swap(true, Ordering::AcqRel) {
            return SubmissionResult::Busy;
        }
        let _in_flight = InFlight(&self.in_flight);

        let mapped = map_submission(self.step, submission);
        let envelope = RecordEnvelope::from_submission(&mapped);

        let result = self.client.send(self.step, &envelope).await;

        match &result {
            SubmissionResult::Success => {
                self.notifier.notify(Notification::success());
                self.start_cooldown();
            }
            _ => self.notifier.notify(Notification::error()),
        }

        result
    }

    fn start_cooldown(&self) {
        if self.cooldown.arm() == CooldownStatus::Idle {
            return;
        }

        let ticker = if tokio::runtime::Handle::try_current().is_ok() {
            Some(CooldownTicker::spawn(self.cooldown.clone()))
        } else {
            tracing::warn!("No async runtime; cooldown will only advance when ticked manually");
            None
        };

        // Replacing the slot drops (and aborts) any previous countdown.
        *self.ticker.lock().unwrap_or_else(|e| e.into_inner()) = ticker;
    }
}
