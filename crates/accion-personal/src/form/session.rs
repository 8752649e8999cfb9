use chrono::{DateTime, Utc};

use super::state::{NotReady, RequestForm};
use crate::directory::Supervisor;
use crate::submission::{SubmissionOutcome, SubmissionPayload, WebhookClient};

/// Error raised when a submission cannot start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error(transparent)]
    NotReady(#[from] NotReady),
}

/// One form session: the mutable form, the roster fetched at mount, and the
/// in-flight flag that keeps submissions from overlapping.
///
/// There is exactly one writer per session, so a plain boolean is enough;
/// no queueing, no cancellation. A failed submission leaves the form intact
/// for retry, a successful one resets it to the defaults.
#[derive(Debug, Default)]
pub struct FormSession {
    form: RequestForm,
    roster: Vec<Supervisor>,
    in_flight: bool,
}

impl FormSession {
    pub fn new(roster: Vec<Supervisor>) -> Self {
        Self {
            form: RequestForm::new(),
            roster,
            in_flight: false,
        }
    }

    pub fn form(&self) -> &RequestForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RequestForm {
        &mut self.form
    }

    pub fn roster(&self) -> &[Supervisor] {
        &self.roster
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Select a supervisor from the session roster by display name.
    pub fn select_supervisor(&mut self, name: &str) {
        self.form.set_immediate_boss(name, &self.roster);
    }

    /// Snapshot the form into a payload and mark the session busy.
    pub fn begin_submission(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<SubmissionPayload, SessionError> {
        if self.in_flight {
            return Err(SessionError::AlreadyInFlight);
        }
        self.form.readiness()?;
        let payload = SubmissionPayload::from_form(&self.form, now);
        self.in_flight = true;
        Ok(payload)
    }

    /// Record the outcome of the in-flight submission. Success acknowledges
    /// the request and resets the form; any failure keeps it editable.
    pub fn finish_submission(&mut self, outcome: &SubmissionOutcome) {
        self.in_flight = false;
        if matches!(outcome, SubmissionOutcome::Success) {
            self.form.reset();
        }
    }

    /// Run one full submission attempt against the webhook.
    pub async fn submit(
        &mut self,
        webhook: &WebhookClient,
    ) -> Result<SubmissionOutcome, SessionError> {
        let payload = self.begin_submission(Utc::now())?;
        let outcome = webhook.submit(&payload).await;
        self.finish_submission(&outcome);
        Ok(outcome)
    }
}
