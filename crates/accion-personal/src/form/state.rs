use chrono::{NaiveDate, NaiveTime};

use super::domain::{country_for_email, Attachment, RequestReason, VacationType};
use super::transitions::{on_reason_change, on_vacation_type_change, ClearedFields};
use crate::directory::Supervisor;

/// Failure reason reported by the submit-readiness predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotReady {
    #[error("required field '{0}' is empty")]
    MissingBaseField(&'static str),
    #[error("vacation requests need a vacation type")]
    MissingVacationType,
    #[error("a start and end date are required")]
    MissingDateRange,
    #[error("a start and end time are required")]
    MissingTimeRange,
    #[error("medical leave needs the computed day count")]
    MissingIncapacityDays,
    #[error("an evidence attachment is required")]
    MissingEvidence,
}

/// Mutable state of one personnel request form.
///
/// All mutation goes through the field setters so the derivation rules hold
/// at every point: `country` tracks `email`, `boss_email` tracks the selected
/// supervisor, and `incapacity_days` tracks the date range of a medical
/// leave. Direct field access is read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestForm {
    email: String,
    country: String,
    immediate_boss: String,
    boss_email: String,
    reason: Option<RequestReason>,
    vacation_type: Option<VacationType>,
    comments: String,
    attachment: Option<Attachment>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    incapacity_days: String,
    payment_date: String,
}

impl RequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn immediate_boss(&self) -> &str {
        &self.immediate_boss
    }

    pub fn boss_email(&self) -> &str {
        &self.boss_email
    }

    pub fn reason(&self) -> Option<RequestReason> {
        self.reason
    }

    pub fn vacation_type(&self) -> Option<VacationType> {
        self.vacation_type
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }

    pub fn incapacity_days(&self) -> &str {
        &self.incapacity_days
    }

    pub fn payment_date(&self) -> &str {
        &self.payment_date
    }

    /// Set the employee email and re-derive the country.
    pub fn set_email(&mut self, value: &str) {
        let trimmed = value.trim();
        self.email = trimmed.to_string();
        self.country = country_for_email(trimmed).to_string();
    }

    /// Select a supervisor by display name and derive their email from the roster.
    pub fn set_immediate_boss(&mut self, name: &str, roster: &[Supervisor]) {
        self.immediate_boss = name.to_string();
        self.boss_email = roster
            .iter()
            .find(|supervisor| supervisor.display_name == name)
            .map(|supervisor| supervisor.email.clone())
            .unwrap_or_default();
    }

    /// Change the request reason, wiping fields per the transition table.
    pub fn set_reason(&mut self, value: Option<RequestReason>) {
        let cleared = on_reason_change(self.reason, value);
        self.reason = value;
        self.apply_cleared(cleared);
    }

    /// Change the vacation sub-type, wiping fields per the transition table.
    pub fn set_vacation_type(&mut self, value: Option<VacationType>) {
        let cleared = on_vacation_type_change(value);
        self.vacation_type = value;
        self.apply_cleared(cleared);
    }

    pub fn set_start_date(&mut self, value: Option<NaiveDate>) {
        self.start_date = value;
        self.recompute_incapacity_days();
    }

    pub fn set_end_date(&mut self, value: Option<NaiveDate>) {
        self.end_date = value;
        self.recompute_incapacity_days();
    }

    pub fn set_start_time(&mut self, value: Option<NaiveTime>) {
        self.start_time = value;
    }

    pub fn set_end_time(&mut self, value: Option<NaiveTime>) {
        self.end_time = value;
    }

    pub fn set_comments(&mut self, value: &str) {
        self.comments = value.to_string();
    }

    pub fn set_payment_date(&mut self, value: &str) {
        self.payment_date = value.to_string();
    }

    pub fn set_attachment(&mut self, value: Option<Attachment>) {
        self.attachment = value;
    }

    /// Restore every field to its initial default. The supervisor roster is
    /// owned elsewhere and is not re-fetched.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn apply_cleared(&mut self, cleared: ClearedFields) {
        if cleared.vacation_type {
            self.vacation_type = None;
        }
        if cleared.start_date {
            self.start_date = None;
        }
        if cleared.end_date {
            self.end_date = None;
        }
        if cleared.payment_date {
            self.payment_date.clear();
        }
    }

    /// Medical leave day count, inclusive of both endpoints. Only updated
    /// once both dates are present; order of the dates does not matter.
    fn recompute_incapacity_days(&mut self) {
        if self.reason != Some(RequestReason::MedicalLeave) {
            return;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            let days = (end - start).num_days().abs() + 1;
            self.incapacity_days = days.to_string();
        }
    }

    pub fn is_ready_to_submit(&self) -> bool {
        self.readiness().is_ok()
    }

    /// Evaluate the submit-readiness rule set, reporting the first rule that
    /// fails.
    pub fn readiness(&self) -> Result<(), NotReady> {
        if self.email.is_empty() {
            return Err(NotReady::MissingBaseField("email"));
        }
        if self.country.is_empty() {
            return Err(NotReady::MissingBaseField("country"));
        }
        if self.immediate_boss.is_empty() {
            return Err(NotReady::MissingBaseField("immediateBoss"));
        }
        let Some(reason) = self.reason else {
            return Err(NotReady::MissingBaseField("reason"));
        };
        if self.comments.trim().is_empty() {
            return Err(NotReady::MissingBaseField("comments"));
        }

        if reason == RequestReason::Vacation {
            let Some(vacation_type) = self.vacation_type else {
                return Err(NotReady::MissingVacationType);
            };
            if vacation_type.includes_days() && !self.has_date_range() {
                return Err(NotReady::MissingDateRange);
            }
        } else if reason.requires_date_range() && !self.has_date_range() {
            return Err(NotReady::MissingDateRange);
        }

        if reason.requires_time_range() && (self.start_time.is_none() || self.end_time.is_none()) {
            return Err(NotReady::MissingTimeRange);
        }
        if reason == RequestReason::MedicalLeave && self.incapacity_days.is_empty() {
            return Err(NotReady::MissingIncapacityDays);
        }
        if reason.requires_evidence() && self.attachment.is_none() {
            return Err(NotReady::MissingEvidence);
        }

        Ok(())
    }

    fn has_date_range(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }
}
