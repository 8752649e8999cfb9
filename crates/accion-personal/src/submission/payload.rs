use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::form::{Attachment, RequestForm, RequestReason};

/// Fixed day-of-month convention for the vacation bonus payment.
pub const PAYMENT_DAY_OF_MONTH: &str = "30";

/// Wire snapshot of a request form, serialized in the webhook's camelCase
/// field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub email: String,
    pub country: String,
    pub immediate_boss: String,
    pub boss_email: String,
    pub reason: String,
    pub vacation_type: String,
    pub comments: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    pub incapacity_days: String,
    pub payment_date: String,
    pub submitted_at: String,
    pub attachment_name: Option<String>,
    pub attachment_data: Option<String>,
}

impl SubmissionPayload {
    /// Snapshot the form for submission.
    ///
    /// When the request is a vacation whose sub-type includes the bonus
    /// payment, `paymentDate` is forced to the fixed day-of-month convention
    /// regardless of any stored value.
    pub fn from_form(form: &RequestForm, now: DateTime<Utc>) -> Self {
        let payment_date = match (form.reason(), form.vacation_type()) {
            (Some(RequestReason::Vacation), Some(kind)) if kind.includes_payment() => {
                PAYMENT_DAY_OF_MONTH.to_string()
            }
            _ => form.payment_date().to_string(),
        };

        Self {
            email: form.email().to_string(),
            country: form.country().to_string(),
            immediate_boss: form.immediate_boss().to_string(),
            boss_email: form.boss_email().to_string(),
            reason: form.reason().map(|r| r.label().to_string()).unwrap_or_default(),
            vacation_type: form
                .vacation_type()
                .map(|kind| kind.wire_value().to_string())
                .unwrap_or_default(),
            comments: form.comments().to_string(),
            start_date: form
                .start_date()
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            end_date: form
                .end_date()
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            start_time: form
                .start_time()
                .map(|time| time.format("%H:%M").to_string())
                .unwrap_or_default(),
            end_time: form
                .end_time()
                .map(|time| time.format("%H:%M").to_string())
                .unwrap_or_default(),
            incapacity_days: form.incapacity_days().to_string(),
            payment_date,
            submitted_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            attachment_name: form.attachment().map(|file| file.name.clone()),
            attachment_data: form.attachment().map(encode_attachment),
        }
    }
}

/// Embeddable text representation of an attachment: a base64 data URL with
/// the media type guessed from the file name.
pub fn encode_attachment(attachment: &Attachment) -> String {
    let mime = mime_guess::from_path(&attachment.name).first_or_octet_stream();
    format!("data:{};base64,{}", mime, STANDARD.encode(&attachment.bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Supervisor;
    use crate::form::{RequestReason, VacationType};
    use chrono::{NaiveDate, TimeZone};

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 15, 30, 0).unwrap()
    }

    fn vacation_form(kind: VacationType) -> RequestForm {
        let roster = vec![Supervisor {
            display_name: "Mario Cruz - Director Regional".to_string(),
            email: "mario.cruz@red.com.sv".to_string(),
        }];
        let mut form = RequestForm::new();
        form.set_email("empleado@red.com.sv");
        form.set_immediate_boss("Mario Cruz - Director Regional", &roster);
        form.set_reason(Some(RequestReason::Vacation));
        form.set_vacation_type(Some(kind));
        form.set_comments("Vacaciones de junio");
        form
    }

    #[test]
    fn payment_date_is_forced_for_bonus_payment_requests() {
        let mut form = vacation_form(VacationType::PaymentOnly);
        form.set_payment_date("2024-06-15");

        let payload = SubmissionPayload::from_form(&form, stamp());
        assert_eq!(payload.payment_date, "30");
    }

    #[test]
    fn payment_date_is_kept_for_days_only_requests() {
        let mut form = vacation_form(VacationType::DaysOnly);
        form.set_start_date(NaiveDate::from_ymd_opt(2024, 6, 3));
        form.set_end_date(NaiveDate::from_ymd_opt(2024, 6, 7));
        form.set_payment_date("irrelevante");

        let payload = SubmissionPayload::from_form(&form, stamp());
        assert_eq!(payload.payment_date, "irrelevante");
        assert_eq!(payload.start_date, "2024-06-03");
        assert_eq!(payload.end_date, "2024-06-07");
    }

    #[test]
    fn snapshot_carries_labels_and_timestamp() {
        let payload = SubmissionPayload::from_form(&vacation_form(VacationType::Both), stamp());
        assert_eq!(payload.reason, "Vacaciones");
        assert_eq!(payload.vacation_type, "ambos");
        assert_eq!(payload.boss_email, "mario.cruz@red.com.sv");
        assert_eq!(payload.submitted_at, "2024-06-01T15:30:00.000Z");
        assert_eq!(payload.attachment_name, None);
        assert_eq!(payload.attachment_data, None);
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let payload = SubmissionPayload::from_form(&vacation_form(VacationType::Both), stamp());
        let value = serde_json::to_value(&payload).expect("payload serializes");
        let object = value.as_object().expect("payload is an object");
        for key in [
            "immediateBoss",
            "bossEmail",
            "vacationType",
            "startDate",
            "endDate",
            "startTime",
            "endTime",
            "incapacityDays",
            "paymentDate",
            "submittedAt",
            "attachmentName",
            "attachmentData",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn attachment_becomes_a_data_url() {
        let mut form = vacation_form(VacationType::Both);
        form.set_attachment(Some(Attachment::new("constancia.pdf", b"hello".to_vec())));

        let payload = SubmissionPayload::from_form(&form, stamp());
        assert_eq!(payload.attachment_name.as_deref(), Some("constancia.pdf"));
        assert_eq!(
            payload.attachment_data.as_deref(),
            Some("data:application/pdf;base64,aGVsbG8=")
        );
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let encoded = encode_attachment(&Attachment::new("evidencia.bin2", vec![0, 1]));
        assert!(encoded.starts_with("data:application/octet-stream;base64,"));
    }
}
