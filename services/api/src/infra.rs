use accion_personal::directory::{DirectoryClient, Supervisor};
use accion_personal::form::{Attachment, RequestForm, RequestReason, VacationType};
use accion_personal::submission::WebhookClient;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{NaiveDate, NaiveTime};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) directory: Arc<DirectoryClient>,
    pub(crate) webhook: Arc<WebhookClient>,
}

/// Raw form snapshot as submitted by the browser. Everything arrives as
/// strings; the conversion into [`RequestForm`] replays the field setters so
/// the derivation rules run server-side too.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestDraft {
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) immediate_boss: String,
    #[serde(default)]
    pub(crate) reason: String,
    #[serde(default)]
    pub(crate) vacation_type: String,
    #[serde(default)]
    pub(crate) comments: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub(crate) start_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub(crate) end_time: Option<NaiveTime>,
    #[serde(default)]
    pub(crate) payment_date: String,
    #[serde(default)]
    pub(crate) attachment_name: Option<String>,
    /// Base64 of the raw file bytes, paired with `attachment_name`.
    #[serde(default)]
    pub(crate) attachment_content: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum DraftError {
    #[error("unknown request reason '{0}'")]
    UnknownReason(String),
    #[error("unknown vacation type '{0}'")]
    UnknownVacationType(String),
    #[error("attachment name and content must be provided together")]
    AttachmentPair,
    #[error("attachment content is not valid base64: {0}")]
    AttachmentEncoding(#[from] base64::DecodeError),
}

impl RequestDraft {
    pub(crate) fn into_form(self, roster: &[Supervisor]) -> Result<RequestForm, DraftError> {
        let mut form = RequestForm::new();
        form.set_email(&self.email);
        form.set_immediate_boss(&self.immediate_boss, roster);

        let reason = match self.reason.as_str() {
            "" => None,
            label => Some(
                RequestReason::from_label(label)
                    .ok_or_else(|| DraftError::UnknownReason(label.to_string()))?,
            ),
        };
        form.set_reason(reason);

        let vacation_type = match self.vacation_type.as_str() {
            "" => None,
            value => Some(
                VacationType::from_wire(value)
                    .ok_or_else(|| DraftError::UnknownVacationType(value.to_string()))?,
            ),
        };
        form.set_vacation_type(vacation_type);

        form.set_start_date(self.start_date);
        form.set_end_date(self.end_date);
        form.set_start_time(self.start_time);
        form.set_end_time(self.end_time);
        form.set_payment_date(&self.payment_date);
        form.set_comments(&self.comments);

        let attachment = match (self.attachment_name, self.attachment_content) {
            (Some(name), Some(content)) => {
                Some(Attachment::new(name, STANDARD.decode(content.as_bytes())?))
            }
            (None, None) => None,
            _ => return Err(DraftError::AttachmentPair),
        };
        form.set_attachment(attachment);

        Ok(form)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|err| format!("failed to parse '{raw}' as HH:MM ({err})"))
}

// Browsers send cleared fields as empty strings; both absent and blank map
// to None.
pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

pub(crate) fn deserialize_optional_time<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| parse_time(&value).map_err(serde::de::Error::custom))
        .transpose()
}
