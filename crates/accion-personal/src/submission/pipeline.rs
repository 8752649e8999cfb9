use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use super::payload::SubmissionPayload;
use crate::config::WebhookConfig;

/// Rejection text used when the backend gives no message of its own.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Correo Inválido";

/// Terminal result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    /// The webhook accepted the call but rejected the request (bad email,
    /// unknown recipient, ...). Carries the backend message.
    Rejected(String),
    /// The call itself failed; the form is left untouched for retry.
    TransportError(String),
}

impl SubmissionOutcome {
    /// How long the shell holds the success overlay before returning control.
    pub const SUCCESS_OVERLAY: Duration = Duration::from_millis(3200);
    /// How long the shell holds the rejection overlay.
    pub const REJECTION_OVERLAY: Duration = Duration::from_millis(4200);
}

/// Client for the fixed automation webhook. Single attempt, no retry.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    url: String,
    http: reqwest::Client,
}

impl WebhookClient {
    pub fn new(config: &WebhookConfig) -> Self {
        Self {
            url: config.url.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// POST the payload and interpret the response into a terminal outcome.
    pub async fn submit(&self, payload: &SubmissionPayload) -> SubmissionOutcome {
        let response = match self.http.post(&self.url).json(payload).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "webhook unreachable");
                return SubmissionOutcome::TransportError(err.to_string());
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "webhook response body unreadable");
                return SubmissionOutcome::TransportError(err.to_string());
            }
        };

        let outcome = interpret_response(status.is_success(), &body);
        match &outcome {
            SubmissionOutcome::Success => info!(reason = %payload.reason, "request accepted"),
            SubmissionOutcome::Rejected(message) => {
                info!(%message, status = status.as_u16(), "request rejected")
            }
            SubmissionOutcome::TransportError(_) => {}
        }
        outcome
    }
}

/// Map the webhook's HTTP status and body onto a terminal outcome.
///
/// A success status with a JSON body still counts as rejected when the body
/// signals an application error; a success status with a non-JSON (or empty)
/// body counts as plain success.
pub(crate) fn interpret_response(success_status: bool, body: &str) -> SubmissionOutcome {
    if success_status {
        return match serde_json::from_str::<Value>(body) {
            Ok(value) if signals_error(&value) => {
                SubmissionOutcome::Rejected(backend_message(&value))
            }
            _ => SubmissionOutcome::Success,
        };
    }

    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string());
    SubmissionOutcome::Rejected(message)
}

fn backend_message(value: &Value) -> String {
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or(DEFAULT_REJECTION_MESSAGE)
        .to_string()
}

// Error markers: a truthy `error` field, `status == "error"`, or
// `success == false`.
fn signals_error(value: &Value) -> bool {
    value.get("error").map(truthy).unwrap_or(false)
        || value.get("status").and_then(Value::as_str) == Some("error")
        || value.get("success").and_then(Value::as_bool) == Some(false)
}

// Script-style truthiness, since the webhook is free to put anything there.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_success_with_error_body_is_rejected() {
        let outcome =
            interpret_response(true, r#"{"success": false, "message": "Correo no existe"}"#);
        assert_eq!(
            outcome,
            SubmissionOutcome::Rejected("Correo no existe".to_string())
        );
    }

    #[test]
    fn http_success_with_status_error_uses_default_message() {
        let outcome = interpret_response(true, r#"{"status": "error"}"#);
        assert_eq!(
            outcome,
            SubmissionOutcome::Rejected(DEFAULT_REJECTION_MESSAGE.to_string())
        );
    }

    #[test]
    fn truthy_error_field_rejects_even_without_message() {
        let outcome = interpret_response(true, r#"{"error": "boom"}"#);
        assert!(matches!(outcome, SubmissionOutcome::Rejected(_)));
    }

    #[test]
    fn falsy_error_markers_do_not_reject() {
        assert_eq!(
            interpret_response(true, r#"{"error": null}"#),
            SubmissionOutcome::Success
        );
        assert_eq!(
            interpret_response(true, r#"{"error": ""}"#),
            SubmissionOutcome::Success
        );
        assert_eq!(
            interpret_response(true, r#"{"error": 0}"#),
            SubmissionOutcome::Success
        );
        assert_eq!(
            interpret_response(true, r#"{"success": true, "status": "ok"}"#),
            SubmissionOutcome::Success
        );
    }

    #[test]
    fn non_json_success_body_is_success() {
        assert_eq!(interpret_response(true, "Accepted"), SubmissionOutcome::Success);
        assert_eq!(interpret_response(true, ""), SubmissionOutcome::Success);
    }

    #[test]
    fn http_error_uses_backend_message_when_parseable() {
        let outcome = interpret_response(false, r#"{"message": "Usuario desconocido"}"#);
        assert_eq!(
            outcome,
            SubmissionOutcome::Rejected("Usuario desconocido".to_string())
        );
    }

    #[test]
    fn http_error_without_json_falls_back_to_default() {
        let outcome = interpret_response(false, "<html>500</html>");
        assert_eq!(
            outcome,
            SubmissionOutcome::Rejected(DEFAULT_REJECTION_MESSAGE.to_string())
        );
    }
}
