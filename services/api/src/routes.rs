use crate::infra::{AppState, RequestDraft};
use crate::proxy;
use accion_personal::error::AppError;
use accion_personal::submission::{SubmissionOutcome, SubmissionPayload};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::json;
use tracing::info;

pub(crate) fn api_router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/supervisors", get(supervisors_endpoint))
        .route("/api/requests", post(submit_request_endpoint))
        .route("/api/directory/*path", get(proxy::relay_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// The filtered supervisor roster for the approver selector. Fail-soft: on
/// upstream trouble this still answers 200 with the sentinel entry.
pub(crate) async fn supervisors_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    Json(state.directory.fetch_supervisors().await)
}

/// Validate a submitted form snapshot and forward it to the automation
/// webhook.
pub(crate) async fn submit_request_endpoint(
    Extension(state): Extension<AppState>,
    Json(draft): Json<RequestDraft>,
) -> Response {
    // The boss email is derived from the roster, never trusted from the
    // client.
    let roster = state.directory.fetch_supervisors().await;

    let form = match draft.into_form(&roster) {
        Ok(form) => form,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    };

    if let Err(not_ready) = form.readiness() {
        return AppError::Form(not_ready).into_response();
    }

    info!(reason = form.reason().map(|r| r.label()).unwrap_or(""), "forwarding personnel request");
    let payload = SubmissionPayload::from_form(&form, Utc::now());
    outcome_response(state.webhook.submit(&payload).await)
}

pub(crate) fn outcome_response(outcome: SubmissionOutcome) -> Response {
    match outcome {
        SubmissionOutcome::Success => {
            (StatusCode::OK, Json(json!({ "status": "accepted" }))).into_response()
        }
        SubmissionOutcome::Rejected(message) => (
            StatusCode::OK,
            Json(json!({ "status": "rejected", "message": message })),
        )
            .into_response(),
        SubmissionOutcome::TransportError(message) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": message })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[test]
    fn success_and_rejection_both_answer_200() {
        assert_eq!(
            outcome_response(SubmissionOutcome::Success).status(),
            StatusCode::OK
        );
        assert_eq!(
            outcome_response(SubmissionOutcome::Rejected("Correo no existe".to_string())).status(),
            StatusCode::OK
        );
    }

    #[test]
    fn transport_failure_answers_bad_gateway() {
        let response =
            outcome_response(SubmissionOutcome::TransportError("timeout".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
