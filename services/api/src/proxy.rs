use crate::infra::AppState;
use accion_personal::directory::RelayOutcome;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;

/// Relay a directory lookup for browser clients, injecting the API key and
/// normalizing upstream failures into structured JSON error bodies. CORS and
/// the OPTIONS preflight are handled by the router's CORS layer.
pub(crate) async fn relay_endpoint(
    Extension(state): Extension<AppState>,
    Path(path): Path<String>,
) -> Response {
    relay_response(state.directory.relay(&path).await)
}

pub(crate) fn relay_response(outcome: RelayOutcome) -> Response {
    match outcome {
        RelayOutcome::Upstream { status, body } => (http_status(status), Json(body)).into_response(),
        RelayOutcome::BackendError { status, message } => (
            http_status(status),
            Json(json!({
                "error": "Error del servidor backend",
                "status": status,
                "message": message,
            })),
        )
            .into_response(),
        RelayOutcome::NotJson {
            content_type,
            preview,
        } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "El servidor no devolvió JSON",
                "contentType": content_type,
                "preview": preview,
            })),
        )
            .into_response(),
        RelayOutcome::ParseFailed { message, preview } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Error al parsear JSON de la respuesta",
                "message": message,
                "preview": preview,
            })),
        )
            .into_response(),
        RelayOutcome::Unreachable { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Error al conectar con el servidor",
                "message": message,
            })),
        )
            .into_response(),
    }
}

fn http_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_body_passes_through_with_its_status() {
        let response = relay_response(RelayOutcome::Upstream {
            status: 200,
            body: json!({ "data": [] }),
        });
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn backend_error_keeps_the_upstream_status() {
        let response = relay_response(RelayOutcome::BackendError {
            status: 401,
            message: "unauthorized".to_string(),
        });
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn non_json_and_unreachable_map_to_500() {
        let response = relay_response(RelayOutcome::NotJson {
            content_type: "text/html".to_string(),
            preview: "<html>".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = relay_response(RelayOutcome::Unreachable {
            message: "connection refused".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_upstream_status_degrades_to_bad_gateway() {
        let response = relay_response(RelayOutcome::Upstream {
            status: 42,
            body: json!(null),
        });
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
