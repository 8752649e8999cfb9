use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::api_router;
use accion_personal::config::AppConfig;
use accion_personal::directory::DirectoryClient;
use accion_personal::error::AppError;
use accion_personal::submission::WebhookClient;
use accion_personal::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        directory: Arc::new(DirectoryClient::new(&config.directory)),
        webhook: Arc::new(WebhookClient::new(&config.webhook)),
    };

    // The browser form may be served from anywhere; the proxy contract opens
    // CORS to any origin and the layer answers OPTIONS preflights with 200.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api_router()
        .layer(Extension(app_state))
        .layer(cors)
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "personnel action service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
