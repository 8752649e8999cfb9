mod cli;
mod infra;
mod proxy;
mod routes;
mod server;

use accion_personal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
