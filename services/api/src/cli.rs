use crate::server;
use accion_personal::config::AppConfig;
use accion_personal::directory::DirectoryClient;
use accion_personal::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Acción de Personal",
    about = "Run the personnel action self-service backend",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Fetch and print the supervisor roster, for operational checks
    Supervisors,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Supervisors => print_supervisors().await,
    }
}

async fn print_supervisors() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let directory = DirectoryClient::new(&config.directory);
    for supervisor in directory.fetch_supervisors().await {
        println!("{}\t{}", supervisor.display_name, supervisor.email);
    }
    Ok(())
}
