use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod handlers;

use commands::Cli;
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_session::{FileSessionStore, SessionContext};

#[tokio::main]
async fn main() -> ExitCode {
    // Loading Env Vars
    dotenv().ok();

    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env();
    debug!("Using API at {}", config.api_url);

    let store = FileSessionStore::new(&config.session_file);
    debug!("Session file at {}", store.path().display());
    let session = SessionContext::new(Arc::new(store));

    match handlers::run(cli.command, &config, session).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_err) => {
                    app_err.log();
                    eprintln!("Erro: {}", app_err);
                    if app_err.requires_login() {
                        eprintln!("Faça login com `minha-consulta login <usuario>`.");
                    }
                }
                None => eprintln!("Erro: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
