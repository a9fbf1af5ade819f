mod args;
mod config;
mod error;

use std::path::PathBuf;

use clap::Parser;
use kiroku_api::{Credentials, MalClient};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::args::{ApiCommand, Cli, Command, ConfigAction};
use crate::config::AppConfig;
use crate::error::CliError;

fn init_logging() {
    // RUST_LOG overrides the default filter.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,kiroku=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn credentials(
    username: Option<String>,
    password: Option<String>,
    config: &AppConfig,
) -> Result<Credentials, CliError> {
    let username = username
        .or_else(|| config.account.username.clone())
        .ok_or(CliError::Credentials(
            "pass --username or set account.username in the config file",
        ))?;
    let password =
        password.ok_or(CliError::Credentials("pass --password or set MAL_PASSWORD"))?;
    Ok(Credentials::new(username, password))
}

fn run_config(action: ConfigAction, path: Option<PathBuf>) -> Result<(), CliError> {
    let path = path.unwrap_or_else(AppConfig::config_path);
    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Init => {
            if AppConfig::init(&path)? {
                tracing::info!(path = %path.display(), "wrote default config");
            } else {
                tracing::info!(path = %path.display(), "config already exists");
            }
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let command = match cli.command {
        Command::Config { action } => return run_config(action, cli.config_file),
        Command::Api(command) => command,
    };

    let config = match &cli.config_file {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let credentials = credentials(cli.username, cli.password, &config)?;
    let mal = MalClient::with_config(credentials, &config.api)?;

    match command {
        ApiCommand::Verify => print_json(&mal.verify_credentials().await?)?,
        ApiCommand::Search { query } => print_json(&mal.search(&query).await?)?,
        ApiCommand::List => print_json(&mal.anime_list().await?)?,
        ApiCommand::Add { id, payload } => {
            mal.add_entry(id, &payload.into_update()).await?;
            tracing::info!(id, "added");
        }
        ApiCommand::Update { id, payload } => {
            mal.update_entry(id, &payload.into_update()).await?;
            tracing::info!(id, "updated");
        }
        ApiCommand::Delete { id } => {
            mal.delete_entry(id).await?;
            tracing::info!(id, "deleted");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
