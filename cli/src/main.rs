mod client;
mod error;
mod navigator;
mod store;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use participant_login::store::{MemoryStore, RecordingNavigator};
use participant_login::{FetchReport, LoginWidget, SelectOption, SelectedIdentity};
use reqwest::Url;
use tracing_subscriber::EnvFilter;

use crate::client::{HttpParticipantClient, parse_base_url};
use crate::error::CliError;
use crate::navigator::UrlNavigator;
use crate::store::FileSelectionStore;

#[derive(Parser, Debug)]
#[command(name = "login-cli", about = "Participant login from the terminal")]
struct Cli {
    #[arg(long, env = "LOGIN_BASE_URL", default_value = "http://127.0.0.1:3000/")]
    base_url: String,

    #[arg(long, env = "LOGIN_STORE_PATH", default_value = ".participant-login.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: Url,
    store_path: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server answers its health endpoint.
    Ping,
    /// List the participants offered for login.
    Participants,
    /// Store a participant as the current identity.
    Login { participant_id: String },
    /// Show the stored identity.
    Whoami,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CliContext { base_url: parse_base_url(&cli.base_url)?, store_path: cli.store };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Participants => {
            for option in list_participants(&ctx).await? {
                println!("{}\t{}", option.value, option.label);
            }
            Ok(())
        }
        Command::Login { participant_id } => {
            let (identity, location) = login(&ctx, &participant_id).await?;
            println!("logged in as {} ({})", identity.participant_name, identity.participant_uuid);
            println!("{location}");
            Ok(())
        }
        Command::Whoami => {
            let identity = whoami(&ctx)?;
            println!("{}\t{}", identity.participant_uuid, identity.participant_name);
            Ok(())
        }
    }
}

fn participant_client(ctx: &CliContext) -> Result<HttpParticipantClient, CliError> {
    let client = HttpParticipantClient::new(&ctx.base_url)?;
    tracing::debug!(url = %client.url(), "participant source");
    Ok(client)
}

async fn run_ping(ctx: &CliContext) -> Result<(), CliError> {
    let url = ctx
        .base_url
        .join("healthz")
        .map_err(|e| CliError::InvalidBaseUrl(e.to_string()))?;
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

/// Listing never writes, so it runs against throwaway collaborators and
/// does not read the store file.
async fn list_participants(ctx: &CliContext) -> Result<Vec<SelectOption>, CliError> {
    let mut widget =
        LoginWidget::new(participant_client(ctx)?, MemoryStore::default(), RecordingNavigator::default());
    if let FetchReport::Failed(error) = widget.initialize().await {
        return Err(error.into());
    }
    Ok(widget.login_box().options().to_vec())
}

/// Load the listing, pick `participant_id`, and run the login click.
/// Returns the stored identity and the resolved worklist location.
async fn login(ctx: &CliContext, participant_id: &str) -> Result<(SelectedIdentity, Url), CliError> {
    let mut widget = LoginWidget::new(
        participant_client(ctx)?,
        FileSelectionStore::open(&ctx.store_path)?,
        UrlNavigator::new(ctx.base_url.clone()),
    );
    if let FetchReport::Failed(error) = widget.initialize().await {
        return Err(error.into());
    }
    if !widget.select_value(participant_id) {
        return Err(CliError::UnknownParticipant(participant_id.to_owned()));
    }

    let identity = widget.on_login_click()?;
    widget.store().save()?;
    tracing::info!(store = %widget.store().path().display(), "identity saved");

    let location = widget
        .navigator()
        .location()
        .cloned()
        .ok_or_else(|| CliError::InvalidBaseUrl(ctx.base_url.to_string()))?;
    Ok((identity, location))
}

fn whoami(ctx: &CliContext) -> Result<SelectedIdentity, CliError> {
    let store = FileSelectionStore::open(&ctx.store_path)?;
    store.identity().ok_or_else(|| CliError::NoIdentity(ctx.store_path.clone()))
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
