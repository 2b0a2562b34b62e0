mod cli;
mod render;

use std::io::{self, Write};

use clap::Parser;
use services::{Clock, SessionContext, SessionError};
use storage::RemoteConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracker_core::model::ProblemId;

use crate::cli::{Cli, Command};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = RemoteConfig::parse(&cli.api_url)?;
    let token = cli.token.ok_or(SessionError::MissingCredential)?;
    let session = SessionContext::open(config, &token, Clock::default())?;
    let app = session.services();
    debug!(command = ?cli.command, "running");

    let output = match cli.command {
        Command::Topics => {
            let tracker = app.start_tracking().await?;
            let snapshot = tracker.snapshot();
            render::topics(&snapshot.curriculum, &snapshot.completed)
        }
        Command::Progress => {
            let tracker = app.start_tracking().await?;
            render::progress(&tracker.report())
        }
        Command::Toggle { problem_id } => {
            let problem_id: ProblemId = problem_id.parse()?;
            let tracker = app.start_tracking().await?;
            let completed = tracker.toggle(&problem_id).await?;
            render::toggled(&tracker.curriculum(), &problem_id, completed)
        }
        Command::Profile => {
            let profile = app.profiles().fetch_profile().await?;
            render::profile(&profile)
        }
    };

    io::stdout().write_all(output.as_bytes())?;
    session.close();
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
