use anyhow::{Context, Result};
use clap::Parser;
use issuedeck::api::{ApiClient, IssueApi};
use issuedeck::{cli, config, tui};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "issuedeck")]
#[command(about = "Terminal client for an issue tracker")]
#[command(version)]
struct Args {
    /// Initialize configuration
    #[arg(long)]
    init: bool,

    /// Path to config file
    #[arg(long, short)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<cli::Command>,
}

fn env_filter() -> Result<tracing_subscriber::EnvFilter> {
    Ok(tracing_subscriber::EnvFilter::from_default_env().add_directive("issuedeck=info".parse()?))
}

/// The TUI owns the terminal, so its logs go to a file instead.
fn init_file_logging() -> Result<()> {
    let dir = config::data_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join("issuedeck.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.command.is_some() || args.init {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter()?)
            .with_writer(std::io::stderr)
            .init();
    } else {
        init_file_logging()?;
    }

    if args.init {
        config::init_wizard().await?;
        return Ok(());
    }

    let config = config::load(args.config.as_deref())?;
    let api: Arc<dyn IssueApi> = Arc::new(ApiClient::from_config(&config));

    match args.command {
        Some(command) => {
            let mut stdout = std::io::stdout().lock();
            cli::run(command, api, config.user.id, &mut stdout).await
        }
        None => tui::run(config, api).await,
    }
}
