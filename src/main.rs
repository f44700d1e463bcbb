use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use readme_disclaimer::config::EXAMPLE_CONFIG;
use readme_disclaimer::{Config, ConfigOverrides, GitHubClient, ReadmePatcher};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "readme_disclaimer=info,warn";

/// Insert a disclaimer banner into the README of every repository an account owns
#[derive(Debug, Parser)]
#[command(name = "readme-disclaimer", version, about)]
struct Cli {
    /// Account whose repositories are patched
    #[arg(long, env = "GITHUB_ACCOUNT")]
    account: Option<String>,

    /// Access token with write access to repository contents
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Config file (defaults to ~/.readme-disclaimer/config.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file, truncated on every run
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Compute patches but do not write anything
    #[arg(long)]
    dry_run: bool,

    /// Print an example config file and exit
    #[arg(long)]
    print_example_config: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            token: self.token.clone(),
            account: self.account.clone(),
            log_file: self.log_file.clone(),
            dry_run: self.dry_run,
        }
    }
}

/// Log to the file (no ANSI colors) and to stdout
fn init_logging(log_file: &Path) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(file).with_ansi(false))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_example_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref(), cli.overrides())?;
    init_logging(&config.log_file)?;

    let client = GitHubClient::new(&config).context("Failed to build HTTP client")?;
    tracing::info!(
        account = %client.account(),
        dry_run = config.dry_run,
        "Patching repository READMEs"
    );

    let patcher = ReadmePatcher::new(client).with_dry_run(config.dry_run);
    patcher.run().await;

    Ok(())
}
