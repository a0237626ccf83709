mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use recpanel_client::{HttpTransport, TransportOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;

use crate::commands::{completions, records, search, tui, Context};
use crate::error::{exit_code_for, report_error};
use recpanel_config as config;

#[derive(Debug, Parser)]
#[command(name = "recpanel", version, about = "recommendations service CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Server root, overriding the config file and RECPANEL_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a recommendation
    Create(records::CreateArgs),
    /// Replace a recommendation's product ids and type
    Update(records::UpdateArgs),
    /// Show one recommendation
    Get(records::IdArgs),
    Delete(records::IdArgs),
    /// Bump a recommendation's interested count
    Interested(records::IdArgs),
    /// List recommendations matching the given filters
    Search(search::SearchArgs),
    /// Open the interactive panel
    Tui,
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        base_url,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Tui => tui::launch(config_path, base_url, verbose),
        Command::Completions(args) => completions::emit(args),
        command => {
            let mut app_config =
                config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }
            if let Some(raw) = base_url {
                app_config.base_url =
                    config::validate_base_url(&raw).with_context(|| "parse --base-url")?;
            }
            debug!(base_url = %app_config.base_url, "server resolved");

            let transport = HttpTransport::new(
                &app_config.base_url,
                TransportOptions {
                    timeout: Duration::from_secs(app_config.timeout_secs),
                    user_agent: app_config.user_agent.clone(),
                },
            )
            .with_context(|| format!("connect to {}", app_config.base_url))?;

            let ctx = Context {
                transport: &transport,
                json,
            };

            match command {
                Command::Create(args) => records::create(&ctx, args),
                Command::Update(args) => records::update(&ctx, args),
                Command::Get(args) => records::get(&ctx, args),
                Command::Delete(args) => records::delete(&ctx, args),
                Command::Interested(args) => records::interested(&ctx, args),
                Command::Search(args) => search::search(&ctx, args),
                Command::Tui => unreachable!("tui command handled before transport setup"),
                Command::Completions(_) => {
                    unreachable!("completions command handled before transport setup")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
