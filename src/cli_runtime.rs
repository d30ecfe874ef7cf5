use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use lbry_bulk::config::{Settings, default_settings_path};

use crate::Commands;

#[derive(Parser)]
#[command(name = "lbry-bulk")]
#[command(about = "Bulk operations against a local lbrynet daemon", long_about = None)]
pub(crate) struct Cli {
    /// Settings file (defaults to ~/.config/lbry-bulk/settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Daemon JSON-RPC endpoint
    #[arg(long, global = true)]
    server: Option<String>,

    /// Field separator for input lines and report columns
    #[arg(long = "sep", global = true)]
    separator: Option<char>,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<bool> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(server) = cli.server {
        settings.server = server;
    }
    if let Some(sep) = cli.separator {
        settings.separator = sep;
    }

    let config_path = cli.config.or_else(default_settings_path);
    crate::cli_exec::handle_command(cli.command, settings, config_path)
}

/// Text of `path`, or of stdin when absent or `-`.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("read {}", p.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read stdin")?;
            Ok(text)
        }
    }
}
