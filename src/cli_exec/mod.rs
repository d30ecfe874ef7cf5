use std::path::PathBuf;

use anyhow::{Context, Result};

use lbry_bulk::config::Settings;
use lbry_bulk::gateway::Gateway;
use lbry_bulk::transcript::Transcript;

use crate::{
    Commands, DeleteCommands, DownloadCommands, ListCommands, PeersCommands, SettingsCommands,
    SupportsCommands,
};

mod bulk;
mod dispatch;
mod gateway;
mod pages;

pub(super) fn handle_command(
    command: Commands,
    settings: Settings,
    config_path: Option<PathBuf>,
) -> Result<bool> {
    dispatch::handle_command(command, settings, config_path)
}
