use super::bulk::{
    handle_delete_command, handle_download_command, handle_peers_command, handle_supports_command,
};
use super::pages::{
    handle_comments_command, handle_list_command, handle_seeding_ratio_command,
    handle_settings_command,
};
use super::*;

pub(super) fn handle_command(
    command: Commands,
    settings: Settings,
    config_path: Option<PathBuf>,
) -> Result<bool> {
    match command {
        Commands::Download { command } => handle_download_command(&settings, command),
        Commands::List { command } => handle_list_command(&settings, command),
        Commands::Delete { command } => handle_delete_command(&settings, command),
        Commands::Peers { command } => handle_peers_command(&settings, command),
        Commands::Supports { command } => handle_supports_command(&settings, command),
        Commands::SeedingRatio(args) => handle_seeding_ratio_command(&settings, args.log),
        Commands::Comments(args) => {
            handle_comments_command(&settings, &args.claim, args.page, args.page_size)
        }
        Commands::Settings { command } => {
            handle_settings_command(&settings, config_path.as_deref(), command)
        }
    }
}
