use lbry_bulk::actions;
use lbry_bulk::peers::SummaryStyle;

use super::gateway::with_gateway;
use super::*;
use crate::cli_commands::bulk::DownloadArgs;
use crate::cli_runtime::read_input;

fn style(paragraph: bool) -> SummaryStyle {
    if paragraph {
        SummaryStyle::Paragraph
    } else {
        SummaryStyle::Lines
    }
}

/// Command-line download flags layered over the settings file.
fn download_settings(settings: &Settings, args: &DownloadArgs) -> Settings {
    let mut s = settings.clone();
    if args.ddir.is_some() {
        s.download_dir = args.ddir.clone();
    }
    s.own_dir &= !args.no_own_dir;
    s.save_file &= !args.blobs_only;
    s.repost &= !args.no_repost;
    s
}

pub(super) fn handle_download_command(settings: &Settings, command: DownloadCommands) -> Result<bool> {
    match command {
        DownloadCommands::Channels(args) => {
            let text = read_input(args.input.input.as_deref())?;
            let settings = download_settings(settings, &args);
            with_gateway(&settings, |gw, out| {
                actions::download_channels(gw, &settings, &text, out)
            })
        }
        DownloadCommands::Claims(args) => {
            let text = read_input(args.input.input.as_deref())?;
            let settings = download_settings(settings, &args);
            with_gateway(&settings, |gw, out| {
                actions::download_claims(gw, &settings, &text, out)
            })
        }
    }
}

pub(super) fn handle_delete_command(settings: &Settings, command: DeleteCommands) -> Result<bool> {
    match command {
        DeleteCommands::Claims(args) => {
            let text = read_input(args.input.input.as_deref())?;
            with_gateway(settings, |gw, out| {
                actions::delete_claims(gw, settings, &text, args.what, out)
            })
        }
        DeleteCommands::Channels(args) => {
            let text = read_input(args.input.input.as_deref())?;
            with_gateway(settings, |gw, out| {
                actions::cleanup_channels(gw, settings, &text, args.what, out)
            })
        }
    }
}

pub(super) fn handle_peers_command(settings: &Settings, command: PeersCommands) -> Result<bool> {
    match command {
        PeersCommands::Channels(args) => {
            let text = read_input(args.input.input.as_deref())?;
            with_gateway(settings, |gw, out| {
                actions::channel_peers(gw, settings, &text, style(args.paragraph), out)
            })
        }
        PeersCommands::Claims(args) => {
            let text = read_input(args.input.input.as_deref())?;
            with_gateway(settings, |gw, out| {
                actions::claim_peers(gw, settings, &text, out)
            })
        }
        PeersCommands::Subs(args) => with_gateway(settings, |gw, out| {
            actions::subscription_peers(
                gw,
                settings,
                args.side,
                args.validate,
                args.number,
                style(args.paragraph),
                out,
            )
        }),
    }
}

pub(super) fn handle_supports_command(settings: &Settings, command: SupportsCommands) -> Result<bool> {
    match command {
        SupportsCommands::Update(args) => {
            let text = read_input(args.input.input.as_deref())?;
            with_gateway(settings, |gw, out| {
                actions::update_supports(gw, settings, &text, args.strategy, args.invalid, out)
            })
        }
    }
}
