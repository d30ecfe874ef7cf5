use std::path::Path;

use lbry_bulk::actions::{self, Listing};
use lbry_bulk::comments::CommentsClient;
use lbry_bulk::listing::ListOptions;

use super::gateway::with_gateway;
use super::*;
use crate::cli_commands::pages::ListArgs;

fn list_options(settings: &Settings, args: &ListArgs) -> ListOptions {
    ListOptions {
        separator: settings.separator.to_string(),
        claim_id: args.claim_id,
        title: args.title,
        totals: !args.no_totals,
    }
}

pub(super) fn handle_list_command(settings: &Settings, command: ListCommands) -> Result<bool> {
    let (listing, opts) = match command {
        ListCommands::Subs(args) => {
            return with_gateway(settings, |gw, out| {
                actions::list_subscriptions(gw, settings, args.side, args.show, args.claim_id, out)
            });
        }
        ListCommands::Latest(args) => {
            return with_gateway(settings, |gw, out| {
                actions::list_latest(gw, settings, args.side, args.show, args.number, out)
            });
        }
        ListCommands::Claims(args) => (Listing::Claims, list_options(settings, &args)),
        ListCommands::Sizes(args) => (Listing::Sizes, list_options(settings, &args)),
        ListCommands::Channels(args) => (Listing::Channels, list_options(settings, &args)),
        ListCommands::Supports(args) => (Listing::Supports, list_options(settings, &args)),
        ListCommands::Bids(args) => (Listing::Bids, list_options(settings, &args)),
        ListCommands::Channel(args) => (
            Listing::ChannelClaims {
                channel: args.channel,
                number: args.number,
            },
            list_options(settings, &args.list),
        ),
        ListCommands::Trending(args) => (
            Listing::Trending {
                page: args.page,
                page_size: args.page_size,
            },
            list_options(settings, &args.list),
        ),
        ListCommands::Search(args) => (
            Listing::Search {
                text: args.text,
                page: args.page,
                page_size: args.page_size,
            },
            list_options(settings, &args.list),
        ),
    };
    with_gateway(settings, |gw, out| actions::list(gw, &listing, &opts, out))
}

pub(super) fn handle_seeding_ratio_command(settings: &Settings, log: Option<std::path::PathBuf>) -> Result<bool> {
    let log = log
        .or_else(|| settings.daemon_log.clone())
        .context("no daemon log given (pass --log or set daemon_log in the settings)")?;
    with_gateway(settings, |gw, out| actions::seeding_ratio(gw, &log, out))
}

pub(super) fn handle_comments_command(
    settings: &Settings,
    claim: &str,
    page: u32,
    page_size: u32,
) -> Result<bool> {
    let client = CommentsClient::new(&settings.comments_server, settings.timeout())?;
    with_gateway(settings, |gw, out| {
        actions::claim_comments(gw, &client, claim, page, page_size, out)
    })
}

pub(super) fn handle_settings_command(
    settings: &Settings,
    config_path: Option<&Path>,
    command: SettingsCommands,
) -> Result<bool> {
    match command {
        SettingsCommands::Show => {
            println!(
                "{}",
                serde_json::to_string_pretty(settings).context("serialize settings")?
            );
        }
        SettingsCommands::Save => {
            let path = config_path.context("no settings path (set HOME or pass --config)")?;
            settings.save(path)?;
            println!("Saved settings to {}", path.display());
        }
    }
    Ok(true)
}
