//! One function per operator page: raw text in, report out.
//!
//! Every action first checks the daemon is up. `Ok(false)` means it was not
//! reachable and nothing else was attempted; per-item failures are part of
//! the report and still yield `Ok(true)`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::bulk::{self, server_ready};
use crate::comments::{self, CommentsClient};
use crate::config::Settings;
use crate::gateway::{DeleteWhat, DownloadOptions, Gateway, Transport};
use crate::listing::{self, ListOptions};
use crate::model::{InputEntry, SubscriptionSide};
use crate::parse::{ParseOptions, validate_input};
use crate::peers::{self, SummaryStyle};
use crate::resolver;
use crate::subscriptions::{self, Show, SnapshotOptions};
use crate::support_plan::{self, Strategy};
use crate::transcript::Transcript;

fn channel_entries(settings: &Settings, text: &str, out: &mut Transcript) -> Vec<InputEntry> {
    out.heading("Input");
    let entries = validate_input(text, &ParseOptions::channels(settings.separator), out);
    out.blank();
    entries
}

fn claim_entries(settings: &Settings, text: &str, out: &mut Transcript) -> Vec<InputEntry> {
    out.heading("Input");
    let entries = validate_input(text, &ParseOptions::claims(settings.separator), out);
    out.blank();
    entries
}

fn download_options<T: Transport>(gw: &Gateway<T>, settings: &Settings, out: &mut Transcript) -> DownloadOptions {
    let (ddir, _) = resolver::resolve_download_dir(gw, settings.download_dir.as_deref(), out);
    DownloadOptions {
        ddir,
        own_dir: settings.own_dir,
        save_file: settings.save_file,
        repost: settings.repost,
    }
}

pub fn download_channels<T: Transport>(
    gw: &Gateway<T>,
    settings: &Settings,
    text: &str,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    let entries = channel_entries(settings, text, out);
    out.heading("Resolve channels");
    let channels = resolver::resolve_channels(gw, &entries, true, out);
    out.blank();
    let opts = download_options(gw, settings, out);
    bulk::download_channels(gw, &channels, &opts, out);
    Ok(true)
}

pub fn download_claims<T: Transport>(
    gw: &Gateway<T>,
    settings: &Settings,
    text: &str,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    let entries = claim_entries(settings, text, out);
    out.heading("Resolve claims");
    let claims = resolver::resolve_claims(gw, &entries, false, out);
    out.blank();
    let opts = download_options(gw, settings, out);
    bulk::download_claims(gw, &claims, &opts, out);
    Ok(true)
}

pub fn delete_claims<T: Transport>(
    gw: &Gateway<T>,
    settings: &Settings,
    text: &str,
    what: DeleteWhat,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    let entries = claim_entries(settings, text, out);
    out.heading("Resolve claims");
    let claims = resolver::resolve_claims(gw, &entries, false, out);
    out.blank();
    bulk::delete_claims(gw, &claims, what, out);
    Ok(true)
}

/// Keeps the newest `number` local claims per channel; zero removes all.
pub fn cleanup_channels<T: Transport>(
    gw: &Gateway<T>,
    settings: &Settings,
    text: &str,
    what: DeleteWhat,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    let entries = channel_entries(settings, text, out);
    out.heading("Resolve channels");
    let channels = resolver::resolve_channels(gw, &entries, true, out);
    out.blank();
    bulk::cleanup_channels(gw, &channels, what, out);
    Ok(true)
}

pub fn channel_peers<T: Transport>(
    gw: &Gateway<T>,
    settings: &Settings,
    text: &str,
    style: SummaryStyle,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    let entries = channel_entries(settings, text, out);
    out.heading("Resolve channels");
    let channels = resolver::resolve_channels(gw, &entries, true, out);
    out.blank();
    if channels.iter().all(|c| c.channel().is_none()) {
        out.line(peers::INVALID_CHANNEL);
        return Ok(true);
    }
    let report = peers::scan_channels(gw, &channels, settings.ch_threads, settings.claim_threads);
    peers::print_batch(&report, &sep(settings), style, out);
    Ok(true)
}

pub fn claim_peers<T: Transport>(
    gw: &Gateway<T>,
    settings: &Settings,
    text: &str,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    let entries = claim_entries(settings, text, out);
    out.heading("Resolve claims");
    let claims = resolver::resolve_claims(gw, &entries, settings.repost, out);
    out.blank();
    let (reports, aggregates) = peers::scan_claims(gw, &claims, settings.claim_threads);
    peers::print_claims(&reports, &aggregates, &sep(settings), out);
    Ok(true)
}

pub fn subscription_peers<T: Transport>(
    gw: &Gateway<T>,
    settings: &Settings,
    side: SubscriptionSide,
    validate: bool,
    number: u32,
    style: SummaryStyle,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    let report = peers::scan_subscriptions(
        gw,
        side,
        validate,
        number,
        settings.ch_threads,
        settings.claim_threads,
    )
    .context("scan subscribed channels")?;
    peers::print_batch(&report, &sep(settings), style, out);
    Ok(true)
}

fn snapshot_options(settings: &Settings, side: SubscriptionSide, show: Show, claim_id: bool) -> SnapshotOptions {
    SnapshotOptions {
        side,
        show,
        threads: settings.threads,
        claim_id,
        separator: sep(settings),
    }
}

pub fn list_subscriptions<T: Transport>(
    gw: &Gateway<T>,
    settings: &Settings,
    side: SubscriptionSide,
    show: Show,
    claim_id: bool,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    let opts = snapshot_options(settings, side, show, claim_id);
    Ok(subscriptions::list_ch_subs(gw, &opts, out))
}

pub fn list_latest<T: Transport>(
    gw: &Gateway<T>,
    settings: &Settings,
    side: SubscriptionSide,
    show: Show,
    number: i64,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    let opts = snapshot_options(settings, side, show, false);
    Ok(subscriptions::list_ch_subs_latest(gw, &opts, number, out))
}

/// Support update over claims that resolve, or, with `invalid`, over our
/// supports on claims that no longer resolve.
pub fn update_supports<T: Transport>(
    gw: &Gateway<T>,
    settings: &Settings,
    text: &str,
    strategy: Strategy,
    invalid: bool,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    let entries = claim_entries(settings, text, out);
    if invalid {
        support_plan::update_invalid_supports(gw, &entries, strategy, out)
            .context("list supports on invalid claims")?;
    } else {
        out.heading("Resolve claims");
        let targets = resolver::resolve_claims_with_support(gw, &entries, out);
        out.blank();
        support_plan::update_supports(gw, &targets, strategy, out);
    }
    Ok(true)
}

/// Read-only listings that need nothing but the daemon.
#[derive(Clone, Debug)]
pub enum Listing {
    Claims,
    Sizes,
    Channels,
    Supports,
    Bids,
    Trending { page: u32, page_size: u32 },
    Search { text: String, page: u32, page_size: u32 },
    ChannelClaims { channel: String, number: Option<u32> },
}

pub fn list<T: Transport>(
    gw: &Gateway<T>,
    listing: &Listing,
    opts: &ListOptions,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    match listing {
        Listing::Claims => listing::list_claims(gw, opts, out).map(drop),
        Listing::Sizes => listing::sort_items_size(gw, opts, out).map(drop),
        Listing::Channels => listing::list_channels(gw, opts, out).map(drop),
        Listing::Supports => listing::list_supports(gw, opts, out).map(drop),
        Listing::Bids => listing::claims_bids(gw, opts, out).map(drop),
        Listing::Trending { page, page_size } => {
            listing::list_trending(gw, *page, *page_size, &[], opts, out).map(drop)
        }
        Listing::Search { text, page, page_size } => {
            listing::list_search(gw, text, *page, *page_size, opts, out).map(drop)
        }
        Listing::ChannelClaims { channel, number } => {
            listing::list_channel_claims(gw, channel, *number, opts, out).map(drop)
        }
    }
    .context("list")?;
    Ok(true)
}

pub fn seeding_ratio<T: Transport>(
    gw: &Gateway<T>,
    log: &Path,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    listing::print_blobs_ratio(gw, log, out)?;
    Ok(true)
}

/// Resolves `claim` with the daemon, then lists its comments.
pub fn claim_comments<T: Transport>(
    gw: &Gateway<T>,
    client: &CommentsClient,
    claim: &str,
    page: u32,
    page_size: u32,
    out: &mut Transcript,
) -> Result<bool> {
    if !server_ready(gw, out) {
        return Ok(false);
    }
    let claims = resolver::resolve_claims(gw, &[InputEntry::bare(claim)], false, out);
    let Some(resolved) = claims.first().and_then(|c| c.claim()) else {
        return Ok(true);
    };
    let (items, total) = client
        .list(&resolved.claim_id, page, page_size)
        .with_context(|| format!("comments of {}", resolved.claim_id))?;
    comments::print_comments(&resolved.canonical_url, &items, total, out);
    Ok(true)
}

fn sep(settings: &Settings) -> String {
    settings.separator.to_string()
}
