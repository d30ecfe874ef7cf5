//! Snapshot of subscribed channels, optionally filtered by whether each
//! channel still resolves online.

use crate::format;
use crate::gateway::{Gateway, GatewayError, ResolveOutcome, Transport};
use crate::model::{Claim, Precedence, SubscriptionEntry, SubscriptionSide, SubscriptionSource};
use crate::pool::run_bounded;
use crate::transcript::Transcript;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Show {
    /// No validity check.
    All,
    Valid,
    Invalid,
}

impl std::str::FromStr for Show {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "show_all" => Ok(Show::All),
            "valid" | "show_valid" => Ok(Show::Valid),
            "invalid" | "show_invalid" => Ok(Show::Invalid),
            other => Err(format!("expected all, valid or invalid, got {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SnapshotOptions {
    pub side: SubscriptionSide,
    pub show: Show,
    pub threads: usize,
    /// Include the claim ID column.
    pub claim_id: bool,
    pub separator: String,
}

/// Loads subscriptions and, unless `show == All`, checks each online with
/// `threads` workers and keeps the requested side of the split.
pub fn load_subscriptions<T: Transport>(
    gw: &Gateway<T>,
    side: SubscriptionSide,
    show: Show,
    threads: usize,
) -> Result<SubscriptionSource, GatewayError> {
    let mut entries = gw.list_subscriptions(side)?;

    if show != Show::All {
        entries = run_bounded(threads, entries, |_, mut entry: SubscriptionEntry| {
            entry.valid = match gw.resolve(&entry.channel_uri) {
                Ok(ResolveOutcome::Found(_)) => true,
                Ok(ResolveOutcome::Error { .. }) => false,
                Err(err) => {
                    tracing::warn!(channel = %entry.channel_uri, error = %err, "validity check failed");
                    false
                }
            };
            entry
        });
        let keep_valid = show == Show::Valid;
        entries.retain(|e| e.valid == keep_valid);
    }

    Ok(SubscriptionSource {
        which: side,
        entries,
    })
}

fn side_name(side: SubscriptionSide) -> &'static str {
    match side {
        SubscriptionSide::Local => "local",
        SubscriptionSide::Remote => "shared",
        SubscriptionSide::Merged(Precedence::Shared) => "merged, shared first",
        SubscriptionSide::Merged(Precedence::Local) => "merged, local first",
    }
}

/// Channel name and claim ID, possibly a short prefix, of a subscription URI.
fn uri_parts(uri: &str) -> (&str, &str) {
    let bare = uri.trim_start_matches("lbry://");
    bare.split_once(['#', ':']).unwrap_or((bare, ""))
}

fn same_channel(a: &SubscriptionEntry, b: &SubscriptionEntry) -> bool {
    let (name_a, id_a) = uri_parts(&a.channel_uri);
    let (name_b, id_b) = uri_parts(&b.channel_uri);
    name_a == name_b && (id_a.starts_with(id_b) || id_b.starts_with(id_a))
}

/// Every entry of `preferred` in order, then the entries of `other` whose
/// channel is not already listed. A short and a full claim ID of the same
/// channel count as one.
pub fn merge_entries(preferred: Vec<SubscriptionEntry>, other: Vec<SubscriptionEntry>) -> Vec<SubscriptionEntry> {
    let mut merged = preferred;
    for entry in other {
        if !merged.iter().any(|m| same_channel(m, &entry)) {
            merged.push(entry);
        }
    }
    merged
}

fn entry_line(opts: &SnapshotOptions, index: usize, total: usize, e: &SubscriptionEntry) -> String {
    let mut cols = vec![format!("{:4}/{:4}", index + 1, total), e.channel_uri.clone()];
    if opts.claim_id {
        cols.push(e.claim_id.clone());
    }
    cols.push(format!(
        "notifications: {}",
        if e.notifications { "on" } else { "off" }
    ));
    let mut line = format::columns(&opts.separator, &cols);
    if opts.show != Show::All && !e.valid {
        line.push_str("  <-- invalid");
    }
    line
}

/// One line per subscribed channel. Returns false when the list could not
/// be read.
pub fn list_ch_subs<T: Transport>(gw: &Gateway<T>, opts: &SnapshotOptions, out: &mut Transcript) -> bool {
    let source = match load_subscriptions(gw, opts.side, opts.show, opts.threads) {
        Ok(source) => source,
        Err(err) => {
            out.line(format!("Could not read subscriptions: {}", err));
            return false;
        }
    };

    out.heading(&format!("Subscriptions ({})", side_name(source.which)));
    let total = source.entries.len();
    for (i, e) in source.entries.iter().enumerate() {
        out.line(entry_line(opts, i, total, e));
    }
    out.separator();
    out.line(format!("Channels: {}", total));
    true
}

fn claim_row(sep: &str, index: usize, total: usize, c: &Claim) -> String {
    format::columns(
        sep,
        &[
            format!("  {:3}/{:3}", index + 1, total),
            format::timestamp(c.release_time()),
            c.claim_id.clone(),
            format!("{:10}", c.stream_type()),
            c.name.clone(),
        ],
    )
}

/// The newest `number` claims of every subscribed channel, grouped by
/// channel. `number` below one is raised to one.
pub fn list_ch_subs_latest<T: Transport>(
    gw: &Gateway<T>,
    opts: &SnapshotOptions,
    number: i64,
    out: &mut Transcript,
) -> bool {
    let number = if number < 1 {
        out.line("Number of claims set to 1");
        1
    } else {
        number.min(u32::MAX as i64) as u32
    };

    let source = match load_subscriptions(gw, opts.side, opts.show, opts.threads) {
        Ok(source) => source,
        Err(err) => {
            out.line(format!("Could not read subscriptions: {}", err));
            return false;
        }
    };

    let sep = opts.separator.clone();
    let total = source.entries.len();
    let groups = run_bounded(opts.threads, source.entries, |i, e| {
        let mut lines = vec![entry_line(opts, i, total, &e)];
        if opts.show != Show::All && !e.valid {
            return lines;
        }
        match gw.ch_search_n_claims(&e.channel_uri, number, &[]) {
            Ok(claims) => {
                let n = claims.len();
                lines.extend(claims.iter().enumerate().map(|(j, c)| claim_row(&sep, j, n, c)));
                if n == 0 {
                    lines.push("  no claims found".to_string());
                }
            }
            Err(err) => lines.push(format!("  <-- error: {}", err)),
        }
        lines
    });

    out.heading(&format!(
        "Latest {} claims of subscribed channels ({})",
        number,
        side_name(source.which)
    ));
    for (i, lines) in groups.into_iter().enumerate() {
        out.extend(lines);
        if i + 1 < total {
            out.blank();
        }
    }
    out.separator();
    out.line(format!("Channels: {}", total));
    true
}

#[cfg(test)]
#[path = "tests/subscriptions_tests.rs"]
mod tests;
