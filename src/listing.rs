//! Read-only report pages: local files, our channels, claims and supports,
//! trending and search results.

use std::collections::BTreeMap;

use crate::format;
use crate::gateway::{FileItem, Gateway, GatewayError, ResolveOutcome, Transport};
use crate::model::{Claim, Lbc, SupportFacts};
use crate::transcript::Transcript;

mod ratio;
pub use self::ratio::{BlobsRatio, count_uploaded_blobs, print_blobs_ratio};

#[derive(Clone, Debug)]
pub struct ListOptions {
    pub separator: String,
    /// Include the claim ID column.
    pub claim_id: bool,
    pub title: bool,
    /// Size and duration totals after the table.
    pub totals: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            separator: ";".to_string(),
            claim_id: false,
            title: false,
            totals: true,
        }
    }
}

/// Table of local files, one line each.
pub fn print_items(items: &[FileItem], opts: &ListOptions, out: &mut Transcript) {
    let width = items.len().to_string().len();
    for (i, item) in items.iter().enumerate() {
        let mut cols = vec![format!("{:width$}/{}", i + 1, items.len(), width = width)];
        cols.push(format::timestamp(item.release_time()));
        if opts.claim_id {
            cols.push(item.claim_id.clone());
        }
        cols.push(format!(
            "{:>3}/{:>3}",
            item.blobs_completed, item.blobs_in_stream
        ));
        cols.push(format::duration_short(item.duration()));
        cols.push(format::mib(item.size()));
        cols.push(item.channel_name.clone().unwrap_or_else(|| "_Unknown_".to_string()));
        cols.push(if opts.title {
            item.title().to_string()
        } else {
            item.claim_name.clone()
        });
        out.line(format::columns(&opts.separator, &cols));
    }
    if opts.totals {
        totals_footer(
            items.len(),
            items.iter().map(FileItem::size).sum(),
            items.iter().map(FileItem::duration).sum(),
            out,
        );
    }
}

/// Table of claims as returned by `claim_search` or `resolve`.
pub fn print_claims(claims: &[Claim], opts: &ListOptions, out: &mut Transcript) {
    let width = claims.len().to_string().len();
    for (i, claim) in claims.iter().enumerate() {
        let target = claim.dereferenced();
        let mut cols = vec![format!("{:width$}/{}", i + 1, claims.len(), width = width)];
        cols.push(format::timestamp(target.release_time()));
        if opts.claim_id {
            cols.push(claim.claim_id.clone());
        }
        cols.push(format!("{:>10}", claim.stream_type()));
        cols.push(format::duration_short(target.duration()));
        cols.push(format::mib(target.size()));
        cols.push(target.fee_text());
        cols.push(target.channel_name().to_string());
        cols.push(if opts.title {
            target.title().to_string()
        } else {
            claim.name.clone()
        });
        out.line(format::columns(&opts.separator, &cols));
    }
    if opts.totals {
        totals_footer(
            claims.len(),
            claims.iter().map(|c| c.dereferenced().size()).sum(),
            claims.iter().map(|c| c.dereferenced().duration()).sum(),
            out,
        );
    }
}

fn totals_footer(count: usize, size: i64, duration: i64, out: &mut Transcript) {
    out.separator();
    out.line(format!("Claims: {}", count));
    out.line(format!("Total size: {}", format::gib(size)));
    out.line(format!("Total duration: {}", format::duration_long(duration)));
}

/// Every stream in the download list.
pub fn list_claims<T: Transport>(
    gw: &Gateway<T>,
    opts: &ListOptions,
    out: &mut Transcript,
) -> Result<Vec<FileItem>, GatewayError> {
    let items = gw.list_claims()?;
    out.heading("Downloaded claims");
    if items.is_empty() {
        out.line("No claims found");
    } else {
        print_items(&items, opts, out);
    }
    Ok(items)
}

/// Local files, largest first.
pub fn sort_items_size<T: Transport>(
    gw: &Gateway<T>,
    opts: &ListOptions,
    out: &mut Transcript,
) -> Result<Vec<FileItem>, GatewayError> {
    let items = gw.sort_items_size()?;
    out.heading("Downloaded claims by size");
    print_items(&items, opts, out);
    Ok(items)
}

pub fn list_channels<T: Transport>(
    gw: &Gateway<T>,
    opts: &ListOptions,
    out: &mut Transcript,
) -> Result<Vec<Claim>, GatewayError> {
    let channels = gw.list_channels()?;
    out.heading("Our channels");
    for (i, ch) in channels.iter().enumerate() {
        let mut cols = vec![format!("{}/{}", i + 1, channels.len())];
        if opts.claim_id {
            cols.push(ch.claim_id.clone());
        }
        cols.push(format!(
            "{:>14}",
            ch.amount.unwrap_or_default().to_string()
        ));
        cols.push(ch.canonical_url.clone());
        out.line(format::columns(&opts.separator, &cols));
    }
    Ok(channels)
}

/// Our claims with their bid, support and effective amounts.
pub fn claims_bids<T: Transport>(
    gw: &Gateway<T>,
    opts: &ListOptions,
    out: &mut Transcript,
) -> Result<Vec<Claim>, GatewayError> {
    let claims = gw.list_own_claims()?;
    out.heading("Our claims");
    let mut bids = Lbc::ZERO;
    let mut supports = Lbc::ZERO;
    for (i, claim) in claims.iter().enumerate() {
        let bid = claim.amount.unwrap_or_default();
        let support = claim.meta.support_amount.unwrap_or_default();
        let effective = claim.meta.effective_amount.unwrap_or(bid + support);
        bids += bid;
        supports += support;

        let mut cols = vec![format!("{}/{}", i + 1, claims.len())];
        if opts.claim_id {
            cols.push(claim.claim_id.clone());
        }
        cols.push(format!("bid: {:>14}", bid.to_string()));
        cols.push(format!("supports: {:>14}", support.to_string()));
        cols.push(format!("effective: {:>14}", effective.to_string()));
        cols.push(if claim.meta.is_controlling { "controlling" } else { "-" }.to_string());
        cols.push(claim.name.clone());
        out.line(format::columns(&opts.separator, &cols));
    }
    out.separator();
    out.line(format!("Total bids: {}", bids));
    out.line(format!("Total supports: {}", supports));
    Ok(claims)
}

/// One claim we support, with our share of its total.
#[derive(Clone, Debug, PartialEq)]
pub struct SupportedClaim {
    pub claim_id: String,
    pub name: String,
    /// `None` when the claim no longer resolves.
    pub facts: Option<SupportFacts>,
    pub ours: Lbc,
}

/// Our supports grouped by claim, with base and existing amounts.
pub fn list_supports<T: Transport>(
    gw: &Gateway<T>,
    opts: &ListOptions,
    out: &mut Transcript,
) -> Result<Vec<SupportedClaim>, GatewayError> {
    let mut grouped: BTreeMap<String, (String, Lbc)> = BTreeMap::new();
    for s in gw.list_supports(None)? {
        let entry = grouped.entry(s.claim_id).or_insert((s.name, Lbc::ZERO));
        entry.1 += s.amount;
    }

    let mut rows = Vec::with_capacity(grouped.len());
    for (claim_id, (name, ours)) in grouped {
        let facts = match gw.resolve(&format!("lbry://{}#{}", name, claim_id))? {
            ResolveOutcome::Found(claim) => Some(SupportFacts::from_totals(
                claim.meta.support_amount.unwrap_or(ours),
                ours,
            )),
            ResolveOutcome::Error { .. } => None,
        };
        rows.push(SupportedClaim {
            claim_id,
            name,
            facts,
            ours,
        });
    }

    out.heading("Our supports");
    let mut total = Lbc::ZERO;
    for (i, row) in rows.iter().enumerate() {
        total += row.ours;
        let mut cols = vec![format!("{}/{}", i + 1, rows.len())];
        if opts.claim_id {
            cols.push(row.claim_id.clone());
        }
        match row.facts {
            Some(f) => {
                cols.push(format!("base: {:>14}", f.base.to_string()));
                cols.push(format!("ours: {:>14}", f.ours.to_string()));
                cols.push(format!("existing: {:>14}", f.existing.to_string()));
            }
            None => {
                cols.push(format!("ours: {:>14}", row.ours.to_string()));
                cols.push("invalid claim".to_string());
            }
        }
        cols.push(row.name.clone());
        out.line(format::columns(&opts.separator, &cols));
    }
    out.separator();
    out.line(format!("Total of our supports: {}", total));
    Ok(rows)
}

pub fn list_trending<T: Transport>(
    gw: &Gateway<T>,
    page: u32,
    page_size: u32,
    claim_types: &[&str],
    opts: &ListOptions,
    out: &mut Transcript,
) -> Result<Vec<Claim>, GatewayError> {
    let claims = gw.list_trending_claims(page, page_size, claim_types)?;
    out.heading(&format!("Trending claims, page {}", page.max(1)));
    print_claims(&claims, opts, out);
    Ok(claims)
}

pub fn list_search<T: Transport>(
    gw: &Gateway<T>,
    text: &str,
    page: u32,
    page_size: u32,
    opts: &ListOptions,
    out: &mut Transcript,
) -> Result<Vec<Claim>, GatewayError> {
    let claims = gw.list_search_claims(text, page, page_size)?;
    out.heading(&format!("Search: {}, page {}", text, page.max(1)));
    if claims.is_empty() {
        out.line("No claims found");
    } else {
        print_claims(&claims, opts, out);
    }
    Ok(claims)
}

/// Claims of one channel: the newest `number`, or all of them.
pub fn list_channel_claims<T: Transport>(
    gw: &Gateway<T>,
    channel: &str,
    number: Option<u32>,
    opts: &ListOptions,
    out: &mut Transcript,
) -> Result<Vec<Claim>, GatewayError> {
    let claims = match number {
        Some(n) => gw.ch_search_n_claims(channel, n, &[])?,
        None => gw.ch_search_all_claims(channel, &[])?,
    };
    out.heading(&format!("Claims of {}", channel));
    print_claims(&claims, opts, out);
    Ok(claims)
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;
