//! Maps parsed input onto daemon entities. A failed entry stays in the
//! output with its failure; the batch never aborts on one item.

use std::path::{Path, PathBuf};

use crate::gateway::{Gateway, ItemRef, ResolveOutcome, Transport};
use crate::model::{
    ChannelRef, Claim, ClaimRef, Failure, FailureKind, InputEntry, ResolvedChannel,
    SupportTarget, is_claim_id,
};
use crate::parse::{ParseOptions, parse_entries};
use crate::transcript::Transcript;

pub fn resolve_channels<T: Transport>(
    gw: &Gateway<T>,
    entries: &[InputEntry],
    print: bool,
    out: &mut Transcript,
) -> Vec<ChannelRef> {
    let total = entries.len();
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let outcome = resolve_channel_token(gw, &entry.token);
            let ch = ChannelRef {
                input_token: entry.token.clone(),
                number: entry.count(),
                outcome,
            };
            if print {
                out.line(channel_line(i + 1, total, &ch));
            }
            ch
        })
        .collect()
}

fn resolve_channel_token<T: Transport>(gw: &Gateway<T>, token: &str) -> Result<ResolvedChannel, Failure> {
    let claim = if is_claim_id(token) {
        match gw.search_item(ItemRef::ClaimId(token), false) {
            Ok(Some(claim)) => claim,
            Ok(None) => {
                return Err(Failure::new(
                    FailureKind::NotFound,
                    format!("NOT_FOUND: no claim with ID {}", token),
                ));
            }
            Err(err) => return Err(err.into()),
        }
    } else {
        match gw.resolve(token) {
            Ok(ResolveOutcome::Found(claim)) => *claim,
            Ok(ResolveOutcome::Error { text, .. }) => return Err(Failure::from_resolve_text(&text)),
            Err(err) => return Err(err.into()),
        }
    };

    if claim.value_type != "channel" {
        return Err(Failure::new(
            FailureKind::ResolveError,
            format!("{} is a {}, not a channel", token, claim.stream_type()),
        ));
    }
    Ok(ResolvedChannel {
        canonical_uri: claim.canonical_url,
        claim_id: claim.claim_id,
        name: claim.name,
    })
}

fn channel_line(index: usize, total: usize, ch: &ChannelRef) -> String {
    match &ch.outcome {
        Ok(resolved) => format!(
            "{}/{}, {}, {}, {}",
            index, total, ch.input_token, ch.number, resolved.canonical_uri
        ),
        Err(f) => format!(
            "{}/{}, {}, {}  <-- {}",
            index,
            total,
            ch.input_token,
            ch.number,
            failure_note(f)
        ),
    }
}

/// Short marker shown next to a failed entry.
pub fn failure_note(f: &Failure) -> String {
    match f.kind {
        FailureKind::NotFound => "not found".to_string(),
        FailureKind::InvalidUrl => "invalid url".to_string(),
        FailureKind::ResolveError => format!("resolve error: {}", f.message),
        FailureKind::RpcError => format!("rpc error: {}", f.message),
    }
}

/// Resolves claim-mode entries: first as a URI, then as a claim ID.
pub fn resolve_claims<T: Transport>(
    gw: &Gateway<T>,
    entries: &[InputEntry],
    repost: bool,
    out: &mut Transcript,
) -> Vec<ClaimRef> {
    let total = entries.len();
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let outcome = search_claim(gw, &entry.token, repost);
            match &outcome {
                Ok(claim) => out.line(format!(
                    "{}/{}, {}, {}",
                    i + 1,
                    total,
                    entry.token,
                    claim.canonical_url
                )),
                Err(f) if f.kind == FailureKind::NotFound => {
                    out.line(format!("{}/{}, {}  <-- claim not found", i + 1, total, entry.token))
                }
                Err(f) => out.line(format!(
                    "{}/{}, {}  <-- {}",
                    i + 1,
                    total,
                    entry.token,
                    failure_note(f)
                )),
            }
            ClaimRef {
                input_token: entry.token.clone(),
                number: entry.amount(),
                outcome,
            }
        })
        .collect()
}

fn search_claim<T: Transport>(gw: &Gateway<T>, token: &str, repost: bool) -> Result<Claim, Failure> {
    match gw.search_item(ItemRef::Uri(token), repost) {
        Ok(Some(claim)) => return Ok(claim),
        Ok(None) => {}
        Err(err) => return Err(err.into()),
    }
    match gw.search_item(ItemRef::ClaimId(token), repost) {
        Ok(Some(claim)) => Ok(claim),
        Ok(None) => Err(Failure::new(
            FailureKind::NotFound,
            format!("NOT_FOUND: {}", token),
        )),
        Err(err) => Err(err.into()),
    }
}

/// Tokenizes raw text in claim mode, then resolves it.
pub fn resolve_claims_text<T: Transport>(
    gw: &Gateway<T>,
    text: &str,
    separator: char,
    repost: bool,
    out: &mut Transcript,
) -> Vec<ClaimRef> {
    let opts = ParseOptions::claims(separator);
    let entries: Vec<InputEntry> = parse_entries(text, &opts).collect();
    resolve_claims(gw, &entries, repost, out)
}

/// Like `resolve_claims`, additionally fetching support facts for each
/// resolved claim. Reposts are not followed: supports go on the claim named.
pub fn resolve_claims_with_support<T: Transport>(
    gw: &Gateway<T>,
    entries: &[InputEntry],
    out: &mut Transcript,
) -> Vec<SupportTarget> {
    resolve_claims(gw, entries, false, out)
        .into_iter()
        .map(|claim_ref| {
            let facts = match claim_ref.claim() {
                Some(claim) => match gw.get_base_support(claim) {
                    Ok(facts) => Some(facts),
                    Err(err) => {
                        tracing::warn!(claim = %claim.claim_id, error = %err, "support lookup failed");
                        out.line(format!("{}  <-- support lookup failed: {}", claim_ref.input_token, err));
                        None
                    }
                },
                None => None,
            };
            SupportTarget {
                claim: claim_ref,
                facts,
            }
        })
        .collect()
}

/// Chooses the download directory: the operator's when it exists, else the
/// daemon's configured default. The second value reports a substitution.
pub fn resolve_download_dir<T: Transport>(
    gw: &Gateway<T>,
    user_dir: Option<&Path>,
    out: &mut Transcript,
) -> (PathBuf, bool) {
    if let Some(dir) = user_dir.filter(|d| !d.as_os_str().is_empty() && d.is_dir()) {
        return (dir.to_path_buf(), false);
    }
    match gw.get_download_dir() {
        Ok(default) => {
            out.line(format!("Download directory: {}", default.display()));
            (default, true)
        }
        Err(err) => {
            tracing::warn!(error = %err, "could not read the daemon download directory");
            let fallback = user_dir
                .filter(|d| !d.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            out.line(format!("Download directory: {}", fallback.display()));
            (fallback, user_dir.is_none())
        }
    }
}
