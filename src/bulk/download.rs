use super::*;
use crate::format;
use crate::gateway::{DownloadOptions, DownloadOutcome};
use crate::model::Claim;

/// Totals over successfully downloaded (or already present) streams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DownloadTotals {
    pub downloaded: usize,
    pub present: usize,
    pub failed: usize,
    pub skipped: usize,
    pub size: i64,
    pub duration: i64,
}

impl DownloadTotals {
    fn record(&mut self, claim: &Claim, outcome: &Result<DownloadOutcome, GatewayError>) {
        let claim = claim.dereferenced();
        match outcome {
            Ok(DownloadOutcome::Downloaded(_)) => {
                self.downloaded += 1;
                self.size += claim.size();
                self.duration += claim.duration();
            }
            Ok(DownloadOutcome::AlreadyPresent(_)) => {
                self.present += 1;
                self.size += claim.size();
                self.duration += claim.duration();
            }
            Ok(DownloadOutcome::NotDownloadable { .. }) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }

    fn footer(&self, out: &mut Transcript) {
        out.line(format!(
            "Downloaded: {}, already present: {}, skipped: {}, failed: {}",
            self.downloaded, self.present, self.skipped, self.failed
        ));
        out.line(format!(
            "Total size: {}; total duration: {}",
            format::gib(self.size),
            format::duration_long(self.duration)
        ));
    }
}

fn outcome_line(
    out: &mut Transcript,
    prefix: &str,
    claim: &Claim,
    outcome: &Result<DownloadOutcome, GatewayError>,
) {
    let source = claim.dereferenced();
    let what = format!(
        "{}{}, {}, {}",
        prefix,
        format::timestamp(source.release_time()),
        source.claim_id,
        source.name
    );
    match outcome {
        Ok(DownloadOutcome::Downloaded(item)) => out.line(format!(
            "{}: downloaded to {}",
            what,
            item.download_path.as_deref().unwrap_or("(blobs only)")
        )),
        Ok(DownloadOutcome::AlreadyPresent(_)) => out.line(format!("{}: already present", what)),
        Ok(DownloadOutcome::NotDownloadable { stream_type }) => {
            out.line(format!("{}: {} is not downloadable, skipping", what, stream_type))
        }
        Err(err) => {
            out.line(what);
            error_line(out, err);
        }
    }
}

/// Downloads the newest `number` claims of every channel. `number == 0`
/// skips the channel.
pub fn download_channels<T: Transport>(
    gw: &Gateway<T>,
    channels: &[ChannelRef],
    opts: &DownloadOptions,
    out: &mut Transcript,
) -> DownloadTotals {
    out.heading("Download latest claims from channels");
    let mut totals = DownloadTotals::default();
    let total = channels.len();

    for (i, ch) in channels.iter().enumerate() {
        let Some(resolved) = channel_header(out, i, total, ch) else {
            totals.skipped += 1;
            item_gap(out, i, total);
            continue;
        };
        if ch.number == 0 {
            out.line("  number=0, skipping");
            item_gap(out, i, total);
            continue;
        }

        match gw.ch_download_latest(&resolved.canonical_uri, ch.number, opts) {
            Ok(results) => {
                let n = results.len();
                for (j, (claim, outcome)) in results.iter().enumerate() {
                    outcome_line(out, &format!("  {}/{}, ", j + 1, n), claim, outcome);
                    totals.record(claim, outcome);
                }
                if n == 0 {
                    out.line("  no claims found");
                }
            }
            Err(err) => {
                totals.failed += 1;
                error_line(out, &err);
            }
        }
        item_gap(out, i, total);
    }

    out.separator();
    totals.footer(out);
    out.line("Done");
    totals
}

pub fn download_claims<T: Transport>(
    gw: &Gateway<T>,
    claims: &[ClaimRef],
    opts: &DownloadOptions,
    out: &mut Transcript,
) -> DownloadTotals {
    out.heading("Download claims");
    let mut totals = DownloadTotals::default();
    let total = claims.len();

    for (i, claim_ref) in claims.iter().enumerate() {
        let Some(claim) = claim_header(out, i, total, claim_ref) else {
            totals.skipped += 1;
            item_gap(out, i, total);
            continue;
        };
        let outcome = gw.download_single(claim, opts);
        outcome_line(out, "  ", claim, &outcome);
        totals.record(claim, &outcome);
        item_gap(out, i, total);
    }

    out.separator();
    totals.footer(out);
    out.line("Done");
    totals
}
