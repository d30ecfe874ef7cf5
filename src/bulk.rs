//! Per-item iteration over resolved vectors. Every variant logs a heading,
//! reports `index/total` progress, skips entries that did not resolve, and
//! keeps going when a single item fails.

use crate::gateway::{Gateway, GatewayError, Transport};
use crate::model::{ChannelRef, ClaimRef};
use crate::resolver::failure_note;
use crate::transcript::Transcript;

mod delete;
mod download;

pub use self::delete::{cleanup_channels, delete_claims};
pub use self::download::{DownloadTotals, download_channels, download_claims};

pub const NO_SERVER: &str = "Cannot establish connection to 'lbrynet' on";

/// Liveness gate run before any action; prints the start hint when down.
pub fn server_ready<T: Transport>(gw: &Gateway<T>, out: &mut Transcript) -> bool {
    if gw.server_exists() {
        return true;
    }
    out.line(format!("{} {}", NO_SERVER, gw.endpoint()));
    out.line("Start server with:");
    out.line("  lbrynet start");
    false
}

/// Writes the blank separator between items, never after the last.
fn item_gap(out: &mut Transcript, index: usize, total: usize) {
    if index + 1 < total {
        out.blank();
    }
}

/// Progress line for a channel entry; `None` when the entry must be skipped.
fn channel_header<'a>(
    out: &mut Transcript,
    index: usize,
    total: usize,
    ch: &'a ChannelRef,
) -> Option<&'a crate::model::ResolvedChannel> {
    out.line(format!("Channel {}/{}, {}", index + 1, total, ch.input_token));
    match &ch.outcome {
        Ok(resolved) => Some(resolved),
        Err(f) => {
            out.line(format!("  <-- {}, skipping", failure_note(f)));
            None
        }
    }
}

fn claim_header<'a>(
    out: &mut Transcript,
    index: usize,
    total: usize,
    claim: &'a ClaimRef,
) -> Option<&'a crate::model::Claim> {
    match &claim.outcome {
        Ok(c) => {
            out.line(format!("Claim {}/{}, {}, {}", index + 1, total, c.claim_id, c.name));
            Some(c)
        }
        Err(f) => {
            out.line(format!("Claim {}/{}, {}", index + 1, total, claim.input_token));
            out.line(format!("  <-- {}, skipping", failure_note(f)));
            None
        }
    }
}

fn error_line(out: &mut Transcript, err: &GatewayError) {
    tracing::warn!(error = %err, "item failed");
    out.line(format!("  <-- error: {}", err));
}
