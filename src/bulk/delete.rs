use super::*;
use crate::gateway::{DeleteOutcome, DeleteWhat};

fn delete_line(out: &mut Transcript, prefix: &str, outcome: &Result<DeleteOutcome, GatewayError>) {
    match outcome {
        Ok(DeleteOutcome::Deleted) => out.line(format!("{}deleted", prefix)),
        Ok(DeleteOutcome::NotPresent) => out.line(format!("{}not present locally", prefix)),
        Ok(DeleteOutcome::NoMediaFile) => out.line(format!("{}no media file on disk", prefix)),
        Err(err) => {
            out.line(prefix.trim_end_matches([' ', ':']).to_string());
            error_line(out, err);
        }
    }
}

/// Deletes the given claims. Returns the number actually deleted.
pub fn delete_claims<T: Transport>(
    gw: &Gateway<T>,
    claims: &[ClaimRef],
    what: DeleteWhat,
    out: &mut Transcript,
) -> usize {
    out.heading(&format!("Delete claims ({})", what));
    let total = claims.len();
    let mut deleted = 0;

    for (i, claim_ref) in claims.iter().enumerate() {
        if let Some(claim) = claim_header(out, i, total, claim_ref) {
            let outcome = gw.delete_single(&claim.claim_id, what);
            if matches!(outcome, Ok(DeleteOutcome::Deleted)) {
                deleted += 1;
            }
            delete_line(out, "  ", &outcome);
        }
        item_gap(out, i, total);
    }

    out.separator();
    out.line(format!("Deleted: {}", deleted));
    out.line("Done");
    deleted
}

/// Keeps the newest `number` local claims of each channel and deletes the
/// rest; `number == 0` deletes every claim of the channel.
pub fn cleanup_channels<T: Transport>(
    gw: &Gateway<T>,
    channels: &[ChannelRef],
    what: DeleteWhat,
    out: &mut Transcript,
) -> usize {
    out.heading(&format!("Clean up channels ({})", what));
    let total = channels.len();
    let mut deleted = 0;

    for (i, ch) in channels.iter().enumerate() {
        let Some(resolved) = channel_header(out, i, total, ch) else {
            item_gap(out, i, total);
            continue;
        };
        if ch.number == 0 {
            out.line("  number=0, removing all local claims");
        } else {
            out.line(format!("  keeping the newest {}", ch.number));
        }

        match gw.ch_cleanup(&resolved.claim_id, ch.number, what) {
            Ok(report) => {
                let n = report.removed.len();
                for (j, (item, outcome)) in report.removed.iter().enumerate() {
                    if matches!(outcome, Ok(DeleteOutcome::Deleted)) {
                        deleted += 1;
                    }
                    delete_line(
                        out,
                        &format!("  {}/{}, {}, {}: ", j + 1, n, item.claim_id, item.claim_name),
                        outcome,
                    );
                }
                out.line(format!("  kept {}, removed {}", report.kept.len(), n));
            }
            Err(err) => error_line(out, &err),
        }
        item_gap(out, i, total);
    }

    out.separator();
    out.line(format!("Deleted: {}", deleted));
    out.line("Done");
    deleted
}
