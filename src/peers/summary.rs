//! Text renderings of peer reports: a line per claim, a line per channel,
//! or a paragraph of totals.

use super::*;
use crate::format;
use crate::transcript::Transcript;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryStyle {
    /// One line per channel, after the per-claim lines.
    Lines,
    /// A paragraph of totals per channel.
    Paragraph,
}

fn claim_line(sep: &str, index: usize, total: usize, r: &PeerReport) -> String {
    let mut cols = vec![
        format!("{:3}/{:3}", index + 1, total),
        format::timestamp(r.claim.release_time()),
        r.claim.claim_id.clone(),
        format!("{:10}", r.claim.stream_type()),
        r.claim.name.clone(),
    ];
    if r.is_stream() {
        cols.push(format!("peers: {}", r.peers.len()));
        cols.push(format!("local: {}", if r.hosted_locally { "yes" } else { "no" }));
    }
    if let Some(err) = &r.error {
        cols.push(format!("error: {}", err));
    }
    format::columns(sep, &cols)
}

fn channel_line(sep: &str, name: &str, a: &PeerAggregates) -> String {
    format::columns(
        sep,
        &[
            name.to_string(),
            format!("claims: {}", a.claims_searched),
            format!("streams: {}", a.downloadable_streams),
            format!("with hosts: {}", a.streams_with_hosts),
            format!("peers: {}", a.peers_total),
            format!("unique: {}", a.unique_nodes),
            format!("coverage: {:.2}%", a.hosting_coverage() * 100.0),
        ],
    )
}

pub fn paragraph(title: &str, a: &PeerAggregates) -> Vec<String> {
    vec![
        title.to_string(),
        format!("Claims searched: {}", a.claims_searched),
        format!("Downloadable streams: {}", a.downloadable_streams),
        format!("- Streams that have at least one host: {}", a.streams_with_hosts),
        format!("- Size of streams: {}", format::gib(a.size_total)),
        format!("- Duration of streams: {}", format::duration_long(a.duration_total)),
        String::new(),
        format!("Total peers in all searched claims: {}", a.peers_total),
        format!(
            "Total unique peers (nodes) hosting streams: {}{}",
            a.unique_nodes,
            if a.local_node { " (including this node)" } else { "" }
        ),
        format!("Average number of peers per stream: {:.4}", a.avg_peers_per_stream()),
        format!("Hosting coverage: {:.2}%", a.hosting_coverage() * 100.0),
    ]
}

pub fn print_channel(report: &ChannelPeerReport, sep: &str, style: SummaryStyle, out: &mut Transcript) {
    out.line(format!("Channel: {}", report.name()));
    if let Some(marker) = &report.marker {
        out.line(format!("  {}", marker));
    }
    let n = report.claim_reports.len();
    for (i, r) in report.claim_reports.iter().enumerate() {
        out.line(claim_line(sep, i, n, r));
    }
    match style {
        SummaryStyle::Lines => out.line(channel_line(sep, report.name(), &report.aggregates)),
        SummaryStyle::Paragraph => {
            out.blank();
            out.extend(paragraph(&format!("Summary for {}", report.name()), &report.aggregates));
        }
    }
}

pub fn print_batch(report: &BatchPeerReport, sep: &str, style: SummaryStyle, out: &mut Transcript) {
    out.heading("Peers hosting channel claims");
    let total = report.channels.len();
    for (i, ch) in report.channels.iter().enumerate() {
        print_channel(ch, sep, style, out);
        if i + 1 < total {
            out.blank();
        }
    }
    out.separator();
    out.extend(paragraph(
        &format!("All channels ({})", total),
        &report.aggregates,
    ));
}

pub fn print_claims(reports: &[PeerReport], aggregates: &PeerAggregates, sep: &str, out: &mut Transcript) {
    out.heading("Peers hosting claims");
    let n = reports.len();
    for (i, r) in reports.iter().enumerate() {
        out.line(claim_line(sep, i, n, r));
    }
    out.separator();
    out.extend(paragraph(&format!("All claims ({})", n), aggregates));
}
