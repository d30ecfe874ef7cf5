//! Peer discovery over many claims across many channels.
//!
//! The outer pool walks channels with `ch_threads` workers; each channel
//! task queries peers for its streams with its own `claim_threads` pool.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::gateway::{Gateway, GatewayError, Peer, Transport};
use crate::model::{
    ChannelRef, Claim, ClaimRef, ResolvedChannel, SubscriptionEntry, SubscriptionSide,
};
use crate::pool::run_bounded;
use crate::subscriptions::{Show, load_subscriptions};

mod summary;
pub use self::summary::{SummaryStyle, print_batch, print_channel, print_claims};

pub const INVALID_CHANNEL: &str = "Invalid list of channels";
pub const NO_DOWNLOADABLE: &str = "No downloadable claims in this channel";

/// Identity that stands for this node in the unique-node set.
const LOCAL_NODE: &str = "<local node>";

#[derive(Clone, Debug, Serialize)]
pub struct PeerReport {
    pub claim: Claim,
    pub peers: Vec<Peer>,
    pub hosted_locally: bool,
    /// Set when the peer query itself failed; the claim counts as unhosted.
    pub error: Option<String>,
}

impl PeerReport {
    fn unqueried(claim: Claim) -> Self {
        Self {
            claim,
            peers: Vec::new(),
            hosted_locally: false,
            error: None,
        }
    }

    pub fn is_stream(&self) -> bool {
        self.claim.stream_type() == "stream"
    }

    pub fn has_hosts(&self) -> bool {
        !self.peers.is_empty() || self.hosted_locally
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PeerAggregates {
    pub claims_searched: usize,
    pub downloadable_streams: usize,
    pub streams_with_hosts: usize,
    pub size_total: i64,
    pub duration_total: i64,
    pub peers_total: usize,
    /// Distinct node identities, the local node included once.
    pub unique_nodes: usize,
    pub local_node: bool,
}

impl PeerAggregates {
    pub fn avg_peers_per_stream(&self) -> f64 {
        if self.downloadable_streams == 0 {
            return 0.0;
        }
        self.peers_total as f64 / self.downloadable_streams as f64
    }

    /// `streams_with_hosts / downloadable_streams`, zero without streams.
    pub fn hosting_coverage(&self) -> f64 {
        if self.downloadable_streams == 0 {
            return 0.0;
        }
        self.streams_with_hosts as f64 / self.downloadable_streams as f64
    }

    fn add_counts(&mut self, other: &PeerAggregates) {
        self.claims_searched += other.claims_searched;
        self.downloadable_streams += other.downloadable_streams;
        self.streams_with_hosts += other.streams_with_hosts;
        self.size_total += other.size_total;
        self.duration_total += other.duration_total;
        self.peers_total += other.peers_total;
        self.local_node |= other.local_node;
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ChannelPeerReport {
    pub channel: ChannelRef,
    pub claim_reports: Vec<PeerReport>,
    pub aggregates: PeerAggregates,
    /// Why the channel contributed nothing, when it did not.
    pub marker: Option<String>,
    #[serde(skip)]
    nodes: BTreeSet<String>,
}

impl ChannelPeerReport {
    fn empty(channel: ChannelRef, marker: impl Into<String>) -> Self {
        Self {
            channel,
            claim_reports: Vec::new(),
            aggregates: PeerAggregates::default(),
            marker: Some(marker.into()),
            nodes: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        match &self.channel.outcome {
            Ok(ch) => &ch.name,
            Err(_) => &self.channel.input_token,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct BatchPeerReport {
    pub channels: Vec<ChannelPeerReport>,
    pub aggregates: PeerAggregates,
}

/// Sums per-claim reports. Only streams count toward totals.
pub fn aggregate(reports: &[PeerReport]) -> (PeerAggregates, BTreeSet<String>) {
    let mut agg = PeerAggregates {
        claims_searched: reports.len(),
        ..PeerAggregates::default()
    };
    let mut nodes = BTreeSet::new();

    for r in reports.iter().filter(|r| r.is_stream()) {
        agg.downloadable_streams += 1;
        agg.size_total += r.claim.size();
        agg.duration_total += r.claim.duration();
        agg.peers_total += r.peers.len();
        if r.has_hosts() {
            agg.streams_with_hosts += 1;
        }
        if r.hosted_locally {
            agg.local_node = true;
            nodes.insert(LOCAL_NODE.to_string());
        }
        nodes.extend(r.peers.iter().map(Peer::identity));
    }
    agg.unique_nodes = nodes.len();
    (agg, nodes)
}

/// Newest-first by release time, then by height.
fn sort_newest_first(claims: &mut [Claim]) {
    claims.sort_by(|a, b| {
        b.release_time()
            .cmp(&a.release_time())
            .then_with(|| b.height.cmp(&a.height))
    });
}

/// Peer lists for streams; other claim types are reported unqueried.
fn query_peers<T: Transport>(gw: &Gateway<T>, claims: Vec<Claim>, claim_threads: usize) -> Vec<PeerReport> {
    run_bounded(claim_threads, claims, |_, claim| {
        if claim.stream_type() != "stream" {
            return PeerReport::unqueried(claim);
        }
        match gw.list_peers(&claim) {
            Ok(list) => PeerReport {
                claim,
                peers: list.peers,
                hosted_locally: list.hosted_locally,
                error: None,
            },
            Err(err) => {
                tracing::warn!(claim = %claim.claim_id, error = %err, "peer query failed");
                PeerReport {
                    error: Some(err.to_string()),
                    ..PeerReport::unqueried(claim)
                }
            }
        }
    })
}

/// Peers of individually named claims, reposts followed. Entries that did
/// not resolve are left out.
pub fn scan_claims<T: Transport>(
    gw: &Gateway<T>,
    claims: &[ClaimRef],
    claim_threads: usize,
) -> (Vec<PeerReport>, PeerAggregates) {
    let resolved: Vec<Claim> = claims
        .iter()
        .filter_map(ClaimRef::claim)
        .map(|c| c.dereferenced().clone())
        .collect();
    let reports = query_peers(gw, resolved, claim_threads);
    let (aggregates, _) = aggregate(&reports);
    (reports, aggregates)
}

/// Scans the newest `number` claims of one channel.
pub fn scan_channel<T: Transport>(
    gw: &Gateway<T>,
    channel: &ChannelRef,
    number: u32,
    claim_threads: usize,
) -> ChannelPeerReport {
    let Ok(resolved) = &channel.outcome else {
        return ChannelPeerReport::empty(channel.clone(), INVALID_CHANNEL);
    };

    let mut claims = match gw.ch_search_n_claims(&resolved.canonical_uri, number, &[]) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(channel = %resolved.canonical_uri, error = %err, "claim search failed");
            return ChannelPeerReport::empty(channel.clone(), format!("{}: {}", INVALID_CHANNEL, err));
        }
    };
    sort_newest_first(&mut claims);

    let reports = query_peers(gw, claims, claim_threads);

    let (aggregates, nodes) = aggregate(&reports);
    let marker = (aggregates.downloadable_streams == 0).then(|| NO_DOWNLOADABLE.to_string());
    ChannelPeerReport {
        channel: channel.clone(),
        claim_reports: reports,
        aggregates,
        marker,
        nodes,
    }
}

/// Scans every channel with its own claim count. Output keeps input order;
/// batch totals are sums, and the unique-node count is the set union.
pub fn scan_channels<T: Transport>(
    gw: &Gateway<T>,
    channels: &[ChannelRef],
    ch_threads: usize,
    claim_threads: usize,
) -> BatchPeerReport {
    let reports = run_bounded(ch_threads, channels.to_vec(), |_, ch| {
        let number = ch.number;
        scan_channel(gw, &ch, number, claim_threads)
    });

    let mut aggregates = PeerAggregates::default();
    let mut nodes = BTreeSet::new();
    for r in &reports {
        aggregates.add_counts(&r.aggregates);
        nodes.extend(r.nodes.iter().cloned());
    }
    aggregates.unique_nodes = nodes.len();

    BatchPeerReport {
        channels: reports,
        aggregates,
    }
}

/// Turns subscription entries into already-resolved channel references.
pub fn subscription_channels(entries: &[SubscriptionEntry], number: u32) -> Vec<ChannelRef> {
    entries
        .iter()
        .map(|e| {
            let name = e
                .channel_uri
                .trim_start_matches("lbry://")
                .split(['#', ':'])
                .next()
                .unwrap_or_default()
                .to_string();
            ChannelRef {
                input_token: e.channel_uri.clone(),
                number,
                outcome: Ok(ResolvedChannel {
                    canonical_uri: e.channel_uri.clone(),
                    claim_id: e.claim_id.clone(),
                    name,
                }),
            }
        })
        .collect()
}

/// Loads the subscription set and scans the channels that survive the
/// filter. Channels found invalid are never scanned.
pub fn scan_subscriptions<T: Transport>(
    gw: &Gateway<T>,
    side: SubscriptionSide,
    validate: bool,
    number: u32,
    ch_threads: usize,
    claim_threads: usize,
) -> Result<BatchPeerReport, GatewayError> {
    let show = if validate { Show::Valid } else { Show::All };
    let source = load_subscriptions(gw, side, show, ch_threads)?;
    let channels = subscription_channels(&source.entries, number);
    Ok(scan_channels(gw, &channels, ch_threads, claim_threads))
}

#[cfg(test)]
#[path = "tests/peers_tests.rs"]
mod tests;
