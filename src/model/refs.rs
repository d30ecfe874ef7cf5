use serde::Serialize;

use super::{Claim, Lbc};

/// Number attached to an input line: a claim count in channel mode, an
/// amount in claim mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EntryNumber {
    Count(u32),
    Amount(Lbc),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputEntry {
    pub token: String,
    pub number: Option<EntryNumber>,
    /// Set when the line had to be repaired to produce this entry.
    pub edited: bool,
}

impl InputEntry {
    /// Entry for a single token with no number.
    pub fn bare(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            number: None,
            edited: false,
        }
    }

    pub fn count(&self) -> u32 {
        match self.number {
            Some(EntryNumber::Count(n)) => n,
            Some(EntryNumber::Amount(a)) => a.whole().clamp(0, u32::MAX as i64) as u32,
            None => 0,
        }
    }

    pub fn amount(&self) -> Option<Lbc> {
        match self.number {
            Some(EntryNumber::Amount(a)) => Some(a),
            Some(EntryNumber::Count(n)) => Some(Lbc::from_whole(n as i64)),
            None => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    NotFound,
    InvalidUrl,
    ResolveError,
    RpcError,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classifies the error text the daemon embeds in a resolve result.
    pub fn from_resolve_text(text: &str) -> Self {
        let kind = if text.contains("NOT_FOUND") || text.contains("could not find") {
            FailureKind::NotFound
        } else if text.contains("not a valid url") {
            FailureKind::InvalidUrl
        } else {
            FailureKind::ResolveError
        };
        Self::new(kind, text)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedChannel {
    pub canonical_uri: String,
    pub claim_id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelRef {
    pub input_token: String,
    pub number: u32,
    pub outcome: Result<ResolvedChannel, Failure>,
}

impl ChannelRef {
    pub fn channel(&self) -> Option<&ResolvedChannel> {
        self.outcome.as_ref().ok()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClaimRef {
    pub input_token: String,
    pub number: Option<Lbc>,
    pub outcome: Result<Claim, Failure>,
}

impl ClaimRef {
    pub fn claim(&self) -> Option<&Claim> {
        self.outcome.as_ref().ok()
    }
}

/// Support held on one claim. `existing = base + ours`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SupportFacts {
    pub base: Lbc,
    pub existing: Lbc,
    pub ours: Lbc,
}

impl SupportFacts {
    /// `existing` is the claim's total support as resolved; `ours` is the sum
    /// of our own supports. Rounding on the daemon side can leave `ours`
    /// slightly above `existing`; the base is clamped at zero and `existing`
    /// recomputed so the identity holds exactly.
    pub fn from_totals(existing: Lbc, ours: Lbc) -> Self {
        let ours = ours.clamp_non_negative();
        let base = existing.saturating_excess(ours);
        Self {
            base,
            existing: base + ours,
            ours,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SupportTarget {
    pub claim: ClaimRef,
    pub facts: Option<SupportFacts>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubscriptionEntry {
    pub channel_uri: String,
    pub claim_id: String,
    /// Whether the channel resolves online; `true` until checked.
    pub valid: bool,
    pub notifications: bool,
}

/// Which list wins when both hold the same channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Precedence {
    Local,
    Shared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionSide {
    /// Wallet preferences kept on this machine only.
    Local,
    /// Preferences synchronised with the remote sync service.
    Remote,
    /// Both lists as one. The preferred list comes first and its
    /// notification flags win for channels held by both.
    Merged(Precedence),
}

impl std::str::FromStr for SubscriptionSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(SubscriptionSide::Local),
            "shared" | "remote" => Ok(SubscriptionSide::Remote),
            "merged" | "merged:shared" => Ok(SubscriptionSide::Merged(Precedence::Shared)),
            "merged:local" => Ok(SubscriptionSide::Merged(Precedence::Local)),
            other => Err(format!(
                "expected local, shared, merged:shared or merged:local, got {}",
                other
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubscriptionSource {
    pub which: SubscriptionSide,
    pub entries: Vec<SubscriptionEntry>,
}
