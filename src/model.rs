mod amount;
mod claim;
mod refs;

pub use self::amount::{AmountError, DEWIES_PER_LBC, Lbc};
pub use self::claim::{
    Claim, ClaimMeta, ClaimValue, Fee, MediaInfo, SigningChannel, StreamSource,
};
pub use self::refs::{
    ChannelRef, ClaimRef, EntryNumber, Failure, FailureKind, InputEntry, Precedence, ResolvedChannel,
    SubscriptionEntry, SubscriptionSide, SubscriptionSource, SupportFacts, SupportTarget,
};

/// A claim ID: exactly 40 lowercase hex digits.
pub fn is_claim_id(token: &str) -> bool {
    token.len() == 40 && token.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
