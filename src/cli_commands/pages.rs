use std::path::PathBuf;

use clap::Args;

use lbry_bulk::model::SubscriptionSide;
use lbry_bulk::subscriptions::Show;

#[derive(Args)]
pub(crate) struct ListArgs {
    /// Include claim IDs
    #[arg(long)]
    pub(crate) claim_id: bool,
    /// Show titles instead of claim names
    #[arg(long)]
    pub(crate) title: bool,
    /// Omit the totals footer
    #[arg(long)]
    pub(crate) no_totals: bool,
}

#[derive(Args)]
pub(crate) struct ChannelArgs {
    pub(crate) channel: String,
    /// Newest N claims; all claims when omitted
    #[arg(long)]
    pub(crate) number: Option<u32>,
    #[command(flatten)]
    pub(crate) list: ListArgs,
}

#[derive(Args)]
pub(crate) struct TrendingArgs {
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,
    #[arg(long, default_value_t = 50)]
    pub(crate) page_size: u32,
    #[command(flatten)]
    pub(crate) list: ListArgs,
}

#[derive(Args)]
pub(crate) struct SearchArgs {
    pub(crate) text: String,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,
    #[arg(long, default_value_t = 50)]
    pub(crate) page_size: u32,
    #[command(flatten)]
    pub(crate) list: ListArgs,
}

#[derive(Args)]
pub(crate) struct SubsArgs {
    /// Subscription list: local, shared, merged:shared or merged:local
    #[arg(long, default_value = "shared")]
    pub(crate) side: SubscriptionSide,
    /// all, valid or invalid
    #[arg(long, default_value = "all")]
    pub(crate) show: Show,
    /// Include claim IDs
    #[arg(long)]
    pub(crate) claim_id: bool,
}

#[derive(Args)]
pub(crate) struct LatestArgs {
    /// Subscription list: local, shared, merged:shared or merged:local
    #[arg(long, default_value = "shared")]
    pub(crate) side: SubscriptionSide,
    #[arg(long, default_value = "all")]
    pub(crate) show: Show,
    /// Claims per channel; values below 1 are raised to 1
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub(crate) number: i64,
}

#[derive(Args)]
pub(crate) struct SeedingRatioArgs {
    /// Daemon log (defaults to the `daemon_log` setting)
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct CommentsArgs {
    /// Claim URI or claim ID
    pub(crate) claim: String,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,
    #[arg(long, default_value_t = 50)]
    pub(crate) page_size: u32,
}
