use std::path::PathBuf;

use clap::Args;

use lbry_bulk::gateway::DeleteWhat;
use lbry_bulk::model::SubscriptionSide;
use lbry_bulk::support_plan::Strategy;

#[derive(Args)]
pub(crate) struct InputArgs {
    /// Input file; stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    pub(crate) input: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct DownloadArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// Download directory (defaults to the daemon's)
    #[arg(long)]
    pub(crate) ddir: Option<PathBuf>,
    /// Do not place claims in per-channel sub-directories
    #[arg(long)]
    pub(crate) no_own_dir: bool,
    /// Fetch blobs only, without writing media files
    #[arg(long)]
    pub(crate) blobs_only: bool,
    /// Download reposts themselves instead of their sources
    #[arg(long)]
    pub(crate) no_repost: bool,
}

#[derive(Args)]
pub(crate) struct DeleteArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// What to remove: media, blobs or both
    #[arg(long, default_value = "media")]
    pub(crate) what: DeleteWhat,
}

#[derive(Args)]
pub(crate) struct PeersArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// Summarize each channel in a paragraph instead of a line
    #[arg(long)]
    pub(crate) paragraph: bool,
}

#[derive(Args)]
pub(crate) struct SubsPeersArgs {
    /// Subscription list: local, shared, merged:shared or merged:local
    #[arg(long, default_value = "shared")]
    pub(crate) side: SubscriptionSide,
    /// Skip channels that no longer resolve
    #[arg(long)]
    pub(crate) validate: bool,
    /// Claims per channel
    #[arg(long, default_value_t = 2)]
    pub(crate) number: u32,
    #[arg(long)]
    pub(crate) paragraph: bool,
}

#[derive(Args)]
pub(crate) struct SupportArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// create, abandon_change or target
    #[arg(long, default_value = "create")]
    pub(crate) strategy: Strategy,
    /// Inputs name claims that no longer resolve
    #[arg(long)]
    pub(crate) invalid: bool,
}
