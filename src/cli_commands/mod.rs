use clap::Subcommand;

pub(crate) mod bulk;
pub(crate) mod pages;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Download claims by channel or by claim
    Download {
        #[command(subcommand)]
        command: DownloadCommands,
    },

    /// Reports: local files, our claims, subscriptions, trending, search
    List {
        #[command(subcommand)]
        command: ListCommands,
    },

    /// Delete local claims
    Delete {
        #[command(subcommand)]
        command: DeleteCommands,
    },

    /// Count the peers hosting claims
    Peers {
        #[command(subcommand)]
        command: PeersCommands,
    },

    /// Create, change or abandon supports
    Supports {
        #[command(subcommand)]
        command: SupportsCommands,
    },

    /// Uploaded blobs against local blobs, from the daemon log
    #[command(name = "seeding-ratio")]
    SeedingRatio(pages::SeedingRatioArgs),

    /// Top-level comments of a claim
    Comments(pages::CommentsArgs),

    /// Show or save the effective settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum DownloadCommands {
    /// Newest claims of each channel; `@channel; N` per line, N=0 skips the channel
    Channels(bulk::DownloadArgs),
    /// Individual claims, one URI or claim ID per line
    Claims(bulk::DownloadArgs),
}

#[derive(Subcommand)]
pub(crate) enum DeleteCommands {
    /// Individual claims, one URI or claim ID per line
    Claims(bulk::DeleteArgs),
    /// Keep the newest N local claims per channel; N=0 deletes them all
    Channels(bulk::DeleteArgs),
}

#[derive(Subcommand)]
pub(crate) enum ListCommands {
    /// Downloaded claims
    Claims(pages::ListArgs),
    /// Downloaded claims, largest first
    Sizes(pages::ListArgs),
    /// Our channels
    Channels(pages::ListArgs),
    /// Our supports with base and existing amounts
    Supports(pages::ListArgs),
    /// Our claims with bids and effective amounts
    Bids(pages::ListArgs),
    /// Claims of one channel
    Channel(pages::ChannelArgs),
    /// Trending claims
    Trending(pages::TrendingArgs),
    /// Claims matching a text query
    Search(pages::SearchArgs),
    /// Subscribed channels
    Subs(pages::SubsArgs),
    /// Newest claims of subscribed channels
    Latest(pages::LatestArgs),
}

#[derive(Subcommand)]
pub(crate) enum PeersCommands {
    /// Newest claims of each channel; `@channel; N` per line
    Channels(bulk::PeersArgs),
    /// Individual claims, one URI or claim ID per line
    Claims(bulk::PeersArgs),
    /// Newest claims of subscribed channels
    Subs(bulk::SubsPeersArgs),
}

#[derive(Subcommand)]
pub(crate) enum SupportsCommands {
    /// Apply a strategy to `claim; amount` lines
    Update(bulk::SupportArgs),
}

#[derive(Subcommand)]
pub(crate) enum SettingsCommands {
    /// Print the effective settings as JSON
    Show,
    /// Write the effective settings to the settings file
    Save,
}
