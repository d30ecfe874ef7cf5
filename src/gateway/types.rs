//! DTOs for daemon requests and responses.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::{Claim, ClaimValue, Lbc};

/// Per-URI outcome of `resolve`. The daemon's error tag is kept verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolveOutcome {
    Found(Box<Claim>),
    Error { name: String, text: String },
}

/// How `search_item` looks a claim up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemRef<'a> {
    Uri(&'a str),
    ClaimId(&'a str),
}

/// A stream as held by the local file manager (`file_list`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileItem {
    #[serde(default)]
    pub claim_id: String,
    #[serde(default)]
    pub claim_name: String,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub download_path: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub sd_hash: Option<String>,
    #[serde(default)]
    pub blobs_completed: u64,
    #[serde(default)]
    pub blobs_in_stream: u64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub added_on: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub metadata: ClaimValue,
}

impl FileItem {
    /// Every blob of the stream is on disk.
    pub fn is_complete(&self) -> bool {
        self.completed || (self.blobs_in_stream > 0 && self.blobs_completed >= self.blobs_in_stream)
    }

    pub fn has_blobs(&self) -> bool {
        self.blobs_completed > 0
    }

    pub fn size(&self) -> i64 {
        self.metadata
            .source
            .as_ref()
            .and_then(|s| s.size)
            .unwrap_or(0)
    }

    pub fn duration(&self) -> i64 {
        self.metadata
            .video
            .as_ref()
            .and_then(|m| m.duration)
            .or_else(|| self.metadata.audio.as_ref().and_then(|m| m.duration))
            .unwrap_or(0)
    }

    pub fn release_time(&self) -> i64 {
        self.metadata
            .release_time
            .or(self.timestamp)
            .or(self.added_on)
            .unwrap_or(0)
    }

    pub fn title(&self) -> &str {
        self.metadata.title.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Debug)]
pub struct DownloadOptions {
    pub ddir: PathBuf,
    /// Place each stream under a sub-directory named after its channel.
    pub own_dir: bool,
    /// Write the media file; otherwise only blobs are fetched.
    pub save_file: bool,
    /// Follow reposts to their source claim.
    pub repost: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DownloadOutcome {
    Downloaded(FileItem),
    AlreadyPresent(FileItem),
    /// Channels, collections, livestreams and unfollowed reposts.
    NotDownloadable { stream_type: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteWhat {
    /// Only the media file in the download directory.
    Media,
    /// Only the blobs, keeping the media file.
    Blobs,
    Both,
}

impl std::fmt::Display for DeleteWhat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DeleteWhat::Media => "media",
            DeleteWhat::Blobs => "blobs",
            DeleteWhat::Both => "both",
        })
    }
}

impl std::str::FromStr for DeleteWhat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "media" => Ok(DeleteWhat::Media),
            "blobs" => Ok(DeleteWhat::Blobs),
            "both" => Ok(DeleteWhat::Both),
            other => Err(format!("expected media, blobs or both, got {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotPresent,
    Deleted,
    /// `media` was requested but no media file was on disk.
    NoMediaFile,
}

#[derive(Debug)]
pub struct CleanupReport {
    pub kept: Vec<FileItem>,
    pub removed: Vec<(FileItem, Result<DeleteOutcome, super::GatewayError>)>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupportItem {
    #[serde(default)]
    pub claim_id: String,
    #[serde(default)]
    pub name: String,
    pub amount: Lbc,
    #[serde(default)]
    pub txid: String,
    #[serde(default)]
    pub nout: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Peer {
    #[serde(default)]
    pub node_id: Option<String>,
    pub address: String,
    #[serde(default, alias = "tcp_port")]
    pub port: Option<u16>,
    #[serde(default)]
    pub udp_port: Option<u16>,
}

impl Peer {
    /// Identity used for the unique-node set; address and port when the
    /// daemon does not report a node ID.
    pub fn identity(&self) -> String {
        match &self.node_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => format!("{}:{}", self.address, self.port.or(self.udp_port).unwrap_or(0)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeerList {
    pub peers: Vec<Peer>,
    pub hosted_locally: bool,
}
