//! Typed view of a claim as the daemon returns it from `resolve` and
//! `claim_search`. Only the fields the bulk operations read are mapped.

use serde::{Deserialize, Deserializer, Serialize};

use super::Lbc;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_id: String,
    pub name: String,

    #[serde(default)]
    pub canonical_url: String,
    #[serde(default)]
    pub permanent_url: String,
    /// `stream`, `channel`, `repost` or `collection`.
    #[serde(default)]
    pub value_type: String,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub amount: Option<Lbc>,

    #[serde(default)]
    pub value: ClaimValue,
    #[serde(default)]
    pub meta: ClaimMeta,
    #[serde(default)]
    pub signing_channel: Option<SigningChannel>,
    #[serde(default)]
    pub reposted_claim: Option<Box<Claim>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimValue {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub stream_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub release_time: Option<i64>,
    #[serde(default)]
    pub source: Option<StreamSource>,
    #[serde(default)]
    pub fee: Option<Fee>,
    #[serde(default)]
    pub video: Option<MediaInfo>,
    #[serde(default)]
    pub audio: Option<MediaInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamSource {
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub size: Option<i64>,
    #[serde(default)]
    pub sd_hash: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub duration: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimMeta {
    #[serde(default)]
    pub support_amount: Option<Lbc>,
    #[serde(default)]
    pub effective_amount: Option<Lbc>,
    #[serde(default)]
    pub is_controlling: bool,
    #[serde(default)]
    pub reposted: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SigningChannel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub claim_id: String,
    #[serde(default)]
    pub canonical_url: Option<String>,
}

impl Claim {
    pub fn is_repost(&self) -> bool {
        self.value_type == "repost"
    }

    /// A stream with a blob source. Livestreams are streams without one.
    pub fn is_downloadable(&self) -> bool {
        self.value_type == "stream" && self.value.source.as_ref().is_some_and(|s| s.sd_hash.is_some())
    }

    /// `stream` for downloadable streams; otherwise the claim kind
    /// (`channel`, `repost`, `collection`, `livestream`).
    pub fn stream_type(&self) -> &str {
        match self.value_type.as_str() {
            "stream" if self.is_downloadable() => "stream",
            "stream" => "livestream",
            "" => "unknown",
            other => other,
        }
    }

    pub fn media_type(&self) -> &str {
        self.value
            .source
            .as_ref()
            .and_then(|s| s.media_type.as_deref())
            .unwrap_or("")
    }

    pub fn title(&self) -> &str {
        self.value.title.as_deref().unwrap_or("")
    }

    pub fn sd_hash(&self) -> Option<&str> {
        self.value.source.as_ref().and_then(|s| s.sd_hash.as_deref())
    }

    pub fn size(&self) -> i64 {
        self.value
            .source
            .as_ref()
            .and_then(|s| s.size)
            .unwrap_or(0)
    }

    pub fn duration(&self) -> i64 {
        self.value
            .video
            .as_ref()
            .and_then(|m| m.duration)
            .or_else(|| self.value.audio.as_ref().and_then(|m| m.duration))
            .unwrap_or(0)
    }

    /// Release time when the publisher set one, else the block timestamp.
    pub fn release_time(&self) -> i64 {
        self.value
            .release_time
            .or(self.timestamp)
            .unwrap_or(0)
    }

    pub fn channel_name(&self) -> &str {
        self.signing_channel
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("_Unknown_")
    }

    pub fn fee_text(&self) -> String {
        match &self.value.fee {
            Some(Fee {
                amount: Some(amount),
                currency,
            }) => format!("{} {}", amount, currency.as_deref().unwrap_or("LBC")),
            _ => "0.0".to_string(),
        }
    }

    /// Follows a repost to its source claim.
    pub fn dereferenced(&self) -> &Claim {
        match (&self.reposted_claim, self.is_repost()) {
            (Some(source), true) => source,
            _ => self,
        }
    }
}

fn de_opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(n)) => Ok(Some(n)),
        Some(Raw::Float(x)) => Ok(Some(x as i64)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
