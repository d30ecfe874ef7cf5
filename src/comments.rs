//! Client for the comments service, a JSON-RPC server separate from the
//! daemon.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::format;
use crate::transcript::Transcript;

const ATTEMPTS: usize = 3;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Comment {
    pub comment_id: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub replies: u32,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentPage {
    #[serde(default)]
    items: Vec<Comment>,
    #[serde(default)]
    total_items: u64,
}

#[derive(Debug, Deserialize)]
struct RpcBody {
    result: Option<CommentPage>,
    error: Option<serde_json::Value>,
}

pub struct CommentsClient {
    server: String,
    client: reqwest::blocking::Client,
}

impl CommentsClient {
    pub fn new(server: &str, timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("lbry-bulk")
            .timeout(timeout)
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            server: server.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    /// Top-level comments of a claim, newest first, with the total count.
    pub fn list(&self, claim_id: &str, page: u32, page_size: u32) -> Result<(Vec<Comment>, u64)> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "comment.List",
            "params": {
                "claim_id": claim_id,
                "page": page.max(1),
                "page_size": page_size.max(1),
                "top_level": true,
                "sort_by": 0,
            },
        });

        let body: RpcBody = with_retries("list comments", || {
            let resp = self
                .client
                .post(format!("{}?m=comment.List", self.server))
                .json(&request)
                .send()
                .context("comment.List request")?;
            resp.error_for_status()
                .context("comment.List status")?
                .json()
                .context("parse comment.List response")
        })?;

        if let Some(err) = body.error {
            anyhow::bail!("comments service error: {}", err);
        }
        let page = body.result.context("comment.List returned no result")?;
        Ok((page.items, page.total_items))
    }
}

fn with_retries<T>(label: &str, mut f: impl FnMut() -> Result<T>) -> Result<T> {
    let mut last: Option<anyhow::Error> = None;
    for i in 0..ATTEMPTS {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) => {
                tracing::debug!(attempt = i + 1, error = %err, "{}", label);
                last = Some(err);
                if i + 1 < ATTEMPTS {
                    std::thread::sleep(std::time::Duration::from_millis(200 * (1 << i)));
                }
            }
        }
    }
    Err(last
        .unwrap_or_else(|| anyhow::anyhow!("unknown error"))
        .context(label.to_string()))
}

pub fn print_comments(claim: &str, comments: &[Comment], total: u64, out: &mut Transcript) {
    out.heading(&format!("Comments of {} ({} total)", claim, total));
    for (i, c) in comments.iter().enumerate() {
        out.line(format!(
            "{}/{}, {}, {}, replies: {}",
            i + 1,
            comments.len(),
            format::timestamp(c.timestamp),
            c.channel_name.as_deref().unwrap_or("_Anonymous_"),
            c.replies
        ));
        for text in c.comment.lines() {
            out.line(format!("  {}", text));
        }
    }
}
