//! Operator settings shared by every page: the daemon endpoints, the input
//! separator, thread budgets and download defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER: &str = "http://localhost:5279";
pub const DEFAULT_COMMENTS_SERVER: &str = "https://comments.odysee.com/api/v2";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: String,
    pub comments_server: String,
    pub separator: char,
    pub ch_threads: usize,
    pub claim_threads: usize,
    pub threads: usize,
    pub download_dir: Option<PathBuf>,
    pub own_dir: bool,
    pub save_file: bool,
    pub repost: bool,
    pub timeout_secs: u64,
    pub daemon_log: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            comments_server: DEFAULT_COMMENTS_SERVER.to_string(),
            separator: ';',
            ch_threads: 32,
            claim_threads: 16,
            threads: 32,
            download_dir: None,
            own_dir: true,
            save_file: true,
            repost: true,
            timeout_secs: 60,
            daemon_log: None,
        }
    }
}

impl Settings {
    /// Reads settings from `path`, or from the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_settings_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let settings: Settings = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self).context("serialize settings")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| format!("rename to {}", path.display()))?;
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// `$XDG_CONFIG_HOME/lbry-bulk/settings.json`, falling back to `~/.config`.
pub fn default_settings_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("lbry-bulk").join("settings.json"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
