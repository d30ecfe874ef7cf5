//! Seeding ratio: blobs we uploaded against blobs we hold.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::*;

const SERVER_LOGGER: &str = "blob_exchange.server";
const SENT_MARKER: &str = " sent ";
/// Rotated logs are `<log>.1` .. `<log>.9`.
const MAX_ROTATIONS: u32 = 9;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlobsRatio {
    pub uploaded: u64,
    pub local: u64,
}

impl BlobsRatio {
    pub fn ratio(&self) -> f64 {
        if self.local == 0 {
            0.0
        } else {
            self.uploaded as f64 / self.local as f64
        }
    }
}

fn is_upload_line(line: &str) -> bool {
    line.contains(SERVER_LOGGER) && line.contains(SENT_MARKER)
}

/// Existing log files: the live one first, then its rotations.
fn log_files(log: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if log.is_file() {
        files.push(log.to_path_buf());
    }
    for n in 1..=MAX_ROTATIONS {
        let mut name = log.as_os_str().to_owned();
        name.push(format!(".{}", n));
        let rotated = PathBuf::from(name);
        if rotated.is_file() {
            files.push(rotated);
        }
    }
    files
}

/// Upload lines from the blob exchange server across the log and its rotations.
pub fn count_uploaded_blobs(log: &Path) -> Result<u64> {
    let files = log_files(log);
    if files.is_empty() {
        anyhow::bail!("daemon log not found: {}", log.display());
    }

    let mut count = 0;
    for path in files {
        let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| format!("read {}", path.display()))?;
            if is_upload_line(&line) {
                count += 1;
            }
        }
    }
    Ok(count)
}

pub fn print_blobs_ratio<T: Transport>(
    gw: &Gateway<T>,
    log: &Path,
    out: &mut Transcript,
) -> Result<BlobsRatio> {
    let uploaded = count_uploaded_blobs(log)?;
    let local = gw.blob_count().context("count local blobs")?;
    let r = BlobsRatio { uploaded, local };

    out.heading("Seeding ratio");
    out.line(format!("Log: {}", log.display()));
    out.line(format!("Uploaded blobs: {}", r.uploaded));
    out.line(format!("Local blobs: {}", r.local));
    out.line(format!("Ratio: {:.4}", r.ratio()));
    Ok(r)
}
