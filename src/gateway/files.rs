//! Downloads, local file listings and deletion.

use std::path::Path;

use super::*;

impl<T: Transport> Gateway<T> {
    pub fn file_list(&self, filter: Value) -> Result<Vec<FileItem>, GatewayError> {
        let mut params = filter;
        if !params.is_object() {
            params = json!({});
        }
        params["page_size"] = json!(ALL_ITEMS);
        let page: Page<FileItem> = self.call_typed("file_list", params)?;
        Ok(page.items)
    }

    pub fn local_file(&self, claim_id: &str) -> Result<Option<FileItem>, GatewayError> {
        Ok(self
            .file_list(json!({ "claim_id": claim_id }))?
            .into_iter()
            .next())
    }

    /// Every stream held locally, in the daemon's order.
    pub fn list_claims(&self) -> Result<Vec<FileItem>, GatewayError> {
        self.file_list(json!({}))
    }

    /// Local streams sorted by size, largest first.
    pub fn sort_items_size(&self) -> Result<Vec<FileItem>, GatewayError> {
        let mut items = self.list_claims()?;
        items.sort_by(|a, b| b.size().cmp(&a.size()));
        Ok(items)
    }

    pub fn download_single(
        &self,
        claim: &Claim,
        opts: &DownloadOptions,
    ) -> Result<DownloadOutcome, GatewayError> {
        let claim = if opts.repost {
            claim.dereferenced()
        } else {
            claim
        };
        if !claim.is_downloadable() {
            return Ok(DownloadOutcome::NotDownloadable {
                stream_type: claim.stream_type().to_string(),
            });
        }

        if let Some(item) = self.local_file(&claim.claim_id)? {
            let media_ok = !opts.save_file
                || item
                    .download_path
                    .as_deref()
                    .is_some_and(|p| Path::new(p).exists());
            if item.is_complete() && media_ok {
                return Ok(DownloadOutcome::AlreadyPresent(item));
            }
        }

        let mut dir = opts.ddir.clone();
        if opts.own_dir {
            dir.push(claim.channel_name());
        }
        if opts.save_file {
            std::fs::create_dir_all(&dir).map_err(|e| GatewayError::Io {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let uri = if claim.permanent_url.is_empty() {
            format!("lbry://{}#{}", claim.name, claim.claim_id)
        } else {
            claim.permanent_url.clone()
        };
        let result = self.call_result(
            "get",
            json!({
                "uri": uri,
                "download_directory": dir.display().to_string(),
                "save_file": opts.save_file,
            }),
        )?;

        // `get` reports some failures inside a successful result.
        if let Some(err) = result.get("error") {
            return Err(GatewayError::Daemon {
                method: "get".to_string(),
                message: error_text(err),
            });
        }
        let item: FileItem = serde_json::from_value(result).map_err(|e| GatewayError::Decode {
            method: "get".to_string(),
            message: e.to_string(),
        })?;
        Ok(DownloadOutcome::Downloaded(item))
    }

    /// Downloads the newest `number` streams of a channel. Per-claim failures
    /// are returned alongside the claim; only the search itself can fail.
    pub fn ch_download_latest(
        &self,
        channel: &str,
        number: u32,
        opts: &DownloadOptions,
    ) -> Result<Vec<(Claim, Result<DownloadOutcome, GatewayError>)>, GatewayError> {
        let claims = self.ch_search_n_claims(channel, number, &["stream", "repost"])?;
        Ok(claims
            .into_iter()
            .map(|claim| {
                let outcome = self.download_single(&claim, opts);
                (claim, outcome)
            })
            .collect())
    }

    pub fn delete_single(&self, claim_id: &str, what: DeleteWhat) -> Result<DeleteOutcome, GatewayError> {
        let Some(item) = self.local_file(claim_id)? else {
            return Ok(DeleteOutcome::NotPresent);
        };
        self.delete_item(&item, what)
    }

    fn delete_item(&self, item: &FileItem, what: DeleteWhat) -> Result<DeleteOutcome, GatewayError> {
        match what {
            DeleteWhat::Media => {
                let Some(path) = item.download_path.as_deref().filter(|p| Path::new(p).exists())
                else {
                    return Ok(DeleteOutcome::NoMediaFile);
                };
                std::fs::remove_file(path).map_err(|e| GatewayError::Io {
                    path: path.to_string(),
                    message: e.to_string(),
                })?;
                Ok(DeleteOutcome::Deleted)
            }
            DeleteWhat::Blobs | DeleteWhat::Both => {
                self.call_result(
                    "file_delete",
                    json!({
                        "claim_id": item.claim_id,
                        "delete_from_download_dir": what == DeleteWhat::Both,
                    }),
                )?;
                Ok(DeleteOutcome::Deleted)
            }
        }
    }

    /// Keeps the newest `keep` local streams of a channel and deletes the
    /// rest. `keep == 0` removes everything held from that channel.
    pub fn ch_cleanup(
        &self,
        channel_claim_id: &str,
        keep: u32,
        what: DeleteWhat,
    ) -> Result<CleanupReport, GatewayError> {
        let mut items = self.file_list(json!({ "channel_claim_id": channel_claim_id }))?;
        items.sort_by(|a, b| b.release_time().cmp(&a.release_time()));

        let split = (keep as usize).min(items.len());
        let removed_items = items.split_off(split);
        let removed = removed_items
            .into_iter()
            .map(|item| {
                let outcome = self.delete_item(&item, what);
                (item, outcome)
            })
            .collect();

        Ok(CleanupReport {
            kept: items,
            removed,
        })
    }
}
