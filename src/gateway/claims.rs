//! Resolution, claim search and listing verbs.

use super::*;

/// `claim_search` caps pages at 50 items.
const SEARCH_PAGE_SIZE: u32 = 50;

impl<T: Transport> Gateway<T> {
    pub fn resolve(&self, uri: &str) -> Result<ResolveOutcome, GatewayError> {
        let result = self.call_result("resolve", json!({ "urls": [uri] }))?;

        let item = result
            .get(uri)
            .cloned()
            .or_else(|| result.as_object().and_then(|m| m.values().next().cloned()))
            .ok_or_else(|| GatewayError::Decode {
                method: "resolve".to_string(),
                message: format!("no entry for {}", uri),
            })?;

        if let Some(err) = item.get("error") {
            let name = err
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            return Ok(ResolveOutcome::Error {
                name,
                text: error_text(err),
            });
        }

        Ok(ResolveOutcome::Found(Box::new(claim_from_value(item)?)))
    }

    /// Looks one claim up by URI or by claim ID. `None` when nothing matches.
    /// With `repost`, a repost is replaced by the claim it points at.
    pub fn search_item(&self, target: ItemRef<'_>, repost: bool) -> Result<Option<Claim>, GatewayError> {
        let found = match target {
            ItemRef::Uri(uri) => match self.resolve(uri)? {
                ResolveOutcome::Found(claim) => Some(*claim),
                ResolveOutcome::Error { .. } => None,
            },
            ItemRef::ClaimId(cid) => {
                let page: Page<Claim> =
                    self.call_typed("claim_search", json!({ "claim_id": cid }))?;
                page.items.into_iter().next()
            }
        };

        Ok(found.map(|claim| match (repost, claim.reposted_claim.clone()) {
            (true, Some(source)) if claim.is_repost() => *source,
            _ => claim,
        }))
    }

    pub fn claim_search(&self, params: Value) -> Result<Page<Claim>, GatewayError> {
        self.call_typed("claim_search", params)
    }

    /// Newest `number` claims of a channel, newest first.
    pub fn ch_search_n_claims(
        &self,
        channel: &str,
        number: u32,
        claim_types: &[&str],
    ) -> Result<Vec<Claim>, GatewayError> {
        let mut out = Vec::new();
        let mut page = 1;
        // The daemon offsets by `(page - 1) * page_size`, so the size stays fixed across pages.
        let page_size = number.min(SEARCH_PAGE_SIZE);
        while (out.len() as u32) < number {
            let mut params = json!({
                "channel": channel,
                "page": page,
                "page_size": page_size,
                "order_by": ["release_time"],
            });
            if !claim_types.is_empty() {
                params["claim_type"] = json!(claim_types);
            }
            let found = self.claim_search(params)?;
            let last_page = found.items.is_empty() || page >= found.total_pages;
            out.extend(found.items);
            if last_page {
                break;
            }
            page += 1;
        }
        out.truncate(number as usize);
        Ok(out)
    }

    /// Every claim of a channel, newest first.
    pub fn ch_search_all_claims(
        &self,
        channel: &str,
        claim_types: &[&str],
    ) -> Result<Vec<Claim>, GatewayError> {
        let mut out = Vec::new();
        let mut page = 1;
        loop {
            let mut params = json!({
                "channel": channel,
                "page": page,
                "page_size": SEARCH_PAGE_SIZE,
                "order_by": ["release_time"],
            });
            if !claim_types.is_empty() {
                params["claim_type"] = json!(claim_types);
            }
            let found = self.claim_search(params)?;
            let last_page = found.items.is_empty() || page >= found.total_pages;
            out.extend(found.items);
            if last_page {
                break;
            }
            page += 1;
        }
        Ok(out)
    }

    pub fn list_trending_claims(
        &self,
        page: u32,
        page_size: u32,
        claim_types: &[&str],
    ) -> Result<Vec<Claim>, GatewayError> {
        let mut params = json!({
            "page": page.max(1),
            "page_size": page_size.clamp(1, SEARCH_PAGE_SIZE),
            "order_by": ["trending_score"],
        });
        if !claim_types.is_empty() {
            params["claim_type"] = json!(claim_types);
        }
        Ok(self.claim_search(params)?.items)
    }

    pub fn list_search_claims(
        &self,
        text: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Claim>, GatewayError> {
        let params = json!({
            "text": text,
            "page": page.max(1),
            "page_size": page_size.clamp(1, SEARCH_PAGE_SIZE),
        });
        Ok(self.claim_search(params)?.items)
    }

    /// Channels created by this wallet.
    pub fn list_channels(&self) -> Result<Vec<Claim>, GatewayError> {
        let page: Page<Claim> =
            self.call_typed("channel_list", json!({ "page_size": ALL_ITEMS }))?;
        Ok(page.items)
    }

    /// Claims published by this wallet, resolved so supports are filled in.
    pub fn list_own_claims(&self) -> Result<Vec<Claim>, GatewayError> {
        let page: Page<Claim> = self.call_typed(
            "claim_list",
            json!({ "page_size": ALL_ITEMS, "resolve": true }),
        )?;
        Ok(page.items)
    }

    /// Number of blobs held by the local blob store.
    pub fn blob_count(&self) -> Result<u64, GatewayError> {
        let page: Page<Value> = self.call_typed("blob_list", json!({ "page_size": 1 }))?;
        Ok(page.total_items)
    }
}
