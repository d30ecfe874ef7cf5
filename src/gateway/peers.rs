use super::*;

impl<T: Transport> Gateway<T> {
    /// Peers announcing the stream's descriptor blob, and whether this node
    /// holds blobs of it too.
    pub fn list_peers(&self, claim: &Claim) -> Result<PeerList, GatewayError> {
        let Some(sd_hash) = claim.sd_hash() else {
            return Ok(PeerList::default());
        };

        let result = self.call_result(
            "peer_list",
            json!({ "blob_hash": sd_hash, "page_size": ALL_ITEMS }),
        )?;
        // Newer daemons page the answer; older ones return a bare list.
        let raw = match result.get("items") {
            Some(items) => items.clone(),
            None => result,
        };
        let peers: Vec<Peer> = serde_json::from_value(raw).map_err(|e| GatewayError::Decode {
            method: "peer_list".to_string(),
            message: e.to_string(),
        })?;

        let hosted_locally = self
            .local_file(&claim.claim_id)?
            .is_some_and(|f| f.has_blobs());

        Ok(PeerList {
            peers,
            hosted_locally,
        })
    }
}
