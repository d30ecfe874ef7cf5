//! Wallet preferences: the subscription lists.

use super::*;
use crate::model::{Precedence, SubscriptionEntry, SubscriptionSide};
use crate::subscriptions::merge_entries;

impl<T: Transport> Gateway<T> {
    pub fn preferences(&self) -> Result<Value, GatewayError> {
        self.call_result("preference_get", json!({}))
    }

    /// Subscribed channels from the synchronised (`shared`) or local-only
    /// preference set, in stored order, or both merged.
    pub fn list_subscriptions(&self, side: SubscriptionSide) -> Result<Vec<SubscriptionEntry>, GatewayError> {
        let prefs = self.preferences()?;
        Ok(match side {
            SubscriptionSide::Remote => side_entries(&prefs, "shared"),
            SubscriptionSide::Local => side_entries(&prefs, "local"),
            SubscriptionSide::Merged(precedence) => {
                let (first, second) = match precedence {
                    Precedence::Shared => ("shared", "local"),
                    Precedence::Local => ("local", "shared"),
                };
                merge_entries(side_entries(&prefs, first), side_entries(&prefs, second))
            }
        })
    }
}

fn side_entries(prefs: &Value, key: &str) -> Vec<SubscriptionEntry> {
    let value = &prefs[key]["value"];

    let following = value["following"].as_array().cloned().unwrap_or_default();
    let muted = |uri: &str| {
        following.iter().any(|f| {
            f["uri"].as_str() == Some(uri) && f["notificationsDisabled"].as_bool() == Some(true)
        })
    };

    let uris = value["subscriptions"].as_array().cloned().unwrap_or_default();
    uris.iter()
        .filter_map(|u| u.as_str())
        .map(|uri| SubscriptionEntry {
            channel_uri: uri.to_string(),
            claim_id: uri
                .rsplit_once('#')
                .map(|(_, id)| id.to_string())
                .unwrap_or_default(),
            valid: true,
            notifications: !muted(uri),
        })
        .collect()
}
