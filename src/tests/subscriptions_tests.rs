use super::*;

fn entry(uri: &str, notifications: bool) -> SubscriptionEntry {
    SubscriptionEntry {
        channel_uri: uri.to_string(),
        claim_id: uri.rsplit_once('#').map(|(_, id)| id.to_string()).unwrap_or_default(),
        valid: true,
        notifications,
    }
}

fn uris(entries: &[SubscriptionEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.channel_uri.as_str()).collect()
}

#[test]
fn merge_keeps_preferred_order_then_appends_new_channels() {
    let shared = vec![entry("lbry://@Bob#b", true), entry("lbry://@Alice#a", true)];
    let local = vec![entry("lbry://@Carol#c", true), entry("lbry://@Alice#a", false)];

    let merged = merge_entries(shared, local);
    assert_eq!(uris(&merged), vec!["lbry://@Bob#b", "lbry://@Alice#a", "lbry://@Carol#c"]);
    assert!(merged[1].notifications);
}

#[test]
fn merge_treats_short_and_full_ids_as_one_channel() {
    let local = vec![entry("lbry://@Alice#a1", false)];
    let shared = vec![entry("lbry://@Alice#a1b2c3", true), entry("lbry://@Alice#f", true)];

    let merged = merge_entries(local, shared);
    assert_eq!(uris(&merged), vec!["lbry://@Alice#a1", "lbry://@Alice#f"]);
    assert!(!merged[0].notifications);
}

#[test]
fn merge_with_an_empty_side_is_the_other_side() {
    let only = vec![entry("lbry://@Bob#b", true)];
    assert_eq!(merge_entries(Vec::new(), only.clone()), only);
    assert_eq!(merge_entries(only.clone(), Vec::new()), only);
}

#[test]
fn side_names_in_headings() {
    assert_eq!(side_name(SubscriptionSide::Merged(Precedence::Local)), "merged, local first");
    assert_eq!(side_name(SubscriptionSide::Remote), "shared");
}
