use super::*;

fn channels(text: &str) -> Vec<InputEntry> {
    parse_entries(text, &ParseOptions::channels(',')).collect()
}

fn claims(text: &str) -> Vec<InputEntry> {
    parse_entries(text, &ParseOptions::claims(',')).collect()
}

#[test]
fn empty_input_yields_no_entries() {
    assert!(channels("").is_empty());
    assert!(channels("\n   \n\t\n").is_empty());
    assert!(claims("").is_empty());
}

#[test]
fn channel_mode_prefixes_at_and_defaults_count() {
    let got = channels("@Alice, 3\nBob\n\"Carol\", 5");
    assert_eq!(got.len(), 3);

    assert_eq!(got[0].token, "@Alice");
    assert_eq!(got[0].number, Some(EntryNumber::Count(3)));
    assert!(!got[0].edited);

    assert_eq!(got[1].token, "@Bob");
    assert_eq!(got[1].number, Some(EntryNumber::Count(DEFAULT_CHANNEL_COUNT)));
    assert!(got[1].edited);

    assert_eq!(got[2].token, "@Carol");
    assert!(got[2].edited);
}

#[test]
fn channel_mode_keeps_claim_ids_verbatim() {
    let cid = "0123456789abcdef0123456789abcdef01234567";
    let got = channels(&format!("{}, 1", cid));
    assert_eq!(got[0].token, cid);
    assert!(!got[0].edited);

    // Uppercase hex is not a claim ID and gets prefixed.
    let upper = cid.to_uppercase();
    let got = channels(&upper);
    assert!(got[0].token.starts_with('@'));
}

#[test]
fn channel_mode_coerces_numbers() {
    let got = channels("@a, 3.7\n@b, nope\n@c, -4\n@d, 0");
    assert_eq!(got[0].number, Some(EntryNumber::Count(3)));
    assert!(got[0].edited);
    assert_eq!(got[1].number, Some(EntryNumber::Count(2)));
    assert!(got[1].edited);
    assert_eq!(got[2].number, Some(EntryNumber::Count(2)));
    assert_eq!(got[3].number, Some(EntryNumber::Count(0)));
    assert!(!got[3].edited);
}

#[test]
fn channel_mode_strips_lbry_scheme() {
    let got = channels("lbry://@Alice#a, 1");
    assert_eq!(got[0].token, "@Alice#a");
    assert!(got[0].edited);
}

#[test]
fn embedded_whitespace_and_quotes_are_removed() {
    let got = claims("  'my claim name' , 1.5");
    assert_eq!(got[0].token, "myclaimname");
    assert_eq!(got[0].number, Some(EntryNumber::Amount("1.5".parse().unwrap())));
    assert!(got[0].edited);
}

#[test]
fn lines_that_empty_out_are_dropped() {
    assert!(claims("\"\"\n' '\n").is_empty());
    assert!(channels("'', 4").is_empty());
}

#[test]
fn claim_mode_number_is_optional_and_never_negative() {
    let got = claims("video-a\nvideo-b, 0.00000001\nvideo-c, -3\nvideo-d, x");
    assert_eq!(got[0].number, None);
    assert!(!got[0].edited);
    assert_eq!(got[1].number, Some(EntryNumber::Amount(Lbc::MIN_UNIT)));
    assert_eq!(got[2].number, None);
    assert!(got[2].edited);
    assert_eq!(got[3].number, None);
    assert!(got[3].edited);
}

#[test]
fn claim_mode_flags_amounts_cut_to_eight_decimals() {
    let got = claims("video-a, 1.123456789\nvideo-b, 1.100000000\nvideo-c, 2.5");
    assert_eq!(got[0].number, Some(EntryNumber::Amount(Lbc::from_dewies(112_345_678))));
    assert!(got[0].edited);
    assert_eq!(got[1].number, Some(EntryNumber::Amount(Lbc::from_dewies(110_000_000))));
    assert!(!got[1].edited);
    assert!(!got[2].edited);
}

#[test]
fn claim_mode_does_not_prefix() {
    let got = claims("livestream-tutorial:b");
    assert_eq!(got[0].token, "livestream-tutorial:b");
}

#[test]
fn semicolon_separator() {
    let got: Vec<_> = parse_entries("@Alice; 5\n@Bob; 2", &ParseOptions::channels(';')).collect();
    assert_eq!(got[0].count(), 5);
    assert_eq!(got[1].count(), 2);
}

#[test]
fn every_channel_token_starts_with_at_or_is_a_claim_id() {
    let text = "x\n@y\nlbry://z\n 'w' , 1\n0123456789abcdef0123456789abcdef01234567";
    for e in channels(text) {
        assert!(!e.token.is_empty());
        assert!(e.token.starts_with('@') || is_claim_id(&e.token), "{}", e.token);
    }
}

#[test]
fn rendered_output_parses_back_to_same_entries() {
    let text = "Alice\n@Bob, 4.2\n 'Carol' ,0\n\n";
    let opts = ParseOptions::channels(',');
    let first: Vec<_> = parse_entries(text, &opts).collect();
    let rendered = first
        .iter()
        .map(|e| render_entry(e, ','))
        .collect::<Vec<_>>()
        .join("\n");
    let second: Vec<_> = parse_entries(&rendered, &opts).collect();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.token, b.token);
        assert_eq!(a.number, b.number);
        assert!(!b.edited);
    }
}

#[test]
fn validate_input_reports_one_line_per_entry_with_marker() {
    let mut out = Transcript::captured();
    let got = validate_input("Alice\n@Bob, 4", &ParseOptions::channels(','), &mut out);
    assert_eq!(got.len(), 2);
    assert_eq!(out.lines(), ["@Alice, 2  <-- edited", "@Bob, 4"]);
}
