//! Normalizes free-form multi-line input into typed entries.
//!
//! Each line is `token[<sep> number]`. Channel mode expects claim counts and
//! `@`-prefixes bare names; claim mode expects support amounts.

use crate::model::{EntryNumber, InputEntry, Lbc, is_claim_id};
use crate::transcript::Transcript;

pub const DEFAULT_CHANNEL_COUNT: u32 = 2;
pub const EDITED_MARKER: &str = "  <-- edited";

#[derive(Clone, Debug)]
pub struct ParseOptions {
    pub assume_channel: bool,
    pub number_float: bool,
    pub separator: char,
    /// Substituted when the number is missing or unusable.
    pub default_number: Option<EntryNumber>,
}

impl ParseOptions {
    pub fn channels(separator: char) -> Self {
        Self {
            assume_channel: true,
            number_float: false,
            separator,
            default_number: Some(EntryNumber::Count(DEFAULT_CHANNEL_COUNT)),
        }
    }

    pub fn claims(separator: char) -> Self {
        Self {
            assume_channel: false,
            number_float: true,
            separator,
            default_number: None,
        }
    }
}

/// Lazily yields one entry per non-blank line, in input order.
pub fn parse_entries<'a>(
    text: &'a str,
    opts: &'a ParseOptions,
) -> impl Iterator<Item = InputEntry> + 'a {
    text.lines().filter_map(move |line| parse_line(line, opts))
}

/// Parses the whole buffer and records one report line per entry.
pub fn validate_input(text: &str, opts: &ParseOptions, out: &mut Transcript) -> Vec<InputEntry> {
    let entries: Vec<InputEntry> = parse_entries(text, opts).collect();
    for entry in &entries {
        let mut line = render_entry(entry, opts.separator);
        if entry.edited {
            line.push_str(EDITED_MARKER);
        }
        out.line(line);
    }
    entries
}

/// Echo format: `token<sep> number`, or the bare token without a number.
pub fn render_entry(entry: &InputEntry, separator: char) -> String {
    match entry.number {
        Some(EntryNumber::Count(n)) => format!("{}{} {}", entry.token, separator, n),
        Some(EntryNumber::Amount(a)) => format!("{}{} {}", entry.token, separator, a),
        None => entry.token.clone(),
    }
}

fn parse_line(line: &str, opts: &ParseOptions) -> Option<InputEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut fields = line.split(opts.separator);
    let raw_token = fields.next().unwrap_or("").trim();
    let raw_number = fields.next().map(str::trim).filter(|s| !s.is_empty());

    let mut token: String = raw_token
        .chars()
        .filter(|c| *c != '"' && *c != '\'' && !c.is_whitespace())
        .collect();
    let mut edited = token != raw_token;

    if token.is_empty() {
        return None;
    }

    if opts.assume_channel && !is_claim_id(&token) {
        if let Some(rest) = token.strip_prefix("lbry://") {
            token = rest.to_string();
            edited = true;
        }
        if !token.starts_with('@') {
            token.insert(0, '@');
            edited = true;
        }
        if token == "@" {
            return None;
        }
    }

    let (number, number_edited) = parse_number(raw_number, opts);

    Some(InputEntry {
        token,
        number,
        edited: edited || number_edited,
    })
}

fn parse_number(raw: Option<&str>, opts: &ParseOptions) -> (Option<EntryNumber>, bool) {
    let fallback = |substituted: bool| {
        (
            opts.default_number,
            substituted || opts.default_number.is_some(),
        )
    };

    let Some(raw) = raw else {
        return fallback(false);
    };
    let raw: String = raw.chars().filter(|c| *c != '"' && *c != '\'').collect();

    if opts.number_float {
        return match Lbc::parse_truncating(&raw) {
            Ok((amount, truncated)) if !amount.is_negative() => {
                (Some(EntryNumber::Amount(amount)), truncated)
            }
            _ => fallback(true),
        };
    }

    if let Ok(n) = raw.parse::<u32>() {
        return (Some(EntryNumber::Count(n)), false);
    }

    // Decimal counts are truncated; negatives fall back to the default.
    match raw.parse::<Lbc>() {
        Ok(amount) if !amount.is_negative() => {
            let n = amount.whole().min(u32::MAX as i64) as u32;
            (Some(EntryNumber::Count(n)), true)
        }
        _ => fallback(true),
    }
}

#[cfg(test)]
#[path = "tests/parse_tests.rs"]
mod tests;
