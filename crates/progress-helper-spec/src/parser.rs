//! Spec string parser.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::directive::{Directive, ItemSelection};

static SECTION_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(,[0-9]+)+$").unwrap());
static RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").unwrap());
static SECTION_ITEMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)\s*:\s*(.+)$").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Most entries a single `A-B` range may expand to. Wider ranges are dropped
/// like any other unparseable token.
pub const MAX_RANGE_LEN: u32 = 10_000;

/// Parse a spec string into directives, in the order they appear.
///
/// Unparseable tokens are dropped; an unparseable input yields an empty list.
pub fn parse(raw: &str) -> Vec<Directive> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    expand_tokens(raw)
        .iter()
        .filter_map(|token| parse_token(token))
        .collect()
}

/// Split on `;` and expand section lists and section ranges into one token
/// per section.
fn expand_tokens(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for token in raw.split(';').map(str::trim).filter(|t| !t.is_empty()) {
        if SECTION_LIST.is_match(token) {
            tokens.extend(token.split(',').map(|s| s.trim().to_string()));
            continue;
        }
        if let Some((start, end)) = parse_range(token) {
            tokens.extend((start..=end).map(|n| n.to_string()));
            continue;
        }
        tokens.push(token.to_string());
    }

    tokens
}

fn parse_token(token: &str) -> Option<Directive> {
    if let Some(caps) = SECTION_ITEMS.captures(token) {
        let section = caps[1].parse().ok()?;
        let items = parse_items(&caps[2]);
        // An item list with nothing usable in it falls back to the whole section.
        if items.is_empty() {
            return Some(Directive::all(section));
        }
        return Some(Directive {
            section,
            items: ItemSelection::Items(items),
        });
    }

    if NUMBER.is_match(token) {
        return token.parse().ok().map(Directive::all);
    }

    None
}

fn parse_items(rest: &str) -> Vec<u32> {
    let mut items = Vec::new();

    for part in rest.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some((start, end)) = parse_range(part) {
            items.extend(start..=end);
        } else if NUMBER.is_match(part) {
            if let Ok(n) = part.parse() {
                items.push(n);
            }
        }
    }

    items
}

fn parse_range(s: &str) -> Option<(u32, u32)> {
    let caps = RANGE.captures(s)?;
    let start = caps[1].parse().ok()?;
    let end: u32 = caps[2].parse().ok()?;
    if end >= start && end - start >= MAX_RANGE_LEN {
        return None;
    }
    Some((start, end))
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
