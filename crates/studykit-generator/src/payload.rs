//! Locate a JSON payload inside free-form model output
//!
//! Models wrap their JSON in code fences, prose, or both. Rather than trusting
//! the reply to be bare JSON, the locator scans for balanced `{...}` regions,
//! parses each one, and searches the parsed value (depth first) for an object
//! holding every expected key.

use serde_json::{Map, Value};
use std::collections::HashSet;

/// Outcome of a payload search
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Payload<'k> {
    /// An object holding every expected key
    Found(Map<String, Value>),
    /// An object holding some, but not all, expected keys
    MissingKey(&'k str),
    /// A region that mentions an expected key but is not valid JSON
    Malformed(String),
    /// Nothing JSON-shaped that concerns the expected keys
    Absent,
}

/// Search `reply` for an object containing every key in `keys`
pub(crate) fn locate<'k>(reply: &str, keys: &[&'k str]) -> Payload<'k> {
    let (regions, unterminated) = balanced_regions(reply);

    let mut missing = None;
    let mut malformed = None;

    for region in regions {
        match parse_region(region) {
            Ok(value) => {
                if let Some(object) = find_complete(&value, keys) {
                    return Payload::Found(object.clone());
                }
                if missing.is_none() {
                    missing = find_partial(&value, keys);
                }
            }
            Err(reason) => {
                if malformed.is_none() && mentions_any(region, keys) {
                    malformed = Some(reason);
                }
            }
        }
    }

    if let Some(key) = missing {
        return Payload::MissingKey(key);
    }
    if let Some(reason) = malformed {
        return Payload::Malformed(reason);
    }
    match unterminated {
        Some(region) if mentions_any(region, keys) => {
            Payload::Malformed("unterminated JSON object".to_string())
        }
        _ => Payload::Absent,
    }
}

/// Parse a region, retrying once without trailing commas
fn parse_region(region: &str) -> Result<Value, String> {
    match serde_json::from_str(region) {
        Ok(value) => Ok(value),
        Err(strict) => serde_json::from_str(&strip_trailing_commas(region)).map_err(|_| strict.to_string()),
    }
}

/// Scans over the reply; each extra scan starts after the first brace the
/// previous one left open
const MAX_SCANS: usize = 8;

/// Outermost balanced brace regions, plus the first region left open
///
/// Quotes only count inside a region, so apostrophes and stray quotes in
/// surrounding prose do not confuse the scan. Regions closed inside a brace
/// that never closes are still reported, and a bounded number of rescans
/// start just after the first unclosed brace, so a stray `{` in prose cannot
/// hide a later payload.
fn balanced_regions(text: &str) -> (Vec<&str>, Option<&str>) {
    let mut regions = Vec::new();
    let mut seen = HashSet::new();
    let mut unterminated = None;
    let mut from = 0;

    for _ in 0..MAX_SCANS {
        let (closed, open) = scan(text, from);
        for (start, end) in closed {
            if seen.insert((start, end)) {
                regions.push(&text[start..=end]);
            }
        }
        let Some(start) = open else {
            break;
        };
        if unterminated.is_none() {
            unterminated = Some(&text[start..]);
        }
        from = start + 1;
    }

    (regions, unterminated)
}

/// One pass from `from`: the outermost closed regions as inclusive byte
/// ranges in text order, and the first brace still open at the end
fn scan(text: &str, from: usize) -> (Vec<(usize, usize)>, Option<usize>) {
    let mut closed: Vec<(usize, usize)> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in text.as_bytes().iter().enumerate().skip(from) {
        if open.is_empty() {
            if byte == b'{' {
                open.push(i);
            }
            continue;
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => open.push(i),
            b'}' => {
                if let Some(start) = open.pop() {
                    // regions closed earlier inside this one are no longer outermost
                    while closed.last().is_some_and(|&(inner, _)| inner > start) {
                        closed.pop();
                    }
                    closed.push((start, i));
                }
            }
            _ => {}
        }
    }

    (closed, open.first().copied())
}

fn find_complete<'v>(value: &'v Value, keys: &[&str]) -> Option<&'v Map<String, Value>> {
    match value {
        Value::Object(map) => {
            if keys.iter().all(|key| map.contains_key(*key)) {
                return Some(map);
            }
            map.values().find_map(|child| find_complete(child, keys))
        }
        Value::Array(items) => items.iter().find_map(|child| find_complete(child, keys)),
        _ => None,
    }
}

/// The first expected key missing from the first object holding any of them
fn find_partial<'k>(value: &Value, keys: &[&'k str]) -> Option<&'k str> {
    match value {
        Value::Object(map) => {
            if keys.iter().any(|key| map.contains_key(*key)) {
                return keys.iter().copied().find(|key| !map.contains_key(*key));
            }
            map.values().find_map(|child| find_partial(child, keys))
        }
        Value::Array(items) => items.iter().find_map(|child| find_partial(child, keys)),
        _ => None,
    }
}

fn mentions_any(region: &str, keys: &[&str]) -> bool {
    keys.iter().any(|key| region.contains(&format!("\"{}\"", key)))
}

fn strip_trailing_commas(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(c);
    }

    out
}
