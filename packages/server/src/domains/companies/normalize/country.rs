use lazy_static::lazy_static;
use regex::Regex;

use super::countries::{self, Country};

/// Stored country value for companies operating worldwide.
pub const GLOBAL: &str = "Global";

lazy_static! {
    static ref GLOBAL_CUE: Regex = Regex::new(r"(?i)\b(global|worldwide)\b").unwrap();
    static ref PARENTHETICAL: Regex = Regex::new(r"\(.*?\)").unwrap();
    static ref SEPARATORS: Regex = Regex::new(r"[._-]+").unwrap();
}

/// Normalize a free-text country cell to a canonical English country name.
///
/// Only the last comma-separated segment is considered ("Berlin, DE" -> "Germany").
/// Codes resolve by alpha-2/alpha-3; anything else by name or alias.
pub fn normalize_country(input: &str) -> Option<String> {
    let raw = input.trim();
    if raw.is_empty() {
        return None;
    }
    if GLOBAL_CUE.is_match(raw) {
        return Some(GLOBAL.to_string());
    }

    let without_parens = PARENTHETICAL.replace_all(raw, "");
    let last_segment = without_parens.rsplit(',').next().unwrap_or_default().trim();
    let segment = SEPARATORS.replace_all(last_segment, " ");
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }

    resolve(segment).map(|country| country.name.to_string())
}

fn resolve(segment: &str) -> Option<&'static Country> {
    let compact: String = segment.chars().filter(|c| !c.is_whitespace()).collect();
    let is_code = compact.chars().all(|c| c.is_ascii_alphabetic());

    let by_code = match compact.len() {
        2 if is_code => countries::by_alpha2(&compact),
        3 if is_code => countries::by_alpha3(&compact),
        _ => None,
    };

    by_code.or_else(|| countries::by_name(segment))
}

/// True when a token names a country by code or by name (any case).
pub fn is_country_token(token: &str) -> bool {
    let is_code = (2..=3).contains(&token.len()) && token.chars().all(|c| c.is_ascii_alphabetic());
    (is_code && countries::by_code(token).is_some()) || countries::by_name(token).is_some()
}
