use lazy_static::lazy_static;
use regex::Regex;

use super::country::is_country_token;

lazy_static! {
    static ref URL_SCHEME: Regex = Regex::new(r"(?i)https?://").unwrap();
    static ref DOMAIN_SUFFIX: Regex = Regex::new(r"(?i)\.[a-z]{2,}$").unwrap();
    static ref TRAILING_PARENTHETICAL: Regex = Regex::new(r"\(.*?\)$").unwrap();
    static ref POSTAL_CODE: Regex = Regex::new(r"\b\d{4,6}(?:-\d{4})?$").unwrap();
    static ref DIGIT_RUN: Regex = Regex::new(r"\d{3,}").unwrap();
    static ref UPPER_CODE: Regex = Regex::new(r"^[A-Z]{2,3}$").unwrap();
}

/// Normalize a free-text city cell to a short place name.
///
/// "San Francisco, CA 94105" -> "San Francisco", "Palo Alto CA" -> "Palo Alto".
/// URLs, domains and strings carrying non-postal digit runs are rejected.
pub fn normalize_city(input: &str) -> Option<String> {
    let raw = input.trim();
    if raw.is_empty() || URL_SCHEME.is_match(raw) || DOMAIN_SUFFIX.is_match(raw) {
        return None;
    }

    let first = raw.split(',').next().unwrap_or_default().trim();
    let first = TRAILING_PARENTHETICAL.replace(first, "");
    let first = POSTAL_CODE.replace(first.trim(), "");
    let first = first.trim();

    if DIGIT_RUN.is_match(first) {
        return None;
    }

    let mut tokens: Vec<&str> = first.split_whitespace().collect();
    if tokens.len() == 1 {
        // A lone country is not a city; a lone code like "NYC" is kept
        if is_country_token(tokens[0]) {
            return None;
        }
    } else if tokens
        .last()
        .is_some_and(|last| is_country_token(last) || UPPER_CODE.is_match(last))
    {
        tokens.pop();
    }

    let city = tokens.join(" ");
    if city.chars().count() >= 2 {
        Some(city)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_region_and_postal_code() {
        assert_eq!(
            normalize_city("San Francisco, CA 94105").as_deref(),
            Some("San Francisco")
        );
        assert_eq!(normalize_city("Berlin 10115").as_deref(), Some("Berlin"));
        assert_eq!(
            normalize_city("Seattle 98101-1234").as_deref(),
            Some("Seattle")
        );
        assert_eq!(normalize_city("Palo Alto CA").as_deref(), Some("Palo Alto"));
        assert_eq!(normalize_city("Lyon France").as_deref(), Some("Lyon"));
        assert_eq!(normalize_city("Munich (Bavaria)").as_deref(), Some("Munich"));
    }

    #[test]
    fn keeps_plain_names() {
        assert_eq!(normalize_city("  New York  ").as_deref(), Some("New York"));
        assert_eq!(normalize_city("NYC").as_deref(), Some("NYC"));
        assert_eq!(normalize_city("São Paulo").as_deref(), Some("São Paulo"));
    }

    #[test]
    fn rejects_non_cities() {
        assert_eq!(normalize_city("https://x.com"), None);
        assert_eq!(normalize_city("acme.io"), None);
        assert_eq!(normalize_city("Suite 1200 Market St"), None);
        assert_eq!(normalize_city("X"), None);
        assert_eq!(normalize_city("USA"), None);
        assert_eq!(normalize_city(""), None);
    }
}
