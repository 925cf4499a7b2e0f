use std::net::IpAddr;

/// TLDs that spreadsheet exports commonly glue onto the brand ("airbnbcom").
const GLUED_TLDS: &[&str] = &["com", "net", "org", "io", "ai", "co", "app", "dev"];

/// Normalize a website/URL/domain cell to its registrable (apex) domain.
///
/// Examples:
/// - "HTTPS://WWW.Example.com/path?x=1" -> "example.com"
/// - "shop.example.co.uk" -> "example.co.uk"
/// - "airbnbcom" -> "airbnb.com"
pub fn normalize_domain(input: &str) -> Option<String> {
    let host = extract_host(input)?;

    if host.parse::<IpAddr>().is_ok() || !is_hostname(&host) {
        return None;
    }

    if let Some(apex) = psl::domain_str(&host) {
        return Some(apex.to_string());
    }

    if !host.contains('.') {
        return split_glued_tld(&host);
    }

    None
}

/// Non-empty dot-separated labels of `[a-z0-9-]` or non-ASCII letters, with
/// no label starting or ending in a hyphen.
fn is_hostname(host: &str) -> bool {
    host.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| {
                c.is_ascii_lowercase()
                    || c.is_ascii_digit()
                    || c == '-'
                    || (!c.is_ascii() && c.is_alphabetic())
            })
    })
}

/// Strip scheme, `mailto:`, userinfo, `www.`, query/fragment, path, port and
/// whitespace.
fn extract_host(input: &str) -> Option<String> {
    let lowered = input.trim().to_lowercase();

    let mut rest = lowered.as_str();
    for scheme in ["https://", "http://", "mailto:"] {
        if let Some(stripped) = rest.strip_prefix(scheme) {
            rest = stripped;
            break;
        }
    }
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let rest = rest.split('/').next().unwrap_or_default();
    let rest = rest.rsplit_once('@').map_or(rest, |(_, host)| host);
    let rest = rest.trim().strip_prefix("www.").unwrap_or(rest.trim());

    let host: String = rest.chars().filter(|c| !c.is_whitespace()).collect();
    let host = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name.to_string(),
        _ => host,
    };
    let host = host.trim_end_matches('.').to_string();

    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Split the shortest known TLD off the end of a dotless host, keeping at
/// least two characters of brand.
fn split_glued_tld(host: &str) -> Option<String> {
    let (start, tld) = (1..host.len())
        .rev()
        .filter(|&i| host.is_char_boundary(i))
        .map(|i| (i, &host[i..]))
        .find(|(_, tail)| GLUED_TLDS.contains(tail))?;

    let brand = &host[..start];
    if brand.chars().count() >= 2 {
        Some(format!("{}.{}", brand, tld))
    } else {
        None
    }
}

/// Display name derived from an apex domain: "acme-labs.co.uk" -> "Acme labs".
pub fn derive_display_name(domain: &str) -> Option<String> {
    let label = match psl::suffix_str(domain) {
        Some(suffix) if domain.len() > suffix.len() + 1 => {
            &domain[..domain.len() - suffix.len() - 1]
        }
        _ => domain.split('.').next().unwrap_or_default(),
    };

    let words = label
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut chars = words.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
