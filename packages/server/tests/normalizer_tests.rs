//! Property-style checks across the field normalizers and the row cleaner.

mod common;

use common::row;
use ingest_core::domains::companies::cleaning::clean_row;
use ingest_core::domains::companies::normalize::{
    bucket_employee_size, country_names, is_bucket, normalize_city, normalize_country,
    normalize_domain, EMPLOYEE_BUCKETS,
};
use serde_json::json;

const MESSY_DOMAINS: &[&str] = &[
    "HTTPS://WWW.Example.com/path?x=1",
    "http://shop.example.co.uk/cart#top",
    "www.example.org:8080",
    "airbnbcom",
    "news.ycombinator.com",
    "  https://Blog.Acme.IO/  ",
    "example.com.",
    "ab",
    "not a domain",
    "ftp://files.example.net/pub",
    "acme.com, beta.io",
    "foo..com",
    "user@acme.com",
    "mailto:info@acme.com",
    "acme!.com",
    "acme.com\\path",
];

#[test]
fn domain_output_is_a_bare_apex() {
    for input in MESSY_DOMAINS {
        if let Some(domain) = normalize_domain(input) {
            assert!(!domain.contains("://"), "{input} -> {domain}");
            assert!(!domain.starts_with("www."), "{input} -> {domain}");
            assert!(!domain.contains(['/', '?', '#', ':', ' ']), "{input} -> {domain}");
            assert!(
                domain.split('.').count() >= 2
                    && domain.split('.').all(|label| !label.is_empty()
                        && label.chars().all(|c| c.is_alphanumeric() || c == '-')),
                "{input} -> {domain}"
            );
            assert_eq!(domain, domain.to_lowercase());
            // Apex domains are fixed points
            assert_eq!(normalize_domain(&domain).as_deref(), Some(domain.as_str()));
        }
    }
}

#[test]
fn domain_examples() {
    assert_eq!(
        normalize_domain("HTTPS://WWW.Example.com/path?x=1").as_deref(),
        Some("example.com")
    );
    assert_eq!(normalize_domain("airbnbcom").as_deref(), Some("airbnb.com"));
    assert_eq!(
        normalize_domain("news.ycombinator.com").as_deref(),
        Some("ycombinator.com")
    );
    assert_eq!(normalize_domain("ab"), None);
    assert_eq!(
        normalize_domain("mailto:info@acme.com").as_deref(),
        Some("acme.com")
    );
    assert_eq!(normalize_domain("acme.com, beta.io"), None);
}

#[test]
fn bucket_output_is_always_canonical() {
    let inputs = [
        "0", "1", "9", "10", "11", "50", "51", "199", "200", "201", "499", "500", "501", "999",
        "1000", "1001", "4999", "5000", "5001", "9999", "10000", "10001", "250000", "5k", "2.5k",
        "10,001+", "11-50", "11 - 60", "1k-5k", "approx. 75", "n/a", "", "lots",
    ];

    for input in inputs {
        if let Some(bucket) = bucket_employee_size(input) {
            assert!(is_bucket(&bucket), "{input} -> {bucket}");
            assert_eq!(bucket_employee_size(&bucket), Some(bucket.clone()));
        }
    }

    assert_eq!(bucket_employee_size("250").as_deref(), Some("201-500"));
    assert_eq!(bucket_employee_size("5k").as_deref(), Some("1 001-5 000"));
    assert_eq!(bucket_employee_size("10,001+").as_deref(), Some("10 000+"));
}

#[test]
fn buckets_follow_boundaries() {
    let boundaries = [
        ("10", 0),
        ("11", 1),
        ("50", 1),
        ("51", 2),
        ("200", 2),
        ("201", 3),
        ("500", 3),
        ("501", 4),
        ("1000", 4),
        ("1001", 5),
        ("5000", 5),
        ("5001", 6),
        ("10000", 6),
        ("10001", 7),
    ];
    for (input, index) in boundaries {
        assert_eq!(
            bucket_employee_size(input).as_deref(),
            Some(EMPLOYEE_BUCKETS[index]),
            "{input}"
        );
    }
}

#[test]
fn country_output_is_a_listed_name_or_global() {
    let names = country_names();
    let inputs = [
        "Remote, US",
        "us",
        "USA",
        "United States",
        "Deutschland",
        "DE",
        "Berlin, Germany",
        "UK",
        "England",
        "worldwide operations",
        "Global",
        "Côte d'Ivoire",
        "Mars",
        "",
    ];

    for input in inputs {
        if let Some(country) = normalize_country(input) {
            assert!(
                country == "Global" || names.contains(&country.as_str()),
                "{input} -> {country}"
            );
            assert_eq!(normalize_country(&country), Some(country.clone()));
        }
    }

    assert_eq!(
        normalize_country("Remote, US").as_deref(),
        Some("United States of America")
    );
    assert_eq!(
        normalize_country("worldwide operations").as_deref(),
        Some("Global")
    );
}

#[test]
fn city_examples() {
    assert_eq!(
        normalize_city("San Francisco, CA 94105").as_deref(),
        Some("San Francisco")
    );
    assert_eq!(normalize_city("https://x.com"), None);
    assert_eq!(normalize_city("London, UK").as_deref(), Some("London"));
    assert_eq!(normalize_city("Toronto ON").as_deref(), Some("Toronto"));
}

#[test]
fn cleaned_rows_hold_only_normalized_values() {
    let rows = vec![
        row(json!({
            "Company": "Globex",
            "URL": "https://www.globex.com/about",
            "Country": "Remote, US",
            "City": "Springfield 12345",
            "Employees": "1.2k"
        })),
        row(json!({
            "organization": "Initech",
            "website_url": "initech",
            "country_code": "worldwide",
            "town": "https://initech.io",
            "size": "approximately"
        })),
        row(json!({ "Notes": "nothing useful here" })),
    ];

    let cleaned: Vec<_> = rows.into_iter().map(clean_row).collect();

    let globex = &cleaned[0];
    assert_eq!(globex.name.as_deref(), Some("Globex"));
    assert_eq!(globex.domain.as_deref(), Some("globex.com"));
    assert_eq!(globex.country.as_deref(), Some("United States of America"));
    assert_eq!(globex.city.as_deref(), Some("Springfield"));
    assert_eq!(globex.employee_size_bucket.as_deref(), Some("1 001-5 000"));

    let initech = &cleaned[1];
    assert_eq!(initech.name.as_deref(), Some("Initech"));
    assert_eq!(initech.domain, None);
    assert_eq!(initech.country.as_deref(), Some("Global"));
    assert_eq!(initech.city, None);
    assert_eq!(initech.employee_size_bucket, None);

    let empty = &cleaned[2];
    assert!(empty.missing_fields().len() == 5);
    assert_eq!(empty.raw_json["Notes"], "nothing useful here");
}
