use lazy_static::lazy_static;
use regex::Regex;

/// Canonical employee-size buckets, smallest first.
pub const EMPLOYEE_BUCKETS: [&str; 8] = [
    "1-10",
    "11-50",
    "51-200",
    "201-500",
    "501-1 000",
    "1 001-5 000",
    "5 001-10 000",
    "10 000+",
];

/// Inclusive upper bound of every bucket except the open-ended last one.
const BUCKET_UPPER_BOUNDS: [f64; 7] = [10.0, 50.0, 200.0, 500.0, 1_000.0, 5_000.0, 10_000.0];

lazy_static! {
    // "250", "51-200", "10001+", "5k", "1.5k-3k"
    static ref SIZE_RANGE: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)(k)?(?:-(\d+(?:\.\d+)?)(k)?|\+)?").unwrap();
}

/// Map a raw headcount or headcount range to one of the 8 buckets.
///
/// Ranges are bucketed by their upper bound. Already-canonical buckets pass
/// through untouched so the function is idempotent.
pub fn bucket_employee_size(input: &str) -> Option<String> {
    if let Some(bucket) = EMPLOYEE_BUCKETS.iter().find(|b| **b == input) {
        return Some(bucket.to_string());
    }

    let compact: String = input
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    let caps = SIZE_RANGE.captures(&compact)?;
    let start = scaled(caps.get(1)?.as_str(), caps.get(2).is_some())?;
    let end = match caps.get(3) {
        Some(upper) => Some(scaled(upper.as_str(), caps.get(4).is_some())?),
        None => None,
    };

    Some(bucket_for(end.unwrap_or(start)).to_string())
}

fn scaled(number: &str, thousands: bool) -> Option<f64> {
    let value: f64 = number.parse().ok()?;
    Some(if thousands { value * 1_000.0 } else { value })
}

fn bucket_for(headcount: f64) -> &'static str {
    BUCKET_UPPER_BOUNDS
        .iter()
        .position(|upper| headcount <= *upper)
        .map(|i| EMPLOYEE_BUCKETS[i])
        .unwrap_or(EMPLOYEE_BUCKETS[EMPLOYEE_BUCKETS.len() - 1])
}

/// True when `value` is one of the canonical bucket labels.
pub fn is_bucket(value: &str) -> bool {
    EMPLOYEE_BUCKETS.contains(&value)
}
