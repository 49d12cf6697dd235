use std::collections::HashSet;

pub const DEFAULT_YEARS: [&str; 6] = ["2020", "2021", "2022", "2023", "2024", "2025"];

pub fn default_years() -> Vec<String> {
    DEFAULT_YEARS.iter().map(|y| y.to_string()).collect()
}

/// A research year as the backend stores it: exactly four ASCII digits.
pub fn is_valid_year(value: &str) -> bool {
    value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit())
}

pub fn parse_year_list_csv(value: &str) -> Result<Vec<String>, String> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err("year list is empty".to_string());
    }
    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for part in raw.split(',') {
        let item = part.trim();
        if item.is_empty() {
            continue;
        }
        if !is_valid_year(item) {
            return Err(format!("invalid year '{item}'"));
        }
        if seen.insert(item.to_string()) {
            out.push(item.to_string());
        }
    }
    if out.is_empty() {
        return Err("year list is empty".to_string());
    }
    Ok(out)
}

/// Checks that `url` is an http(s) URL and strips trailing slashes so paths
/// can be appended with a single `/`.
pub fn normalize_base_url(url: &str) -> Result<String, String> {
    let trimmed = url.trim();
    let parsed = reqwest::Url::parse(trimmed).map_err(|e| format!("invalid URL '{trimmed}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{other}'")),
    }
    let mut normalized = trimmed.to_string();
    while normalized.ends_with('/') {
        normalized.pop();
    }
    Ok(normalized)
}

/// Empty-after-trim becomes `None`.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
