//! URL splitting and the features computed from the URL text alone.
//!
//! Splitting works on the raw string and never normalizes it: `http://a.com` has an
//! empty path, and hostnames keep their unicode form.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{FeatureName, FeatureRecord};

static IP_ADDRESS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+\.\d+").expect("valid ip regex"));

pub const SENSITIVE_WORDS: [&str; 7] = [
    "login", "password", "verify", "update", "account", "security", "reset",
];

pub const BRAND_NAMES: [&str; 13] = [
    "paypal",
    "google",
    "amazon",
    "microsoft",
    "ebay",
    "apple",
    "bankofamerica",
    "facebook",
    "gitlab",
    "nordvpn",
    "shopify",
    "wellsfargo",
    "netflix",
];

/// Components of a URL or link reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlParts<'a> {
    /// Lowercased; empty when the reference is relative.
    pub scheme: String,
    pub netloc: &'a str,
    /// Path without the `;params` of its last segment.
    pub path: &'a str,
    pub params: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

impl<'a> UrlParts<'a> {
    pub fn split(raw: &'a str) -> Self {
        // leading C0 controls and spaces never belong to a reference
        let raw = raw.trim_start_matches(|c: char| c <= ' ');
        let (scheme, mut rest) = split_scheme(raw);

        let mut netloc = "";
        if let Some(after) = rest.strip_prefix("//") {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            netloc = &after[..end];
            rest = &after[end..];
        }

        let (rest, fragment) = rest.split_once('#').unwrap_or((rest, ""));
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        let (path, params) = if PARAM_SCHEMES.contains(&scheme.as_str()) {
            split_params(path)
        } else {
            (path, "")
        };

        Self {
            scheme,
            netloc,
            path,
            params,
            query,
            fragment,
        }
    }

    /// Lowercased host without credentials, port or IPv6 brackets.
    pub fn hostname(&self) -> Option<String> {
        let host_port = match self.netloc.rsplit_once('@') {
            Some((_, host_port)) => host_port,
            None => self.netloc,
        };
        let host = if let Some(bracketed) = host_port.strip_prefix('[') {
            bracketed.split(']').next().unwrap_or_default()
        } else {
            host_port.split(':').next().unwrap_or_default()
        };
        if host.is_empty() {
            None
        } else {
            Some(host.to_lowercase())
        }
    }
}

/// Schemes whose last path segment may carry `;params`.
const PARAM_SCHEMES: [&str; 16] = [
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtsps", "rtspu",
    "sip", "sips", "mms", "sftp", "tel",
];

fn split_params(path: &str) -> (&str, &str) {
    let segment_start = path.rfind('/').unwrap_or(0);
    match path[segment_start..].find(';') {
        Some(offset) => {
            let idx = segment_start + offset;
            (&path[..idx], &path[idx + 1..])
        }
        None => (path, ""),
    }
}

fn split_scheme(raw: &str) -> (String, &str) {
    if let Some(idx) = raw.find(':') {
        let candidate = &raw[..idx];
        let valid = candidate
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if valid {
            return (candidate.to_ascii_lowercase(), &raw[idx + 1..]);
        }
    }
    (String::new(), raw)
}

/// Host a link reference points at, if it names one.
pub fn host_of(reference: &str) -> Option<String> {
    UrlParts::split(reference).hostname()
}

pub fn is_ip_address(hostname: &str) -> bool {
    IP_ADDRESS_REGEX.is_match(hostname)
}

pub fn count_sensitive_words(url: &str) -> usize {
    let lowered = url.to_lowercase();
    SENSITIVE_WORDS
        .iter()
        .filter(|word| lowered.contains(*word))
        .count()
}

pub fn has_embedded_brand(hostname: &str) -> bool {
    let lowered = hostname.to_lowercase();
    BRAND_NAMES.iter().any(|brand| lowered.contains(brand))
}

pub fn count_query_components(query: &str) -> usize {
    if query.is_empty() {
        0
    } else {
        query.split('&').count()
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn count_char(value: &str, needle: char) -> usize {
    value.chars().filter(|ch| *ch == needle).count()
}

/// Fills every column that depends only on the URL string.
pub fn apply_lexical_features(record: &mut FeatureRecord, url: &str) {
    let parts = UrlParts::split(url);
    let hostname = parts.hostname().unwrap_or_default();

    record.set_count(
        FeatureName::NumNumericChars,
        url.chars().filter(char::is_ascii_digit).count(),
    );
    record.set_count(FeatureName::NumDash, count_char(url, '-'));
    record.set_count(FeatureName::NumDots, count_char(url, '.'));
    record.set_count(FeatureName::NumAmpersand, count_char(url, '&'));
    record.set_count(FeatureName::NumDashInHostname, count_char(&hostname, '-'));
    record.set_count(FeatureName::PathLength, char_len(parts.path));
    record.set_count(FeatureName::QueryLength, char_len(parts.query));
    record.set_count(FeatureName::PathLevel, count_char(parts.path, '/'));
    record.set_count(FeatureName::UrlLength, char_len(url));
    record.set_count(FeatureName::HostnameLength, char_len(&hostname));
    record.set_count(
        FeatureName::NumQueryComponents,
        count_query_components(parts.query),
    );
    record.set_count(FeatureName::NumSensitiveWords, count_sensitive_words(url));
    record.set_flag(FeatureName::IpAddress, is_ip_address(&hostname));
    record.set_flag(FeatureName::EmbeddedBrandName, has_embedded_brand(&hostname));
}
