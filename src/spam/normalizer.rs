use once_cell::sync::Lazy;
use regex::Regex;

static HYPERLINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+").expect("valid hyperlink regex"));
static PUNCTUATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation regex"));
static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Strips hyperlinks and punctuation, lowercases and collapses whitespace.
pub fn normalize_text(text: &str) -> String {
    let mut current = normalize_once(text);
    // punctuation removal or lowercasing can assemble a fresh `http` run
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(text: &str) -> String {
    let without_links = HYPERLINK_REGEX.replace_all(text, "");
    let without_punct = PUNCTUATION_REGEX.replace_all(&without_links, "");
    let lowered = without_punct.to_lowercase();
    WHITESPACE_REGEX
        .replace_all(&lowered, " ")
        .trim()
        .to_string()
}
