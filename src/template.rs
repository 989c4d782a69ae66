//! Header template population

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(timestamp|date)\}").expect("placeholder pattern is valid"));

/// Substitute every `{timestamp}` and `{date}` in `template`
pub fn populate(template: &str, timestamp: &str, date: &str) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "timestamp" => timestamp.to_string(),
            _ => date.to_string(),
        })
        .into_owned()
}
