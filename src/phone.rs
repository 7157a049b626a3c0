use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// National prefix (`+7`, `7` or `8`), then ten digits grouped 3-3-2-2.
/// Groups may be separated by a space or a dash; the first group may sit in
/// parentheses.
const PHONE_PATTERN: &str =
    r"^(\+7|7|8)[\s-]?(?:\((\d{3})\)|(\d{3}))[\s-]?(\d{3})[\s-]?(\d{2})[\s-]?(\d{2})$";

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));

/// How an accepted phone number is written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneFormat {
    /// `7XXXXXXXXXX`; a leading `8` is rewritten to `7`.
    #[default]
    Canonical,
    /// Separators and `+` stripped, national prefix kept as written.
    DigitsOnly,
}

/// Returns the normalized number, or `None` when `input` is not a phone
/// number.
pub fn normalize(input: &str, format: PhoneFormat) -> Option<String> {
    let captures = PHONE_REGEX.captures(input)?;
    let prefix = captures.get(1)?.as_str();
    let area = captures.get(2).or_else(|| captures.get(3))?.as_str();

    let mut out = String::with_capacity(11);
    match format {
        PhoneFormat::Canonical => out.push('7'),
        PhoneFormat::DigitsOnly => out.push_str(prefix.trim_start_matches('+')),
    }
    out.push_str(area);
    for group in 4..=6 {
        out.push_str(captures.get(group)?.as_str());
    }
    Some(out)
}
