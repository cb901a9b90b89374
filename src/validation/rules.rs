//! Field rules: sanitizers transform the value, validators flag it

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use validator::ValidateLength;

/// Result of one rule: the (possibly transformed) value and an optional error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checked {
    pub value: String,
    pub error: Option<String>,
}

impl Checked {
    pub fn ok(value: String) -> Self {
        Self { value, error: None }
    }

    pub fn fail(value: String, message: &str) -> Self {
        Self {
            value,
            error: Some(message.to_string()),
        }
    }

    fn check(value: String, valid: bool, message: &str) -> Self {
        if valid {
            Self::ok(value)
        } else {
            Self::fail(value, message)
        }
    }
}

pub type Rule = Box<dyn Fn(String) -> Checked + Send + Sync>;

/// Strip leading and trailing whitespace
pub fn trim() -> Rule {
    Box::new(|value| Checked::ok(value.trim().to_string()))
}

/// Replace markup-significant characters with HTML entities
pub fn escape() -> Rule {
    Box::new(|value| Checked::ok(escape_html(&value)))
}

/// At least `min` characters (not bytes)
pub fn min_length(min: u64, message: &'static str) -> Rule {
    Box::new(move |value| {
        let valid = value.validate_length(Some(min), None, None);
        Checked::check(value, valid, message)
    })
}

pub fn max_length(max: u64, message: &'static str) -> Rule {
    Box::new(move |value| {
        let valid = value.validate_length(None, Some(max), None);
        Checked::check(value, valid, message)
    })
}

/// ASCII letters and digits only, at least one
pub fn alphanumeric(message: &'static str) -> Rule {
    Box::new(move |value| {
        let valid = !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric());
        Checked::check(value, valid, message)
    })
}

/// Must parse as an ISO-8601 calendar date (a full timestamp is accepted too)
pub fn iso_date(message: &'static str) -> Rule {
    Box::new(move |value| {
        let valid = parse_date(&value).is_some();
        Checked::check(value, valid, message)
    })
}

/// Must be one of a fixed set of values
pub fn one_of(allowed: &'static [&'static str], message: &'static str) -> Rule {
    Box::new(move |value| {
        let valid = allowed.contains(&value.as_str());
        Checked::check(value, valid, message)
    })
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Parse `YYYY-MM-DD`, or the date part of an ISO-8601 timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
