use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// A time attribute exactly as written in the scene (`3`, `"3 s"`, `"end"`, ...).
pub enum TimeValue {
    /// Plain number of seconds.
    Seconds(f64),
    /// String literal, parsed with [`parse_time_str`].
    Literal(String),
    /// Any other JSON value; always parses to zero.
    Other(serde_json::Value),
}

impl TimeValue {
    /// True for the `"end"` sentinel, which [`parse_time`] maps to zero.
    pub fn is_end(&self) -> bool {
        matches!(self, Self::Literal(s) if s.trim().eq_ignore_ascii_case("end"))
    }

    /// Value in seconds, see [`parse_time`].
    pub fn seconds(&self) -> f64 {
        parse_time(self)
    }
}

impl From<f64> for TimeValue {
    fn from(v: f64) -> Self {
        Self::Seconds(v)
    }
}

impl From<&str> for TimeValue {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_owned())
    }
}

/// Convert a time attribute to seconds.
///
/// Numbers pass through unchanged. Strings go through [`parse_time_str`]. Anything else
/// is zero. Never fails.
pub fn parse_time(value: &TimeValue) -> f64 {
    match value {
        TimeValue::Seconds(v) => *v,
        TimeValue::Literal(s) => parse_time_str(s),
        TimeValue::Other(_) => 0.0,
    }
}

/// Parse the leading decimal number of a time literal such as `"2.5 s"` or `"4"`.
///
/// Leading whitespace is skipped and a trailing unit suffix is ignored. Returns zero when
/// the literal does not start with a digit, which includes the `"end"` sentinel.
pub fn parse_time_str(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0usize;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == 0 {
        return 0.0;
    }

    // fractional part only counts when a digit follows the dot
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/literal.rs"]
mod tests;
