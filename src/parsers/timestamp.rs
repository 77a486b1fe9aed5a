//! Matcher for the year-less `Mon D HH:MM:SS` prefix THOR writes at the start
//! of its text log lines.

use regex::Regex;
use std::sync::OnceLock;

fn timestamp_re() -> &'static Regex {
    static TIMESTAMP_RE: OnceLock<Regex> = OnceLock::new();
    TIMESTAMP_RE.get_or_init(|| {
        Regex::new(r"^([A-Z][a-z][a-z])\s{1,2}([0-9]{1,2})\s([0-9]{2}:[0-9]{2}:[0-9]{2})")
            .expect("valid timestamp regex")
    })
}

/// A timestamp found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampMatch<'a> {
    /// Capitalized three-letter abbreviation, not yet checked against a month table.
    pub month: &'a str,
    pub day: u8,
    /// `HH:MM:SS`
    pub time: &'a str,
    /// Byte length of the matched prefix.
    pub len: usize,
}

pub fn match_timestamp(line: &str) -> Option<TimestampMatch<'_>> {
    let caps = timestamp_re().captures(line)?;
    let whole = caps.get(0)?;
    Some(TimestampMatch {
        month: caps.get(1)?.as_str(),
        day: caps.get(2)?.as_str().parse().ok()?,
        time: caps.get(3)?.as_str(),
        len: whole.end(),
    })
}
