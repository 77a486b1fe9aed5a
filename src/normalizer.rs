//! Rewrites year-less scanner timestamps into `YYYY-MM-DDThh:mm:ssZ`.
//!
//! Output files hold only the lines that carried a timestamp; all other
//! lines are dropped.

use crate::config::TimestampConfig;
use crate::error::ConvertError;
use crate::parsers::lines_with_terminators;
use crate::parsers::timestamp::match_timestamp;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What happened to a single input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written { output: PathBuf, lines: usize },
    NoMatches,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub files_seen: usize,
    pub files_written: usize,
    pub files_without_matches: usize,
    /// Directory entries that were not regular files.
    pub entries_skipped: usize,
    pub lines_converted: usize,
}

/// Rewrite the timestamp at the start of `line`, keeping the rest of the
/// line (terminator included). `Ok(None)` when the line has no timestamp.
pub fn normalize_line(line: &str, config: &TimestampConfig) -> Result<Option<String>, ConvertError> {
    let Some(ts) = match_timestamp(line) else {
        return Ok(None);
    };
    let month = config
        .months
        .number(ts.month)
        .ok_or_else(|| ConvertError::UnknownMonth {
            month: ts.month.to_owned(),
        })?;

    Ok(Some(format!(
        "{}-{:02}-{:02}T{}Z{}",
        config.year,
        month,
        ts.day,
        ts.time,
        &line[ts.len..]
    )))
}

/// The converted subset of `text`'s lines, in their original order.
pub fn normalize_text(text: &str, config: &TimestampConfig) -> Result<Vec<String>, ConvertError> {
    let mut converted = Vec::new();
    for (idx, line) in lines_with_terminators(text).enumerate() {
        if let Some(new_line) = normalize_line(line, config).map_err(|e| e.at_line(idx + 1))? {
            converted.push(new_line);
        }
    }
    Ok(converted)
}

pub fn output_path(input: &Path, config: &TimestampConfig) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(&config.extension);
    PathBuf::from(name)
}

pub fn normalize_file(path: &Path, config: &TimestampConfig) -> Result<FileOutcome, ConvertError> {
    let text = fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let converted = normalize_text(&text, config).map_err(|e| e.in_file(path))?;

    if converted.is_empty() {
        warn!("Not a single timestamp match in file {}", path.display());
        return Ok(FileOutcome::NoMatches);
    }

    let output = output_path(path, config);
    debug!("Writing file {}", output.display());
    fs::write(&output, converted.concat()).map_err(|source| ConvertError::Io {
        path: output.clone(),
        source,
    })?;

    Ok(FileOutcome::Written {
        output,
        lines: converted.len(),
    })
}

/// Normalize every regular file directly inside `dir`, in file-name order.
/// The first fatal error stops the run; outputs written before it stay.
pub fn normalize_dir(dir: &Path, config: &TimestampConfig) -> Result<NormalizeSummary, ConvertError> {
    let io_err = |source| ConvertError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort();

    let mut summary = NormalizeSummary::default();
    for path in entries {
        if !path.is_file() {
            debug!("Skipping element {} (not a file)", path.display());
            summary.entries_skipped += 1;
            continue;
        }
        debug!("Processing {}", path.display());
        summary.files_seen += 1;
        match normalize_file(&path, config)? {
            FileOutcome::Written { lines, .. } => {
                summary.files_written += 1;
                summary.lines_converted += lines;
            }
            FileOutcome::NoMatches => summary.files_without_matches += 1,
        }
    }

    info!(
        files = summary.files_seen,
        written = summary.files_written,
        without_matches = summary.files_without_matches,
        lines = summary.lines_converted,
        "timestamp conversion finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> TimestampConfig {
        TimestampConfig::new("2023")
    }

    #[test]
    fn pads_single_digit_day() {
        let out = normalize_line("Jan 5 10:00:00 host THOR: msg\n", &cfg()).unwrap();
        assert_eq!(out.as_deref(), Some("2023-01-05T10:00:00Z host THOR: msg\n"));
    }

    #[test]
    fn keeps_two_digit_day() {
        let out = normalize_line("Jan 15 10:00:00 host", &cfg()).unwrap();
        assert_eq!(out.as_deref(), Some("2023-01-15T10:00:00Z host"));
    }

    #[test]
    fn double_space_before_day() {
        let out = normalize_line("Dec  1 08:30:00 x\r\n", &cfg()).unwrap();
        assert_eq!(out.as_deref(), Some("2023-12-01T08:30:00Z x\r\n"));
    }

    #[test]
    fn only_the_leading_timestamp_is_rewritten() {
        let line = "Mar 3 01:02:03 seen Mar 3 01:02:03 again\n";
        let out = normalize_line(line, &cfg()).unwrap().unwrap();
        assert_eq!(out, "2023-03-03T01:02:03Z seen Mar 3 01:02:03 again\n");
    }

    #[test]
    fn year_is_spliced_verbatim() {
        let out = normalize_line("Feb 2 00:00:00 x", &TimestampConfig::new("20xx")).unwrap();
        assert_eq!(out.as_deref(), Some("20xx-02-02T00:00:00Z x"));
    }

    #[test]
    fn line_without_timestamp_is_none() {
        assert_eq!(normalize_line("THOR scan started\n", &cfg()).unwrap(), None);
    }

    #[test]
    fn unknown_month_is_fatal() {
        let err = normalize_line("Foo 1 10:00:00 x", &cfg()).unwrap_err();
        assert!(matches!(err, ConvertError::UnknownMonth { ref month } if month == "Foo"));
    }

    #[test]
    fn text_drops_unmatched_lines() {
        let text = "header line\nJan 5 10:00:00 a\nnoise\nFeb 15 11:00:00 b";
        let lines = normalize_text(text, &cfg()).unwrap();
        assert_eq!(
            lines,
            vec!["2023-01-05T10:00:00Z a\n", "2023-02-15T11:00:00Z b"]
        );
    }

    #[test]
    fn text_reports_line_of_unknown_month() {
        let err = normalize_text("Jan 5 10:00:00 a\nAbc 5 10:00:00 b\n", &cfg()).unwrap_err();
        assert!(matches!(err, ConvertError::Line { line: 2, .. }));
    }

    #[test]
    fn output_path_appends_extension() {
        let cfg = cfg().with_extension(".iso");
        assert_eq!(
            output_path(Path::new("/tmp/scan.txt"), &cfg),
            PathBuf::from("/tmp/scan.txt.iso")
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];

        proptest! {
            #[test]
            fn normalizes_every_month_day_and_time(
                month_idx in 0usize..12,
                day in 1u8..=31,
                h in 0u8..24,
                m in 0u8..60,
                s in 0u8..60,
                rest in "[ -~]{0,40}",
            ) {
                let time = format!("{h:02}:{m:02}:{s:02}");
                let line = format!("{} {} {} {}", MONTHS[month_idx], day, time, rest);
                let out = normalize_line(&line, &TimestampConfig::new("1999")).unwrap();
                let expected = format!("1999-{:02}-{:02}T{}Z {}", month_idx + 1, day, time, rest);
                prop_assert_eq!(out, Some(expected));
            }
        }
    }
}
