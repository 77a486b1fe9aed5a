//! Turns a THOR JSON log into CSV rows.
//!
//! Each line is parsed on its own, filtered by module and level, gets its
//! composite fields filled in, and is projected onto the configured columns.

use crate::config::ProjectionPolicy;
use crate::error::ConvertError;
use crate::output::RowSink;
use crate::parsers::lines_with_terminators;
use crate::parsers::ndjson::ScanRecord;
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::debug;

pub const MISSING_VALUE: &str = "-";

/// One output row, aligned with [`ProjectionPolicy::csv_fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionRow(Vec<String>);

impl ProjectionRow {
    pub fn values(&self) -> &[String] {
        &self.0
    }
}

/// Values are joined with commas as they are. Embedded commas or quotes
/// are not escaped.
impl fmt::Display for ProjectionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionStats {
    pub records: usize,
    pub emitted: usize,
    pub skipped: usize,
}

fn allowed(record: &ScanRecord, key: &str, allow_list: &[String]) -> bool {
    let Some(value) = record.rendered(key) else {
        return false;
    };
    let value = value.to_lowercase();
    allow_list.iter().any(|entry| *entry == value)
}

impl ProjectionPolicy {
    /// Both `module` and `level` must be present and allow-listed.
    pub fn includes(&self, record: &ScanRecord) -> bool {
        allowed(record, "module", &self.modules) && allowed(record, "level", &self.levels)
    }

    /// Apply the prepend rules. Every rule reads the record as it was
    /// before any rule ran, so compositions never chain.
    pub fn compose(&self, record: &mut ScanRecord) {
        let composed: Vec<(&str, String)> = self
            .prepend
            .iter()
            .filter_map(|rule| {
                let source = record.rendered(&rule.source)?;
                let target = record.rendered(&rule.target)?;
                Some((rule.target.as_str(), format!("{source}|{target}")))
            })
            .collect();
        for (target, value) in composed {
            record.set(target, value);
        }
    }

    pub fn project(&self, record: &ScanRecord) -> ProjectionRow {
        ProjectionRow(
            self.csv_fields
                .iter()
                .map(|field| {
                    record
                        .rendered(field)
                        .map_or_else(|| MISSING_VALUE.to_string(), |v| v.into_owned())
                })
                .collect(),
        )
    }

    pub fn header(&self) -> String {
        self.csv_fields.join(",")
    }
}

/// Project every record in `text` into `sink`. A malformed line stops the
/// run; rows emitted before it have already been handed to the sink.
pub fn project_text(
    text: &str,
    policy: &ProjectionPolicy,
    sink: &mut RowSink,
) -> Result<ProjectionStats, ConvertError> {
    let mut stats = ProjectionStats::default();
    for (idx, line) in lines_with_terminators(text).enumerate() {
        let mut record = ScanRecord::from_json_line(line).map_err(|e| e.at_line(idx + 1))?;
        stats.records += 1;

        if !policy.includes(&record) {
            stats.skipped += 1;
            continue;
        }
        policy.compose(&mut record);
        sink.write_line(&policy.project(&record).to_string())?;
        stats.emitted += 1;
    }
    Ok(stats)
}

pub fn project_file(
    path: &Path,
    policy: &ProjectionPolicy,
    sink: &mut RowSink,
) -> Result<ProjectionStats, ConvertError> {
    let io_err = |source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    if file.metadata().map_err(io_err)?.len() == 0 {
        debug!("{} is empty", path.display());
        return Ok(ProjectionStats::default());
    }
    // SAFETY: the input is a bounded local file that is only read for the
    // duration of the run.
    let mmap = unsafe { Mmap::map(&file) }.map_err(io_err)?;
    let text = std::str::from_utf8(&mmap)
        .map_err(|e| io_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    let result = project_text(text, policy, sink).map_err(|e| e.in_file(path));
    let flushed = sink.flush();
    let stats = result?;
    flushed?;

    debug!(
        records = stats.records,
        emitted = stats.emitted,
        skipped = stats.skipped,
        "projected {}",
        path.display()
    );
    Ok(stats)
}
