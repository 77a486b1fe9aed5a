//! Error type shared by both converters.
//!
//! Every variant is fatal: the run stops at the first one. Soft conditions
//! (a file without timestamps, a record outside the allow-lists) are not
//! errors and never show up here.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Reading an input or writing an output file failed.
    #[error("io error: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a projected row to its destination failed.
    #[error("output error: {0}")]
    Output(#[source] std::io::Error),

    /// A line carries a timestamp whose month is not in the month table.
    #[error("unknown month abbreviation '{month}'")]
    UnknownMonth { month: String },

    /// An NDJSON line is not valid JSON.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    /// An NDJSON line is valid JSON but not an object.
    #[error("json value is not an object")]
    NotAnObject,

    /// A projection policy file could not be decoded.
    #[error("invalid policy file: {}: {source}", path.display())]
    Policy {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Line {
        /// 1-based
        line: usize,
        #[source]
        source: Box<ConvertError>,
    },

    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    pub fn at_line(self, line: usize) -> Self {
        ConvertError::Line {
            line,
            source: Box::new(self),
        }
    }

    /// Attach the input file to a content error. I/O and output errors
    /// already say where they happened and pass through unchanged.
    pub fn in_file(self, path: &Path) -> Self {
        match self {
            ConvertError::Io { .. } | ConvertError::Output(_) => self,
            other => ConvertError::File {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with line and file context peeled off.
    pub fn root(&self) -> &ConvertError {
        match self {
            ConvertError::Line { source, .. } | ConvertError::File { source, .. } => source.root(),
            other => other,
        }
    }
}
