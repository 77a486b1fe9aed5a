use crate::error::ConvertError;
use chrono::Month;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_EXTENSION: &str = ".new";

/// Three-letter English month abbreviations mapped to month numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTable {
    numbers: HashMap<String, u32>,
}

impl MonthTable {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            numbers: pairs.into_iter().map(|(abbrev, n)| (abbrev.into(), n)).collect(),
        }
    }

    pub fn number(&self, abbrev: &str) -> Option<u32> {
        self.numbers.get(abbrev).copied()
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

impl Default for MonthTable {
    fn default() -> Self {
        Self::from_pairs((1..=12u8).filter_map(|n| {
            let month = Month::try_from(n).ok()?;
            Some((&month.name()[..3], month.number_from_month()))
        }))
    }
}

/// Settings for one timestamp normalization run.
#[derive(Debug, Clone)]
pub struct TimestampConfig {
    /// Spliced verbatim into every rewritten timestamp.
    pub year: String,
    /// Appended to the input file name to form the output file name.
    pub extension: String,
    pub months: MonthTable,
}

impl TimestampConfig {
    pub fn new(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            months: MonthTable::default(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Copy `source`'s value in front of `target`'s value, pipe-separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrependRule {
    pub source: String,
    pub target: String,
}

/// Which scan records get projected, and how.
///
/// Allow-list entries are compared against the lower-cased record value, so
/// they must themselves be lower case. [`ProjectionPolicy::from_json_file`]
/// takes care of that for loaded policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionPolicy {
    pub csv_fields: Vec<String>,
    pub modules: Vec<String>,
    pub levels: Vec<String>,
    pub prepend: Vec<PrependRule>,
}

impl Default for ProjectionPolicy {
    fn default() -> Self {
        Self {
            csv_fields: ["md5", "file", "score", "created", "modified", "accessed"]
                .map(String::from)
                .to_vec(),
            modules: ["filescan", "archivescan"].map(String::from).to_vec(),
            levels: ["alert", "warning", "notice"].map(String::from).to_vec(),
            prepend: vec![PrependRule {
                source: "archive".to_string(),
                target: "file".to_string(),
            }],
        }
    }
}

impl ProjectionPolicy {
    /// Load a policy from a JSON file. Keys left out keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConvertError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy: Self = serde_json::from_str(&raw).map_err(|source| ConvertError::Policy {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(policy.normalized())
    }

    fn normalized(mut self) -> Self {
        for entry in self.modules.iter_mut().chain(self.levels.iter_mut()) {
            *entry = entry.to_lowercase();
        }
        self
    }
}
