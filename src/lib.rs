//! Converters for THOR scanner logs.
//!
//! - [`normalizer`] rewrites year-less text log timestamps to ISO-8601.
//! - [`projector`] filters a JSON log and projects it to CSV.

pub mod config;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod output;
pub mod parsers;
pub mod projector;

pub use config::{MonthTable, PrependRule, ProjectionPolicy, TimestampConfig};
pub use error::ConvertError;
pub use normalizer::{FileOutcome, NormalizeSummary, normalize_dir, normalize_file};
pub use output::{RowSink, create_sink};
pub use projector::{ProjectionRow, ProjectionStats, project_file};
