//! tracing-subscriber setup shared by both binaries.
//!
//! Console output always goes to stderr so that stdout stays free for CSV
//! rows. Every line reads `[LEVEL] message`, the level padded to five
//! characters, with no timestamp or target.

use anyhow::{Context, Result};
use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// `[WARN ] message key=value`
pub struct BracketLevel;

impl<S, N> FormatEvent<S, N> for BracketLevel
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "[{:<5}] ", event.metadata().level().as_str())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions<'a> {
    /// Also append log lines to this file.
    pub file: Option<&'a Path>,
    pub debug: bool,
}

/// Install the global subscriber. `RUST_LOG` overrides the level picked
/// from `debug`.
pub fn init(options: LogOptions<'_>) -> Result<()> {
    let default_level = if options.debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .event_format(BracketLevel);

    let file_layer = match options.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .event_format(BracketLevel),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {}", e))?;
    Ok(())
}
