use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thorconv::config::DEFAULT_EXTENSION;
use thorconv::logging::{self, LogOptions};
use thorconv::{TimestampConfig, normalize_dir};

/// THOR Timestamp Converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Year to inject
    #[arg(short = 'f', value_name = "year")]
    year: Option<String>,

    /// Logfile
    #[arg(short = 'l', value_name = "logfile", default_value = "thor-ts-converter.log")]
    logfile: PathBuf,

    /// Directory to process
    #[arg(short = 'd', value_name = "directory")]
    directory: Option<String>,

    /// Extension of target files
    #[arg(short = 'e', value_name = "ext", default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Debug output
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = logging::init(LogOptions {
        file: Some(args.logfile.as_path()),
        debug: args.debug,
    }) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    let Some(directory) = args.directory.filter(|d| !d.is_empty()) else {
        tracing::error!("No target directory given (-d)");
        return ExitCode::from(1);
    };
    let Some(year) = args.year.filter(|y| !y.is_empty()) else {
        tracing::error!("No target year set (-f) (use: YYYY format)");
        return ExitCode::from(1);
    };

    let config = TimestampConfig::new(year).with_extension(args.extension);
    match run(Path::new(&directory), &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(directory: &Path, config: &TimestampConfig) -> Result<()> {
    normalize_dir(directory, config)
        .with_context(|| format!("timestamp conversion in {} aborted", directory.display()))?;
    Ok(())
}
