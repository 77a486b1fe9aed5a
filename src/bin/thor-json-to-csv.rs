use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thorconv::logging::{self, LogOptions};
use thorconv::{ProjectionPolicy, create_sink, project_file};

/// THOR JSON to CSV Converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file produced by a THOR scan
    #[arg(short = 'i', value_name = "input")]
    input: Option<String>,

    /// Output file name of the CSV (default: output to command line only)
    #[arg(short = 'o', value_name = "output")]
    output: Option<String>,

    /// Show/print CSV header line
    #[arg(long)]
    showheader: bool,

    /// JSON file overriding fields, modules, levels or prepend rules
    #[arg(short = 'c', long, value_name = "policy")]
    config: Option<PathBuf>,

    /// Debug output (stderr)
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(input) = args.input.clone().filter(|i| !i.is_empty()) else {
        let _ = Args::command().print_help();
        return ExitCode::from(1);
    };

    if let Err(err) = logging::init(LogOptions {
        file: None,
        debug: args.debug,
    }) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    match run(Path::new(&input), &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &Path, args: &Args) -> Result<()> {
    let policy = match &args.config {
        Some(path) => ProjectionPolicy::from_json_file(path)?,
        None => ProjectionPolicy::default(),
    };
    let output = args.output.as_deref().filter(|o| !o.is_empty()).map(Path::new);

    let mut sink = create_sink(output, args.showheader)?;
    if args.showheader {
        sink.write_line(&policy.header())?;
    }
    project_file(input, &policy, &mut sink)
        .with_context(|| format!("conversion of {} aborted", input.display()))?;
    sink.finish()?;
    Ok(())
}
