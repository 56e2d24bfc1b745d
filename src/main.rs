use std::io::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;

use base64::prelude::*;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::EnvFilter;

use boxpack::{Config, PackingReport, PackingRun, Payload, Strategy};

/// Packs item cuboids into bin cuboids and prints a JSON report.
#[derive(Parser, Debug)]
#[command(name = "boxpack")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with `bins` and `items` catalogs
    #[arg(value_name = "PAYLOAD")]
    payload: PathBuf,

    /// Packing strategy to run
    #[arg(short, long, value_enum, default_value_t = Strategy::Single)]
    strategy: Strategy,

    /// With `multi`, take the smallest unused bin next instead of the next in order
    #[arg(long)]
    prefer_smallest_bins: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit the report as base64-encoded compact JSON
    #[arg(long)]
    base64: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only show errors
    #[arg(short, long)]
    quiet: bool,
}

fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => config_level.parse().unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(get_log_level(args.verbose, args.quiet, &config.logging.level));

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let payload = Payload::load(&args.payload)?;
    let (bins, items) = payload.into_collections(config.catalog.expand_quantity)?;

    let algorithm = args
        .strategy
        .algorithm(args.prefer_smallest_bins, config.ranking.bin_score);
    let report = PackingRun::new(bins, items, config.engine()).execute(algorithm.as_ref())?;

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut output = std::io::BufWriter::with_capacity(65536, output);
    output.write_all(serialize_report(&report, args.base64)?.as_bytes())?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}

fn serialize_report(report: &PackingReport, base64: bool) -> serde_json::Result<String> {
    if base64 {
        Ok(BASE64_STANDARD.encode(serde_json::to_string(report)?))
    } else {
        serde_json::to_string_pretty(report)
    }
}
