use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gazehits_lib::settings::PipelineSettings;
use gazehits_lib::utils::logging;

/// Summarise per-image AOI hits from raw eye-tracking trial files.
#[derive(Parser)]
#[command(name = "gazehits", version)]
struct Cli {
    /// AOI table (CSV in reference-display pixels)
    #[arg(long)]
    aois: Option<PathBuf>,
    /// Directory for per-participant summary CSVs
    #[arg(long = "out")]
    output_dir: Option<PathBuf>,
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write run stats as JSON here
    #[arg(long)]
    stats: Option<PathBuf>,
    /// Process files one at a time
    #[arg(long)]
    sequential: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
    /// Participant trial files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(logging::level_for(cli.verbose, cli.quiet));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = PipelineSettings::load(cli.config.as_deref())?;
    if cli.aois.is_some() {
        settings.aois_path = cli.aois;
    }
    if cli.output_dir.is_some() {
        settings.output_dir = cli.output_dir;
    }
    if cli.stats.is_some() {
        settings.stats_path = cli.stats;
    }
    if cli.sequential {
        settings.parallel = false;
    }

    gazehits_lib::run(&settings, &cli.inputs)?;
    Ok(())
}
