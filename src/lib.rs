pub mod aoi;
pub mod geometry;
pub mod hits;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod settings;
pub mod utils;

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use aoi::AoiTable;
use metrics::RunStats;
use pipeline::Pipeline;
use settings::PipelineSettings;

const ENABLE_LOGS: bool = true;

/// Load the AOI table, summarise every trial file, and report.
///
/// A bad AOI table aborts before any trial is touched. Bad trial files are
/// counted in the returned stats instead.
pub fn run(settings: &PipelineSettings, inputs: &[PathBuf]) -> Result<RunStats> {
    let aois_path = settings
        .aois_path
        .as_deref()
        .ok_or_else(|| anyhow!("no AOI table configured"))?;
    let output_dir = settings
        .output_dir
        .as_deref()
        .ok_or_else(|| anyhow!("no output directory configured"))?;

    crate::log_info!("Starting gaze data processing...");

    let table = AoiTable::from_path(aois_path)?;
    let pipeline = Pipeline::new(table, settings.fraction_parts.clone());
    crate::log_info!("Found {} possible AOI labels", pipeline.labels().len());

    let stats = pipeline.run_batch(inputs, output_dir, settings.parallel)?;
    metrics::log_summary(&stats);

    if let Some(stats_path) = settings.stats_path.as_deref() {
        metrics::write_stats(stats_path, &stats)?;
        crate::log_info!("Run stats written to {}", stats_path.display());
    }

    Ok(stats)
}
