pub mod gaze_array;
pub mod report;
pub mod trials;

pub use report::SummaryRow;
pub use trials::{read_trials, TrialReadout};

use std::{
    collections::HashSet,
    ffi::OsString,
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use rayon::prelude::*;

use crate::aoi::{classify, AoiTable, GazeLabel};
use crate::hits::{aggregate, FractionParts, LabelSet, LabeledSample};
use crate::metrics::{FileStats, RunStats, StatsCollector};
use crate::models::TrialView;

const ENABLE_LOGS: bool = true;

/// Read-only state shared by every trial of a run.
pub struct Pipeline {
    table: AoiTable,
    labels: LabelSet,
    parts: FractionParts,
}

impl Pipeline {
    pub fn new(table: AoiTable, parts: FractionParts) -> Self {
        let labels = LabelSet::from_table(&table);
        Self {
            table,
            labels,
            parts,
        }
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn classify_trial(&self, trial: &TrialView) -> Vec<LabeledSample> {
        let side = trial.side();
        if side.is_none() {
            crate::log_warn!(
                "Image {}: HOO_Position '{}' matches no AOI side",
                trial.image,
                trial.hoo_position
            );
        }
        trial
            .samples
            .iter()
            .map(|sample| {
                let label = classify(sample, &trial.geometry, &self.table, side);
                LabeledSample::new(sample.time_point, label)
            })
            .collect()
    }

    /// Classify and aggregate one trial. Empty trials yield `None`.
    pub fn summarise_trial(
        &self,
        trial: &TrialView,
        stats: &mut FileStats,
    ) -> Result<Option<SummaryRow>> {
        if trial.is_empty() {
            crate::log_warn!("Image {}: no valid gaze samples, no row written", trial.image);
            stats.trials_skipped_empty += 1;
            return Ok(None);
        }

        let labeled = self.classify_trial(trial);
        for sample in &labeled {
            stats.points_processed += 1;
            match sample.label {
                GazeLabel::OutsideAois => stats.points_outside_aois += 1,
                GazeLabel::OutsideScreen => stats.points_outside_screen += 1,
                GazeLabel::Named(_) => {}
            }
        }

        let summary = aggregate(labeled, &self.labels, &self.parts)
            .with_context(|| format!("Failed to aggregate image {}", trial.image))?;
        stats.trials_summarised += 1;
        crate::log_debug!(
            "Image {}: {} hits, {} new, {} transitions",
            trial.image,
            summary.total_hits_all(),
            summary.new_hits_all(),
            summary.numerator_denominator_transitions
        );

        Ok(Some(SummaryRow {
            image: trial.image.clone(),
            hoo_position: trial.hoo_position.clone(),
            summary,
        }))
    }

    /// Summarise every trial of an already-read participant file.
    pub fn summarise_readout(&self, readout: &TrialReadout) -> Result<(Vec<SummaryRow>, FileStats)> {
        let mut stats = FileStats {
            rows_read: readout.rows_read,
            rows_skipped: readout.rows_skipped,
            points_dropped: readout.points_dropped,
            ..FileStats::default()
        };

        let mut rows = Vec::with_capacity(readout.trials.len());
        for trial in &readout.trials {
            if let Some(row) = self.summarise_trial(trial, &mut stats)? {
                rows.push(row);
            }
        }
        Ok((rows, stats))
    }

    /// One participant file in, one summary file out at `output`.
    pub fn process_participant(&self, input: &Path, output: &Path) -> Result<FileStats> {
        crate::log_info!("Processing file: {}", input.display());

        let file = File::open(input)
            .with_context(|| format!("Failed to open trial file {}", input.display()))?;
        let readout = read_trials(file)
            .with_context(|| format!("Failed to read trial file {}", input.display()))?;
        let (rows, stats) = self.summarise_readout(&readout)?;

        report::write_summary_file(output, &self.labels, &rows)?;

        crate::log_info!(
            "  {} rows ({} skipped), {} points: {} outside AOIs, {} outside screen",
            stats.rows_read,
            stats.rows_skipped,
            stats.points_processed,
            stats.points_outside_aois,
            stats.points_outside_screen
        );
        crate::log_info!("  Saved {} summaries to {}", rows.len(), output.display());
        Ok(stats)
    }

    fn process_planned(&self, input: &Path, output: Result<PathBuf>) -> Result<FileStats> {
        output.and_then(|output| self.process_participant(input, &output))
    }

    /// Process every input file. A failing file is logged and counted; it
    /// never stops the rest of the batch.
    pub fn run_batch(
        &self,
        inputs: &[PathBuf],
        output_dir: &Path,
        parallel: bool,
    ) -> Result<RunStats> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;

        crate::log_info!("Found {} files to process", inputs.len());

        let planned = plan_outputs(inputs, output_dir)?;
        let outcomes: Vec<(&PathBuf, Result<FileStats>)> = if parallel {
            planned
                .into_par_iter()
                .map(|(input, output)| (input, self.process_planned(input, output)))
                .collect()
        } else {
            planned
                .into_iter()
                .map(|(input, output)| (input, self.process_planned(input, output)))
                .collect()
        };

        let mut collector = StatsCollector::new(inputs.len());
        for (input, outcome) in outcomes {
            match outcome {
                Ok(stats) => collector.record_file(&stats),
                Err(err) => {
                    crate::log_error!("Error processing {}: {err:#}", input.display());
                    collector.record_failure();
                }
            }
        }
        Ok(collector.finish())
    }
}

/// Output path for each input: its file name under `output_dir`.
///
/// A second input with an already-claimed file name, or an input that is
/// itself the output path, gets an error instead of a path so nothing is
/// overwritten.
fn plan_outputs<'a>(
    inputs: &'a [PathBuf],
    output_dir: &Path,
) -> Result<Vec<(&'a PathBuf, Result<PathBuf>)>> {
    let canonical_dir = output_dir.canonicalize().with_context(|| {
        format!("Failed to resolve output directory {}", output_dir.display())
    })?;

    let mut claimed: HashSet<OsString> = HashSet::new();
    Ok(inputs
        .iter()
        .map(|input| {
            let output = plan_output(input, output_dir, &canonical_dir, &mut claimed);
            (input, output)
        })
        .collect())
}

fn plan_output(
    input: &Path,
    output_dir: &Path,
    canonical_dir: &Path,
    claimed: &mut HashSet<OsString>,
) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| anyhow!("{} has no file name", input.display()))?;
    if !claimed.insert(file_name.to_os_string()) {
        bail!(
            "another input already writes {}",
            output_dir.join(file_name).display()
        );
    }
    if let Ok(canonical_input) = input.canonicalize() {
        if canonical_input == canonical_dir.join(file_name) {
            bail!("input is its own output path, refusing to overwrite it");
        }
    }
    Ok(output_dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aoi::{AoiRectangle, Side};
    use crate::geometry::ScreenGeometry;
    use crate::models::GazeSample;

    fn pipeline() -> Pipeline {
        let table = AoiTable::new(vec![
            AoiRectangle {
                name: "H_N1".into(),
                side: Side::Left,
                left_x_min: 0.0,
                right_x_max: 1728.0,
                top_y_min: 0.0,
                bottom_y_max: 1078.0,
            },
            AoiRectangle {
                name: "H_D1".into(),
                side: Side::Left,
                left_x_min: 0.0,
                right_x_max: 1728.0,
                top_y_min: 1078.0,
                bottom_y_max: 2156.0,
            },
        ])
        .unwrap();
        Pipeline::new(table, FractionParts::default())
    }

    fn trial(hoo: &str, samples: Vec<GazeSample>) -> TrialView {
        let mut view = TrialView::new("img".into(), hoo.into(), ScreenGeometry::new(3456.0, 2156.0));
        view.samples = samples;
        view
    }

    #[test]
    fn test_summarise_trial_counts_points() {
        let p = pipeline();
        let view = trial(
            "left",
            vec![
                GazeSample::new(2.0, 100.0, 2000.0),
                GazeSample::new(0.0, 100.0, 100.0),
                GazeSample::new(1.0, -5.0, 100.0),
                GazeSample::new(3.0, 3000.0, 100.0),
            ],
        );
        let mut stats = FileStats::default();
        let row = p.summarise_trial(&view, &mut stats).unwrap().unwrap();

        assert_eq!(stats.points_processed, 4);
        assert_eq!(stats.points_outside_screen, 1);
        assert_eq!(stats.points_outside_aois, 1);
        assert_eq!(row.summary.total_hits_all(), 4);
        assert_eq!(row.summary.numerator_denominator_transitions, 1);
        assert_eq!(row.hoo_position, "left");
    }

    #[test]
    fn test_empty_trial_has_no_row() {
        let p = pipeline();
        let mut stats = FileStats::default();
        assert!(p.summarise_trial(&trial("Left", vec![]), &mut stats).unwrap().is_none());
        assert_eq!(stats.trials_skipped_empty, 1);
        assert_eq!(stats.trials_summarised, 0);
    }

    #[test]
    fn test_plan_outputs_rejects_collisions() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        let own_output = out.join("c.csv");
        fs::write(&own_output, "x").unwrap();

        let inputs = vec![
            dir.path().join("a").join("p.csv"),
            dir.path().join("b").join("p.csv"),
            own_output,
            dir.path().join("d.csv"),
        ];
        let planned = plan_outputs(&inputs, &out).unwrap();

        assert_eq!(planned[0].1.as_ref().unwrap(), &out.join("p.csv"));
        assert!(planned[1].1.is_err());
        assert!(planned[2].1.is_err());
        assert_eq!(planned[3].1.as_ref().unwrap(), &out.join("d.csv"));
    }

    #[test]
    fn test_unknown_side_is_all_outside_aois() {
        let p = pipeline();
        let view = trial("Middle", vec![GazeSample::new(0.0, 100.0, 100.0)]);
        let labeled = p.classify_trial(&view);
        assert_eq!(labeled[0].label, GazeLabel::OutsideAois);
    }
}
