//! Reads one participant's trial file into per-image `TrialView`s.
//!
//! Each row carries the image name, layout side, window size and the raw gaze
//! array for that trial. Rows of the same image are merged into one view.
//! Views come back sorted by image name.

use std::{collections::BTreeMap, io::Read};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::geometry::ScreenGeometry;
use crate::models::TrialView;
use crate::pipeline::gaze_array::parse_gaze_array;

const ENABLE_LOGS: bool = true;

const REQUIRED_COLUMNS: [&str; 5] = [
    "Image",
    "HOO_Position",
    "win_width",
    "win_height",
    "TaskGazeArray",
];

#[derive(Debug, Deserialize)]
struct TrialRecord {
    #[serde(rename = "Image")]
    image: String,
    #[serde(rename = "HOO_Position")]
    hoo_position: String,
    win_width: String,
    win_height: String,
    #[serde(rename = "TaskGazeArray")]
    task_gaze_array: String,
}

/// Views plus what had to be thrown away on the way in.
#[derive(Debug, Default)]
pub struct TrialReadout {
    pub trials: Vec<TrialView>,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub points_dropped: usize,
}

pub fn read_trials<R: Read>(reader: R) -> Result<TrialReadout> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().context("Failed to read header row")?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            bail!("missing required column '{column}'");
        }
    }

    let mut readout = TrialReadout::default();
    let mut by_image: BTreeMap<String, TrialView> = BTreeMap::new();

    for (idx, record) in csv_reader.deserialize::<TrialRecord>().enumerate() {
        let row = idx + 1;
        readout.rows_read += 1;

        let result = record
            .with_context(|| format!("row {row} is malformed"))
            .and_then(|record| merge_row(&mut by_image, record, &mut readout.points_dropped));

        if let Err(err) = result {
            crate::log_warn!("Skipping row {row}: {err:#}");
            readout.rows_skipped += 1;
        }
    }

    readout.trials = by_image.into_values().collect();
    Ok(readout)
}

fn merge_row(
    by_image: &mut BTreeMap<String, TrialView>,
    record: TrialRecord,
    points_dropped: &mut usize,
) -> Result<()> {
    let geometry = ScreenGeometry::new(
        parse_dimension(&record.win_width, "win_width")?,
        parse_dimension(&record.win_height, "win_height")?,
    );
    let parsed = parse_gaze_array(&record.task_gaze_array)
        .with_context(|| format!("image {}", record.image))?;

    let trial = by_image
        .entry(record.image.clone())
        .or_insert_with(|| TrialView::new(record.image.clone(), record.hoo_position.clone(), geometry));

    if trial.geometry != geometry || trial.hoo_position != record.hoo_position {
        bail!(
            "image {} was already seen with a different window size or HOO_Position",
            record.image
        );
    }

    *points_dropped += parsed.dropped_points;
    trial.samples.extend(parsed.samples);
    Ok(())
}

fn parse_dimension(raw: &str, column: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{column} '{raw}' is not numeric"))?;
    if !value.is_finite() || value <= 0.0 {
        bail!("{column} '{raw}' is not a positive size");
    }
    Ok(value)
}
