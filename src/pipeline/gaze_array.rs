//! Parser for the raw gaze-array cell of one trial row.
//!
//! The cell holds a bracketed list of `[time, x, y]` triples, sometimes
//! wrapped in an extra pair of double quotes and sometimes written with tuple
//! parentheses. A cell that cannot be read as a list rejects the whole row;
//! a single malformed triple only drops that point.

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::models::GazeSample;

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedGazeArray {
    pub samples: Vec<GazeSample>,
    pub dropped_points: usize,
}

pub fn parse_gaze_array(raw: &str) -> Result<ParsedGazeArray> {
    let trimmed = raw.trim().trim_matches('"').trim();
    if trimmed.is_empty() {
        bail!("gaze array is empty");
    }

    let normalized: String = trimmed
        .chars()
        .map(|c| match c {
            '(' => '[',
            ')' => ']',
            other => other,
        })
        .collect();

    let points: Vec<Value> =
        serde_json::from_str(&normalized).context("gaze array is not a list of points")?;

    let mut parsed = ParsedGazeArray::default();
    for (idx, point) in points.iter().enumerate() {
        match parse_point(point) {
            Some(sample) => parsed.samples.push(sample),
            None => {
                crate::log_warn!("Dropping malformed gaze point #{idx}: {point}");
                parsed.dropped_points += 1;
            }
        }
    }
    Ok(parsed)
}

fn parse_point(point: &Value) -> Option<GazeSample> {
    let [time_point, x, y] = point.as_array()?.as_slice() else {
        return None;
    };
    let time_point = finite(time_point)?;
    let x = finite(x)?;
    let y = finite(y)?;
    Some(GazeSample::new(time_point, x, y))
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}
