//! AOI table: named rectangles in reference-display pixels.
//!
//! Loaded once per run and never mutated. Row order is load order and is
//! significant: when two rectangles overlap, the earlier row wins.

use std::{fmt, fs::File, io::Read, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use crate::geometry::{to_unit_space, REFERENCE_GEOMETRY};

const ENABLE_LOGS: bool = true;

/// Which half of the screen the stimulus layout occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }

    /// Case-insensitive exact match. Anything else is `None`.
    pub fn parse(value: &str) -> Option<Side> {
        if value.eq_ignore_ascii_case("left") {
            Some(Side::Left)
        } else if value.eq_ignore_ascii_case("right") {
            Some(Side::Right)
        } else {
            None
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One AOI row, boundaries in [`REFERENCE_GEOMETRY`] pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct AoiRectangle {
    pub name: String,
    pub side: Side,
    pub left_x_min: f64,
    pub right_x_max: f64,
    pub top_y_min: f64,
    pub bottom_y_max: f64,
}

/// Rectangle edges after normalization. `top > bottom` since unit y points up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl UnitRect {
    fn from_reference(aoi: &AoiRectangle) -> Self {
        let w = REFERENCE_GEOMETRY.width_px;
        let h = REFERENCE_GEOMETRY.height_px;
        let (left, _) = to_unit_space(aoi.left_x_min, 0.0, w, h);
        let (right, _) = to_unit_space(aoi.right_x_max, 0.0, w, h);
        let (_, top) = to_unit_space(0.0, aoi.top_y_min, w, h);
        let (_, bottom) = to_unit_space(0.0, aoi.bottom_y_max, w, h);
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.left <= x && x <= self.right && self.bottom <= y && y <= self.top
    }
}

/// Raw CSV row. Boundaries stay strings so a bad cell can be reported by
/// column and row instead of a generic deserialize error.
#[derive(Debug, Deserialize)]
struct AoiRecord {
    #[serde(rename = "AOI")]
    name: String,
    #[serde(rename = "HOO_position")]
    side: String,
    left_x_min: String,
    right_x_max: String,
    top_y_min: String,
    bottom_y_max: String,
}

#[derive(Debug, Clone)]
pub struct AoiTable {
    rectangles: Vec<AoiRectangle>,
    unit_rects: Vec<UnitRect>,
}

impl AoiTable {
    /// Build a table from already-typed rows. Non-finite boundaries reject
    /// the whole table.
    pub fn new(rectangles: Vec<AoiRectangle>) -> Result<Self> {
        if rectangles.is_empty() {
            bail!("AOI table has no rows");
        }

        for (idx, aoi) in rectangles.iter().enumerate() {
            let edges = [
                ("left_x_min", aoi.left_x_min),
                ("right_x_max", aoi.right_x_max),
                ("top_y_min", aoi.top_y_min),
                ("bottom_y_max", aoi.bottom_y_max),
            ];
            for (column, value) in edges {
                if !value.is_finite() {
                    bail!("AOI row {} ({}): {column} is not finite", idx + 1, aoi.name);
                }
            }
        }

        let unit_rects = rectangles.iter().map(UnitRect::from_reference).collect();
        Ok(Self {
            rectangles,
            unit_rects,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open AOI table {}", path.display()))?;
        let table = Self::from_reader(file)
            .with_context(|| format!("Failed to load AOI table {}", path.display()))?;
        crate::log_info!(
            "Loaded AOI table {} with {} AOIs",
            path.display(),
            table.len()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut rectangles = Vec::new();
        for (idx, record) in csv_reader.deserialize::<AoiRecord>().enumerate() {
            let row = idx + 1;
            let record = record.with_context(|| format!("AOI row {row} is malformed"))?;
            let side = Side::parse(&record.side).ok_or_else(|| {
                anyhow!(
                    "AOI row {row} ({}): unknown HOO_position '{}'",
                    record.name,
                    record.side
                )
            })?;

            rectangles.push(AoiRectangle {
                left_x_min: parse_edge(&record.left_x_min, "left_x_min", row)?,
                right_x_max: parse_edge(&record.right_x_max, "right_x_max", row)?,
                top_y_min: parse_edge(&record.top_y_min, "top_y_min", row)?,
                bottom_y_max: parse_edge(&record.bottom_y_max, "bottom_y_max", row)?,
                name: record.name,
                side,
            });
        }

        Self::new(rectangles)
    }

    pub fn len(&self) -> usize {
        self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    pub fn rectangles(&self) -> &[AoiRectangle] {
        &self.rectangles
    }

    /// Rectangles for one layout side, in table order, paired with their
    /// unit-space edges.
    pub fn candidates(&self, side: Side) -> impl Iterator<Item = (&AoiRectangle, &UnitRect)> {
        self.rectangles
            .iter()
            .zip(self.unit_rects.iter())
            .filter(move |(aoi, _)| aoi.side == side)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rectangles.iter().map(|aoi| aoi.name.as_str())
    }
}

fn parse_edge(raw: &str, column: &str, row: usize) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("AOI row {row}: {column} '{raw}' is not numeric"))?;
    if !value.is_finite() {
        bail!("AOI row {row}: {column} '{raw}' is not finite");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
AOI , HOO_position ,left_x_min,right_x_max,top_y_min,bottom_y_max
H_N1,Left,100,300,200,400
H_D1,left,100,300,500,700
H_N1,Right,2000,2200,200,400
";

    #[test]
    fn test_load_preserves_row_order_and_sides() {
        let table = AoiTable::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["H_N1", "H_D1", "H_N1"]);
        assert_eq!(table.rectangles()[1].side, Side::Left);
        assert_eq!(table.rectangles()[2].side, Side::Right);
    }

    #[test]
    fn test_candidates_filter_by_side() {
        let table = AoiTable::from_reader(TABLE.as_bytes()).unwrap();
        let left: Vec<&str> = table
            .candidates(Side::Left)
            .map(|(aoi, _)| aoi.name.as_str())
            .collect();
        assert_eq!(left, vec!["H_N1", "H_D1"]);
        assert_eq!(table.candidates(Side::Right).count(), 1);
    }

    #[test]
    fn test_non_numeric_boundary_rejects_table() {
        let bad = "AOI,HOO_position,left_x_min,right_x_max,top_y_min,bottom_y_max\n\
                   H_N1,Left,100,abc,200,400\n";
        let err = AoiTable::from_reader(bad.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("right_x_max"));
    }

    #[test]
    fn test_missing_boundary_rejects_table() {
        let bad = "AOI,HOO_position,left_x_min,right_x_max,top_y_min,bottom_y_max\n\
                   H_N1,Left,100,300,,400\n";
        assert!(AoiTable::from_reader(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_column_rejects_table() {
        let bad = "AOI,HOO_position,left_x_min,right_x_max,top_y_min\n\
                   H_N1,Left,100,300,200\n";
        assert!(AoiTable::from_reader(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_nan_boundary_rejects_table() {
        let bad = "AOI,HOO_position,left_x_min,right_x_max,top_y_min,bottom_y_max\n\
                   H_N1,Left,NaN,300,200,400\n";
        assert!(AoiTable::from_reader(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let empty = "AOI,HOO_position,left_x_min,right_x_max,top_y_min,bottom_y_max\n";
        assert!(AoiTable::from_reader(empty.as_bytes()).is_err());
    }

    #[test]
    fn test_side_parse_is_case_insensitive_and_exact() {
        assert_eq!(Side::parse("LEFT"), Some(Side::Left));
        assert_eq!(Side::parse("rIgHt"), Some(Side::Right));
        assert_eq!(Side::parse(" left"), None);
        assert_eq!(Side::parse("Center"), None);
    }

    #[test]
    fn test_unit_rect_edges() {
        let aoi = AoiRectangle {
            name: "full".into(),
            side: Side::Left,
            left_x_min: 0.0,
            right_x_max: REFERENCE_GEOMETRY.width_px,
            top_y_min: 0.0,
            bottom_y_max: REFERENCE_GEOMETRY.height_px,
        };
        let rect = UnitRect::from_reference(&aoi);
        assert!((rect.top - 1.0).abs() < 1e-12);
        assert!((rect.bottom + 1.0).abs() < 1e-12);
        assert!(rect.contains(0.0, 0.0));
    }
}
