use std::fmt;

use crate::aoi::table::{AoiTable, Side};
use crate::geometry::ScreenGeometry;
use crate::models::GazeSample;

pub const OUTSIDE_SCREEN: &str = "Outside_of_Screen";
pub const OUTSIDE_AOIS: &str = "Outside_of_AOIs";

/// Classification outcome for one gaze sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GazeLabel {
    Named(String),
    OutsideScreen,
    OutsideAois,
}

impl GazeLabel {
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, GazeLabel::Named(_))
    }

    /// Column-facing name. Sentinels use their fixed spellings.
    pub fn as_str(&self) -> &str {
        match self {
            GazeLabel::Named(name) => name,
            GazeLabel::OutsideScreen => OUTSIDE_SCREEN,
            GazeLabel::OutsideAois => OUTSIDE_AOIS,
        }
    }
}

impl fmt::Display for GazeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label one gaze sample against the AOIs of `side`.
///
/// The screen-bounds check runs in raw pixels first, so an off-screen point
/// never reaches the AOI test. `side = None` (an unrecognised layout value)
/// has no candidates, so every on-screen point is `OutsideAois`.
pub fn classify(
    sample: &GazeSample,
    geometry: &ScreenGeometry,
    table: &AoiTable,
    side: Option<Side>,
) -> GazeLabel {
    if !geometry.contains_px(sample.x, sample.y) {
        return GazeLabel::OutsideScreen;
    }

    let Some(side) = side else {
        return GazeLabel::OutsideAois;
    };

    let point = geometry.to_unit(sample.x, sample.y);
    table
        .candidates(side)
        .find(|(_, rect)| rect.contains(point.x, point.y))
        .map(|(aoi, _)| GazeLabel::Named(aoi.name.clone()))
        .unwrap_or(GazeLabel::OutsideAois)
}
