//! Trial view data model.
//!
//! One (participant, image) pairing. Built by the pipeline from the rows of a
//! participant file, consumed by classification and aggregation, then dropped;
//! only its `HitSummary` survives.

use crate::aoi::Side;
use crate::geometry::ScreenGeometry;
use crate::models::GazeSample;

#[derive(Debug, Clone)]
pub struct TrialView {
    pub image: String,
    /// Layout side exactly as recorded; resolved with `Side::parse`.
    pub hoo_position: String,
    pub geometry: ScreenGeometry,
    pub samples: Vec<GazeSample>,
}

impl TrialView {
    pub fn new(image: String, hoo_position: String, geometry: ScreenGeometry) -> Self {
        Self {
            image,
            hoo_position,
            geometry,
            samples: Vec::new(),
        }
    }

    pub fn side(&self) -> Option<Side> {
        Side::parse(&self.hoo_position)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}
