//! Gaze sample data model.
//!
//! One raw `(time, x, y)` triple from a trial's gaze array, in the
//! participant's own screen pixels.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeSample {
    pub time_point: f64,
    pub x: f64,
    pub y: f64,
}

impl GazeSample {
    pub fn new(time_point: f64, x: f64, y: f64) -> Self {
        Self { time_point, x, y }
    }
}
