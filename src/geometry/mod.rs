//! Screen geometry and the height-normalized coordinate space.
//!
//! AOI rectangles are authored against [`REFERENCE_GEOMETRY`] while gaze
//! samples arrive in each participant's own pixel space. Both are mapped into
//! unit space before comparison: origin at the screen center, y increasing
//! upward, and both axes scaled by half the screen height so the vertical
//! extent is always [-1, 1].

/// Pixel dimensions of one display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    pub width_px: f64,
    pub height_px: f64,
}

/// Resolution the AOI table was authored against.
pub const REFERENCE_GEOMETRY: ScreenGeometry = ScreenGeometry {
    width_px: 3456.0,
    height_px: 2156.0,
};

/// A point in height-normalized unit space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenGeometry {
    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    /// Raw pixel bounds check, inclusive on both edges.
    pub fn contains_px(&self, px: f64, py: f64) -> bool {
        (0.0..=self.width_px).contains(&px) && (0.0..=self.height_px).contains(&py)
    }

    pub fn to_unit(&self, px: f64, py: f64) -> UnitPoint {
        let (x, y) = to_unit_space(px, py, self.width_px, self.height_px);
        UnitPoint { x, y }
    }
}

/// Map a pixel coordinate into unit space.
///
/// `xu = (px - w/2) / (h/2)` and `yu = -(py - h/2) / (h/2)`.
pub fn to_unit_space(px: f64, py: f64, screen_width: f64, screen_height: f64) -> (f64, f64) {
    let half_height = screen_height / 2.0;
    let xu = (px - screen_width / 2.0) / half_height;
    let yu = -(py - half_height) / half_height;
    (xu, yu)
}
