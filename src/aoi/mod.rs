pub mod classifier;
pub mod table;

pub use classifier::{classify, GazeLabel, OUTSIDE_AOIS, OUTSIDE_SCREEN};
pub use table::{AoiRectangle, AoiTable, Side, UnitRect};
