pub mod gaze;
pub mod trial;

pub use gaze::GazeSample;
pub use trial::TrialView;
