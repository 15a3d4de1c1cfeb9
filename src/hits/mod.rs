pub mod aggregator;
pub mod config;
pub mod labels;
pub mod types;

pub use aggregator::{aggregate, HitTracker};
pub use config::{FractionPart, FractionParts};
pub use labels::LabelSet;
pub use types::{HitSummary, LabelCounts, LabeledSample};
