use crate::aoi::GazeLabel;
use crate::hits::labels::LabelSet;

/// A classified sample, ready for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub time_point: f64,
    pub label: GazeLabel,
}

impl LabeledSample {
    pub fn new(time_point: f64, label: GazeLabel) -> Self {
        Self { time_point, label }
    }
}

/// Per-label counters over a closed label set, in set order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCounts {
    entries: Vec<(GazeLabel, u64)>,
}

impl LabelCounts {
    pub fn zeroed(labels: &LabelSet) -> Self {
        Self {
            entries: labels.iter().map(|label| (label.clone(), 0)).collect(),
        }
    }

    pub(crate) fn increment_at(&mut self, index: usize) {
        self.entries[index].1 += 1;
    }

    /// Count for `label`, 0 when it is not in the set.
    pub fn get(&self, label: &GazeLabel) -> u64 {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GazeLabel, u64)> {
        self.entries.iter().map(|(label, count)| (label, *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

/// Attention statistics for one trial view.
#[derive(Debug, Clone, PartialEq)]
pub struct HitSummary {
    pub total_hits: LabelCounts,
    pub new_hits: LabelCounts,
    pub numerator_denominator_transitions: u64,
}

impl HitSummary {
    pub fn total_hits_all(&self) -> u64 {
        self.total_hits.sum()
    }

    pub fn new_hits_all(&self) -> u64 {
        self.new_hits.sum()
    }
}
