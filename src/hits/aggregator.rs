use anyhow::{anyhow, Result};

use crate::aoi::GazeLabel;
use crate::hits::config::{FractionPart, FractionParts};
use crate::hits::labels::LabelSet;
use crate::hits::types::{HitSummary, LabelCounts, LabeledSample};

/// Forward-pass state for one trial view. Never shared between trials.
pub struct HitTracker<'a> {
    labels: &'a LabelSet,
    parts: &'a FractionParts,
    last_label: Option<GazeLabel>,
    last_valid_label: Option<GazeLabel>,
    last_fraction_part: Option<FractionPart>,
    total_hits: LabelCounts,
    new_hits: LabelCounts,
    transitions: u64,
}

impl<'a> HitTracker<'a> {
    pub fn new(labels: &'a LabelSet, parts: &'a FractionParts) -> Self {
        Self {
            labels,
            parts,
            last_label: None,
            last_valid_label: None,
            last_fraction_part: None,
            total_hits: LabelCounts::zeroed(labels),
            new_hits: LabelCounts::zeroed(labels),
            transitions: 0,
        }
    }

    /// Feed the next label in time order.
    pub fn observe(&mut self, current: &GazeLabel) -> Result<()> {
        let index = self
            .labels
            .position(current)
            .ok_or_else(|| anyhow!("label '{current}' is not in the closed label set"))?;

        self.total_hits.increment_at(index);
        if self.is_new_hit(current) {
            self.new_hits.increment_at(index);
        }

        if !current.is_sentinel() {
            self.last_valid_label = Some(current.clone());
        }

        // Non-fraction samples leave the last part untouched, so a short
        // excursion does not reset transition tracking.
        if let Some(part) = self.parts.part_of(current) {
            if self.last_fraction_part.is_some_and(|last| last != part) {
                self.transitions += 1;
            }
            self.last_fraction_part = Some(part);
        }

        self.last_label = Some(current.clone());
        Ok(())
    }

    /// Re-entering the same AOI after a sentinel run is not a new hit;
    /// entering a different one is.
    fn is_new_hit(&self, current: &GazeLabel) -> bool {
        if current.is_sentinel() {
            return false;
        }
        match &self.last_label {
            None => true,
            Some(last) if !last.is_sentinel() => last != current,
            Some(_) => self.last_valid_label.as_ref() != Some(current),
        }
    }

    pub fn finish(self) -> HitSummary {
        HitSummary {
            total_hits: self.total_hits,
            new_hits: self.new_hits,
            numerator_denominator_transitions: self.transitions,
        }
    }
}

/// Reduce one trial's labeled samples to a `HitSummary`.
///
/// Samples are stably sorted by ascending `time_point` first; input order is
/// not trusted.
pub fn aggregate(
    mut samples: Vec<LabeledSample>,
    labels: &LabelSet,
    parts: &FractionParts,
) -> Result<HitSummary> {
    samples.sort_by(|a, b| a.time_point.total_cmp(&b.time_point));

    let mut tracker = HitTracker::new(labels, parts);
    for sample in &samples {
        tracker.observe(&sample.label)?;
    }
    Ok(tracker.finish())
}
