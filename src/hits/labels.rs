//! The closed label set.
//!
//! Computed once per run from the AOI table plus the two sentinels. Every
//! summary row carries a count for each member, so rows from different
//! participants always share the same columns.

use crate::aoi::{AoiTable, GazeLabel};

#[derive(Debug, Clone, PartialEq)]
pub struct LabelSet {
    /// Sorted by column name, no duplicates.
    labels: Vec<GazeLabel>,
}

impl LabelSet {
    pub fn from_table(table: &AoiTable) -> Self {
        Self::from_names(table.names())
    }

    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut labels: Vec<GazeLabel> = names
            .into_iter()
            .map(|name| GazeLabel::Named(name.to_string()))
            .chain([GazeLabel::OutsideAois, GazeLabel::OutsideScreen])
            .collect();
        labels.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        labels.dedup_by(|a, b| a.as_str() == b.as_str());
        Self { labels }
    }

    pub fn position(&self, label: &GazeLabel) -> Option<usize> {
        self.labels
            .binary_search_by(|entry| entry.as_str().cmp(label.as_str()))
            .ok()
    }

    pub fn contains(&self, label: &GazeLabel) -> bool {
        self.position(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GazeLabel> {
        self.labels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_deduped_with_sentinels() {
        let set = LabelSet::from_names(["H_N1", "H_D1", "H_N1", "A_W"]);
        let names: Vec<&str> = set.iter().map(|l| l.as_str()).collect();
        assert_eq!(
            names,
            vec!["A_W", "H_D1", "H_N1", "Outside_of_AOIs", "Outside_of_Screen"]
        );
    }

    #[test]
    fn test_position_finds_sentinels() {
        let set = LabelSet::from_names(["H_N1"]);
        assert!(set.contains(&GazeLabel::OutsideScreen));
        assert!(set.contains(&GazeLabel::OutsideAois));
        assert!(set.contains(&GazeLabel::Named("H_N1".into())));
        assert!(!set.contains(&GazeLabel::Named("H_N2".into())));
    }
}
