mod types;

pub use types::{FileStats, RunStats};

use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::Utc;

const ENABLE_LOGS: bool = true;

/// Accumulates per-file outcomes into a `RunStats`.
pub struct StatsCollector {
    stats: RunStats,
}

impl StatsCollector {
    pub fn new(total_files: usize) -> Self {
        Self {
            stats: RunStats::new(Utc::now(), total_files),
        }
    }

    pub fn record_file(&mut self, file: &FileStats) {
        self.stats.processed_files += 1;
        self.stats.totals.absorb(file);
    }

    pub fn record_failure(&mut self) {
        self.stats.failed_files += 1;
    }

    pub fn finish(mut self) -> RunStats {
        self.stats.finished_at = Some(Utc::now());
        self.stats
    }
}

pub fn log_summary(stats: &RunStats) {
    let totals = &stats.totals;
    crate::log_info!("=== Processing Summary ===");
    crate::log_info!(
        "Files processed: {}/{}",
        stats.processed_files,
        stats.total_files
    );
    crate::log_info!("Failed files: {}", stats.failed_files);
    crate::log_info!(
        "Rows read: {} ({} skipped)",
        totals.rows_read,
        totals.rows_skipped
    );
    crate::log_info!(
        "Points processed: {} ({} dropped as malformed)",
        totals.points_processed,
        totals.points_dropped
    );
    crate::log_info!(
        "Points inside screen but outside AOIs: {} ({:.1}%)",
        totals.points_outside_aois,
        stats.outside_aois_percent()
    );
    crate::log_info!(
        "Points outside screen: {} ({:.1}%)",
        totals.points_outside_screen,
        stats.outside_screen_percent()
    );
    crate::log_info!(
        "Trials summarised: {} ({} empty, no row written)",
        totals.trials_summarised,
        totals.trials_skipped_empty
    );
}

pub fn write_stats(path: &Path, stats: &RunStats) -> Result<()> {
    let serialized = serde_json::to_string_pretty(stats)?;
    fs::write(path, serialized)
        .with_context(|| format!("Failed to write run stats to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(points: usize, outside_aois: usize, outside_screen: usize) -> FileStats {
        FileStats {
            points_processed: points,
            points_outside_aois: outside_aois,
            points_outside_screen: outside_screen,
            trials_summarised: 1,
            ..FileStats::default()
        }
    }

    #[test]
    fn test_collector_sums_files() {
        let mut collector = StatsCollector::new(3);
        collector.record_file(&file(10, 2, 1));
        collector.record_file(&file(30, 8, 3));
        collector.record_failure();
        let stats = collector.finish();

        assert_eq!(stats.processed_files, 2);
        assert_eq!(stats.failed_files, 1);
        assert_eq!(stats.totals.points_processed, 40);
        assert_eq!(stats.totals.trials_summarised, 2);
        assert!((stats.outside_aois_percent() - 25.0).abs() < 1e-9);
        assert!((stats.outside_screen_percent() - 10.0).abs() < 1e-9);
        assert!(stats.finished_at.is_some());
    }

    #[test]
    fn test_percent_with_no_points() {
        let stats = StatsCollector::new(0).finish();
        assert_eq!(stats.outside_aois_percent(), 0.0);
        assert_eq!(stats.outside_screen_percent(), 0.0);
    }

    #[test]
    fn test_stats_json_round_trip_fields() {
        let stats = StatsCollector::new(1).finish();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalFiles"], 1);
        assert!(json["totals"]["pointsProcessed"].is_number());
    }
}
