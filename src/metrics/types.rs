use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters for one participant file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub points_processed: usize,
    pub points_dropped: usize,
    pub points_outside_aois: usize,
    pub points_outside_screen: usize,
    pub trials_summarised: usize,
    pub trials_skipped_empty: usize,
}

impl FileStats {
    pub fn absorb(&mut self, other: &FileStats) {
        self.rows_read += other.rows_read;
        self.rows_skipped += other.rows_skipped;
        self.points_processed += other.points_processed;
        self.points_dropped += other.points_dropped;
        self.points_outside_aois += other.points_outside_aois;
        self.points_outside_screen += other.points_outside_screen;
        self.trials_summarised += other.trials_summarised;
        self.trials_skipped_empty += other.trials_skipped_empty;
    }
}

/// End-of-run summary for a whole batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub total_files: usize,
    pub processed_files: usize,
    pub failed_files: usize,
    pub totals: FileStats,
}

impl RunStats {
    pub fn new(started_at: DateTime<Utc>, total_files: usize) -> Self {
        Self {
            started_at,
            finished_at: None,
            total_files,
            processed_files: 0,
            failed_files: 0,
            totals: FileStats::default(),
        }
    }

    pub fn outside_aois_percent(&self) -> f64 {
        percent(self.totals.points_outside_aois, self.totals.points_processed)
    }

    pub fn outside_screen_percent(&self) -> f64 {
        percent(self.totals.points_outside_screen, self.totals.points_processed)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
