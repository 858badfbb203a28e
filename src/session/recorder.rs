//! Tracking log persistence
//!
//! Handles:
//! - TrackingRecord model (one submitted practice session)
//! - Append-only CSV log, full-file rewrite on every save
//! - Legacy three-column logs (no `exercises_completed`) on read
//! - Date-range filtering and summary stats for the tracking view
//!
//! The rewrite is not crash-safe against partial writes; for a single-user
//! tool the last writer wins and that is acceptable.

use crate::csv;
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Default tracking log filename
pub const DEFAULT_TRACK_FILE: &str = "tracking.csv";

/// Canonical log column order
pub const COLUMNS: [&str; 4] = ["date", "time_spent", "exercises_completed", "score"];

/// Date format used in the log
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One logged practice session
///
/// Score is caller-validated to 0-20; the log stores whatever it is given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackingRecord {
    pub date: NaiveDate,
    pub time_spent: u32,
    pub exercises_completed: u32,
    pub score: u32,
}

/// Aggregate stats over a set of records
#[derive(Clone, Debug, PartialEq)]
pub struct TrackingSummary {
    pub sessions: usize,
    pub total_minutes: u32,
    pub total_exercises: u32,
    pub mean_score: f32,
}

/// In-memory tracking log, insertion-ordered
#[derive(Clone, Debug, Default)]
pub struct TrackingLog {
    pub records: Vec<TrackingRecord>,
}

impl TrackingLog {
    /// Load the log from disk; a missing file is "first run", not an error
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !path.exists() {
            return Ok(TrackingLog::default());
        }

        let text = fs::read_to_string(path)?;
        Self::from_csv_text(&text)
    }

    /// Parse a log from CSV text
    ///
    /// Columns are located by header name, so the legacy schema without
    /// `exercises_completed` still reads (the field defaults to 0). Rows
    /// that fail to parse are skipped with a warning.
    pub fn from_csv_text(text: &str) -> Result<Self, Box<dyn Error>> {
        if text.trim().is_empty() {
            return Ok(TrackingLog::default());
        }

        let (header, rows) = csv::parse_document(text)?;
        let index: FxHashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_lowercase(), i))
            .collect();

        let date_col = *index.get("date").ok_or("tracking log has no 'date' column")?;
        let time_col = *index
            .get("time_spent")
            .ok_or("tracking log has no 'time_spent' column")?;
        let score_col = *index.get("score").ok_or("tracking log has no 'score' column")?;
        let exercises_col = index.get("exercises_completed").copied();

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            match parse_record(row, date_col, time_col, exercises_col, score_col) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("skipping malformed tracking row {:?}: {}", row, e),
            }
        }

        Ok(TrackingLog { records })
    }

    /// Append one record (in-memory; call `save` to persist)
    pub fn append(&mut self, record: TrackingRecord) {
        self.records.push(record);
    }

    /// Rewrite the whole log file in the canonical schema
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        fs::write(path, self.to_csv())?;
        Ok(())
    }

    /// Serialize every record to canonical CSV
    pub fn to_csv(&self) -> String {
        Self::records_to_csv(&self.records.iter().collect::<Vec<_>>())
    }

    /// Serialize a record subset to canonical CSV
    pub fn records_to_csv(records: &[&TrackingRecord]) -> String {
        let mut out = csv::write_line(&COLUMNS);
        out.push('\n');
        for r in records {
            out.push_str(&csv::write_line(&[
                &r.date.format(DATE_FORMAT).to_string(),
                &r.time_spent.to_string(),
                &r.exercises_completed.to_string(),
                &r.score.to_string(),
            ]));
            out.push('\n');
        }
        out
    }

    /// Records within an inclusive date range, insertion order preserved
    pub fn range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&TrackingRecord> {
        self.records
            .iter()
            .filter(|r| r.date >= from && r.date <= to)
            .collect()
    }

    /// Earliest and latest record dates, `None` for an empty log
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Whether the log has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregate stats over a record subset
    pub fn summarize(records: &[&TrackingRecord]) -> TrackingSummary {
        let sessions = records.len();
        let total_minutes = records.iter().map(|r| r.time_spent).sum();
        let total_exercises = records.iter().map(|r| r.exercises_completed).sum();
        let mean_score = if sessions == 0 {
            0.0
        } else {
            records.iter().map(|r| r.score as f32).sum::<f32>() / sessions as f32
        };

        TrackingSummary {
            sessions,
            total_minutes,
            total_exercises,
            mean_score,
        }
    }
}

fn parse_record(
    row: &[String],
    date_col: usize,
    time_col: usize,
    exercises_col: Option<usize>,
    score_col: usize,
) -> Result<TrackingRecord, Box<dyn Error>> {
    let field = |col: usize| -> Result<&str, Box<dyn Error>> {
        row.get(col)
            .map(|s| s.trim())
            .ok_or_else(|| format!("missing field at column {}", col).into())
    };

    let date = NaiveDate::parse_from_str(field(date_col)?, DATE_FORMAT)?;
    let time_spent = field(time_col)?.parse()?;
    let score = field(score_col)?.parse()?;
    let exercises_completed = match exercises_col {
        Some(col) => field(col)?.parse()?,
        None => 0,
    };

    Ok(TrackingRecord {
        date,
        time_spent,
        exercises_completed,
        score,
    })
}

/// Records practice sessions to the persisted log
pub struct PracticeSessionRecorder {
    log_path: PathBuf,
}

impl PracticeSessionRecorder {
    /// Create a recorder writing to the given log path
    pub fn new(log_path: &Path) -> Self {
        PracticeSessionRecorder {
            log_path: log_path.to_path_buf(),
        }
    }

    /// Append one session record and durably flush the whole log
    pub fn record_session(
        &self,
        date: NaiveDate,
        time_spent: u32,
        exercises_completed: u32,
        score: u32,
    ) -> Result<(), Box<dyn Error>> {
        let mut log = TrackingLog::load(&self.log_path)?;
        log.append(TrackingRecord {
            date,
            time_spent,
            exercises_completed,
            score,
        });
        log.save(&self.log_path)?;

        log::info!(
            "recorded session for {}: {} min, {} exercises, score {}",
            date,
            time_spent,
            exercises_completed,
            score
        );
        Ok(())
    }

    /// Load the full log in insertion order
    pub fn load_log(&self) -> Result<TrackingLog, Box<dyn Error>> {
        TrackingLog::load(&self.log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_missing_file_is_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = PracticeSessionRecorder::new(&dir.path().join("tracking.csv"));
        assert!(recorder.load_log().unwrap().is_empty());
    }

    #[test]
    fn test_record_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = PracticeSessionRecorder::new(&dir.path().join("tracking.csv"));

        recorder.record_session(date(2024, 6, 1), 15, 3, 18).unwrap();

        let log = recorder.load_log().unwrap();
        assert_eq!(log.records.len(), 1);
        assert_eq!(
            log.records[0],
            TrackingRecord {
                date: date(2024, 6, 1),
                time_spent: 15,
                exercises_completed: 3,
                score: 18,
            }
        );
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = PracticeSessionRecorder::new(&dir.path().join("tracking.csv"));

        // Deliberately out of date order: insertion order must survive
        recorder.record_session(date(2024, 6, 2), 10, 2, 12).unwrap();
        recorder.record_session(date(2024, 6, 1), 20, 5, 16).unwrap();

        let log = recorder.load_log().unwrap();
        assert_eq!(log.records[0].date, date(2024, 6, 2));
        assert_eq!(log.records[1].date, date(2024, 6, 1));
    }

    #[test]
    fn test_legacy_three_column_schema() {
        let text = "date,time_spent,score\n2024-05-30,25,14\n";
        let log = TrackingLog::from_csv_text(text).unwrap();
        assert_eq!(log.records.len(), 1);
        assert_eq!(log.records[0].exercises_completed, 0);
        assert_eq!(log.records[0].score, 14);
    }

    #[test]
    fn test_out_of_range_score_stored_as_given() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = PracticeSessionRecorder::new(&dir.path().join("tracking.csv"));
        recorder.record_session(date(2024, 6, 1), 5, 1, 25).unwrap();
        assert_eq!(recorder.load_log().unwrap().records[0].score, 25);
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let text = "date,time_spent,exercises_completed,score\n\
                    2024-06-01,15,3,18\n\
                    not-a-date,1,1,1\n\
                    2024-06-02,10,2,12\n";
        let log = TrackingLog::from_csv_text(text).unwrap();
        assert_eq!(log.records.len(), 2);
    }

    #[test]
    fn test_range_inclusive() {
        let mut log = TrackingLog::default();
        for day in 1..=5 {
            log.append(TrackingRecord {
                date: date(2024, 6, day),
                time_spent: day,
                exercises_completed: 1,
                score: 10,
            });
        }
        let subset = log.range(date(2024, 6, 2), date(2024, 6, 4));
        assert_eq!(subset.len(), 3);
        assert_eq!(subset[0].date, date(2024, 6, 2));
        assert_eq!(subset[2].date, date(2024, 6, 4));
    }

    #[test]
    fn test_date_bounds() {
        let mut log = TrackingLog::default();
        assert!(log.date_bounds().is_none());
        log.append(TrackingRecord {
            date: date(2024, 6, 3),
            time_spent: 1,
            exercises_completed: 0,
            score: 5,
        });
        log.append(TrackingRecord {
            date: date(2024, 6, 1),
            time_spent: 1,
            exercises_completed: 0,
            score: 5,
        });
        assert_eq!(log.date_bounds(), Some((date(2024, 6, 1), date(2024, 6, 3))));
    }

    #[test]
    fn test_summarize() {
        let records = vec![
            TrackingRecord {
                date: date(2024, 6, 1),
                time_spent: 10,
                exercises_completed: 2,
                score: 10,
            },
            TrackingRecord {
                date: date(2024, 6, 2),
                time_spent: 20,
                exercises_completed: 4,
                score: 20,
            },
        ];
        let refs: Vec<&TrackingRecord> = records.iter().collect();
        let summary = TrackingLog::summarize(&refs);
        assert_eq!(summary.sessions, 2);
        assert_eq!(summary.total_minutes, 30);
        assert_eq!(summary.total_exercises, 6);
        assert!((summary.mean_score - 15.0).abs() < f32::EPSILON);
    }
}
