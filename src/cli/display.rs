//! Terminal display and UI rendering
//!
//! Features:
//! - Word tables with IPA and translation columns
//! - Session status line (timer, exercises, score entry)
//! - Tracking record listing, summary, and score bar chart
//! - Error and info messages

use crate::session::{SessionState, TrackingRecord, TrackingSummary};
use crate::vocab::WordEntry;
use chrono::NaiveDate;
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};

type DisplayResult = Result<(), Box<dyn std::error::Error>>;

/// Terminal display manager
pub struct Display;

impl Display {
    /// Create a display in simple (non-alternate-screen) mode
    pub fn simple() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Display)
    }

    /// Clear the screen
    pub fn clear(&self) -> DisplayResult {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Header line: the practice date and its scheduled cluster
    pub fn show_cluster_header(&self, date: NaiveDate, cluster: &str) -> DisplayResult {
        let mut stdout = stdout();
        execute!(
            stdout,
            SetForegroundColor(Color::Cyan),
            Print(format!("Cluster for {}: ", date)),
            ResetColor,
        )?;
        if cluster.is_empty() {
            execute!(
                stdout,
                SetForegroundColor(Color::DarkGrey),
                Print("(no cluster data available)\n"),
                ResetColor
            )?;
        } else {
            execute!(
                stdout,
                SetForegroundColor(Color::Yellow),
                Print(format!("{}\n", cluster)),
                ResetColor
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Render a word table: word, IPA, translation
    pub fn show_word_table(&self, entries: &[&WordEntry]) -> DisplayResult {
        let mut stdout = stdout();

        if entries.is_empty() {
            execute!(
                stdout,
                SetForegroundColor(Color::DarkGrey),
                Print("  (no words)\n"),
                ResetColor
            )?;
            return Ok(());
        }

        let word_width = entries.iter().map(|e| e.word.chars().count()).max().unwrap_or(4);
        let ipa_width = entries.iter().map(|e| e.ipa.chars().count()).max().unwrap_or(3);

        for entry in entries {
            execute!(
                stdout,
                SetForegroundColor(Color::Green),
                Print(format!("  {:word_width$}  ", entry.word)),
                SetForegroundColor(Color::DarkGrey),
                Print(format!("{:ipa_width$}  ", entry.ipa)),
                ResetColor,
                Print(format!("{}\n", entry.translation)),
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Session status line: timer state, exercise count, score entry
    pub fn show_session_status(&self, session: &SessionState) -> DisplayResult {
        let mut stdout = stdout();
        let timer = if session.timer_running() {
            "running".to_string()
        } else {
            format!("{} min", session.time_spent())
        };

        execute!(
            stdout,
            Print("\n"),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Timer: {} | Exercises: {} | Score: {}\n",
                timer,
                session.exercises_completed(),
                if session.score_entry().is_empty() {
                    "-"
                } else {
                    session.score_entry()
                },
            )),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Key bindings for the daily practice loop
    pub fn show_daily_help(&self) -> DisplayResult {
        let mut stdout = stdout();
        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print("[s] start timer  [t] stop timer  [+] exercise done  [0-9] score  [Enter] submit  [Esc] quit\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// List tracking records, one per line
    pub fn show_records(&self, records: &[&TrackingRecord]) -> DisplayResult {
        let mut stdout = stdout();
        execute!(
            stdout,
            SetForegroundColor(Color::Cyan),
            Print(format!(
                "  {:10}  {:>9}  {:>9}  {:>5}\n",
                "date", "time(min)", "exercises", "score"
            )),
            ResetColor
        )?;
        for r in records {
            execute!(
                stdout,
                Print(format!(
                    "  {:10}  {:>9}  {:>9}  {:>5}\n",
                    r.date, r.time_spent, r.exercises_completed, r.score
                ))
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Aggregate summary for a tracking subrange
    pub fn show_summary(&self, summary: &TrackingSummary) -> DisplayResult {
        let mut stdout = stdout();
        execute!(
            stdout,
            Print("\n"),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Sessions: {} | Minutes: {} | Exercises: {} | Mean score: {:.1}\n",
                summary.sessions, summary.total_minutes, summary.total_exercises, summary.mean_score
            )),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Bar chart of scores per record (one `#` per point, 0-20 scale)
    pub fn show_score_chart(&self, records: &[&TrackingRecord]) -> DisplayResult {
        let mut stdout = stdout();
        execute!(stdout, Print("\nScore\n"))?;
        for r in records {
            let bar = "#".repeat(r.score.min(20) as usize);
            execute!(
                stdout,
                Print(format!("  {:10} ", r.date)),
                SetForegroundColor(Color::Green),
                Print(format!("{:20}", bar)),
                ResetColor,
                Print(format!(" {}\n", r.score))
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Bar chart of session minutes per record, scaled to the range maximum
    pub fn show_minutes_chart(&self, records: &[&TrackingRecord]) -> DisplayResult {
        let mut stdout = stdout();
        let max = records.iter().map(|r| r.time_spent).max().unwrap_or(0);

        execute!(stdout, Print("\nTime spent (min)\n"))?;
        for r in records {
            let bar = "#".repeat(scaled_bar_width(r.time_spent, max, 20));
            execute!(
                stdout,
                Print(format!("  {:10} ", r.date)),
                SetForegroundColor(Color::Cyan),
                Print(format!("{:20}", bar)),
                ResetColor,
                Print(format!(" {}\n", r.time_spent))
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Section header
    pub fn show_heading(&self, text: &str) -> DisplayResult {
        let mut stdout = stdout();
        execute!(
            stdout,
            SetForegroundColor(Color::Cyan),
            Print(format!("{}\n\n", text)),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Informational message
    pub fn show_message(&self, text: &str) -> DisplayResult {
        let mut stdout = stdout();
        execute!(stdout, Print(format!("{}\n", text)))?;
        stdout.flush()?;
        Ok(())
    }

    /// Visible error message
    pub fn show_error(&self, text: &str) -> DisplayResult {
        let mut stdout = stdout();
        execute!(
            stdout,
            SetForegroundColor(Color::Red),
            Print(format!("⚠ {}\n", text)),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }
}

/// Bar width for a value scaled against the range maximum
///
/// Zero maximum (all-zero ranges) yields a zero-width bar instead of
/// dividing by zero; a non-zero value always gets at least one mark.
fn scaled_bar_width(value: u32, max: u32, width: usize) -> usize {
    if max == 0 || value == 0 {
        return 0;
    }
    (((value as u64) * (width as u64) / (max as u64)) as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_bar_width_max_fills() {
        assert_eq!(scaled_bar_width(30, 30, 20), 20);
    }

    #[test]
    fn test_scaled_bar_width_proportional() {
        assert_eq!(scaled_bar_width(15, 30, 20), 10);
    }

    #[test]
    fn test_scaled_bar_width_zero_max() {
        assert_eq!(scaled_bar_width(0, 0, 20), 0);
    }

    #[test]
    fn test_scaled_bar_width_small_value_still_visible() {
        assert_eq!(scaled_bar_width(1, 500, 20), 1);
    }
}
