//! Practice session state
//!
//! Maintains:
//! - Timer start instant and recorded minutes
//! - Running exercise counter
//! - Score entry buffer (typed digits, 0-20 expected)
//!
//! All session-scoped state lives in this struct and is passed through the
//! event loop explicitly; nothing is persisted until the recorder is asked to.

use std::time::Instant;

/// Mutable state for one practice session
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Timer start instant; `None` when the timer is not running
    timer_start: Option<Instant>,
    /// Whole minutes recorded by the last completed timer run
    time_spent: u32,
    /// Exercises completed this session
    exercises_completed: u32,
    /// Score digits typed so far
    score_entry: String,
}

impl SessionState {
    /// Create a fresh session
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Start (or restart) the session timer
    pub fn start_timer(&mut self) {
        self.timer_start = Some(Instant::now());
    }

    /// Stop the timer and record whole minutes elapsed
    ///
    /// Floor division of elapsed seconds by 60. Stopping a timer that was
    /// never started is a no-op returning `None`.
    pub fn stop_timer(&mut self) -> Option<u32> {
        let start = self.timer_start.take()?;
        let minutes = (start.elapsed().as_secs() / 60) as u32;
        self.time_spent = minutes;
        Some(minutes)
    }

    /// Whether the timer is currently running
    pub fn timer_running(&self) -> bool {
        self.timer_start.is_some()
    }

    /// Minutes recorded by the last completed timer run
    pub fn time_spent(&self) -> u32 {
        self.time_spent
    }

    /// Count one completed exercise
    pub fn add_exercise(&mut self) {
        self.exercises_completed += 1;
    }

    /// Exercises completed so far
    pub fn exercises_completed(&self) -> u32 {
        self.exercises_completed
    }

    /// Append a typed digit to the score entry (capped at two digits)
    pub fn push_score_digit(&mut self, digit: char) {
        if digit.is_ascii_digit() && self.score_entry.len() < 2 {
            self.score_entry.push(digit);
        }
    }

    /// Delete the last typed score digit
    pub fn pop_score_digit(&mut self) {
        self.score_entry.pop();
    }

    /// Raw score entry buffer for display
    pub fn score_entry(&self) -> &str {
        &self.score_entry
    }

    /// Parsed score; an empty buffer reads as 0
    pub fn score(&self) -> u32 {
        self.score_entry.parse().unwrap_or(0)
    }
}
