//! Keystroke input handling using crossterm
//!
//! Features:
//! - Non-blocking keystroke capture
//! - Mapping of raw key events to practice-session actions
//! - Raw-mode guard that restores the terminal on every exit path
//! - Ctrl+C / Escape graceful exit

use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};
use std::io::Result as IoResult;
use std::time::Duration;

/// Raw-mode handle: restores the terminal when dropped
///
/// Errors that propagate out of the event loop drop the guard too, so the
/// terminal never stays raw.
pub struct RawModeGuard;

impl RawModeGuard {
    /// Enable raw mode, returning the guard that will undo it
    pub fn enable() -> IoResult<Self> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

/// Action a keystroke maps to inside the daily practice loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKey {
    /// Start (or restart) the session timer
    StartTimer,
    /// Stop the timer and record elapsed minutes
    StopTimer,
    /// Count one completed exercise
    AddExercise,
    /// A score digit was typed
    Digit(char),
    /// Delete the last score digit
    Backspace,
    /// Submit the session to the tracking log
    Submit,
    /// Leave without recording
    Quit,
}

/// Handles user input from the terminal
pub struct InputHandler {
    /// Timeout for poll operations
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create a new input handler with the default 50ms poll timeout
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Poll for a keystroke with timeout (non-blocking)
    ///
    /// Returns `Some(KeyEvent)` if a key was pressed, `None` on timeout.
    pub fn read_key(&self) -> Result<Option<KeyEvent>, Box<dyn std::error::Error>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                event::Event::Key(key_event) => Ok(Some(key_event)),
                _ => Ok(None),
            }
        } else {
            Ok(None)
        }
    }

    /// Map a key event to a session action
    ///
    /// Unbound keys map to `None` and are ignored by the loop.
    pub fn session_key(key: &KeyEvent) -> Option<SessionKey> {
        // Ctrl+C always quits
        if let KeyCode::Char('c') = key.code {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(SessionKey::Quit);
            }
        }

        match key.code {
            KeyCode::Esc => Some(SessionKey::Quit),
            KeyCode::Enter => Some(SessionKey::Submit),
            KeyCode::Backspace => Some(SessionKey::Backspace),
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(KeyModifiers::ALT)
                {
                    return None;
                }
                match c {
                    's' => Some(SessionKey::StartTimer),
                    't' => Some(SessionKey::StopTimer),
                    '+' | '=' => Some(SessionKey::AddExercise),
                    '0'..='9' => Some(SessionKey::Digit(c)),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
