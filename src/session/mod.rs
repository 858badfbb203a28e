//! Session Management: per-session state and the persisted tracking log
//!
//! # Components
//! - `state.rs`: SessionState struct for timer, exercise counter, score entry
//! - `recorder.rs`: TrackingRecord log with full-file CSV rewrite

pub mod recorder;
pub mod state;

pub use recorder::{PracticeSessionRecorder, TrackingLog, TrackingRecord, TrackingSummary};
pub use state::SessionState;
