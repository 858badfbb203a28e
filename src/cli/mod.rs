//! CLI Interface: User input and terminal rendering
//!
//! # Components
//! - `input.rs`: Keystroke capture using crossterm, mapped to session actions
//! - `display.rs`: Terminal rendering for word tables and tracking views

pub mod display;
pub mod input;
