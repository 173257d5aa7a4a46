//! TUI module: Terminal User Interface using Ratatui.
//!
//! Two views:
//! - Prediction form with mood score, phase and recommendations
//! - Benchmark comparison of candidate models

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::WellnessTheme;
