//! Application layer: Use cases and services.
//!
//! This module runs the submission pipeline against the loaded model and
//! owns the process-wide model instance.

pub mod model_cache;
mod mood;

pub use model_cache::shared_model;
pub use mood::{Assessment, MoodService};
