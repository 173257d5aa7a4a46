//! Domain layer: Core business types and logic.
//!
//! Pure types for cycle tracking, lifestyle answers, model rows and the
//! static recommendation and benchmark tables. Nothing here touches the
//! terminal or the model file.

pub mod benchmark;
pub mod cycle;
pub mod features;
mod prediction;
mod profile;
pub mod recommendation;

pub use benchmark::{BenchmarkError, BenchmarkRow, BenchmarkTable};
pub use cycle::{classify, CycleInput, Phase};
pub use features::FeatureRow;
pub use prediction::{MoodBucket, PredictionResult};
pub use profile::{AgeBand, SleepBand, Symptom, SymptomFlags, UserProfile, WorkoutBand};
pub use recommendation::{lookup, Recommendation};
