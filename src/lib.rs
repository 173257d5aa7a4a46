//! # Cyclesense
//!
//! Terminal cycle tracker with mood/energy prediction.
//!
//! This crate provides:
//! - Cycle phase classification from tracking inputs
//! - Mood/energy scoring with a pre-trained oblivious-tree model
//! - Phase-based food and exercise recommendations
//! - Terminal UI with a prediction view and a model benchmark view
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (CycleInput, UserProfile, Phase, FeatureRow)
//! - `ports`: Trait definition for the regression model
//! - `adapters`: Concrete implementations (CatBoost JSON model, log sanitizer)
//! - `application`: The submission pipeline and the shared model
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::AppConfig;
pub use domain::{CycleInput, Phase, PredictionResult, UserProfile};

/// Result type for Cyclesense operations
pub type Result<T> = std::result::Result<T, CyclesenseError>;

/// Main error type for Cyclesense
#[derive(Debug, thiserror::Error)]
pub enum CyclesenseError {
    #[error("Model error: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Benchmark table error: {0}")]
    Benchmark(#[from] domain::BenchmarkError),

    #[error("Model is missing expected feature columns: {}", missing.join(", "))]
    FeatureMismatch { missing: Vec<String> },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
