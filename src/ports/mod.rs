//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the model artifact.

mod regressor;

pub use regressor::{check_columns, ModelError, MoodRegressor};
