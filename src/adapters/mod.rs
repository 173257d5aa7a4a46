//! Adapters layer: Concrete implementations of ports.
//!
//! - `catboost`: oblivious-tree model loaded from a CatBoost JSON export
//! - `sanitize`: masking of tracking data in log output

pub mod catboost;
pub mod sanitize;

pub use catboost::{CatBoostModel, LoadOptions};
