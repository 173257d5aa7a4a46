//! Regressor port: Trait for the pre-trained mood model.
//!
//! The model is an opaque collaborator. The application only needs its
//! declared column list and a score for a row built against that list.

use std::path::PathBuf;

use crate::domain::FeatureRow;

/// Errors from loading or evaluating a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to load model from {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("Model digest mismatch for {path:?}")]
    DigestMismatch { path: PathBuf },

    #[error("Feature row does not match model columns: {0}")]
    ColumnMismatch(String),
}

impl ModelError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Trait for a loaded, read-only regression model.
///
/// Implementations must be deterministic: the same row always yields the
/// same score.
pub trait MoodRegressor: Send + Sync {
    /// Column names the model was trained on, in input order.
    fn feature_names(&self) -> &[String];

    /// Score a row built against [`MoodRegressor::feature_names`].
    ///
    /// # Errors
    /// Returns `ModelError::ColumnMismatch` if the row's columns differ from
    /// the declared list in name or order.
    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError>;
}

/// Check that a row's columns equal the declared list exactly.
///
/// # Errors
/// Returns `ModelError::ColumnMismatch` describing the first difference.
pub fn check_columns(declared: &[String], row: &FeatureRow) -> Result<(), ModelError> {
    if row.len() != declared.len() {
        return Err(ModelError::ColumnMismatch(format!(
            "expected {} columns, got {}",
            declared.len(),
            row.len()
        )));
    }
    for (i, (expected, actual)) in declared.iter().zip(row.names()).enumerate() {
        if expected != actual {
            return Err(ModelError::ColumnMismatch(format!(
                "column {i}: expected {expected:?}, got {actual:?}"
            )));
        }
    }
    Ok(())
}
