//! Offline model benchmark table.
//!
//! The figures come from evaluation runs done when the model was trained.
//! They are shipped as a versioned JSON artifact next to the model so they can
//! be regenerated without code changes; the built-in table is the fallback.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported benchmark file format version.
pub const BENCHMARK_FORMAT_VERSION: u32 = 1;

/// Errors from loading or validating a benchmark table.
#[derive(Debug, thiserror::Error)]
pub enum BenchmarkError {
    #[error("Failed to read benchmark file {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid benchmark JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported benchmark format version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid benchmark table: {0}")]
    Invalid(String),
}

/// Evaluation metrics for one candidate model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub model_name: String,
    pub r_squared: f64,
    pub rmse: f64,
}

impl BenchmarkRow {
    fn new(model_name: &str, r_squared: f64, rmse: f64) -> Self {
        Self {
            model_name: model_name.to_string(),
            r_squared,
            rmse,
        }
    }
}

/// Versioned set of benchmark rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkTable {
    pub version: u32,
    pub rows: Vec<BenchmarkRow>,
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BenchmarkTable {
    /// Figures recorded for the shipped model family.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            version: BENCHMARK_FORMAT_VERSION,
            rows: vec![
                BenchmarkRow::new("Decision Tree", 0.637, 1.60),
                BenchmarkRow::new("Random Forest", 0.63, 1.60),
                BenchmarkRow::new("XGBoost", 0.62, 1.55),
                BenchmarkRow::new("Ensemble", 0.59, 1.70),
                BenchmarkRow::new("CatBoost", 0.64, 1.48),
            ],
        }
    }

    /// Parse and validate a table from JSON.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or the table is invalid.
    pub fn from_json(json: &str) -> Result<Self, BenchmarkError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Load and validate a table from a file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or does not validate.
    pub fn load(path: &Path) -> Result<Self, BenchmarkError> {
        let content = std::fs::read_to_string(path).map_err(|source| BenchmarkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Check version, row count and metric sanity.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), BenchmarkError> {
        if self.version != BENCHMARK_FORMAT_VERSION {
            return Err(BenchmarkError::UnsupportedVersion(self.version));
        }
        if self.rows.is_empty() {
            return Err(BenchmarkError::Invalid("table has no rows".into()));
        }
        for row in &self.rows {
            if row.model_name.trim().is_empty() {
                return Err(BenchmarkError::Invalid("row with empty model name".into()));
            }
            // A weak model can score below zero on R².
            if !row.r_squared.is_finite() {
                return Err(BenchmarkError::Invalid(format!(
                    "{}: r_squared must be finite, got {}",
                    row.model_name, row.r_squared
                )));
            }
            if !row.rmse.is_finite() || row.rmse < 0.0 {
                return Err(BenchmarkError::Invalid(format!(
                    "{}: rmse must be a finite non-negative number, got {}",
                    row.model_name, row.rmse
                )));
            }
        }
        Ok(())
    }

    /// Row with the highest R².
    #[must_use]
    pub fn best_by_r_squared(&self) -> Option<&BenchmarkRow> {
        self.rows
            .iter()
            .max_by(|a, b| a.r_squared.total_cmp(&b.r_squared))
    }

    /// Row with the lowest RMSE.
    #[must_use]
    pub fn best_by_rmse(&self) -> Option<&BenchmarkRow> {
        self.rows.iter().min_by(|a, b| a.rmse.total_cmp(&b.rmse))
    }

    /// Largest metric value across both series (chart scaling).
    #[must_use]
    pub fn max_metric(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|r| [r.r_squared, r.rmse])
            .fold(0.0, f64::max)
    }
}
