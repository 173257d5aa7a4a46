//! Runtime configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CYCLESENSE_MODEL_PATH` | `models/mood_model.json` |
//! | `CYCLESENSE_BENCHMARKS_PATH` | `benchmarks.json` next to the model, else built-in |
//! | `CYCLESENSE_LENIENT_FEATURES` | `false` |
//! | `CYCLESENSE_REQUIRE_MODEL_DIGEST` | `false` |
//!
//! Logging variables are read by the binary itself.

use std::path::{Path, PathBuf};

use crate::domain::{BenchmarkError, BenchmarkTable};

const DEFAULT_MODEL_PATH: &str = "models/mood_model.json";
const BENCHMARKS_FILE_NAME: &str = "benchmarks.json";

fn parse_bool(value: Option<String>) -> bool {
    value
        .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Model artifact to load at startup
    pub model_path: PathBuf,

    /// Explicit benchmark table file
    pub benchmarks_path: Option<PathBuf>,

    /// Warn instead of failing when the model lacks expected columns
    pub lenient_features: bool,

    /// Refuse to load a model without a digest pin
    pub require_model_digest: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            benchmarks_path: None,
            lenient_features: false,
            require_model_digest: false,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            model_path: non_empty("CYCLESENSE_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            benchmarks_path: non_empty("CYCLESENSE_BENCHMARKS_PATH").map(PathBuf::from),
            lenient_features: parse_bool(lookup("CYCLESENSE_LENIENT_FEATURES")),
            require_model_digest: parse_bool(lookup("CYCLESENSE_REQUIRE_MODEL_DIGEST")),
        }
    }

    /// Benchmark file that would be used, if any.
    #[must_use]
    pub fn benchmarks_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.benchmarks_path {
            return Some(path.clone());
        }
        let beside_model = self
            .model_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(BENCHMARKS_FILE_NAME);
        beside_model.exists().then_some(beside_model)
    }

    /// Load the benchmark table: explicit file, then file beside the model,
    /// then the built-in table.
    ///
    /// # Errors
    /// Returns error if a configured or discovered file is invalid.
    pub fn load_benchmarks(&self) -> Result<BenchmarkTable, BenchmarkError> {
        match self.benchmarks_file() {
            Some(path) => {
                let table = BenchmarkTable::load(&path)?;
                tracing::info!("Loaded {} benchmark rows from {:?}", table.rows.len(), path);
                Ok(table)
            }
            None => {
                tracing::info!("No benchmark file found, using built-in table");
                Ok(BenchmarkTable::builtin())
            }
        }
    }
}
