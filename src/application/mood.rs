//! Mood service: Runs one form submission through the model.
//!
//! The pipeline is all-or-nothing per submission:
//! 1. Validate ranges
//! 2. Build the feature row against the model's columns
//! 3. Score and bucket
//! 4. Classify the phase and look up recommendations

use std::sync::Arc;

use crate::domain::{
    features, recommendation, CycleInput, FeatureRow, Phase, PredictionResult, Recommendation,
    UserProfile,
};
use crate::ports::MoodRegressor;
use crate::CyclesenseError;

/// Everything shown for one submission.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub row: FeatureRow,
    pub prediction: PredictionResult,
    pub phase: Phase,
    pub recommendation: &'static Recommendation,
    pub submitted_at: chrono::DateTime<chrono::Local>,
}

/// Service wrapping a loaded model with a validated column mapping.
pub struct MoodService<R>
where
    R: MoodRegressor,
{
    model: Arc<R>,
    missing_columns: Vec<String>,
}

impl<R> MoodService<R>
where
    R: MoodRegressor,
{
    /// Create a service, checking that every column the form can set exists
    /// in the model.
    ///
    /// # Errors
    /// Returns `CyclesenseError::FeatureMismatch` when columns are missing,
    /// unless `lenient` is set, in which case the mismatch is logged and
    /// those selections silently contribute nothing.
    pub fn new(model: Arc<R>, lenient: bool) -> Result<Self, CyclesenseError> {
        let missing: Vec<String> = features::missing_columns(model.feature_names())
            .into_iter()
            .map(str::to_string)
            .collect();

        if !missing.is_empty() {
            if !lenient {
                tracing::error!("Model lacks {} expected columns", missing.len());
                return Err(CyclesenseError::FeatureMismatch { missing });
            }
            tracing::warn!(
                "Model lacks expected columns ({}); these selections will be zero-filled",
                missing.join(", ")
            );
        }

        Ok(Self {
            model,
            missing_columns: missing,
        })
    }

    /// Columns the form can set that the model ignores (lenient mode only).
    #[must_use]
    pub fn missing_columns(&self) -> &[String] {
        &self.missing_columns
    }

    /// Model column count.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.model.feature_names().len()
    }

    /// Run the full pipeline for one submission.
    ///
    /// # Errors
    /// Returns `CyclesenseError::Validation` for out-of-range input and
    /// `CyclesenseError::Model` if the model rejects the row.
    pub fn assess(
        &self,
        cycle: &CycleInput,
        profile: &UserProfile,
    ) -> Result<Assessment, CyclesenseError> {
        cycle
            .validate()
            .map_err(|errors| CyclesenseError::Validation(errors.join(", ")))?;

        let row = features::build(cycle, profile, self.model.feature_names());
        tracing::debug!(
            "Built feature row ({} columns, {} active)",
            row.len(),
            row.active_columns()
        );

        let prediction = PredictionResult::new(self.model.predict(&row)?);
        let phase = cycle.phase();
        let recommendation = recommendation::lookup(phase);

        tracing::info!(
            score = prediction.score,
            bucket = ?prediction.bucketed_description,
            phase = %phase,
            "Assessment complete"
        );

        Ok(Assessment {
            row,
            prediction,
            phase,
            recommendation,
            submitted_at: chrono::Local::now(),
        })
    }
}
