//! Process-wide model instance.
//!
//! The model is loaded once and shared read-only for the rest of the
//! process. There is no reload path: a new artifact needs a restart.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::adapters::{CatBoostModel, LoadOptions};
use crate::ports::ModelError;

static SHARED_MODEL: OnceLock<(PathBuf, Arc<CatBoostModel>)> = OnceLock::new();

/// Return the shared model, loading it on first use.
///
/// Later calls return the same instance regardless of `path`; asking for a
/// different artifact logs a warning.
///
/// # Errors
/// Returns `ModelError` if the first load fails. A failed load leaves the
/// slot empty so a later call may retry.
pub fn shared_model(path: &Path, options: &LoadOptions) -> Result<Arc<CatBoostModel>, ModelError> {
    if let Some((loaded_from, model)) = SHARED_MODEL.get() {
        if loaded_from != path {
            tracing::warn!(
                "Model already loaded from {:?}; ignoring request for {:?} (restart to switch models)",
                loaded_from,
                path
            );
        }
        return Ok(Arc::clone(model));
    }

    let model = Arc::new(CatBoostModel::load_with(path, options)?);
    let (_, shared) = SHARED_MODEL.get_or_init(|| (path.to_path_buf(), model));
    Ok(Arc::clone(shared))
}
