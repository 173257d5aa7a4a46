//! CatBoost adapter: Implementation of MoodRegressor.
//!
//! Evaluates an oblivious-tree ensemble exported with CatBoost's JSON
//! format (`model.save_model(path, format="json")`).
//!
//! # Evaluation
//!
//! Each tree applies the same `(column, border)` test at every node of a
//! level, so a leaf is addressed by a bitmask: bit `d` is set when the
//! value of split `d`'s column is strictly greater than its border.
//! The score is `scale * Σ leaf + bias`.
//!
//! # Integrity
//!
//! A sidecar `<artifact>.sha256` pins the artifact bytes. When present it
//! must match; when absent loading proceeds with a warning unless the
//! caller requires a pin.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::domain::FeatureRow;
use crate::ports::{check_columns, ModelError, MoodRegressor};

/// Deepest tree CatBoost can produce.
const MAX_TREE_DEPTH: usize = 16;

#[derive(Debug, Deserialize)]
struct ExportedModel {
    features_info: ExportedFeaturesInfo,
    #[serde(default)]
    oblivious_trees: Vec<ExportedTree>,
    #[serde(default)]
    scale_and_bias: Option<(f64, ExportedBias)>,
}

#[derive(Debug, Deserialize)]
struct ExportedFeaturesInfo {
    #[serde(default)]
    float_features: Vec<ExportedFloatFeature>,
    #[serde(default)]
    categorical_features: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ExportedFloatFeature {
    feature_index: usize,
    flat_feature_index: usize,
    #[serde(default)]
    feature_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportedTree {
    #[serde(default)]
    splits: Vec<ExportedSplit>,
    leaf_values: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ExportedSplit {
    split_type: String,
    #[serde(default)]
    float_feature_index: Option<usize>,
    #[serde(default)]
    border: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExportedBias {
    Scalar(f64),
    Vector(Vec<f64>),
}

#[derive(Debug, Clone)]
struct Split {
    column: usize,
    border: f64,
}

#[derive(Debug, Clone)]
struct ObliviousTree {
    splits: Vec<Split>,
    leaf_values: Vec<f64>,
}

impl ObliviousTree {
    fn leaf_index(&self, values: &[f64]) -> usize {
        self.splits
            .iter()
            .enumerate()
            .filter(|(_, split)| values[split.column] > split.border)
            .fold(0, |index, (depth, _)| index | (1 << depth))
    }
}

/// Options controlling artifact loading.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Refuse artifacts without a `.sha256` sidecar.
    pub require_digest: bool,
}

/// Loaded oblivious-tree regression model. Read-only after load.
#[derive(Debug, Clone)]
pub struct CatBoostModel {
    feature_names: Vec<String>,
    trees: Vec<ObliviousTree>,
    scale: f64,
    bias: f64,
    source: PathBuf,
}

impl CatBoostModel {
    /// Load a model with default options.
    ///
    /// # Errors
    /// Returns `ModelError::Load` if the artifact is missing or malformed.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        Self::load_with(path, &LoadOptions::default())
    }

    /// Load a model, verifying its digest pin first.
    ///
    /// # Errors
    /// Returns `ModelError::Load` if the artifact is missing, malformed or
    /// unpinned while a pin is required, and `ModelError::DigestMismatch`
    /// if the pin does not match.
    pub fn load_with(path: &Path, options: &LoadOptions) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path).map_err(|e| ModelError::load(path, e.to_string()))?;

        verify_digest(path, &bytes, options.require_digest)?;
        Self::parse(path, &bytes)
    }

    /// Parse artifact bytes without consulting the digest pin.
    ///
    /// `path` is recorded as the model source and used in errors.
    ///
    /// # Errors
    /// Returns `ModelError::Load` if the bytes are not a valid export.
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self, ModelError> {
        let exported: ExportedModel = serde_json::from_slice(bytes)
            .map_err(|e| ModelError::load(path, format!("invalid model JSON: {e}")))?;

        let model = Self::from_exported(exported, path)?;

        tracing::info!(
            "Loaded model from {:?} (n_features={}, n_trees={})",
            path,
            model.feature_names.len(),
            model.trees.len()
        );

        Ok(model)
    }

    fn from_exported(exported: ExportedModel, path: &Path) -> Result<Self, ModelError> {
        let info = exported.features_info;

        if info.categorical_features.as_ref().is_some_and(|c| !c.is_empty()) {
            return Err(ModelError::load(
                path,
                "categorical features are not supported (expected one-hot inputs)",
            ));
        }

        let n = info.float_features.len();
        if n == 0 {
            return Err(ModelError::load(path, "model declares no features"));
        }

        // Column order is the flat feature order; splits address features by
        // their float index.
        let mut names: Vec<Option<String>> = vec![None; n];
        let mut float_to_flat: Vec<Option<usize>> = vec![None; n];
        for feature in &info.float_features {
            let flat = feature.flat_feature_index;
            if flat >= n || feature.feature_index >= n {
                return Err(ModelError::load(
                    path,
                    format!("feature index out of range: flat={flat}, float={}", feature.feature_index),
                ));
            }
            let id = feature
                .feature_id
                .clone()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| ModelError::load(path, format!("feature {flat} has no feature_id")))?;
            if names[flat].is_some() || float_to_flat[feature.feature_index].is_some() {
                return Err(ModelError::load(path, format!("duplicate feature index for {id:?}")));
            }
            if names.iter().flatten().any(|existing| *existing == id) {
                return Err(ModelError::load(path, format!("duplicate feature id {id:?}")));
            }
            names[flat] = Some(id);
            float_to_flat[feature.feature_index] = Some(flat);
        }
        let feature_names: Vec<String> = names.into_iter().flatten().collect();

        let mut trees = Vec::with_capacity(exported.oblivious_trees.len());
        for (t, tree) in exported.oblivious_trees.into_iter().enumerate() {
            let depth = tree.splits.len();
            if depth > MAX_TREE_DEPTH {
                return Err(ModelError::load(path, format!("tree {t}: depth {depth} exceeds {MAX_TREE_DEPTH}")));
            }
            if tree.leaf_values.len() != 1 << depth {
                return Err(ModelError::load(
                    path,
                    format!(
                        "tree {t}: expected {} leaf values, got {} (multi-target models are not supported)",
                        1usize << depth,
                        tree.leaf_values.len()
                    ),
                ));
            }
            if tree.leaf_values.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::load(path, format!("tree {t}: non-finite leaf value")));
            }

            let splits = tree
                .splits
                .iter()
                .map(|split| {
                    if split.split_type != "FloatFeature" {
                        return Err(ModelError::load(
                            path,
                            format!("tree {t}: unsupported split type {:?}", split.split_type),
                        ));
                    }
                    let column = split
                        .float_feature_index
                        .and_then(|i| float_to_flat.get(i).copied().flatten())
                        .ok_or_else(|| ModelError::load(path, format!("tree {t}: split references unknown feature")))?;
                    let border = split
                        .border
                        .filter(|b| b.is_finite())
                        .ok_or_else(|| ModelError::load(path, format!("tree {t}: split has no finite border")))?;
                    Ok(Split { column, border })
                })
                .collect::<Result<Vec<_>, _>>()?;

            trees.push(ObliviousTree {
                splits,
                leaf_values: tree.leaf_values,
            });
        }

        let (scale, bias) = match exported.scale_and_bias {
            None => (1.0, 0.0),
            Some((scale, ExportedBias::Scalar(bias))) => (scale, bias),
            Some((scale, ExportedBias::Vector(bias))) => match bias.as_slice() {
                [] => (scale, 0.0),
                [b] => (scale, *b),
                _ => {
                    return Err(ModelError::load(path, "multi-dimensional bias is not supported"));
                }
            },
        };
        if !scale.is_finite() || !bias.is_finite() {
            return Err(ModelError::load(path, "non-finite scale or bias"));
        }

        Ok(Self {
            feature_names,
            trees,
            scale,
            bias,
            source: path.to_path_buf(),
        })
    }

    /// Path the model was loaded from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Number of trees in the ensemble.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn evaluate(&self, values: &[f64]) -> f64 {
        let sum: f64 = self
            .trees
            .iter()
            .map(|tree| tree.leaf_values[tree.leaf_index(values)])
            .sum();
        self.scale * sum + self.bias
    }
}

impl MoodRegressor for CatBoostModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        check_columns(&self.feature_names, row)?;
        let score = self.evaluate(&row.values());
        tracing::debug!("Evaluated {} trees", self.trees.len());
        Ok(score)
    }
}

/// Sidecar path holding the artifact's SHA-256 pin.
#[must_use]
pub fn digest_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".sha256");
    PathBuf::from(name)
}

/// Lowercase hex SHA-256 of the given bytes.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn verify_digest(path: &Path, bytes: &[u8], required: bool) -> Result<(), ModelError> {
    let pin_path = digest_path(path);
    if !pin_path.exists() {
        if required {
            tracing::error!("Model digest pin not found at {:?}", pin_path);
            return Err(ModelError::load(
                path,
                format!("digest pin {pin_path:?} required but missing"),
            ));
        }
        tracing::warn!(
            "No digest pin at {:?}; loading unpinned model. Run digest_model to create one.",
            pin_path
        );
        return Ok(());
    }

    let pin = std::fs::read_to_string(&pin_path)
        .map_err(|e| ModelError::load(path, format!("failed to read digest pin: {e}")))?;
    let expected = pin
        .split_whitespace()
        .next()
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| ModelError::load(path, "digest pin is empty"))?;

    if !constant_time_eq_str(&sha256_hex(bytes), &expected) {
        return Err(ModelError::DigestMismatch {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

// Constant-time compare for ASCII strings (used for SHA-256 hex digests).
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{features, CycleInput, Symptom, SymptomFlags, UserProfile};
    use serde_json::json;
    use tempfile::tempdir;

    /// Two features, two trees. Score = 1 * (tree1 + tree2) + 5.
    fn small_model() -> serde_json::Value {
        json!({
            "features_info": {
                "float_features": [
                    {"feature_index": 0, "flat_feature_index": 0, "feature_id": "Cycle_length", "borders": [30.5]},
                    {"feature_index": 1, "flat_feature_index": 1, "feature_id": "Fatigue", "borders": [0.5]}
                ]
            },
            "oblivious_trees": [
                {
                    "leaf_values": [1.0, -2.0],
                    "splits": [{"border": 0.5, "float_feature_index": 1, "split_index": 1, "split_type": "FloatFeature"}]
                },
                {
                    "leaf_values": [0.0, 0.5, 0.25, 0.75],
                    "splits": [
                        {"border": 0.5, "float_feature_index": 1, "split_index": 1, "split_type": "FloatFeature"},
                        {"border": 30.5, "float_feature_index": 0, "split_index": 0, "split_type": "FloatFeature"}
                    ]
                }
            ],
            "scale_and_bias": [1, [5.0]]
        })
    }

    fn write_model(dir: &Path, name: &str, model: &serde_json::Value) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_vec(model).expect("serialize")).expect("write model");
        path
    }

    fn row_for(model: &CatBoostModel, cycle_length: u8, fatigue: bool) -> FeatureRow {
        let mut flags = SymptomFlags::none();
        flags.set(Symptom::Fatigue, fatigue);
        let profile = UserProfile {
            symptom_flags: flags,
            ..UserProfile::default()
        };
        features::build(
            &CycleInput::new(10, 5, cycle_length),
            &profile,
            model.feature_names(),
        )
    }

    #[test]
    fn test_load_and_predict() {
        let temp = tempdir().expect("tempdir");
        let path = write_model(temp.path(), "model.json", &small_model());

        let model = CatBoostModel::load(&path).expect("Should load");
        assert_eq!(model.feature_names(), ["Cycle_length", "Fatigue"]);
        assert_eq!(model.tree_count(), 2);

        let cases = [(28, false, 6.0), (28, true, 3.5), (35, false, 6.25), (35, true, 3.75)];
        for (cycle, fatigue, expected) in cases {
            let score = model.predict(&row_for(&model, cycle, fatigue)).expect("Should predict");
            assert!((score - expected).abs() < 1e-9, "cycle={cycle} fatigue={fatigue}: {score}");
        }
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let temp = tempdir().expect("tempdir");
        let path = write_model(temp.path(), "model.json", &small_model());
        let model = CatBoostModel::load(&path).expect("Should load");

        let row = row_for(&model, 33, true);
        let first = model.predict(&row).expect("first");
        let second = model.predict(&row).expect("second");
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_flat_order_defines_columns() {
        let mut model = small_model();
        model["features_info"]["float_features"] = json!([
            {"feature_index": 0, "flat_feature_index": 1, "feature_id": "Cycle_length"},
            {"feature_index": 1, "flat_feature_index": 0, "feature_id": "Fatigue"}
        ]);
        let temp = tempdir().expect("tempdir");
        let path = write_model(temp.path(), "model.json", &model);

        let loaded = CatBoostModel::load(&path).expect("Should load");
        assert_eq!(loaded.feature_names(), ["Fatigue", "Cycle_length"]);
        // float index 1 (Fatigue) now lives at column 0
        let score = loaded.predict(&row_for(&loaded, 28, true)).expect("predict");
        assert!((score - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_predict_rejects_misordered_row() {
        let temp = tempdir().expect("tempdir");
        let path = write_model(temp.path(), "model.json", &small_model());
        let model = CatBoostModel::load(&path).expect("Should load");

        let reversed = vec!["Fatigue".to_string(), "Cycle_length".to_string()];
        let row = features::build(&CycleInput::default(), &UserProfile::default(), &reversed);
        assert!(matches!(model.predict(&row), Err(ModelError::ColumnMismatch(_))));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let result = CatBoostModel::load(Path::new("/nonexistent/mood_model.json"));
        assert!(matches!(result, Err(ModelError::Load { .. })));
    }

    #[test]
    fn test_rejects_malformed_models() {
        let temp = tempdir().expect("tempdir");

        let mut bad_leaves = small_model();
        bad_leaves["oblivious_trees"][0]["leaf_values"] = json!([1.0, 2.0, 3.0]);

        let mut bad_split = small_model();
        bad_split["oblivious_trees"][0]["splits"][0]["float_feature_index"] = json!(7);

        let mut categorical = small_model();
        categorical["features_info"]["categorical_features"] = json!([{"feature_index": 0}]);

        let mut one_hot_split = small_model();
        one_hot_split["oblivious_trees"][0]["splits"][0]["split_type"] = json!("OneHotFeature");

        let mut duplicate = small_model();
        duplicate["features_info"]["float_features"][1]["feature_id"] = json!("Cycle_length");

        for (i, model) in [bad_leaves, bad_split, categorical, one_hot_split, duplicate]
            .iter()
            .enumerate()
        {
            let path = write_model(temp.path(), &format!("bad_{i}.json"), model);
            assert!(
                matches!(CatBoostModel::load(&path), Err(ModelError::Load { .. })),
                "case {i} should fail"
            );
        }

        let garbage = temp.path().join("garbage.json");
        std::fs::write(&garbage, b"\x00\x01cbm").expect("write");
        assert!(matches!(CatBoostModel::load(&garbage), Err(ModelError::Load { .. })));
    }

    #[test]
    fn test_scalar_bias_and_missing_scale() {
        let temp = tempdir().expect("tempdir");

        let mut scalar = small_model();
        scalar["scale_and_bias"] = json!([2.0, 1.0]);
        let path = write_model(temp.path(), "scalar.json", &scalar);
        let model = CatBoostModel::load(&path).expect("Should load");
        // 2 * (1.0 + 0.0) + 1
        let score = model.predict(&row_for(&model, 28, false)).expect("predict");
        assert!((score - 3.0).abs() < 1e-9);

        let mut unscaled = small_model();
        unscaled.as_object_mut().expect("object").remove("scale_and_bias");
        let path = write_model(temp.path(), "unscaled.json", &unscaled);
        let model = CatBoostModel::load(&path).expect("Should load");
        let score = model.predict(&row_for(&model, 28, false)).expect("predict");
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_digest_pin() {
        let temp = tempdir().expect("tempdir");
        let path = write_model(temp.path(), "model.json", &small_model());
        let bytes = std::fs::read(&path).expect("read");

        // Required but missing
        let strict = LoadOptions { require_digest: true };
        assert!(matches!(
            CatBoostModel::load_with(&path, &strict),
            Err(ModelError::Load { .. })
        ));

        // Matching pin
        std::fs::write(digest_path(&path), format!("{}  model.json\n", sha256_hex(&bytes)))
            .expect("write pin");
        CatBoostModel::load_with(&path, &strict).expect("Should load pinned model");

        // Stale pin
        std::fs::write(digest_path(&path), sha256_hex(b"other bytes")).expect("write pin");
        assert!(matches!(
            CatBoostModel::load(&path),
            Err(ModelError::DigestMismatch { .. })
        ));
    }

    #[test]
    fn test_digest_path() {
        assert_eq!(
            digest_path(Path::new("models/mood_model.json")),
            PathBuf::from("models/mood_model.json.sha256")
        );
    }
}
