//! Digest pinning utility for Cyclesense model artifacts.
//!
//! Checks that an artifact loads, then writes `<artifact>.sha256` next to it.
//! The application compares the artifact against this pin at startup.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin digest_model -- models/mood_model.json
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use cyclesense::adapters::catboost::{digest_path, sha256_hex};
use cyclesense::adapters::CatBoostModel;
use cyclesense::ports::MoodRegressor;

fn usage() -> String {
    "Usage: digest_model <artifact.json>".to_string()
}

fn parse_args() -> Result<PathBuf, String> {
    let mut artifact: Option<PathBuf> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage()),
            _ => {
                if artifact.is_none() {
                    artifact = Some(PathBuf::from(arg));
                } else {
                    return Err(usage());
                }
            }
        }
    }

    artifact.ok_or_else(usage)
}

fn main() -> Result<(), String> {
    let artifact = parse_args()?;

    let bytes = fs::read(&artifact).map_err(|e| format!("Failed to read {artifact:?}: {e}"))?;

    // Parse without the pin: a stale pin from an earlier artifact is expected here.
    let model = CatBoostModel::parse(&artifact, &bytes)
        .map_err(|e| format!("Refusing to pin {artifact:?}: {e}"))?;

    let file_name = artifact
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("Artifact path has no file name: {artifact:?}"))?;

    let pin_path = digest_path(&artifact);
    let hex = sha256_hex(&bytes);
    fs::write(&pin_path, format!("{hex}  {file_name}\n"))
        .map_err(|e| format!("Failed to write {pin_path:?}: {e}"))?;

    println!(
        "Model OK: {} features, {} trees",
        model.feature_names().len(),
        model.tree_count()
    );
    println!("Wrote digest: {pin_path:?}");
    println!("SHA256={hex}");

    Ok(())
}
