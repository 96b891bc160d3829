use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::EvaluationError;

/// Locations and switches for a batch evaluation. Relative directories are
/// resolved against `dataset_root`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub dataset_root: PathBuf,
    /// JSON object whose keys are the song identifiers.
    pub dataset_file: PathBuf,
    pub leadsheet_dir: PathBuf,
    /// Holds one `<song>-material.json` per song.
    pub material_dir: PathBuf,
    pub simplify_leadsheet: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            dataset_root: PathBuf::from("dataset"),
            dataset_file: PathBuf::from("dataset.json"),
            leadsheet_dir: PathBuf::from("leadsheets"),
            material_dir: PathBuf::from("material"),
            simplify_leadsheet: true,
        }
    }
}

impl EvaluationConfig {
    pub fn load(path: &Path) -> Result<Self, EvaluationError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| EvaluationError::io("read evaluation config", e))?;
        serde_json::from_str(&data).map_err(|e| EvaluationError::json("parse evaluation config", e))
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dataset_root.join(path)
        }
    }

    pub fn leadsheet_path(&self) -> PathBuf {
        self.resolve(&self.leadsheet_dir)
    }

    pub fn material_path(&self) -> PathBuf {
        self.resolve(&self.material_dir)
    }

    /// Song identifiers in the order the dataset file lists them.
    pub fn load_song_ids(&self) -> Result<Vec<String>, EvaluationError> {
        let path = self.resolve(&self.dataset_file);
        let data = std::fs::read_to_string(&path)
            .map_err(|e| EvaluationError::io(format!("read {}", path.display()), e))?;
        let songs: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&data)
            .map_err(|e| EvaluationError::json(format!("parse {}", path.display()), e))?;
        Ok(songs.keys().cloned().collect())
    }
}
