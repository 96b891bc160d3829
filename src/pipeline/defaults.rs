use std::path::PathBuf;

use crate::alignment::smith_waterman::{smith_waterman_path, SmithWatermanOptions};
use crate::error::EvaluationError;
use crate::leadsheet::{standard_chord_sequence, Leadsheet};
use crate::pipeline::traits::{GroundTruthLoader, LabelRenderer, SequenceAligner, SongSource};
use crate::types::{Label, PointFrame, Sequence, SongMaterial};

/// Label rendered for a frame without any pitch class.
pub const NO_CHORD_LABEL: &str = "N";

#[derive(Debug, Clone, Copy, Default)]
pub struct SmithWatermanAligner {
    pub options: SmithWatermanOptions,
}

impl SequenceAligner for SmithWatermanAligner {
    fn align_path(
        &self,
        a: &[Vec<usize>],
        b: &[Vec<usize>],
    ) -> Result<Vec<(usize, usize)>, EvaluationError> {
        Ok(smith_waterman_path(a, b, &self.options))
    }
}

/// Renders pitch classes as a sorted, deduplicated `0-4-7` style set.
#[derive(Debug, Clone, Copy, Default)]
pub struct PitchClassSetRenderer;

impl LabelRenderer for PitchClassSetRenderer {
    fn render(&self, frame: &PointFrame) -> Label {
        let mut pcs: Vec<u8> = frame.pitch_classes().iter().map(|pc| pc % 12).collect();
        pcs.sort_unstable();
        pcs.dedup();
        if pcs.is_empty() {
            return NO_CHORD_LABEL.to_string();
        }
        pcs.iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Reads `<dir>/<leadsheet>.json`.
#[derive(Debug, Clone)]
pub struct JsonLeadsheetLoader {
    dir: PathBuf,
}

impl JsonLeadsheetLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl GroundTruthLoader for JsonLeadsheetLoader {
    fn load(&self, leadsheet: &str, simplify: bool) -> Result<Sequence, EvaluationError> {
        let sheet = Leadsheet::load(&self.dir.join(format!("{leadsheet}.json")))?;
        let chords = standard_chord_sequence(&sheet, simplify);
        if chords.is_empty() {
            return Err(EvaluationError::invalid_input(format!(
                "leadsheet '{leadsheet}' has no chords"
            )));
        }
        Ok(chords)
    }
}

/// Reads `<dir>/<song>-material.json`.
#[derive(Debug, Clone)]
pub struct JsonSongSource {
    dir: PathBuf,
}

impl JsonSongSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SongSource for JsonSongSource {
    fn load_song(&self, song: &str) -> Result<SongMaterial, EvaluationError> {
        let path = self.dir.join(format!("{song}-material.json"));
        let data = std::fs::read_to_string(&path)
            .map_err(|e| EvaluationError::io(format!("read {}", path.display()), e))?;
        serde_json::from_str(&data)
            .map_err(|e| EvaluationError::json(format!("parse {}", path.display()), e))
    }
}
