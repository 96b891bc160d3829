use std::path::Path;

use serde::Deserialize;

use crate::error::EvaluationError;
use crate::types::Sequence;

/// Hand-authored chord chart. Bars are listed in playing order, each holding
/// the chords sounding in that bar.
#[derive(Debug, Clone, Deserialize)]
pub struct Leadsheet {
    #[serde(default)]
    pub title: Option<String>,
    pub bars: Vec<Vec<String>>,
}

impl Leadsheet {
    pub fn load(path: &Path) -> Result<Self, EvaluationError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| EvaluationError::io(format!("read leadsheet {}", path.display()), e))?;
        serde_json::from_str(&data)
            .map_err(|e| EvaluationError::json(format!("parse leadsheet {}", path.display()), e))
    }
}

/// Flattens the bars into one chord sequence.
///
/// With `simplify`, consecutive equal chords collapse into one, also across
/// bar lines.
pub fn standard_chord_sequence(leadsheet: &Leadsheet, simplify: bool) -> Sequence {
    let mut chords: Sequence = Vec::new();
    for chord in leadsheet.bars.iter().flatten() {
        let chord = chord.trim();
        if chord.is_empty() {
            continue;
        }
        if simplify && chords.last().is_some_and(|last| last == chord) {
            continue;
        }
        chords.push(chord.to_string());
    }
    chords
}
