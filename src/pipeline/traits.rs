use crate::error::EvaluationError;
use crate::types::{Label, PointFrame, Sequence, SongMaterial};

/// Local alignment over vector-valued time steps.
///
/// Returns matched `(index into a, index into b)` pairs, strictly increasing
/// in both coordinates.
pub trait SequenceAligner: Send + Sync {
    fn align_path(
        &self,
        a: &[Vec<usize>],
        b: &[Vec<usize>],
    ) -> Result<Vec<(usize, usize)>, EvaluationError>;
}

/// Renders the harmonic part of one feature frame as a label.
pub trait LabelRenderer: Send + Sync {
    fn render(&self, frame: &PointFrame) -> Label;
}

pub trait GroundTruthLoader: Send + Sync {
    /// Loads the chord sequence of a leadsheet. `simplify` merges consecutive
    /// repeats.
    fn load(&self, leadsheet: &str, simplify: bool) -> Result<Sequence, EvaluationError>;
}

/// Output of the upstream feature extraction, multiple sequence alignment and
/// consensus labeling for one song.
pub trait SongSource: Send + Sync {
    fn load_song(&self, song: &str) -> Result<SongMaterial, EvaluationError>;
}
