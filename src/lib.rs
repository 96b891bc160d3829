pub mod alignment;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod leadsheet;
pub mod pipeline;
pub mod types;

pub use alignment::annotation::{annotate, TimelineIndex};
pub use alignment::scorer::AlignmentScorer;
pub use alignment::smith_waterman::{smith_waterman_path, SmithWatermanOptions};
pub use alignment::vocabulary::Vocabulary;
pub use config::EvaluationConfig;
pub use error::EvaluationError;
pub use evaluation::combiner::{evaluate, mean};
pub use evaluation::report::{build_report, Meta, Report, SongReport};
pub use pipeline::builder::EvaluatorBuilder;
pub use pipeline::defaults::{
    JsonLeadsheetLoader, JsonSongSource, PitchClassSetRenderer, SmithWatermanAligner,
};
pub use pipeline::runtime::{SongEvaluator, SongOutcome};
pub use pipeline::traits::{GroundTruthLoader, LabelRenderer, SequenceAligner, SongSource};
pub use types::{
    AlignmentScore, EvaluationRecord, Label, PointFrame, SegmentRef, Sequence, SongMaterial,
    Timeline, TimelineGroup,
};
