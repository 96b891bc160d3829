use crate::alignment::scorer::AlignmentScorer;
use crate::error::EvaluationError;
use crate::evaluation::combiner;
use crate::pipeline::traits::{GroundTruthLoader, LabelRenderer, SongSource};
use crate::types::{EvaluationRecord, PointFrame, Sequence, SongMaterial};

/// Result of evaluating one song in a batch.
#[derive(Debug)]
pub struct SongOutcome {
    pub song: String,
    pub result: Result<EvaluationRecord, EvaluationError>,
}

pub struct SongEvaluator {
    scorer: AlignmentScorer,
    label_renderer: Box<dyn LabelRenderer>,
    ground_truth_loader: Box<dyn GroundTruthLoader>,
    simplify_leadsheet: bool,
}

pub(crate) struct SongEvaluatorParts {
    pub scorer: AlignmentScorer,
    pub label_renderer: Box<dyn LabelRenderer>,
    pub ground_truth_loader: Box<dyn GroundTruthLoader>,
    pub simplify_leadsheet: bool,
}

impl SongEvaluator {
    pub(crate) fn from_parts(parts: SongEvaluatorParts) -> Self {
        Self {
            scorer: parts.scorer,
            label_renderer: parts.label_renderer,
            ground_truth_loader: parts.ground_truth_loader,
            simplify_leadsheet: parts.simplify_leadsheet,
        }
    }

    pub fn scorer(&self) -> &AlignmentScorer {
        &self.scorer
    }

    /// Renders the untouched per-version label sequences from feature frames.
    pub fn original_sequences(&self, points: &[Vec<PointFrame>]) -> Vec<Sequence> {
        points
            .iter()
            .map(|frames| {
                frames
                    .iter()
                    .map(|frame| self.label_renderer.render(frame))
                    .collect()
            })
            .collect()
    }

    pub fn evaluate_song(
        &self,
        song: &str,
        material: &SongMaterial,
    ) -> Result<EvaluationRecord, EvaluationError> {
        let original = self.original_sequences(&material.points);
        let ground_truth = self
            .ground_truth_loader
            .load(&material.leadsheet, self.simplify_leadsheet)
            .map_err(|err| err.in_song(song))?;

        tracing::info!(
            song,
            versions = original.len(),
            groups = material.timeline.len(),
            ground_truth_len = ground_truth.len(),
            "evaluating song"
        );

        combiner::evaluate(
            &self.scorer,
            song,
            &original,
            &material.mode_labels,
            &material.graph_labels,
            &material.timeline,
            &ground_truth,
        )
    }

    /// Evaluates songs strictly one after another. A failing song is logged
    /// and reported in its outcome; the remaining songs still run.
    pub fn evaluate_songs(
        &self,
        source: &dyn SongSource,
        songs: &[String],
        mut on_outcome: impl FnMut(&SongOutcome),
    ) -> Vec<SongOutcome> {
        let mut outcomes = Vec::with_capacity(songs.len());
        for song in songs {
            let result = source
                .load_song(song)
                .map_err(|err| err.in_song(song.as_str()))
                .and_then(|material| self.evaluate_song(song, &material));
            if let Err(err) = &result {
                tracing::warn!(song = song.as_str(), error = %err, "song evaluation failed");
            }
            let outcome = SongOutcome {
                song: song.clone(),
                result,
            };
            on_outcome(&outcome);
            outcomes.push(outcome);
        }
        outcomes
    }
}
