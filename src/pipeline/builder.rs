use crate::alignment::scorer::AlignmentScorer;
use crate::config::EvaluationConfig;
use crate::error::EvaluationError;
use crate::pipeline::defaults::{JsonLeadsheetLoader, PitchClassSetRenderer, SmithWatermanAligner};
use crate::pipeline::runtime::{SongEvaluator, SongEvaluatorParts};
use crate::pipeline::traits::{GroundTruthLoader, LabelRenderer, SequenceAligner};

pub struct EvaluatorBuilder {
    config: EvaluationConfig,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
    label_renderer: Option<Box<dyn LabelRenderer>>,
    ground_truth_loader: Option<Box<dyn GroundTruthLoader>>,
}

impl EvaluatorBuilder {
    pub fn new(config: EvaluationConfig) -> Self {
        Self {
            config,
            sequence_aligner: None,
            label_renderer: None,
            ground_truth_loader: None,
        }
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    pub fn with_label_renderer(mut self, label_renderer: Box<dyn LabelRenderer>) -> Self {
        self.label_renderer = Some(label_renderer);
        self
    }

    pub fn with_ground_truth_loader(
        mut self,
        ground_truth_loader: Box<dyn GroundTruthLoader>,
    ) -> Self {
        self.ground_truth_loader = Some(ground_truth_loader);
        self
    }

    pub fn build(self) -> Result<SongEvaluator, EvaluationError> {
        let ground_truth_loader: Box<dyn GroundTruthLoader> = match self.ground_truth_loader {
            Some(loader) => loader,
            None => {
                let dir = self.config.leadsheet_path();
                if !dir.is_dir() {
                    return Err(EvaluationError::invalid_input(format!(
                        "leadsheet directory '{}' does not exist",
                        dir.display()
                    )));
                }
                Box::new(JsonLeadsheetLoader::new(dir))
            }
        };

        Ok(SongEvaluator::from_parts(SongEvaluatorParts {
            scorer: AlignmentScorer::new(
                self.sequence_aligner
                    .unwrap_or_else(|| Box::new(SmithWatermanAligner::default())),
            ),
            label_renderer: self
                .label_renderer
                .unwrap_or_else(|| Box::new(PitchClassSetRenderer)),
            ground_truth_loader,
            simplify_leadsheet: self.config.simplify_leadsheet,
        }))
    }
}
