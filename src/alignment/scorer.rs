use crate::alignment::vocabulary::Vocabulary;
use crate::error::EvaluationError;
use crate::pipeline::traits::SequenceAligner;
use crate::types::{AlignmentScore, Label};

/// Reduces the local alignment of a candidate against the ground truth to
/// two coverage ratios.
pub struct AlignmentScorer {
    aligner: Box<dyn SequenceAligner>,
}

impl AlignmentScorer {
    pub fn new(aligner: Box<dyn SequenceAligner>) -> Self {
        Self { aligner }
    }

    /// Empty sequences are rejected with `DegenerateSequence`; the ratios are
    /// never defined by convention.
    pub fn score(
        &self,
        ground_truth: &[Label],
        candidate: &[Label],
    ) -> Result<AlignmentScore, EvaluationError> {
        if ground_truth.is_empty() {
            return Err(EvaluationError::DegenerateSequence {
                role: "ground truth",
            });
        }
        if candidate.is_empty() {
            return Err(EvaluationError::DegenerateSequence { role: "candidate" });
        }

        let vocab = Vocabulary::build(ground_truth, candidate);
        let coded_ground = vocab.encode(ground_truth)?;
        let coded_candidate = vocab.encode(candidate)?;

        let path = self.aligner.align_path(&coded_ground, &coded_candidate)?;
        validate_path(&path, ground_truth.len(), candidate.len())?;

        let path_len = path.len();
        tracing::debug!(
            ground_len = ground_truth.len(),
            candidate_len = candidate.len(),
            vocab_len = vocab.len(),
            path_len,
            "scorer: aligned candidate against ground truth"
        );

        Ok(AlignmentScore {
            ground_p: path_len as f64 / ground_truth.len() as f64,
            seq_p: path_len as f64 / candidate.len() as f64,
            path_len,
        })
    }
}

fn validate_path(
    path: &[(usize, usize)],
    ground_len: usize,
    candidate_len: usize,
) -> Result<(), EvaluationError> {
    if let Some(&(i, j)) = path
        .iter()
        .find(|&&(i, j)| i >= ground_len || j >= candidate_len)
    {
        return Err(EvaluationError::invalid_path(format!(
            "pair ({i}, {j}) outside {ground_len}x{candidate_len}"
        )));
    }
    if let Some(w) = path
        .windows(2)
        .find(|w| w[1].0 <= w[0].0 || w[1].1 <= w[0].1)
    {
        return Err(EvaluationError::invalid_path(format!(
            "pair {:?} does not advance past {:?}",
            w[1], w[0]
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::defaults::SmithWatermanAligner;

    struct FixedPathAligner(Vec<(usize, usize)>);

    impl SequenceAligner for FixedPathAligner {
        fn align_path(
            &self,
            _a: &[Vec<usize>],
            _b: &[Vec<usize>],
        ) -> Result<Vec<(usize, usize)>, EvaluationError> {
            Ok(self.0.clone())
        }
    }

    struct FailingAligner;

    impl SequenceAligner for FailingAligner {
        fn align_path(
            &self,
            _a: &[Vec<usize>],
            _b: &[Vec<usize>],
        ) -> Result<Vec<(usize, usize)>, EvaluationError> {
            Err(EvaluationError::collaborator("local alignment", "backend down"))
        }
    }

    fn labels(items: &[&str]) -> Vec<Label> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ratios_come_from_stub_path_length() {
        let scorer = AlignmentScorer::new(Box::new(FixedPathAligner(vec![(0, 1), (2, 3)])));
        let score = scorer
            .score(&labels(&["C", "F", "G", "C"]), &labels(&["A", "C", "D", "G", "E"]))
            .expect("score");
        assert_eq!(score.path_len, 2);
        assert_eq!(score.ground_p, 0.5);
        assert_eq!(score.seq_p, 0.4);
    }

    #[test]
    fn sequence_against_itself_has_full_coverage() {
        let scorer = AlignmentScorer::new(Box::new(SmithWatermanAligner::default()));
        let seq = labels(&["C", "C", "G", "Am", "F", "G"]);
        let score = scorer.score(&seq, &seq).expect("score");
        assert_eq!(score.ground_p, 1.0);
        assert_eq!(score.seq_p, 1.0);
    }

    #[test]
    fn empty_candidate_is_degenerate() {
        let scorer = AlignmentScorer::new(Box::new(SmithWatermanAligner::default()));
        let err = scorer.score(&labels(&["C", "G"]), &[]).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::DegenerateSequence { role: "candidate" }
        ));
    }

    #[test]
    fn empty_ground_truth_is_degenerate() {
        let scorer = AlignmentScorer::new(Box::new(SmithWatermanAligner::default()));
        let err = scorer.score(&[], &labels(&["C"])).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::DegenerateSequence {
                role: "ground truth"
            }
        ));
    }

    #[test]
    fn out_of_range_path_is_rejected() {
        let scorer = AlignmentScorer::new(Box::new(FixedPathAligner(vec![(0, 0), (1, 5)])));
        let err = scorer
            .score(&labels(&["C", "G"]), &labels(&["C", "G"]))
            .unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidPath { .. }));
    }

    #[test]
    fn non_monotonic_path_is_rejected() {
        let scorer = AlignmentScorer::new(Box::new(FixedPathAligner(vec![(1, 1), (0, 0)])));
        let err = scorer
            .score(&labels(&["C", "G"]), &labels(&["C", "G"]))
            .unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidPath { .. }));
    }

    #[test]
    fn aligner_failure_propagates_unchanged() {
        let scorer = AlignmentScorer::new(Box::new(FailingAligner));
        let err = scorer.score(&labels(&["C"]), &labels(&["C"])).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Collaborator {
                context: "local alignment",
                ..
            }
        ));
    }
}
