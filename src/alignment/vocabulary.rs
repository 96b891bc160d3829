use std::collections::HashMap;

use crate::error::EvaluationError;
use crate::types::Label;

/// Labels of one scoring call mapped to call-local integer codes.
///
/// Codes follow first-occurrence order over `ground_truth ++ candidate`.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    labels: Vec<Label>,
    codes: HashMap<Label, usize>,
}

impl Vocabulary {
    pub fn build(ground_truth: &[Label], candidate: &[Label]) -> Self {
        let mut vocab = Self::default();
        for label in ground_truth.iter().chain(candidate) {
            if !vocab.codes.contains_key(label) {
                vocab.codes.insert(label.clone(), vocab.labels.len());
                vocab.labels.push(label.clone());
            }
        }
        vocab
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn code(&self, label: &str) -> Option<usize> {
        self.codes.get(label).copied()
    }

    /// Encodes every label as a one-dimensional frame, the shape aligners
    /// operate on.
    pub fn encode(&self, seq: &[Label]) -> Result<Vec<Vec<usize>>, EvaluationError> {
        seq.iter()
            .map(|label| {
                self.code(label)
                    .map(|code| vec![code])
                    .ok_or_else(|| EvaluationError::UnknownLabel {
                        label: label.clone(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<Label> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn build_keeps_first_occurrence_order() {
        let vocab = Vocabulary::build(&labels(&["C", "G", "C"]), &labels(&["Am", "G", "F"]));
        assert_eq!(vocab.labels(), labels(&["C", "G", "Am", "F"]).as_slice());
        assert_eq!(vocab.code("Am"), Some(2));
    }

    #[test]
    fn encode_wraps_codes_in_single_element_frames() {
        let ground = labels(&["C", "G"]);
        let candidate = labels(&["G", "F", "C"]);
        let vocab = Vocabulary::build(&ground, &candidate);
        let coded = vocab.encode(&candidate).expect("all labels known");
        assert_eq!(coded, vec![vec![1], vec![2], vec![0]]);
        assert!(coded.iter().all(|frame| frame.len() == 1));
    }

    #[test]
    fn encode_rejects_label_outside_vocabulary() {
        let vocab = Vocabulary::build(&labels(&["C"]), &labels(&["G"]));
        let err = vocab.encode(&labels(&["C", "Bb"])).unwrap_err();
        assert!(matches!(err, EvaluationError::UnknownLabel { label } if label == "Bb"));
    }

    #[test]
    fn empty_inputs_build_empty_vocabulary() {
        let vocab = Vocabulary::build(&[], &[]);
        assert!(vocab.is_empty());
        assert_eq!(vocab.encode(&[]).expect("empty encodes").len(), 0);
    }
}
