use std::collections::HashMap;

use crate::error::EvaluationError;
use crate::types::{Label, SegmentRef, Sequence, TimelineGroup};

/// Reference → group lookup for one song's timeline.
///
/// Built once per song and shared by every consensus array projected onto
/// that song. Construction checks that each reference is in range and that
/// no reference belongs to two groups. The version lengths seen at build time
/// are kept, and `annotate` only accepts sequences of exactly that shape.
#[derive(Debug, Clone)]
pub struct TimelineIndex {
    group_count: usize,
    version_lengths: Vec<usize>,
    group_of: HashMap<SegmentRef, usize>,
}

impl TimelineIndex {
    pub fn build(
        timeline: &[TimelineGroup],
        original_sequences: &[Sequence],
    ) -> Result<Self, EvaluationError> {
        let capacity = timeline.iter().map(Vec::len).sum();
        let mut group_of = HashMap::with_capacity(capacity);

        for (group, refs) in timeline.iter().enumerate() {
            for &segment in refs {
                check_in_range(group, segment, original_sequences)?;
                if let Some(first_group) = group_of.insert(segment, group) {
                    // a group listing the same reference twice still claims it once
                    if first_group != group {
                        return Err(EvaluationError::PartitionViolation {
                            version: segment.version,
                            time: segment.time,
                            first_group,
                            second_group: group,
                        });
                    }
                }
            }
        }

        tracing::debug!(
            groups = timeline.len(),
            covered_segments = group_of.len(),
            "annotation: built timeline index"
        );

        Ok(Self {
            group_count: timeline.len(),
            version_lengths: original_sequences.iter().map(Vec::len).collect(),
            group_of,
        })
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn version_lengths(&self) -> &[usize] {
        &self.version_lengths
    }

    pub fn covered_count(&self) -> usize {
        self.group_of.len()
    }

    pub fn group_of(&self, segment: SegmentRef) -> Option<usize> {
        self.group_of.get(&segment).copied()
    }

    /// Replaces every covered step with its group's consensus label; uncovered
    /// steps keep their original label.
    pub fn annotate(
        &self,
        original_sequences: &[Sequence],
        consensus_labels: &[Label],
    ) -> Result<Vec<Sequence>, EvaluationError> {
        if consensus_labels.len() != self.group_count {
            return Err(EvaluationError::LengthMismatch {
                context: "consensus labels vs timeline groups",
                expected: self.group_count,
                actual: consensus_labels.len(),
            });
        }
        self.check_shape(original_sequences)?;

        let annotated: Vec<Sequence> = original_sequences
            .iter()
            .enumerate()
            .map(|(version, seq)| {
                seq.iter()
                    .enumerate()
                    .map(|(time, original)| {
                        match self.group_of(SegmentRef::new(version, time)) {
                            Some(group) => consensus_labels[group].clone(),
                            None => original.clone(),
                        }
                    })
                    .collect()
            })
            .collect();
        Ok(annotated)
    }

    fn check_shape(&self, original_sequences: &[Sequence]) -> Result<(), EvaluationError> {
        if original_sequences.len() != self.version_lengths.len() {
            return Err(EvaluationError::LengthMismatch {
                context: "versions vs timeline index",
                expected: self.version_lengths.len(),
                actual: original_sequences.len(),
            });
        }
        for (seq, &expected) in original_sequences.iter().zip(&self.version_lengths) {
            if seq.len() != expected {
                return Err(EvaluationError::LengthMismatch {
                    context: "version time steps vs timeline index",
                    expected,
                    actual: seq.len(),
                });
            }
        }
        Ok(())
    }
}

fn check_in_range(
    group: usize,
    segment: SegmentRef,
    original_sequences: &[Sequence],
) -> Result<(), EvaluationError> {
    let Some(seq) = original_sequences.get(segment.version) else {
        return Err(EvaluationError::InvalidSegment {
            group,
            version: segment.version,
            time: segment.time,
            reason: format!("song has {} versions", original_sequences.len()),
        });
    };
    if segment.time >= seq.len() {
        return Err(EvaluationError::InvalidSegment {
            group,
            version: segment.version,
            time: segment.time,
            reason: format!("version has {} time steps", seq.len()),
        });
    }
    Ok(())
}

/// Builds a fresh index and projects `consensus_labels` onto every version.
pub fn annotate(
    original_sequences: &[Sequence],
    timeline: &[TimelineGroup],
    consensus_labels: &[Label],
) -> Result<Vec<Sequence>, EvaluationError> {
    TimelineIndex::build(timeline, original_sequences)?
        .annotate(original_sequences, consensus_labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(items: &[&str]) -> Sequence {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn group(refs: &[(usize, usize)]) -> TimelineGroup {
        refs.iter().map(|&(v, t)| SegmentRef::new(v, t)).collect()
    }

    #[test]
    fn covered_steps_take_consensus_label() {
        let originals = vec![seq(&["Am", "F", "G"]), seq(&["C", "F", "E"])];
        let timeline = vec![group(&[(0, 0), (1, 0)]), group(&[(0, 2), (1, 2)])];
        let annotated = annotate(&originals, &timeline, &seq(&["C", "G"])).expect("annotate");
        assert_eq!(annotated, vec![seq(&["C", "F", "G"]), seq(&["C", "F", "G"])]);
    }

    #[test]
    fn uncovered_steps_pass_through() {
        let originals = vec![seq(&["D", "E", "F"])];
        let timeline = vec![group(&[(0, 1)])];
        let annotated = annotate(&originals, &timeline, &seq(&["X"])).expect("annotate");
        assert_eq!(annotated, vec![seq(&["D", "X", "F"])]);
    }

    #[test]
    fn empty_timeline_returns_originals() {
        let originals = vec![seq(&["C", "G"]), seq(&[])];
        let annotated = annotate(&originals, &[], &[]).expect("annotate");
        assert_eq!(annotated, originals);
    }

    #[test]
    fn reference_in_two_groups_is_partition_violation() {
        let originals = vec![seq(&["C", "G"]), seq(&["C", "G"])];
        let timeline = vec![group(&[(0, 0), (1, 1)]), group(&[(1, 0), (1, 1)])];
        let err = TimelineIndex::build(&timeline, &originals).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::PartitionViolation {
                version: 1,
                time: 1,
                first_group: 0,
                second_group: 1,
            }
        ));
    }

    #[test]
    fn repeated_reference_within_one_group_is_accepted() {
        let originals = vec![seq(&["C"])];
        let timeline = vec![group(&[(0, 0), (0, 0)])];
        let index = TimelineIndex::build(&timeline, &originals).expect("index");
        assert_eq!(index.covered_count(), 1);
        assert_eq!(index.group_of(SegmentRef::new(0, 0)), Some(0));
    }

    #[test]
    fn out_of_range_time_is_rejected() {
        let originals = vec![seq(&["C", "G"])];
        let timeline = vec![group(&[(0, 2)])];
        let err = TimelineIndex::build(&timeline, &originals).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::InvalidSegment {
                group: 0,
                version: 0,
                time: 2,
                ..
            }
        ));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let originals = vec![seq(&["C"])];
        let timeline = vec![group(&[(0, 0)]), group(&[(3, 0)])];
        let err = TimelineIndex::build(&timeline, &originals).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::InvalidSegment {
                group: 1,
                version: 3,
                ..
            }
        ));
    }

    #[test]
    fn consensus_length_must_match_group_count() {
        let originals = vec![seq(&["C", "G"])];
        let timeline = vec![group(&[(0, 0)]), group(&[(0, 1)])];
        let index = TimelineIndex::build(&timeline, &originals).expect("index");
        let err = index.annotate(&originals, &seq(&["C"])).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn index_rejects_sequences_of_another_song() {
        let originals = vec![seq(&["C", "G"]), seq(&["F"])];
        let timeline = vec![group(&[(1, 0)])];
        let index = TimelineIndex::build(&timeline, &originals).expect("index");
        assert_eq!(index.version_lengths(), &[2, 1]);

        let other_song = vec![seq(&["X"]), seq(&["Y", "Z"]), seq(&["W"])];
        let err = index.annotate(&other_song, &seq(&["K"])).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::LengthMismatch {
                expected: 2,
                actual: 3,
                ..
            }
        ));

        let reshaped = vec![seq(&["X"]), seq(&["Y", "Z"])];
        let err = index.annotate(&reshaped, &seq(&["K"])).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn one_index_serves_both_consensus_arrays() {
        let originals = vec![seq(&["C", "D"]), seq(&["E", "F"])];
        let timeline = vec![group(&[(0, 1), (1, 0)])];
        let index = TimelineIndex::build(&timeline, &originals).expect("index");
        let modes = index.annotate(&originals, &seq(&["M"])).expect("modes");
        let graph = index.annotate(&originals, &seq(&["G"])).expect("graph");
        assert_eq!(modes, vec![seq(&["C", "M"]), seq(&["M", "F"])]);
        assert_eq!(graph, vec![seq(&["C", "G"]), seq(&["G", "F"])]);
    }
}
