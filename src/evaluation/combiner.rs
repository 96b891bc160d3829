use crate::alignment::annotation::TimelineIndex;
use crate::alignment::scorer::AlignmentScorer;
use crate::error::EvaluationError;
use crate::types::{AlignmentScore, EvaluationRecord, Label, Sequence, TimelineGroup};

pub const FAMILY_ORIGINAL: &str = "original";
pub const FAMILY_TL_MODES: &str = "tl_modes";
pub const FAMILY_TL_GRAPH: &str = "tl_graph";
pub const FAMILY_MSA: &str = "msa";
pub const FAMILY_GRAPH: &str = "graph";

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Scores the original, mode-annotated and graph-annotated versions plus both
/// raw consensus arrays of one song against its ground truth.
///
/// Every version counts equally in its family's mean regardless of length.
/// Any failure aborts the whole song; no partial record is produced.
pub fn evaluate(
    scorer: &AlignmentScorer,
    song: &str,
    original_sequences: &[Sequence],
    mode_labels: &[Label],
    graph_labels: &[Label],
    timeline: &[TimelineGroup],
    ground_truth: &[Label],
) -> Result<EvaluationRecord, EvaluationError> {
    evaluate_inner(
        scorer,
        original_sequences,
        mode_labels,
        graph_labels,
        timeline,
        ground_truth,
    )
    .map_err(|err| err.in_song(song))
}

fn evaluate_inner(
    scorer: &AlignmentScorer,
    original_sequences: &[Sequence],
    mode_labels: &[Label],
    graph_labels: &[Label],
    timeline: &[TimelineGroup],
    ground_truth: &[Label],
) -> Result<EvaluationRecord, EvaluationError> {
    if original_sequences.is_empty() {
        return Err(EvaluationError::invalid_input("song has no versions"));
    }

    let index = TimelineIndex::build(timeline, original_sequences)?;
    let mode_chords = index
        .annotate(original_sequences, mode_labels)
        .map_err(|err| err.in_family(FAMILY_TL_MODES, None))?;
    let graph_chords = index
        .annotate(original_sequences, graph_labels)
        .map_err(|err| err.in_family(FAMILY_TL_GRAPH, None))?;

    let original = score_family(scorer, FAMILY_ORIGINAL, original_sequences, ground_truth)?;
    let tl_modes = score_family(scorer, FAMILY_TL_MODES, &mode_chords, ground_truth)?;
    let tl_graph = score_family(scorer, FAMILY_TL_GRAPH, &graph_chords, ground_truth)?;
    let msa = scorer
        .score(ground_truth, mode_labels)
        .map_err(|err| err.in_family(FAMILY_MSA, None))?;
    let graph = scorer
        .score(ground_truth, graph_labels)
        .map_err(|err| err.in_family(FAMILY_GRAPH, None))?;

    Ok(EvaluationRecord {
        original_ground: original.ground_p,
        original_seq: original.seq_p,
        tl_modes_ground: tl_modes.ground_p,
        tl_modes_seq: tl_modes.seq_p,
        tl_graph_ground: tl_graph.ground_p,
        tl_graph_seq: tl_graph.seq_p,
        msa_ground: msa.ground_p,
        msa_seq: msa.seq_p,
        graph_ground: graph.ground_p,
        graph_seq: graph.seq_p,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FamilyMeans {
    pub ground_p: f64,
    pub seq_p: f64,
}

/// Per-family mean of already computed per-version scores.
pub fn family_means(scores: &[AlignmentScore]) -> Option<FamilyMeans> {
    let ground: Vec<f64> = scores.iter().map(|s| s.ground_p).collect();
    let seq: Vec<f64> = scores.iter().map(|s| s.seq_p).collect();
    Some(FamilyMeans {
        ground_p: mean(&ground)?,
        seq_p: mean(&seq)?,
    })
}

fn score_family(
    scorer: &AlignmentScorer,
    family: &'static str,
    sequences: &[Sequence],
    ground_truth: &[Label],
) -> Result<FamilyMeans, EvaluationError> {
    let scores = sequences
        .iter()
        .enumerate()
        .map(|(version, seq)| {
            scorer
                .score(ground_truth, seq)
                .map_err(|err| err.in_family(family, Some(version)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let means = family_means(&scores).ok_or_else(|| {
        EvaluationError::invalid_input(format!("family '{family}' has no versions"))
    })?;
    tracing::debug!(
        family,
        versions = scores.len(),
        ground_p = means.ground_p,
        seq_p = means.seq_p,
        "combiner: scored family"
    );
    Ok(means)
}
