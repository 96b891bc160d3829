use serde::{Deserialize, Serialize};

/// Harmonic symbol attached to one time step. Compared by exact string equality.
pub type Label = String;

/// One label per time step of a single version, in temporal order.
pub type Sequence = Vec<Label>;

/// One time step within one version's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentRef {
    pub version: usize,
    pub time: usize,
}

impl SegmentRef {
    pub fn new(version: usize, time: usize) -> Self {
        Self { version, time }
    }
}

/// References the upstream alignment considers harmonically equivalent.
pub type TimelineGroup = Vec<SegmentRef>;

/// Ordered groups; position `i` pairs with label `i` of a consensus array.
pub type Timeline = Vec<TimelineGroup>;

/// Coverage ratios of one alignment path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentScore {
    /// `|path| / |ground truth|`
    pub ground_p: f64,
    /// `|path| / |candidate|`
    pub seq_p: f64,
    pub path_len: usize,
}

/// Summary of one song. Per-version families are averaged; the raw consensus
/// arrays are scored once each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    pub original_ground: f64,
    pub original_seq: f64,
    pub tl_modes_ground: f64,
    pub tl_modes_seq: f64,
    pub tl_graph_ground: f64,
    pub tl_graph_seq: f64,
    pub msa_ground: f64,
    pub msa_seq: f64,
    pub graph_ground: f64,
    pub graph_seq: f64,
}

impl EvaluationRecord {
    pub const FIELD_COUNT: usize = 10;

    pub fn fields(&self) -> [(&'static str, f64); Self::FIELD_COUNT] {
        [
            ("originalGround", self.original_ground),
            ("originalSeq", self.original_seq),
            ("tlModesGround", self.tl_modes_ground),
            ("tlModesSeq", self.tl_modes_seq),
            ("tlGraphGround", self.tl_graph_ground),
            ("tlGraphSeq", self.tl_graph_seq),
            ("msaGround", self.msa_ground),
            ("msaSeq", self.msa_seq),
            ("graphGround", self.graph_ground),
            ("graphSeq", self.graph_seq),
        ]
    }
}

/// One element of `points[version][time]`: a time stamp followed by the
/// pitch classes sounding at that step. Serialized as `[time, [pcs...]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFrame(pub f64, pub Vec<u8>);

impl PointFrame {
    pub fn time(&self) -> f64 {
        self.0
    }

    pub fn pitch_classes(&self) -> &[u8] {
        &self.1
    }
}

/// Everything the upstream alignment and labeling collaborators produce for
/// one song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongMaterial {
    /// Identifier of the leadsheet holding this song's ground truth.
    pub leadsheet: String,
    pub points: Vec<Vec<PointFrame>>,
    /// Position/mode-based consensus, one label per timeline group.
    pub mode_labels: Sequence,
    /// Graph/section-based consensus, one label per timeline group.
    pub graph_labels: Sequence,
    pub timeline: Timeline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_result_file_field_names() {
        let record = EvaluationRecord {
            original_ground: 0.5,
            original_seq: 0.25,
            tl_modes_ground: 1.0,
            tl_modes_seq: 1.0,
            tl_graph_ground: 0.0,
            tl_graph_seq: 0.0,
            msa_ground: 0.75,
            msa_seq: 0.5,
            graph_ground: 0.125,
            graph_seq: 1.0,
        };
        let json = serde_json::to_value(record).expect("serialize record");
        let object = json.as_object().expect("record is an object");
        assert_eq!(object.len(), EvaluationRecord::FIELD_COUNT);
        for (name, value) in record.fields() {
            assert_eq!(object[name].as_f64(), Some(value), "field {name}");
        }
    }

    #[test]
    fn point_frame_parses_from_time_and_pitch_classes() {
        let frame: PointFrame = serde_json::from_str("[1.5, [0, 4, 7]]").expect("valid frame");
        assert_eq!(frame.time(), 1.5);
        assert_eq!(frame.pitch_classes(), &[0, 4, 7]);
    }

    #[test]
    fn song_material_parses_segment_refs() {
        let json = r#"{
            "leadsheet": "song_a",
            "points": [[[0.0, [0, 4, 7]]]],
            "modeLabels": ["0-4-7"],
            "graphLabels": ["0-4-7"],
            "timeline": [[{"version": 0, "time": 0}]]
        }"#;
        let material: SongMaterial = serde_json::from_str(json).expect("valid material");
        assert_eq!(material.timeline[0][0], SegmentRef::new(0, 0));
        assert_eq!(material.points[0].len(), 1);
    }
}
