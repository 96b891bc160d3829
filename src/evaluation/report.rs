use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::EvaluationError;
use crate::evaluation::combiner::mean;
use crate::pipeline::runtime::SongOutcome;
use crate::types::EvaluationRecord;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub songs: Vec<SongReport>,
    /// Field-wise mean over the songs that produced a record.
    pub aggregate: Option<EvaluationRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub song_count: usize,
    pub evaluated_count: usize,
    pub failed_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SongReport {
    pub song: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<EvaluationRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    /// Writes the report as pretty JSON, creating missing parent directories.
    pub fn write_json(&self, path: &Path) -> Result<(), EvaluationError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                EvaluationError::io(format!("create report directory {}", parent.display()), e)
            })?;
        }

        let file = File::create(path)
            .map_err(|e| EvaluationError::io(format!("create report {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| EvaluationError::json(format!("serialize report {}", path.display()), e))?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .map_err(|e| EvaluationError::io(format!("write report {}", path.display()), e))
    }
}

pub fn build_report(outcomes: &[SongOutcome], generated_at: DateTime<Utc>) -> Report {
    let songs: Vec<SongReport> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(record) => SongReport {
                song: outcome.song.clone(),
                record: Some(*record),
                error: None,
            },
            Err(err) => SongReport {
                song: outcome.song.clone(),
                record: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    let records: Vec<EvaluationRecord> = songs.iter().filter_map(|song| song.record).collect();
    let evaluated_count = records.len();

    Report {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: generated_at.to_rfc3339(),
            song_count: songs.len(),
            evaluated_count,
            failed_count: songs.len() - evaluated_count,
        },
        songs,
        aggregate: mean_record(&records),
    }
}

pub fn mean_record(records: &[EvaluationRecord]) -> Option<EvaluationRecord> {
    let field = |get: fn(&EvaluationRecord) -> f64| {
        let values: Vec<f64> = records.iter().map(get).collect();
        mean(&values)
    };
    Some(EvaluationRecord {
        original_ground: field(|r| r.original_ground)?,
        original_seq: field(|r| r.original_seq)?,
        tl_modes_ground: field(|r| r.tl_modes_ground)?,
        tl_modes_seq: field(|r| r.tl_modes_seq)?,
        tl_graph_ground: field(|r| r.tl_graph_ground)?,
        tl_graph_seq: field(|r| r.tl_graph_seq)?,
        msa_ground: field(|r| r.msa_ground)?,
        msa_seq: field(|r| r.msa_seq)?,
        graph_ground: field(|r| r.graph_ground)?,
        graph_seq: field(|r| r.graph_seq)?,
    })
}
