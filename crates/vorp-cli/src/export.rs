// Scored-board CSV export (`save PATH`).

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use vorp_core::{CandidateScore, NeedState, Position};

const HEADER: [&str; 6] = [
    "player",
    "position",
    "proj_points",
    "vorp",
    "adj_score",
    "need_state",
];

/// One exported row. Scores are written at full precision; a missing
/// score is an empty field.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    player: &'a str,
    position: Position,
    proj_points: f64,
    vorp: Option<f64>,
    adj_score: Option<f64>,
    need_state: NeedState,
}

impl<'a> From<&'a CandidateScore> for ExportRow<'a> {
    fn from(row: &'a CandidateScore) -> Self {
        ExportRow {
            player: &row.player,
            position: row.position,
            proj_points: row.proj_points,
            vorp: row.vorp,
            adj_score: row.adj_score,
            need_state: row.need_state,
        }
    }
}

/// Write every row, in ranked order, with a header even when empty.
pub fn write_scored_csv<W: Write>(wtr: W, rows: &[CandidateScore]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(wtr);
    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(ExportRow::from(row))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_scored_csv(path: &Path, rows: &[CandidateScore]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_scored_csv(file, rows)
}
