// Player pool loading from a projections CSV.
//
// Headers vary between projection sources, so the player, position, and
// points columns are auto-detected from a list of common spellings unless
// overridden. Rows that cannot be used are skipped with a log line rather
// than failing the whole load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use serde::Deserialize;
use tracing::{debug, info, warn};
use vorp_core::{Player, PlayerPool, Position};

// ---------------------------------------------------------------------------
// Column detection
// ---------------------------------------------------------------------------

const PLAYER_CANDIDATES: &[&str] = &["player", "name", "full_name", "fullName"];
const POSITION_CANDIDATES: &[&str] = &["pos", "position"];
const POINTS_CANDIDATES: &[&str] = &[
    "proj_points",
    "projected",
    "projected_points",
    "points",
    "fp",
    "fpts",
];

/// Explicit header names for the three required columns. Any column left
/// as `None` is auto-detected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ColumnOverrides {
    pub player: Option<String>,
    pub position: Option<String>,
    pub points: Option<String>,
}

impl ColumnOverrides {
    /// Overlay `other` on top of `self`, field by field.
    pub fn merged(&self, other: &ColumnOverrides) -> ColumnOverrides {
        ColumnOverrides {
            player: other.player.clone().or_else(|| self.player.clone()),
            position: other.position.clone().or_else(|| self.position.clone()),
            points: other.points.clone().or_else(|| self.points.clone()),
        }
    }
}

/// Resolved column indices into each CSV record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    player: usize,
    position: usize,
    points: usize,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{role} column '{name}' not found in CSV columns: {available:?}")]
    UnknownColumn {
        role: &'static str,
        name: String,
        available: Vec<String>,
    },

    #[error(
        "could not auto-detect columns for: {missing:?}; \
         use --col-player/--col-pos/--col-points to specify them"
    )]
    MissingColumns { missing: Vec<&'static str> },

    #[error("no usable player rows in {path}")]
    EmptyPool { path: String },
}

fn resolve_column(
    headers: &StringRecord,
    role: &'static str,
    explicit: Option<&str>,
    candidates: &[&str],
) -> Result<Option<usize>, PoolError> {
    if let Some(name) = explicit {
        // Overrides must name a header exactly.
        return headers
            .iter()
            .position(|h| h == name)
            .map(Some)
            .ok_or_else(|| PoolError::UnknownColumn {
                role,
                name: name.to_string(),
                available: headers.iter().map(str::to_string).collect(),
            });
    }
    let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    Ok(candidates
        .iter()
        .find_map(|c| lowered.iter().position(|h| *h == c.to_lowercase())))
}

fn detect_columns(
    headers: &StringRecord,
    overrides: &ColumnOverrides,
) -> Result<ColumnMap, PoolError> {
    let player = resolve_column(headers, "player", overrides.player.as_deref(), PLAYER_CANDIDATES)?;
    let position = resolve_column(
        headers,
        "position",
        overrides.position.as_deref(),
        POSITION_CANDIDATES,
    )?;
    let points = resolve_column(headers, "points", overrides.points.as_deref(), POINTS_CANDIDATES)?;

    match (player, position, points) {
        (Some(player), Some(position), Some(points)) => Ok(ColumnMap {
            player,
            position,
            points,
        }),
        _ => {
            let mut missing = Vec::new();
            if player.is_none() {
                missing.push("player");
            }
            if position.is_none() {
                missing.push("position");
            }
            if points.is_none() {
                missing.push("proj_points");
            }
            Err(PoolError::MissingColumns { missing })
        }
    }
}

// ---------------------------------------------------------------------------
// Row cleaning
// ---------------------------------------------------------------------------

fn clean_row(record: &StringRecord, columns: ColumnMap, line: usize) -> Option<Player> {
    let (Some(name), Some(pos), Some(points)) = (
        record.get(columns.player),
        record.get(columns.position),
        record.get(columns.points),
    ) else {
        warn!("skipping row {}: too few fields", line);
        return None;
    };

    let name = name.trim();
    if name.is_empty() {
        warn!("skipping row {}: empty player name", line);
        return None;
    }

    let Some(position) = Position::from_str_pos(pos) else {
        debug!("skipping '{}': position '{}' is not scored", name, pos.trim());
        return None;
    };

    let proj_points = match points.trim().parse::<f64>() {
        Ok(p) if p.is_finite() => p,
        _ => {
            warn!("skipping '{}': unusable projected points '{}'", name, points.trim());
            return None;
        }
    };

    Some(Player::new(name, position, proj_points))
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Load a player pool from any CSV reader. `source` names the data for
/// error messages and is recorded as the pool's source.
pub fn load_pool_from_reader<R: Read>(
    rdr: R,
    source: &str,
    overrides: &ColumnOverrides,
) -> Result<PlayerPool, PoolError> {
    let csv_err = |e: csv::Error| PoolError::Csv {
        path: source.to_string(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = detect_columns(&headers, overrides)?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        match result {
            Ok(record) => match clean_row(&record, columns, line) {
                Some(player) => rows.push(player),
                None => skipped += 1,
            },
            Err(e) => {
                warn!("skipping malformed row {}: {}", line, e);
                skipped += 1;
            }
        }
    }

    if rows.is_empty() {
        return Err(PoolError::EmptyPool {
            path: source.to_string(),
        });
    }

    let pool = PlayerPool::new(source, rows);
    info!(
        "loaded {} players from {} ({} rows skipped)",
        pool.len(),
        source,
        skipped
    );
    Ok(pool)
}

/// Load a player pool from a CSV file on disk.
pub fn load_pool(path: &Path, overrides: &ColumnOverrides) -> Result<PlayerPool, PoolError> {
    let path_str = path.display().to_string();
    let file = File::open(path).map_err(|source| PoolError::Io {
        path: path_str.clone(),
        source,
    })?;
    load_pool_from_reader(file, &path_str, overrides)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
