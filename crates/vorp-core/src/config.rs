// Roster configuration and need weights, validated once per session.
//
// Raw settings arrive as loosely-typed maps (from TOML, command-line
// `KEY:VAL` lists, or a session snapshot). `RawDraftConfig::validate` is the
// single boundary where negative counts, unknown keys, and bad weights are
// rejected; everything downstream works with the typed `DraftConfig`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::position::{Position, FLEX_KEY};
use crate::draft::roster::NeedState;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("malformed list '{input}': {message}")]
    MalformedList { input: String, message: String },
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_TEAMS: i64 = 10;
pub const DEFAULT_TOP_N: i64 = 15;
pub const DEFAULT_NEED_WEIGHT: f64 = 1.0;
pub const DEFAULT_BENCH_WEIGHT: f64 = 0.4;
pub const DEFAULT_BLOCKED_WEIGHT: f64 = 0.1;

fn default_starters() -> BTreeMap<String, i64> {
    [
        ("QB", 1),
        ("RB", 2),
        ("WR", 2),
        ("TE", 1),
        ("FLEX", 1),
        ("K", 1),
        ("DST", 1),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn default_weights() -> BTreeMap<String, f64> {
    [
        ("need", DEFAULT_NEED_WEIGHT),
        ("bench", DEFAULT_BENCH_WEIGHT),
        ("blocked", DEFAULT_BLOCKED_WEIGHT),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

// ---------------------------------------------------------------------------
// Need weights
// ---------------------------------------------------------------------------

/// Multipliers applied to VORP for each need state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeedWeights {
    pub need: f64,
    pub bench: f64,
    pub blocked: f64,
}

impl Default for NeedWeights {
    fn default() -> Self {
        NeedWeights {
            need: DEFAULT_NEED_WEIGHT,
            bench: DEFAULT_BENCH_WEIGHT,
            blocked: DEFAULT_BLOCKED_WEIGHT,
        }
    }
}

impl NeedWeights {
    /// Multiplier for the given need state.
    pub fn weight(&self, state: NeedState) -> f64 {
        match state {
            NeedState::Need => self.need,
            NeedState::Bench => self.bench,
            NeedState::Blocked => self.blocked,
        }
    }

    /// Build weights from a `{need, bench, blocked}` map. Missing keys keep
    /// their defaults; unknown keys, non-finite, or negative values fail.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Result<Self, ConfigError> {
        let mut weights = NeedWeights::default();
        let mut seen = BTreeSet::new();
        for (key, &value) in map {
            let field = format!("weights.{key}");
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be a finite value >= 0, got {value}")));
            }
            let state = key.trim().to_lowercase();
            if !seen.insert(state.clone()) {
                return Err(invalid(field, "weight given more than once"));
            }
            match state.as_str() {
                "need" => weights.need = value,
                "bench" => weights.bench = value,
                "blocked" => weights.blocked = value,
                _ => return Err(invalid(field, "expected one of need, bench, blocked")),
            }
        }
        Ok(weights)
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        map.insert("need".to_string(), self.need);
        map.insert("bench".to_string(), self.bench);
        map.insert("blocked".to_string(), self.blocked);
        map
    }
}

// ---------------------------------------------------------------------------
// Roster configuration
// ---------------------------------------------------------------------------

/// Starters and bench capacity per base position, plus FLEX starters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterConfig {
    starters: BTreeMap<Position, u32>,
    bench: BTreeMap<Position, u32>,
    flex_starters: u32,
}

impl RosterConfig {
    /// Validate raw `position -> count` maps. Starters may carry a `FLEX`
    /// key; bench may not. Positions absent from a map count as zero. Two
    /// keys naming the same position (`DEF` and `DST`) are rejected.
    pub fn from_maps(
        starters: &BTreeMap<String, i64>,
        bench: &BTreeMap<String, i64>,
    ) -> Result<Self, ConfigError> {
        let mut roster = RosterConfig::default();

        // None stands for FLEX.
        let mut seen: BTreeSet<Option<Position>> = BTreeSet::new();
        for (key, &count) in starters {
            let field = format!("starters.{key}");
            let count = non_negative(&field, count)?;
            let slot = if key.trim().eq_ignore_ascii_case(FLEX_KEY) {
                None
            } else {
                Some(
                    Position::from_str_pos(key)
                        .ok_or_else(|| invalid(&field, "not a known position"))?,
                )
            };
            if !seen.insert(slot) {
                return Err(invalid(&field, "position given more than once"));
            }
            match slot {
                None => roster.flex_starters = count,
                Some(pos) if count > 0 => {
                    roster.starters.insert(pos, count);
                }
                Some(_) => {}
            }
        }

        let mut seen = BTreeSet::new();
        for (key, &count) in bench {
            let field = format!("bench.{key}");
            let count = non_negative(&field, count)?;
            let pos = Position::from_str_pos(key)
                .ok_or_else(|| invalid(&field, "not a known position"))?;
            if !seen.insert(pos) {
                return Err(invalid(&field, "position given more than once"));
            }
            if count > 0 {
                roster.bench.insert(pos, count);
            }
        }

        Ok(roster)
    }

    pub fn starters(&self, pos: Position) -> u32 {
        self.starters.get(&pos).copied().unwrap_or(0)
    }

    pub fn bench(&self, pos: Position) -> u32 {
        self.bench.get(&pos).copied().unwrap_or(0)
    }

    pub fn flex_starters(&self) -> u32 {
        self.flex_starters
    }

    /// Starters as a string-keyed map including `FLEX`, for snapshots.
    pub fn starters_map(&self) -> BTreeMap<String, i64> {
        let mut map: BTreeMap<String, i64> = Position::ALL
            .iter()
            .map(|&p| (p.to_string(), i64::from(self.starters(p))))
            .collect();
        map.insert(FLEX_KEY.to_string(), i64::from(self.flex_starters));
        map
    }

    /// Bench capacity as a string-keyed map, for snapshots.
    pub fn bench_map(&self) -> BTreeMap<String, i64> {
        Position::ALL
            .iter()
            .map(|&p| (p.to_string(), i64::from(self.bench(p))))
            .collect()
    }
}

fn non_negative(field: &str, count: i64) -> Result<u32, ConfigError> {
    if count < 0 {
        return Err(invalid(field, format!("must be >= 0, got {count}")));
    }
    u32::try_from(count).map_err(|_| invalid(field, format!("too large: {count}")))
}

// ---------------------------------------------------------------------------
// Assembled configuration
// ---------------------------------------------------------------------------

/// Unvalidated settings as they appear in config files and snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDraftConfig {
    pub teams: i64,
    pub top_n: i64,
    pub starters: BTreeMap<String, i64>,
    pub bench: BTreeMap<String, i64>,
    pub weights: BTreeMap<String, f64>,
}

impl Default for RawDraftConfig {
    fn default() -> Self {
        RawDraftConfig {
            teams: DEFAULT_TEAMS,
            top_n: DEFAULT_TOP_N,
            starters: default_starters(),
            bench: BTreeMap::new(),
            weights: default_weights(),
        }
    }
}

impl RawDraftConfig {
    pub fn validate(&self) -> Result<DraftConfig, ConfigError> {
        if self.teams < 1 {
            return Err(invalid("teams", format!("must be greater than 0, got {}", self.teams)));
        }
        if self.top_n < 1 {
            return Err(invalid("top_n", format!("must be greater than 0, got {}", self.top_n)));
        }
        let teams = u32::try_from(self.teams)
            .map_err(|_| invalid("teams", format!("too large: {}", self.teams)))?;
        let top_n = usize::try_from(self.top_n)
            .map_err(|_| invalid("top_n", format!("too large: {}", self.top_n)))?;

        Ok(DraftConfig {
            teams,
            top_n,
            roster: RosterConfig::from_maps(&self.starters, &self.bench)?,
            weights: NeedWeights::from_map(&self.weights)?,
        })
    }
}

/// Validated, immutable settings for one draft session.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftConfig {
    pub teams: u32,
    pub top_n: usize,
    pub roster: RosterConfig,
    pub weights: NeedWeights,
}

impl Default for DraftConfig {
    fn default() -> Self {
        let starters = [
            (Position::Quarterback, 1),
            (Position::RunningBack, 2),
            (Position::WideReceiver, 2),
            (Position::TightEnd, 1),
            (Position::Kicker, 1),
            (Position::Defense, 1),
        ];
        DraftConfig {
            teams: DEFAULT_TEAMS as u32,
            top_n: DEFAULT_TOP_N as usize,
            roster: RosterConfig {
                starters: starters.into_iter().collect(),
                bench: BTreeMap::new(),
                flex_starters: 1,
            },
            weights: NeedWeights::default(),
        }
    }
}

impl DraftConfig {
    pub fn to_raw(&self) -> RawDraftConfig {
        RawDraftConfig {
            teams: i64::from(self.teams),
            top_n: self.top_n as i64,
            starters: self.roster.starters_map(),
            bench: self.roster.bench_map(),
            weights: self.weights.to_map(),
        }
    }
}

// ---------------------------------------------------------------------------
// KEY:VAL list parsing
// ---------------------------------------------------------------------------

/// Split strings like `"QB:1,RB:2,FLEX:1"` into trimmed `(key, value)`
/// pairs. Empty fragments are skipped; a fragment without `:` fails.
pub fn parse_kv_list(input: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let mut out = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let Some((key, value)) = part.split_once(':') else {
            return Err(ConfigError::MalformedList {
                input: input.to_string(),
                message: format!("bad fragment '{part}' (expected KEY:VAL)"),
            });
        };
        out.push((key.trim().to_string(), value.trim().to_string()));
    }
    Ok(out)
}

/// Parse a roster count list. Keys are uppercased and may not repeat.
pub fn parse_count_list(input: &str) -> Result<BTreeMap<String, i64>, ConfigError> {
    let mut counts = BTreeMap::new();
    for (key, value) in parse_kv_list(input)? {
        let count = value.parse::<i64>().map_err(|_| ConfigError::MalformedList {
            input: input.to_string(),
            message: format!("count for '{key}' is not an integer: '{value}'"),
        })?;
        insert_once(&mut counts, key.to_uppercase(), count, input)?;
    }
    Ok(counts)
}

/// Parse a need-weight list. Keys are lowercased and may not repeat.
pub fn parse_weight_list(input: &str) -> Result<BTreeMap<String, f64>, ConfigError> {
    let mut weights = BTreeMap::new();
    for (key, value) in parse_kv_list(input)? {
        let weight = value.parse::<f64>().map_err(|_| ConfigError::MalformedList {
            input: input.to_string(),
            message: format!("weight for '{key}' is not a number: '{value}'"),
        })?;
        insert_once(&mut weights, key.to_lowercase(), weight, input)?;
    }
    Ok(weights)
}

fn insert_once<V>(
    map: &mut BTreeMap<String, V>,
    key: String,
    value: V,
    input: &str,
) -> Result<(), ConfigError> {
    if map.contains_key(&key) {
        return Err(ConfigError::MalformedList {
            input: input.to_string(),
            message: format!("key '{key}' given more than once"),
        });
    }
    map.insert(key, value);
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
