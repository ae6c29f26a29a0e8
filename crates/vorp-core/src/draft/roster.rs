// Roster fill counters and need classification for the user's team.
//
// Slot filling and need classification share one precedence:
//   1. the position's own starter slots,
//   2. a FLEX slot (RB/WR/TE only),
//   3. bench / overflow.
// Keeping both in this module is what keeps "this position is a need" and
// "this pick filled a starter-like slot" in agreement.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::position::{Position, FLEX_KEY};
use crate::config::{ConfigError, RosterConfig};

/// How urgently the user's roster wants another player at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedState {
    /// An unfilled starter slot exists, including a FLEX slot for RB/WR/TE.
    Need,
    /// Starters are full but bench capacity remains.
    Bench,
    /// Starters and bench are both full.
    Blocked,
}

impl NeedState {
    pub fn label(&self) -> &'static str {
        match self {
            NeedState::Need => "need",
            NeedState::Bench => "bench",
            NeedState::Blocked => "blocked",
        }
    }
}

impl fmt::Display for NeedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The kind of roster slot a `mine` pick consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Starter,
    Flex,
    Bench,
}

impl SlotKind {
    pub fn label(&self) -> &'static str {
        match self {
            SlotKind::Starter => "starter",
            SlotKind::Flex => FLEX_KEY,
            SlotKind::Bench => "bench",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-position pick counts for the user's team, plus FLEX usage.
///
/// Unseen positions read as zero. Starter and bench picks both count
/// against the position; FLEX picks count only against `flex`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterCounts {
    by_position: BTreeMap<Position, u32>,
    flex: u32,
}

impl RosterCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> u32 {
        self.by_position.get(&pos).copied().unwrap_or(0)
    }

    pub fn flex(&self) -> u32 {
        self.flex
    }

    /// FLEX slots still open under `roster`.
    pub fn flex_left(&self, roster: &RosterConfig) -> u32 {
        roster.flex_starters().saturating_sub(self.flex)
    }

    /// The slot the next pick at `pos` would fill.
    pub fn next_slot(&self, pos: Position, roster: &RosterConfig) -> SlotKind {
        if self.get(pos) < roster.starters(pos) {
            SlotKind::Starter
        } else if pos.is_flex_eligible() && self.flex_left(roster) > 0 {
            SlotKind::Flex
        } else {
            SlotKind::Bench
        }
    }

    /// Record a pick at `pos` and return the slot it filled.
    pub fn add(&mut self, pos: Position, roster: &RosterConfig) -> SlotKind {
        let slot = self.next_slot(pos, roster);
        match slot {
            SlotKind::Starter | SlotKind::Bench => {
                *self.by_position.entry(pos).or_insert(0) += 1;
            }
            SlotKind::Flex => self.flex += 1,
        }
        slot
    }

    /// Reverse a pick previously recorded by `add`.
    pub fn remove(&mut self, pos: Position, slot: SlotKind) {
        match slot {
            SlotKind::Starter | SlotKind::Bench => {
                if let Some(count) = self.by_position.get_mut(&pos) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        self.by_position.remove(&pos);
                    }
                }
            }
            SlotKind::Flex => self.flex = self.flex.saturating_sub(1),
        }
    }

    /// Counts keyed by position code plus `FLEX`. Zero entries are omitted.
    pub fn to_map(&self) -> BTreeMap<String, u32> {
        let mut map: BTreeMap<String, u32> = self
            .by_position
            .iter()
            .filter(|(_, &n)| n > 0)
            .map(|(p, &n)| (p.to_string(), n))
            .collect();
        if self.flex > 0 {
            map.insert(FLEX_KEY.to_string(), self.flex);
        }
        map
    }

    /// Inverse of `to_map`. Keys must be base positions or `FLEX`.
    pub fn from_map(map: &BTreeMap<String, u32>) -> Result<Self, ConfigError> {
        let mut counts = RosterCounts::default();
        for (key, &n) in map {
            if key.trim().eq_ignore_ascii_case(FLEX_KEY) {
                counts.flex = n;
                continue;
            }
            let pos = Position::from_str_pos(key).ok_or_else(|| ConfigError::ValidationError {
                field: format!("my_counts.{key}"),
                message: "not a known position".into(),
            })?;
            if n > 0 {
                counts.by_position.insert(pos, n);
            }
        }
        Ok(counts)
    }
}

// ---------------------------------------------------------------------------
// Need classification
// ---------------------------------------------------------------------------

/// Classify how much the user's roster wants another player at `pos`.
pub fn classify(roster: &RosterConfig, counts: &RosterCounts, pos: Position) -> NeedState {
    let used = counts.get(pos);
    let starters = roster.starters(pos);

    if used < starters {
        return NeedState::Need;
    }
    if pos.is_flex_eligible() && counts.flex_left(roster) > 0 {
        return NeedState::Need;
    }
    if used - starters < roster.bench(pos) {
        NeedState::Bench
    } else {
        NeedState::Blocked
    }
}

/// Need state for every base position. Recomputed on every call.
pub fn need_states(roster: &RosterConfig, counts: &RosterCounts) -> BTreeMap<Position, NeedState> {
    Position::ALL
        .iter()
        .map(|&pos| (pos, classify(roster, counts, pos)))
        .collect()
}
