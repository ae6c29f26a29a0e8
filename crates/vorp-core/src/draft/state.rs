// Draft session: drafted set, undo history, and the user's roster counts.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use super::position::Position;
use super::roster::{self, NeedState, RosterCounts, SlotKind};
use crate::config::{DraftConfig, RawDraftConfig};
use crate::error::DraftError;
use crate::pool::{Player, PlayerPool};
use crate::valuation::replacement::{self, Replacement};
use crate::valuation::scoring::{self, CandidateScore};

/// One entry in the undo history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEvent {
    /// Another team took the player.
    LeagueDrafted { name: String, position: Position },
    /// The user took the player; `slot` is the roster slot it filled.
    Mine {
        name: String,
        position: Position,
        slot: SlotKind,
    },
}

impl DraftEvent {
    pub fn name(&self) -> &str {
        match self {
            DraftEvent::LeagueDrafted { name, .. } | DraftEvent::Mine { name, .. } => name,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            DraftEvent::LeagueDrafted { position, .. } | DraftEvent::Mine { position, .. } => {
                *position
            }
        }
    }

    pub fn is_mine(&self) -> bool {
        matches!(self, DraftEvent::Mine { .. })
    }
}

/// The mutable state of one live draft.
///
/// Invariants: `drafted` is exactly the set of names in `history`, and
/// `my_counts` reflects exactly the `Mine` events still in `history`.
/// Only `mark_league_drafted`, `mark_mine`, and `undo` mutate state.
#[derive(Debug, Clone)]
pub struct DraftSession {
    pool: PlayerPool,
    config: DraftConfig,
    drafted: HashSet<String>,
    history: Vec<DraftEvent>,
    my_counts: RosterCounts,
}

impl DraftSession {
    /// Start an empty session over `pool`.
    pub fn new(pool: PlayerPool, config: DraftConfig) -> Self {
        DraftSession {
            pool,
            config,
            drafted: HashSet::new(),
            history: Vec::new(),
            my_counts: RosterCounts::new(),
        }
    }

    /// Validate raw settings and start an empty session.
    pub fn from_raw(pool: PlayerPool, raw: &RawDraftConfig) -> Result<Self, DraftError> {
        let config = raw.validate()?;
        Ok(Self::new(pool, config))
    }

    pub fn pool(&self) -> &PlayerPool {
        &self.pool
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    pub fn history(&self) -> &[DraftEvent] {
        &self.history
    }

    pub fn drafted(&self) -> &HashSet<String> {
        &self.drafted
    }

    pub fn is_drafted(&self, name: &str) -> bool {
        self.drafted.contains(name)
    }

    pub fn my_counts(&self) -> &RosterCounts {
        &self.my_counts
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Look up an undrafted player by exact name.
    fn draftable(&self, name: &str) -> Result<Position, DraftError> {
        let player = self.pool.lookup(name).ok_or_else(|| DraftError::UnknownPlayer {
            name: name.to_string(),
        })?;
        if self.drafted.contains(name) {
            return Err(DraftError::AlreadyDrafted {
                name: name.to_string(),
            });
        }
        Ok(player.position)
    }

    /// Record that another team drafted `name`.
    pub fn mark_league_drafted(&mut self, name: &str) -> Result<&DraftEvent, DraftError> {
        let position = self.draftable(name)?;
        debug!("league drafted {} ({})", name, position);

        self.drafted.insert(name.to_string());
        self.history.push(DraftEvent::LeagueDrafted {
            name: name.to_string(),
            position,
        });
        Ok(self.last_event())
    }

    /// Record that the user drafted `name`, filling the highest-precedence
    /// open slot: starter, then FLEX, then bench.
    pub fn mark_mine(&mut self, name: &str) -> Result<&DraftEvent, DraftError> {
        let position = self.draftable(name)?;
        let slot = self.my_counts.add(position, &self.config.roster);
        debug!("mine: {} ({}) into {} slot", name, position, slot);

        self.drafted.insert(name.to_string());
        self.history.push(DraftEvent::Mine {
            name: name.to_string(),
            position,
            slot,
        });
        Ok(self.last_event())
    }

    /// Reverse the most recent pick of either kind.
    ///
    /// Undoing a `Mine` event also releases the roster slot it filled, so
    /// the need states go back to what they were before the pick.
    pub fn undo(&mut self) -> Result<DraftEvent, DraftError> {
        let event = self.history.pop().ok_or(DraftError::NothingToUndo)?;
        self.drafted.remove(event.name());

        match &event {
            DraftEvent::LeagueDrafted { name, .. } => {
                debug!("undid league pick {}", name);
            }
            DraftEvent::Mine {
                name,
                position,
                slot,
            } => {
                self.my_counts.remove(*position, *slot);
                debug!("undid my pick {} ({} slot released)", name, slot);
            }
        }
        Ok(event)
    }

    fn last_event(&self) -> &DraftEvent {
        // Only called right after a push.
        &self.history[self.history.len() - 1]
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Pool rows not yet drafted, highest projection first.
    pub fn available(&self) -> Vec<&Player> {
        self.pool.available(|name| self.drafted.contains(name))
    }

    pub fn replacement_levels(&self) -> BTreeMap<Position, Replacement> {
        replacement::replacement_levels(&self.available(), self.config.teams, &self.config.roster)
    }

    pub fn need_states(&self) -> BTreeMap<Position, NeedState> {
        roster::need_states(&self.config.roster, &self.my_counts)
    }

    /// The full ranked candidate table for the remaining pool. An empty
    /// table means the draft is complete.
    pub fn query(&self) -> Vec<CandidateScore> {
        let available = self.available();
        let repl = replacement::replacement_levels(&available, self.config.teams, &self.config.roster);
        let needs = self.need_states();
        scoring::candidate_scores(&available, &repl, &needs, &self.config.weights)
    }

    /// The ranked table restricted to one position.
    ///
    /// Replacement levels still come from the whole remaining pool; only the
    /// output rows are filtered.
    pub fn filter_position(&self, pos: Position) -> Vec<CandidateScore> {
        self.query()
            .into_iter()
            .filter(|row| row.position == pos)
            .collect()
    }

    /// `filter_position` for a user-typed position string.
    pub fn filter(&self, position: &str) -> Result<Vec<CandidateScore>, DraftError> {
        let pos = Position::from_str_pos(position).ok_or_else(|| DraftError::UnknownPosition {
            position: position.trim().to_string(),
        })?;
        Ok(self.filter_position(pos))
    }

    pub fn is_complete(&self) -> bool {
        self.available().is_empty()
    }
}
