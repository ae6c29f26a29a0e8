// Immutable player pool: one row per (player, position).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::draft::position::Position;

/// A single draftable row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub proj_points: f64,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Position, proj_points: f64) -> Self {
        Player {
            name: name.into(),
            position,
            proj_points,
        }
    }
}

/// The cleaned player table a session drafts from.
///
/// Rows are deduplicated on (name, position), keeping the highest
/// projection, and stored in descending projection order. A name may
/// appear at more than one position; its primary position is the one with
/// the highest projection.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    source: String,
    players: Vec<Player>,
    primary: HashMap<String, usize>,
}

impl PlayerPool {
    /// Build a pool from already-cleaned rows. `source` identifies where the
    /// rows came from (a CSV path) and is carried into session snapshots.
    pub fn new(source: impl Into<String>, rows: Vec<Player>) -> Self {
        let mut rows = rows;
        rows.sort_by(|a, b| b.proj_points.total_cmp(&a.proj_points));

        let mut seen: HashSet<(String, Position)> = HashSet::new();
        let mut players = Vec::with_capacity(rows.len());
        let mut dropped = 0usize;
        for row in rows {
            if !seen.insert((row.name.clone(), row.position)) {
                dropped += 1;
                continue;
            }
            players.push(row);
        }
        if dropped > 0 {
            debug!("dropped {} duplicate (player, position) rows", dropped);
        }

        let mut primary = HashMap::new();
        for (idx, player) in players.iter().enumerate() {
            primary.entry(player.name.clone()).or_insert(idx);
        }

        PlayerPool {
            source: source.into(),
            players,
            primary,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// All rows, highest projection first.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn contains(&self, name: &str) -> bool {
        self.primary.contains_key(name)
    }

    /// The highest-projected row for `name`, if present.
    pub fn lookup(&self, name: &str) -> Option<&Player> {
        self.primary.get(name).map(|&idx| &self.players[idx])
    }

    /// Distinct player names, in pool order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.players
            .iter()
            .enumerate()
            .filter(|(idx, p)| self.primary.get(&p.name) == Some(idx))
            .map(|(_, p)| p.name.as_str())
    }

    /// Rows whose name is not excluded by `is_drafted`.
    pub fn available<'a, F>(&'a self, is_drafted: F) -> Vec<&'a Player>
    where
        F: Fn(&str) -> bool,
    {
        self.players
            .iter()
            .filter(|p| !is_drafted(&p.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pool() -> PlayerPool {
        PlayerPool::new(
            "test.csv",
            vec![
                Player::new("Low RB", Position::RunningBack, 50.0),
                Player::new("Star WR", Position::WideReceiver, 250.0),
                Player::new("Star WR", Position::WideReceiver, 240.0),
                Player::new("Dual", Position::TightEnd, 90.0),
                Player::new("Dual", Position::WideReceiver, 120.0),
            ],
        )
    }

    #[test]
    fn dedups_on_name_and_position_keeping_max() {
        let pool = sample_pool();
        assert_eq!(pool.len(), 4);
        let star: Vec<&Player> = pool.players().iter().filter(|p| p.name == "Star WR").collect();
        assert_eq!(star.len(), 1);
        assert_eq!(star[0].proj_points, 250.0);
    }

    #[test]
    fn ordered_by_projection_descending() {
        let pool = sample_pool();
        let points: Vec<f64> = pool.players().iter().map(|p| p.proj_points).collect();
        assert_eq!(points, vec![250.0, 120.0, 90.0, 50.0]);
    }

    #[test]
    fn lookup_returns_highest_projected_row() {
        let pool = sample_pool();
        let dual = pool.lookup("Dual").unwrap();
        assert_eq!(dual.position, Position::WideReceiver);
        assert!(pool.lookup("Nobody").is_none());
        assert!(pool.contains("Low RB"));
    }

    #[test]
    fn names_are_distinct_and_ordered() {
        let pool = sample_pool();
        let names: Vec<&str> = pool.names().collect();
        assert_eq!(names, vec!["Star WR", "Dual", "Low RB"]);
    }

    #[test]
    fn available_excludes_every_row_of_a_drafted_name() {
        let pool = sample_pool();
        let available = pool.available(|name| name == "Dual");
        assert_eq!(available.len(), 2);
        assert!(available.iter().all(|p| p.name != "Dual"));
        assert_eq!(pool.source(), "test.csv");
    }
}
