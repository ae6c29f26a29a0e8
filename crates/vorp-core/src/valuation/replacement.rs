// Replacement level per position, recomputed from the remaining pool.
//
// Replacement level for a position is the projection of the Nth-best
// remaining player there, N = teams * starters. The index stays fixed while
// the pool shrinks, so the bar drops as good players come off the board.

use std::collections::BTreeMap;

use crate::config::RosterConfig;
use crate::draft::position::Position;
use crate::pool::Player;

/// The replacement bar for one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Replacement {
    /// Projected points of the replacement-level player.
    Points(f64),
    /// No starters at the position, or nobody left: the position is never
    /// worth a pick on scarcity grounds.
    NoReplacement,
}

impl Replacement {
    /// Value over this replacement bar, or `None` when there is no bar.
    pub fn vorp(&self, proj_points: f64) -> Option<f64> {
        match self {
            Replacement::Points(repl) => Some(proj_points - repl),
            Replacement::NoReplacement => None,
        }
    }

    pub fn points(&self) -> Option<f64> {
        match self {
            Replacement::Points(p) => Some(*p),
            Replacement::NoReplacement => None,
        }
    }
}

/// Replacement bar for a single position given the available rows.
pub fn replacement_for(
    available: &[&Player],
    pos: Position,
    teams: u32,
    roster: &RosterConfig,
) -> Replacement {
    let n = teams as usize * roster.starters(pos) as usize;
    if n == 0 {
        return Replacement::NoReplacement;
    }

    let mut points: Vec<f64> = available
        .iter()
        .filter(|p| p.position == pos)
        .map(|p| p.proj_points)
        .collect();
    if points.is_empty() {
        return Replacement::NoReplacement;
    }
    points.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    // Nth remaining => zero-based index N-1, clamped to the last remaining.
    let idx = (n - 1).min(points.len() - 1);
    Replacement::Points(points[idx])
}

/// Replacement bar for every base position.
pub fn replacement_levels(
    available: &[&Player],
    teams: u32,
    roster: &RosterConfig,
) -> BTreeMap<Position, Replacement> {
    Position::ALL
        .iter()
        .map(|&pos| (pos, replacement_for(available, pos, teams, roster)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_count_list;

    fn roster(starters: &str) -> RosterConfig {
        RosterConfig::from_maps(&parse_count_list(starters).unwrap(), &Default::default()).unwrap()
    }

    fn rbs(points: &[f64]) -> Vec<Player> {
        points
            .iter()
            .enumerate()
            .map(|(i, &p)| Player::new(format!("RB{i}"), Position::RunningBack, p))
            .collect()
    }

    #[test]
    fn nth_best_remaining_is_replacement() {
        let players = rbs(&[100.0, 250.0, 180.0, 90.0, 140.0]);
        let available: Vec<&Player> = players.iter().collect();
        // 2 teams * 2 starters = 4th best = 100.
        let repl = replacement_for(&available, Position::RunningBack, 2, &roster("RB:2"));
        assert_eq!(repl, Replacement::Points(100.0));
    }

    #[test]
    fn fewer_than_n_players_uses_last_remaining() {
        let players = rbs(&[100.0, 250.0]);
        let available: Vec<&Player> = players.iter().collect();
        let repl = replacement_for(&available, Position::RunningBack, 12, &roster("RB:2"));
        assert_eq!(repl, Replacement::Points(100.0));
    }

    #[test]
    fn zero_starters_has_no_replacement() {
        let players = rbs(&[100.0]);
        let available: Vec<&Player> = players.iter().collect();
        let repl = replacement_for(&available, Position::RunningBack, 10, &roster("QB:1"));
        assert_eq!(repl, Replacement::NoReplacement);
        assert_eq!(repl.vorp(100.0), None);
    }

    #[test]
    fn empty_position_has_no_replacement() {
        let players = rbs(&[100.0]);
        let available: Vec<&Player> = players.iter().collect();
        let levels = replacement_levels(&available, 10, &roster("RB:1,WR:1"));
        assert_eq!(levels[&Position::WideReceiver], Replacement::NoReplacement);
        assert_eq!(levels[&Position::RunningBack], Replacement::Points(100.0));
        assert_eq!(levels.len(), Position::ALL.len());
    }

    #[test]
    fn replacement_never_rises_as_best_players_are_removed() {
        let players = rbs(&[300.0, 250.0, 240.0, 200.0, 180.0, 150.0, 120.0, 90.0]);
        let roster = roster("RB:2");
        let mut previous = f64::INFINITY;
        for removed in 0..players.len() {
            let available: Vec<&Player> = players[removed..].iter().collect();
            let repl = replacement_for(&available, Position::RunningBack, 2, &roster)
                .points()
                .unwrap();
            assert!(repl <= previous, "replacement rose from {previous} to {repl}");
            previous = repl;
        }
    }

    #[test]
    fn vorp_is_zero_at_the_replacement_index() {
        let players = rbs(&[210.0, 180.0]);
        let available: Vec<&Player> = players.iter().collect();
        let repl = replacement_for(&available, Position::RunningBack, 1, &roster("RB:1"));
        assert_eq!(repl.vorp(210.0), Some(0.0));
        assert_eq!(repl.vorp(180.0), Some(-30.0));
    }
}
