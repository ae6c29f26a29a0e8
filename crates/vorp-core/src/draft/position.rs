// Base positions the scoring engine reasons about.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spellings of a team defense unit that normalize to `DST`.
pub const DEFENSE_ALIASES: &[&str] = &[
    "DEF",
    "DST",
    "D/ST",
    "D-ST",
    "D\\ST",
    "TEAM DEFENSE",
    "TEAMDEF",
    "TEAM D",
    "DEFENSE",
];

/// Roster key for FLEX capacity. FLEX is never a player's position.
pub const FLEX_KEY: &str = "FLEX";

/// Football positions a player can hold.
///
/// FLEX is deliberately absent: it is roster capacity that absorbs one
/// extra RB, WR, or TE, not a position a player is listed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
    #[serde(rename = "K")]
    Kicker,
    #[serde(rename = "DST")]
    Defense,
}

impl Position {
    /// Every base position in display order.
    pub const ALL: [Position; 6] = [
        Position::Quarterback,
        Position::RunningBack,
        Position::WideReceiver,
        Position::TightEnd,
        Position::Kicker,
        Position::Defense,
    ];

    /// Parse a position string into a Position enum.
    ///
    /// Case-insensitive and whitespace-tolerant. Any of the
    /// `DEFENSE_ALIASES` maps to `Defense`. "FLEX" is not a position and
    /// returns `None`.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" => Some(Position::Kicker),
            other if DEFENSE_ALIASES.contains(&other) => Some(Position::Defense),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DST",
        }
    }

    /// Whether a player at this position may occupy a FLEX slot.
    pub fn is_flex_eligible(&self) -> bool {
        matches!(
            self,
            Position::RunningBack | Position::WideReceiver | Position::TightEnd
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_base_positions_case_insensitively() {
        assert_eq!(Position::from_str_pos("qb"), Some(Position::Quarterback));
        assert_eq!(Position::from_str_pos(" Rb "), Some(Position::RunningBack));
        assert_eq!(Position::from_str_pos("WR"), Some(Position::WideReceiver));
        assert_eq!(Position::from_str_pos("te"), Some(Position::TightEnd));
        assert_eq!(Position::from_str_pos("K"), Some(Position::Kicker));
    }

    #[test]
    fn defense_aliases_map_to_dst() {
        for alias in ["DEF", "d/st", "D-ST", "D\\ST", "Team Defense", "TEAMDEF", "team d", "defense"] {
            assert_eq!(
                Position::from_str_pos(alias),
                Some(Position::Defense),
                "alias {alias} should map to DST"
            );
        }
    }

    #[test]
    fn flex_and_unknown_are_not_positions() {
        assert_eq!(Position::from_str_pos("FLEX"), None);
        assert_eq!(Position::from_str_pos("OL"), None);
        assert_eq!(Position::from_str_pos(""), None);
    }

    #[test]
    fn flex_eligibility() {
        let eligible: Vec<Position> = Position::ALL
            .iter()
            .copied()
            .filter(|p| p.is_flex_eligible())
            .collect();
        assert_eq!(
            eligible,
            vec![Position::RunningBack, Position::WideReceiver, Position::TightEnd]
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for pos in Position::ALL {
            assert_eq!(Position::from_str_pos(&pos.to_string()), Some(pos));
        }
    }

    #[test]
    fn serializes_as_short_code() {
        let json = serde_json::to_string(&Position::Defense).unwrap();
        assert_eq!(json, "\"DST\"");
        let back: Position = serde_json::from_str("\"TE\"").unwrap();
        assert_eq!(back, Position::TightEnd);
    }
}
