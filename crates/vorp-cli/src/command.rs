// Command parsing for the interactive prompt.
//
// Keywords are case-insensitive; arguments (player names, paths) keep their
// case. Any line that is not a known command is a league pick by name.

use std::path::PathBuf;

pub const HELP_TEXT: &str = "\
Commands:
  <name>             Mark player as drafted by the league (removes from pool)
  draft <name>       Same as <name>
  mine <name>        Mark player as YOUR pick (also updates your roster counts)
  undo               Undo the last pick (league or mine)
  status             Show your roster fill, weights, and need states
  best               Re-show the current best list
  filter POS         Show top 10 for a specific position (e.g. \"filter TE\")
  save PATH          Save remaining pool with VORP scores to CSV at PATH
  snapshot PATH      Save the session (settings and pick history) to JSON at PATH
  help               Show this help
  quit               Exit

Tips:
- Names are matched exactly. If not found, you'll get close suggestions.
- Roster capacity comes from --roster/--bench. FLEX accepts RB/WR/TE.
- Weights (need/bench/blocked) affect where depth is taken; tune with --weights.";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    Quit,
    Best,
    Status,
    Undo,
    Draft(String),
    Mine(String),
    Filter(String),
    Save(PathBuf),
    Snapshot(PathBuf),
    /// A keyword that needs an argument was given without one.
    MissingArgument(&'static str),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    match (keyword.to_lowercase().as_str(), rest.is_empty()) {
        ("q" | "quit" | "exit", true) => Command::Quit,
        ("h" | "help" | "?", true) => Command::Help,
        ("best", true) => Command::Best,
        ("status", true) => Command::Status,
        ("undo", true) => Command::Undo,
        ("mine", false) => Command::Mine(rest.to_string()),
        ("draft", false) => Command::Draft(rest.to_string()),
        ("filter", false) => Command::Filter(rest.to_string()),
        ("save", false) => Command::Save(PathBuf::from(rest)),
        ("snapshot", false) => Command::Snapshot(PathBuf::from(rest)),
        ("mine", true) => Command::MissingArgument("mine <name>"),
        ("draft", true) => Command::MissingArgument("draft <name>"),
        ("filter", true) => Command::MissingArgument("filter POS"),
        ("save", true) => Command::MissingArgument("save PATH"),
        ("snapshot", true) => Command::MissingArgument("snapshot PATH"),
        _ => Command::Draft(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(parse_command("QUIT"), Command::Quit);
        assert_eq!(parse_command("  exit "), Command::Quit);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("Best"), Command::Best);
        assert_eq!(parse_command("status"), Command::Status);
        assert_eq!(parse_command("UNDO"), Command::Undo);
        assert_eq!(parse_command("   "), Command::Empty);
    }

    #[test]
    fn arguments_keep_their_case() {
        assert_eq!(
            parse_command("MINE  Bijan Robinson "),
            Command::Mine("Bijan Robinson".into())
        );
        assert_eq!(
            parse_command("draft CeeDee Lamb"),
            Command::Draft("CeeDee Lamb".into())
        );
        assert_eq!(parse_command("filter te"), Command::Filter("te".into()));
        assert_eq!(
            parse_command("save out/Board.csv"),
            Command::Save(PathBuf::from("out/Board.csv"))
        );
        assert_eq!(
            parse_command("snapshot session.json"),
            Command::Snapshot(PathBuf::from("session.json"))
        );
    }

    #[test]
    fn bare_name_is_a_league_pick() {
        assert_eq!(
            parse_command("Justin Jefferson"),
            Command::Draft("Justin Jefferson".into())
        );
        // Single-word names that are not keywords too.
        assert_eq!(parse_command("Kittle"), Command::Draft("Kittle".into()));
    }

    #[test]
    fn keyword_with_unexpected_argument_is_a_name() {
        assert_eq!(parse_command("Best Ball"), Command::Draft("Best Ball".into()));
        assert_eq!(parse_command("undo it"), Command::Draft("undo it".into()));
    }

    #[test]
    fn missing_arguments_are_reported() {
        assert_eq!(parse_command("mine"), Command::MissingArgument("mine <name>"));
        assert_eq!(parse_command("filter "), Command::MissingArgument("filter POS"));
        assert_eq!(parse_command("save"), Command::MissingArgument("save PATH"));
        assert_eq!(
            parse_command("snapshot"),
            Command::MissingArgument("snapshot PATH")
        );
    }
}
