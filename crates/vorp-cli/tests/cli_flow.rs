// Integration tests for the command-line front end.
//
// These load the fixture CSV and the shipped default config through the
// library API, then drive a scripted prompt session end to end.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use vorp_cli::config::{load_config_file, Overrides};
use vorp_cli::projections::{load_pool, ColumnOverrides, PoolError};
use vorp_cli::repl;
use vorp_core::snapshot::SessionSnapshot;
use vorp_core::valuation::replacement::Replacement;
use vorp_core::{DraftSession, NeedState, Position};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd
/// for `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn players_csv() -> PathBuf {
    Path::new(FIXTURES).join("players.csv")
}

/// A two-team session built from the shipped defaults plus flag overrides.
fn two_team_session() -> DraftSession {
    let file = load_config_file(Path::new("defaults/draft.toml")).unwrap();
    let overrides = Overrides {
        csv: Some(players_csv()),
        teams: Some(2),
        bench: Some("QB:1,RB:1".into()),
        ..Default::default()
    };
    let app = overrides.apply(file).unwrap();
    let pool = load_pool(&app.csv_path, &app.columns).unwrap();
    DraftSession::from_raw(pool, &app.draft).unwrap()
}

fn run_script(session: &mut DraftSession, script: &str) -> String {
    let mut out = Vec::new();
    repl::run(session, Cursor::new(script.to_string()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ===========================================================================
// Pool loading
// ===========================================================================

#[test]
fn fixture_pool_is_cleaned() {
    let pool = load_pool(&players_csv(), &ColumnOverrides::default()).unwrap();

    // 26 rows: one linebacker, one unparsable projection, one duplicate.
    assert_eq!(pool.len(), 23);
    assert!(!pool.contains("Micah Parsons"));
    assert!(!pool.contains("Injured Guy"));
    assert_eq!(pool.lookup("Travis Kelce").unwrap().proj_points, 220.3);
    assert_eq!(
        pool.lookup("San Francisco 49ers").unwrap().position,
        Position::Defense
    );
    assert_eq!(
        pool.lookup("Baltimore Ravens").unwrap().position,
        Position::Defense
    );
    assert_eq!(pool.players()[0].name, "Josh Allen");
}

#[test]
fn wrong_column_override_fails_to_load() {
    let columns = ColumnOverrides {
        points: Some("Projected".into()),
        ..Default::default()
    };
    let err = load_pool(&players_csv(), &columns).unwrap_err();
    assert!(matches!(err, PoolError::UnknownColumn { role: "points", .. }));
}

// ===========================================================================
// Scoring over the fixture
// ===========================================================================

#[test]
fn replacement_levels_follow_league_size() {
    let session = two_team_session();
    let repl = session.replacement_levels();
    assert_eq!(repl[&Position::Quarterback], Replacement::Points(371.9));
    assert_eq!(repl[&Position::RunningBack], Replacement::Points(268.7));
    assert_eq!(repl[&Position::WideReceiver], Replacement::Points(295.1));
    assert_eq!(repl[&Position::TightEnd], Replacement::Points(198.7));
    assert_eq!(repl[&Position::Kicker], Replacement::Points(141.2));
    assert_eq!(repl[&Position::Defense], Replacement::Points(131.5));

    let rows = session.query();
    assert_eq!(rows.len(), 23);
    assert_eq!(rows[0].player, "Christian McCaffrey");
}

// ===========================================================================
// Scripted session
// ===========================================================================

#[test]
fn scripted_draft_session() {
    let tmp = temp_dir("vorp_cli_scripted_session");
    let snapshot_path = tmp.join("session.json");
    let board_path = tmp.join("board.csv");

    let mut session = two_team_session();
    let script = format!(
        "Christian McCaffrey\n\
         mine Bijan Robinson\n\
         Josh Alen\n\
         mine Josh Allen\n\
         undo\n\
         status\n\
         snapshot {}\n\
         save {}\n\
         quit\n",
        snapshot_path.display(),
        board_path.display()
    );
    let out = run_script(&mut session, &script);

    assert!(out.contains("Name not found. Did you mean: Josh Allen ?"));
    assert!(out.contains("Undid mine: Josh Allen (starter slot released)"));
    assert!(out.contains("Your roster used: RB:1"));
    assert!(out.contains("Saved session snapshot to"));
    assert!(out.contains("Saved remaining pool with scores to"));

    assert_eq!(session.history().len(), 2);
    assert!(session.is_drafted("Christian McCaffrey"));
    assert!(session.is_drafted("Bijan Robinson"));
    assert!(!session.is_drafted("Josh Allen"));
    assert_eq!(session.need_states()[&Position::Quarterback], NeedState::Need);

    // The export holds every remaining row plus the header.
    let board = std::fs::read_to_string(&board_path).unwrap();
    assert_eq!(board.lines().count(), 1 + 21);
    assert!(board.starts_with("player,position,proj_points,vorp,adj_score,need_state\n"));

    // The snapshot resumes to the same board.
    let snapshot = SessionSnapshot::load(&snapshot_path).unwrap();
    assert_eq!(snapshot.csv_path, players_csv().display().to_string());
    let pool = load_pool(Path::new(&snapshot.csv_path), &ColumnOverrides::default()).unwrap();
    let resumed = snapshot.restore(pool).unwrap();
    assert_eq!(resumed.history(), session.history());
    assert_eq!(resumed.my_counts(), session.my_counts());
    assert_eq!(resumed.config(), session.config());
    assert_eq!(resumed.query(), session.query());

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn draining_the_pool_completes_the_draft() {
    let mut session = two_team_session();
    let names: Vec<String> = session
        .pool()
        .names()
        .map(str::to_string)
        .collect();
    let script = names.join("\n") + "\n";
    let out = run_script(&mut session, &script);

    assert!(session.is_complete());
    assert!(out.contains("Draft complete. No players left."));
    assert!(out.trim_end().ends_with("Exiting."));
}
