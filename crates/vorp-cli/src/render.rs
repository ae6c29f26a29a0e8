// Plain-text rendering of the board, status, and banner.
//
// Everything here returns a String so the REPL can write it anywhere and
// tests can assert on it.

use std::collections::BTreeMap;

use vorp_core::valuation::replacement::Replacement;
use vorp_core::{CandidateScore, DraftSession, Position};

const NOT_AVAILABLE: &str = "N/A";
const LEADERS_PER_POSITION: usize = 3;

/// Format an optional score, `N/A` when absent.
pub fn format_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Ranked table
// ---------------------------------------------------------------------------

const HEADERS: [&str; 6] = [
    "player",
    "position",
    "proj_points",
    "vorp",
    "need_state",
    "adj_score",
];

/// The first `limit` rows as an aligned text table.
pub fn format_table(rows: &[CandidateScore], limit: usize) -> String {
    if rows.is_empty() {
        return "No players left.".to_string();
    }

    let cells: Vec<[String; 6]> = rows
        .iter()
        .take(limit)
        .map(|r| {
            [
                r.player.clone(),
                r.position.to_string(),
                format!("{:.2}", r.proj_points),
                format_value(r.vorp, 2),
                r.need_state.to_string(),
                format_value(r.adj_score, 3),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |row: [&str; 6]| -> String {
        row.iter()
            .enumerate()
            .map(|(i, cell)| {
                // Player names read left to right; everything else is right-aligned.
                if i == 0 {
                    format!("{:<w$}", cell, w = widths[i])
                } else {
                    format!("{:>w$}", cell, w = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(HEADERS)];
    for row in &cells {
        out.push(line(row.each_ref().map(String::as_str)));
    }
    out.join("\n")
}

// ---------------------------------------------------------------------------
// Board sections
// ---------------------------------------------------------------------------

pub fn format_replacement_line(levels: &BTreeMap<Position, Replacement>) -> String {
    let parts: Vec<String> = Position::ALL
        .iter()
        .map(|pos| {
            let points = levels.get(pos).and_then(Replacement::points);
            format!("{}:{}", pos, format_value(points, 1))
        })
        .collect();
    format!("Replacement points by position: {}", parts.join(", "))
}

/// Top three rows per position, in ranked order.
pub fn format_leaders(rows: &[CandidateScore]) -> String {
    let mut out = vec!["By position (top 3 each by adj_score):".to_string()];
    for pos in Position::ALL {
        let leaders: Vec<String> = rows
            .iter()
            .filter(|r| r.position == pos)
            .take(LEADERS_PER_POSITION)
            .map(|r| {
                format!(
                    "{} ({:.1}; VORP {})",
                    r.player,
                    r.proj_points,
                    format_value(r.vorp, 1)
                )
            })
            .collect();
        if !leaders.is_empty() {
            out.push(format!("  {:>4}: {}", pos.display_str(), leaders.join(", ")));
        }
    }
    out.join("\n")
}

/// The full board shown after every change, or the completion message.
pub fn format_board(session: &DraftSession) -> String {
    let rows = session.query();
    if rows.is_empty() {
        return "Draft complete. No players left.".to_string();
    }
    format!(
        "Best next picks (VORP-adjusted):\n{}\n\n{}\n\n{}",
        format_table(&rows, session.config().top_n),
        format_replacement_line(&session.replacement_levels()),
        format_leaders(&rows)
    )
}

// ---------------------------------------------------------------------------
// Status and banner
// ---------------------------------------------------------------------------

fn format_counts(counts: &BTreeMap<String, u32>) -> String {
    if counts.is_empty() {
        return "(none)".to_string();
    }
    counts
        .iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_status(session: &DraftSession) -> String {
    let weights = &session.config().weights;
    let needs = session.need_states();
    let need_line: Vec<String> = Position::ALL
        .iter()
        .map(|pos| {
            let state = needs.get(pos).map_or("blocked", |s| s.label());
            format!("{pos}:{state}")
        })
        .collect();
    let mine = session.history().iter().filter(|e| e.is_mine()).count();

    [
        format!("Your roster used: {}", format_counts(&session.my_counts().to_map())),
        format!(
            "Weights: need:{:?}, bench:{:?}, blocked:{:?}",
            weights.need, weights.bench, weights.blocked
        ),
        format!("Need states: {}", need_line.join(", ")),
        format!(
            "Picks: {} total, {} mine, {} players left",
            session.history().len(),
            mine,
            session.available().len()
        ),
    ]
    .join("\n")
}

/// One-line summary printed once the pool is loaded.
pub fn format_banner(session: &DraftSession) -> String {
    let config = session.config();
    let roster = &config.roster;

    let mut starters: Vec<String> = Position::ALL
        .iter()
        .map(|&pos| format!("{}:{}", pos, roster.starters(pos)))
        .collect();
    starters.push(format!("FLEX:{}", roster.flex_starters()));

    let bench: Vec<String> = Position::ALL
        .iter()
        .filter(|&&pos| roster.bench(pos) > 0)
        .map(|&pos| format!("{}:{}", pos, roster.bench(pos)))
        .collect();
    let bench = if bench.is_empty() {
        "none".to_string()
    } else {
        bench.join(",")
    };

    format!(
        "Loaded {} players from {}. Teams={}. Roster={}. Bench={}.",
        session.pool().len(),
        session.pool().source(),
        config.teams,
        starters.join(","),
        bench
    )
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
