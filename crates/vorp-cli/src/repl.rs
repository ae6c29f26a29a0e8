// Interactive command loop.
//
// Reads one command per line, applies it to the session, and writes the
// result. Every draft error is reported and the loop keeps going; only I/O
// failures on the terminal itself end the session early.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use vorp_core::snapshot::SessionSnapshot;
use vorp_core::{DraftError, DraftEvent, DraftSession, Position};

use crate::command::{parse_command, Command, HELP_TEXT};
use crate::export;
use crate::render;
use crate::suggest::{close_matches, SUGGESTION_CUTOFF, SUGGESTION_LIMIT};

/// Rows shown by `filter POS`.
pub const FILTER_LIMIT: usize = 10;

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run the prompt until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(session: &mut DraftSession, input: R, out: &mut W) -> Result<()> {
    writeln!(out, "{}", HELP_TEXT)?;
    writeln!(out, "\n{}", render::format_board(session))?;

    let mut lines = input.lines();
    loop {
        write!(out, "\n> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out, "\nExiting.")?;
            break;
        };
        let line = line.context("failed to read command")?;

        let command = parse_command(&line);
        debug!("command: {:?}", command);
        if execute(session, command, out)? == Flow::Quit {
            break;
        }
    }

    info!("session ended after {} picks", session.history().len());
    Ok(())
}

/// Apply one command and write its output.
pub fn execute<W: Write>(session: &mut DraftSession, command: Command, out: &mut W) -> Result<Flow> {
    match command {
        Command::Empty => {}
        Command::Quit => return Ok(Flow::Quit),
        Command::Help => writeln!(out, "{}", HELP_TEXT)?,
        Command::Best => writeln!(out, "\n{}", render::format_board(session))?,
        Command::Status => writeln!(out, "{}", render::format_status(session))?,
        Command::MissingArgument(usage) => writeln!(out, "Usage: {usage}")?,
        Command::Undo => match session.undo() {
            Ok(event) => {
                match &event {
                    DraftEvent::LeagueDrafted { name, .. } => writeln!(out, "Undid drafted: {name}")?,
                    DraftEvent::Mine { name, slot, .. } => {
                        writeln!(out, "Undid mine: {name} ({slot} slot released)")?
                    }
                }
                info!("undo: {}", event.name());
                writeln!(out, "\n{}", render::format_board(session))?;
            }
            Err(e) => writeln!(out, "{}", sentence(&e))?,
        },
        Command::Draft(name) => {
            let result = session.mark_league_drafted(&name).map(|e| e.position());
            report_pick(session, &name, result, false, out)?;
        }
        Command::Mine(name) => {
            let result = session.mark_mine(&name).map(|e| e.position());
            report_pick(session, &name, result, true, out)?;
        }
        Command::Filter(position) => match session.filter(&position) {
            Ok(rows) if rows.is_empty() => {
                // filter() has already validated the position string.
                let pos = Position::from_str_pos(&position)
                    .map_or_else(|| position.trim().to_uppercase(), |p| p.to_string());
                writeln!(out, "No players left at {pos}.")?;
            }
            Ok(rows) => writeln!(out, "{}", render::format_table(&rows, FILTER_LIMIT))?,
            Err(e) => writeln!(out, "{}", sentence(&e))?,
        },
        Command::Save(path) => {
            let rows = session.query();
            match export::save_scored_csv(&path, &rows) {
                Ok(()) => {
                    info!("saved {} scored rows to {}", rows.len(), path.display());
                    writeln!(out, "Saved remaining pool with scores to {}", path.display())?;
                }
                Err(e) => {
                    warn!("save to {} failed: {}", path.display(), e);
                    writeln!(out, "ERROR: could not save {}: {e}", path.display())?;
                }
            }
        }
        Command::Snapshot(path) => match SessionSnapshot::capture(session).save(&path) {
            Ok(()) => writeln!(out, "Saved session snapshot to {}", path.display())?,
            Err(e) => {
                warn!("snapshot failed: {}", e);
                writeln!(out, "ERROR: {e}")?;
            }
        },
    }
    Ok(Flow::Continue)
}

fn report_pick<W: Write>(
    session: &DraftSession,
    name: &str,
    result: Result<Position, DraftError>,
    mine: bool,
    out: &mut W,
) -> Result<()> {
    match result {
        Ok(position) => {
            let who = if mine { "mine" } else { "league" };
            info!("{} pick: {} ({})", who, name, position);
            writeln!(out, "\n{}", render::format_board(session))?;
        }
        Err(DraftError::UnknownPlayer { .. }) => {
            let suggestions = close_matches(
                name,
                session.pool().names(),
                SUGGESTION_LIMIT,
                SUGGESTION_CUTOFF,
            );
            if suggestions.is_empty() {
                writeln!(out, "Name not found. Check spelling.")?;
            } else {
                writeln!(out, "Name not found. Did you mean: {} ?", suggestions.join(", "))?;
            }
        }
        Err(e) => writeln!(out, "{}", sentence(&e))?,
    }
    Ok(())
}

/// Error text with a leading capital, for the prompt.
fn sentence(e: &DraftError) -> String {
    let msg = e.to_string();
    let mut chars = msg.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => msg,
    }
}
