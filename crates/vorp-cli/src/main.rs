// vorp-draft entry point.
//
// Startup sequence:
// 1. Parse command-line flags
// 2. Initialize tracing (log to file, the terminal is the prompt)
// 3. Load config/draft.toml and apply flag overrides
// 4. Load the player pool, fresh or from a snapshot
// 5. Run the prompt until quit or end of input

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use vorp_core::snapshot::SessionSnapshot;
use vorp_core::DraftSession;

use vorp_cli::config::{self, FileConfig, Overrides};
use vorp_cli::projections::{self, ColumnOverrides};
use vorp_cli::render;
use vorp_cli::repl;

/// Live fantasy-football draft helper ranked by value over replacement.
#[derive(Parser, Debug)]
#[command(name = "vorp-draft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: config/draft.toml, copied from defaults/ if missing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Player projections CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Number of teams in the league
    #[arg(long)]
    teams: Option<i64>,

    /// Starters per team, e.g. "QB:1,RB:2,WR:2,TE:1,FLEX:1,K:1,DST:1"
    #[arg(long)]
    roster: Option<String>,

    /// Bench capacity per position for your team, e.g. "RB:2,WR:1"
    #[arg(long)]
    bench: Option<String>,

    /// Need-state weights, e.g. "need:1.0,bench:0.5,blocked:0.15"
    #[arg(long)]
    weights: Option<String>,

    /// How many players to show after each update
    #[arg(long)]
    top: Option<i64>,

    /// CSV header holding player names
    #[arg(long)]
    col_player: Option<String>,

    /// CSV header holding positions
    #[arg(long)]
    col_pos: Option<String>,

    /// CSV header holding projected points
    #[arg(long)]
    col_points: Option<String>,

    /// Resume from a session snapshot written by the `snapshot` command
    #[arg(long)]
    resume: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            csv: self.csv.clone(),
            teams: self.teams,
            roster: self.roster.clone(),
            bench: self.bench.clone(),
            weights: self.weights.clone(),
            top: self.top,
            columns: ColumnOverrides {
                player: self.col_player.clone(),
                position: self.col_pos.clone(),
                points: self.col_points.clone(),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 1. Parse flags
    let cli = Cli::parse();

    // 2. Initialize tracing
    init_tracing()?;
    info!("vorp-draft starting up");

    // 3. Load config
    let file = config::load_config(cli.config.as_deref()).context("failed to load configuration")?;
    let overrides = cli.overrides();

    // 4. Build the session
    let mut session = match &cli.resume {
        Some(path) => resume_session(path, file, &overrides)?,
        None => new_session(file, &overrides)?,
    };
    info!(
        "session ready: {} players, {} picks so far",
        session.pool().len(),
        session.history().len()
    );

    // 5. Run the prompt
    println!("{}", render::format_banner(&session));
    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&mut session, stdin.lock(), &mut stdout.lock())?;

    info!("vorp-draft shut down cleanly");
    Ok(())
}

fn new_session(file: FileConfig, overrides: &Overrides) -> anyhow::Result<DraftSession> {
    let app = overrides.apply(file).context("invalid command-line settings")?;
    info!(
        "config: {} teams, top {}, csv {}",
        app.draft.teams,
        app.draft.top_n,
        app.csv_path.display()
    );
    let pool = projections::load_pool(&app.csv_path, &app.columns)
        .context("failed to load player pool")?;
    let session = DraftSession::from_raw(pool, &app.draft).context("invalid draft settings")?;
    Ok(session)
}

/// Rebuild a session from a snapshot. The snapshot's settings win; only the
/// CSV path and column names may be overridden.
fn resume_session(
    path: &std::path::Path,
    file: FileConfig,
    overrides: &Overrides,
) -> anyhow::Result<DraftSession> {
    let snapshot = SessionSnapshot::load(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    if overrides.has_settings() {
        warn!("draft settings flags are ignored when resuming; the snapshot's settings apply");
        eprintln!("note: draft settings flags are ignored when resuming from a snapshot");
    }

    let csv_path = overrides
        .csv
        .clone()
        .unwrap_or_else(|| PathBuf::from(&snapshot.csv_path));
    let columns = file.columns.merged(&overrides.columns);
    let pool = projections::load_pool(&csv_path, &columns).context("failed to load player pool")?;

    let session = snapshot
        .restore(pool)
        .with_context(|| format!("failed to restore snapshot {}", path.display()))?;
    info!(
        "resumed from {} with {} picks",
        path.display(),
        session.history().len()
    );
    Ok(session)
}

/// Initialize tracing to log to a file (the terminal is used by the prompt).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("vorp-draft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vorp_cli=info,vorp_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
