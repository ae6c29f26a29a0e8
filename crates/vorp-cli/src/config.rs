// Configuration loading (config/draft.toml) and command-line overrides.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use vorp_core::config::{parse_count_list, parse_weight_list, ConfigError, RawDraftConfig};

use crate::projections::ColumnOverrides;

/// Config file location relative to the working directory.
pub const CONFIG_FILE: &str = "config/draft.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigError),

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },

    #[error("no player CSV given; pass --csv or set draft.csv_path in config/draft.toml")]
    MissingCsvPath,
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the whole draft.toml file.
#[derive(Debug, Clone, Default, Deserialize)]
struct DraftFile {
    #[serde(default)]
    draft: DraftSection,
    #[serde(default)]
    columns: ColumnOverrides,
}

/// The `[draft]` table. Absent keys fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
struct DraftSection {
    csv_path: Option<String>,
    teams: Option<i64>,
    top_n: Option<i64>,
    starters: Option<BTreeMap<String, i64>>,
    bench: Option<BTreeMap<String, i64>>,
    weights: Option<BTreeMap<String, f64>>,
}

/// Settings read from draft.toml, before command-line overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileConfig {
    pub csv_path: Option<PathBuf>,
    pub draft: RawDraftConfig,
    pub columns: ColumnOverrides,
}

impl From<DraftFile> for FileConfig {
    fn from(file: DraftFile) -> Self {
        let section = file.draft;
        let defaults = RawDraftConfig::default();
        FileConfig {
            csv_path: section.csv_path.map(PathBuf::from),
            draft: RawDraftConfig {
                teams: section.teams.unwrap_or(defaults.teams),
                top_n: section.top_n.unwrap_or(defaults.top_n),
                starters: section.starters.unwrap_or(defaults.starters),
                bench: section.bench.unwrap_or(defaults.bench),
                weights: section.weights.unwrap_or(defaults.weights),
            },
            columns: file.columns,
        }
    }
}

// ---------------------------------------------------------------------------
// Command-line overrides
// ---------------------------------------------------------------------------

/// Values given on the command line. Every `Some` replaces the file value.
///
/// `roster`, `bench`, and `weights` are `KEY:VAL` lists such as
/// `"QB:1,RB:2,FLEX:1"` or `"need:1.0,bench:0.5"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub csv: Option<PathBuf>,
    pub teams: Option<i64>,
    pub roster: Option<String>,
    pub bench: Option<String>,
    pub weights: Option<String>,
    pub top: Option<i64>,
    pub columns: ColumnOverrides,
}

/// Fully resolved settings for a fresh session. `draft` is checked when
/// the session is built (`DraftSession::from_raw`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    pub draft: RawDraftConfig,
    pub columns: ColumnOverrides,
}

impl Overrides {
    /// Whether any draft setting (not the CSV path or columns) was given.
    pub fn has_settings(&self) -> bool {
        self.teams.is_some()
            || self.roster.is_some()
            || self.bench.is_some()
            || self.weights.is_some()
            || self.top.is_some()
    }

    /// Apply the overrides to the file settings. Malformed `KEY:VAL` lists
    /// fail here; out-of-range values fail when the session is built.
    pub fn apply(&self, file: FileConfig) -> Result<AppConfig, LoadError> {
        let mut raw = file.draft;
        if let Some(teams) = self.teams {
            raw.teams = teams;
        }
        if let Some(top) = self.top {
            raw.top_n = top;
        }
        if let Some(roster) = &self.roster {
            raw.starters = parse_count_list(roster)?;
        }
        if let Some(bench) = &self.bench {
            raw.bench = parse_count_list(bench)?;
        }
        if let Some(weights) = &self.weights {
            raw.weights = parse_weight_list(weights)?;
        }

        let csv_path = self
            .csv
            .clone()
            .or(file.csv_path)
            .ok_or(LoadError::MissingCsvPath)?;

        Ok(AppConfig {
            csv_path,
            draft: raw,
            columns: file.columns.merged(&self.columns),
        })
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse draft.toml text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<FileConfig, LoadError> {
    let file: DraftFile = toml::from_str(text).map_err(|e| LoadError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(file.into())
}

/// Load a specific config file. A missing file is an error.
pub fn load_config_file(path: &Path) -> Result<FileConfig, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|_| LoadError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    parse_config(&text, path)
}

/// Load `config/draft.toml` relative to `base_dir`, without copying defaults.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<FileConfig, LoadError> {
    load_config_file(&base_dir.join(CONFIG_FILE))
}

/// Ensure config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files and
/// never overwrites an existing file.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| LoadError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| LoadError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoadError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| LoadError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    LoadError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                info!("copied default config to {}", target.display());
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(LoadError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Load the configuration used by the binary.
///
/// An explicit path must exist. Otherwise defaults are copied into
/// `config/` under the working directory and `config/draft.toml` is read
/// if present; with no file at all the built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, LoadError> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let cwd = std::env::current_dir().map_err(|_| LoadError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    if cwd.join(CONFIG_FILE).is_file() {
        load_config_from(&cwd)
    } else {
        info!("no {} found, using built-in defaults", CONFIG_FILE);
        Ok(FileConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
