// Configuration loading and parsing (calculator.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use nrr_core::FULL_INNINGS_OVERS;

/// Environment variable naming the directory that holds `config/`,
/// `defaults/` and `logs/`. Falls back to the current directory.
pub const HOME_ENV_VAR: &str = "NRR_CALC_HOME";

/// Name of the config file under both `defaults/` and `config/`.
pub const CONFIG_FILE: &str = "calculator.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Overs credited to the opposition innings when the team bats first.
    pub full_innings_overs: u32,
    /// Resolved path to the points table.
    pub points_table: PathBuf,
}

// ---------------------------------------------------------------------------
// calculator.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct CalculatorFile {
    #[serde(rename = "match", default)]
    match_rules: MatchSection,
    data: DataSection,
}

#[derive(Debug, Clone, Deserialize)]
struct MatchSection {
    #[serde(default = "default_full_innings_overs")]
    full_innings_overs: u32,
}

impl Default for MatchSection {
    fn default() -> Self {
        MatchSection {
            full_innings_overs: default_full_innings_overs(),
        }
    }
}

fn default_full_innings_overs() -> u32 {
    FULL_INNINGS_OVERS
}

#[derive(Debug, Clone, Deserialize)]
struct DataSection {
    points_table: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/calculator.toml` relative to
/// `base_dir`. A relative points table path is resolved against `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: CalculatorFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        full_innings_overs: file.match_rules.full_innings_overs,
        points_table: base_dir.join(file.data.points_table.trim()),
    };

    validate(&config, &file.data)?;

    Ok(config)
}

/// Seed `config/calculator.toml` from `defaults/calculator.toml` when it is
/// missing. Returns the path written, or `None` when the user's copy was
/// already in place (or there are no defaults to copy from).
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if !source.is_file() {
        if target.is_file() {
            return Ok(None);
        }
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither defaults/{CONFIG_FILE} nor config/{CONFIG_FILE} found in {}; \
                 run from the calculator directory or set {HOME_ENV_VAR}",
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    // create_new never overwrites a file the user has edited.
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            let content = std::fs::read(&source).map_err(|e| ConfigError::DefaultsCopyError {
                message: format!("failed to read {}: {e}", source.display()),
            })?;
            std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(Some(target))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// The directory holding `config/`: `$NRR_CALC_HOME` if set, else the
/// current directory.
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    match std::env::var_os(HOME_ENV_VAR) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
            path: PathBuf::from("."),
        }),
    }
}

/// Convenience wrapper: copies defaults if needed, then loads config from
/// `base_dir()`.
pub fn load_config() -> Result<Config, ConfigError> {
    let base = base_dir()?;
    ensure_config_files(&base)?;
    load_config_from(&base)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config, data: &DataSection) -> Result<(), ConfigError> {
    if config.full_innings_overs == 0 {
        return Err(ConfigError::ValidationError {
            field: "match.full_innings_overs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if data.points_table.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.points_table".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
