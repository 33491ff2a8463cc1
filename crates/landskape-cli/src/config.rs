//! Configuration file lookup and validation for the CLI.
//!
//! The first file found wins:
//!
//! 1. the `--config` path,
//! 2. `landskape/config.toml` below the working directory,
//! 3. `config.toml` in the platform configuration directory.
//!
//! Without any file the library defaults apply. A loaded renderer section is
//! checked before any diagram is built, so a bad default format or a missing
//! scratch directory is reported against the file that introduced it.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use landskape::{
    LandskapeError,
    config::{AppConfig, RendererConfig},
    render::OutputFormat,
};

/// Configuration file looked up below the working directory.
const LOCAL_CONFIG: &str = "landskape/config.toml";

/// Configuration file name inside the platform configuration directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid renderer configuration in {path}: {reason}")]
    Renderer { path: PathBuf, reason: String },
}

impl From<ConfigError> for LandskapeError {
    fn from(err: ConfigError) -> Self {
        LandskapeError::Config(err.to_string())
    }
}

/// Where the configuration file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    Explicit,
    Local,
    Platform,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explicit => "explicit",
            Self::Local => "local",
            Self::Platform => "platform",
        })
    }
}

/// Finds, loads, and validates the configuration.
///
/// # Errors
///
/// Returns [`LandskapeError::Config`] if an explicit path does not exist, a
/// file cannot be read or parsed, or its renderer section is unusable.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, LandskapeError> {
    let explicit_path: Option<&Path> = explicit_path.as_ref().map(AsRef::as_ref);
    let Some((path, source)) = locate_config(explicit_path) else {
        debug!("No configuration file found, using default configuration");
        return Ok(AppConfig::default());
    };

    info!(path = path.display().to_string(), source:% = source; "Loading configuration");
    let config = read_config(&path)?;
    validate_renderer(&path, config.renderer())?;

    debug!(
        binary = config.renderer().binary(),
        timeout:? = config.renderer().timeout(),
        scratch_dir = config.renderer().scratch_dir().display().to_string();
        "Renderer configured"
    );
    Ok(config)
}

fn locate_config(explicit_path: Option<&Path>) -> Option<(PathBuf, ConfigSource)> {
    if let Some(path) = explicit_path {
        return Some((path.to_path_buf(), ConfigSource::Explicit));
    }

    let local = Path::new(LOCAL_CONFIG);
    if local.is_file() {
        return Some((local.to_path_buf(), ConfigSource::Local));
    }

    let platform = ProjectDirs::from("com", "landskape", "landskape")?
        .config_dir()
        .join(CONFIG_FILE_NAME);
    platform
        .is_file()
        .then_some((platform, ConfigSource::Platform))
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn validate_renderer(path: &Path, renderer: &RendererConfig) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Renderer {
        path: path.to_path_buf(),
        reason,
    };

    if renderer.binary().trim().is_empty() {
        return Err(invalid("`binary` is empty".to_string()));
    }
    OutputFormat::parse(renderer.default_format(), "")
        .map_err(|err| invalid(format!("`default_format`: {err}")))?;

    let scratch_dir = renderer.scratch_dir();
    if !scratch_dir.is_dir() {
        return Err(invalid(format!(
            "`scratch_dir` {} is not a directory",
            scratch_dir.display()
        )));
    }
    Ok(())
}
