//! Configuration types and loading for the git wrapper.
//!
//! The main entry point is [`WrapperConfig`], loaded with [`load_config`].
//! Sources are layered, later ones winning:
//!
//! 1. built-in defaults
//! 2. a YAML file (see [`config_file_path`])
//! 3. `GIT_WRAPPER_*` environment variables (`GIT_WRAPPER_HELPER_DIR`, ...)

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix shared by every environment variable the wrapper reads.
pub const ENV_PREFIX: &str = "GIT_WRAPPER_";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "GIT_WRAPPER_CONFIG";

/// File name looked up next to the wrapper when [`CONFIG_ENV`] is unset.
pub const CONFIG_FILE_NAME: &str = "git_wrapper.yaml";

/// Default prefix of helper script file names.
pub const DEFAULT_HELPER_PREFIX: &str = "git-";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration source held a value of the wrong shape.
    #[error("invalid wrapper configuration: {0}")]
    Invalid(#[from] figment::Error),

    /// The configuration file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// The file that was attempted.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No `depot_tools` directory was found.
    #[error("Failed to find depot_tools")]
    DepotToolsNotFound,
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// WrapperConfig
// ---------------------------------------------------------------------------

/// Settings for the git wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapperConfig {
    /// Print tracing output to stderr.
    pub verbose: bool,

    /// Directory holding the helper scripts (default: the wrapper's own
    /// directory).
    pub helper_dir: Option<PathBuf>,

    /// File name prefix of helper scripts.
    pub helper_prefix: String,

    /// Run helpers through the python interpreter instead of directly.
    pub interpret_helpers: bool,

    /// Interpreter used for `python` (default: search `PATH`).
    pub python: Option<PathBuf>,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            helper_dir: None,
            helper_prefix: DEFAULT_HELPER_PREFIX.to_string(),
            interpret_helpers: false,
            python: None,
        }
    }
}

impl WrapperConfig {
    /// The helper directory, falling back to `wrapper_dir`.
    ///
    /// An empty `helper_dir` is ignored; a relative one is taken relative
    /// to `wrapper_dir`, never to the current directory.
    pub fn helper_dir_or(&self, wrapper_dir: &Path) -> PathBuf {
        match self.helper_dir.as_deref() {
            Some(dir) if !dir.as_os_str().is_empty() => wrapper_dir.join(dir),
            _ => wrapper_dir.to_path_buf(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Where the configuration file is read from.
///
/// `GIT_WRAPPER_CONFIG` wins; otherwise `git_wrapper.yaml` in `wrapper_dir`.
pub fn config_file_path(wrapper_dir: &Path) -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => wrapper_dir.join(CONFIG_FILE_NAME),
    }
}

/// Load the wrapper configuration.
///
/// A missing `config_file` is not an error; an empty one yields the defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] if the file exists but cannot be read, or
/// [`ConfigError::Invalid`] if it is malformed or a value has the wrong type.
pub fn load_config(config_file: Option<&Path>) -> Result<WrapperConfig> {
    let mut figment = Figment::from(Serialized::defaults(WrapperConfig::default()));

    if let Some(path) = config_file {
        match std::fs::read_to_string(path) {
            Ok(content) if !content.trim().is_empty() => {
                figment = figment.merge(Yaml::string(&content));
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }

    let config = figment
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
        .extract()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
