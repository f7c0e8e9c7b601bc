//! Top-level error type for the git wrapper.

use depot_config::config::ConfigError;
use depot_git::LaunchError;
use depot_git::exec::EXIT_LAUNCH_FAILURE;
use thiserror::Error;

use crate::dispatch::DispatchError;

/// Every way the wrapper can fail.
#[derive(Debug, Error)]
pub enum WrapperError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The wrapper could not locate its own executable.
    #[error("cannot determine the wrapper's own path: {0}")]
    CurrentExe(#[source] std::io::Error),
}

impl WrapperError {
    /// The status the process exits with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Dispatch(err) => err.exit_code(),
            Self::Launch(err) => err.exit_code(),
            Self::Config(_) | Self::CurrentExe(_) => EXIT_LAUNCH_FAILURE,
        }
    }
}
