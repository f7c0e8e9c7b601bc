//! Runtime context for the git wrapper.
//!
//! The [`WrapperContext`] holds everything resolved once at startup: where
//! the wrapper lives and its configuration. The dispatcher and executor are
//! built from it; nothing is cached process-wide.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use depot_config::config::{WrapperConfig, config_file_path, load_config};
use depot_git::{Executor, SearchPath};

use crate::dispatch::{Dispatcher, HelperDir, check_invoked_as};
use crate::error::WrapperError;

/// Startup state of one wrapper run.
#[derive(Debug, Clone)]
pub struct WrapperContext {
    /// The wrapper's own executable, canonicalized.
    pub wrapper: PathBuf,

    /// Directory containing [`wrapper`](Self::wrapper).
    pub wrapper_dir: PathBuf,

    pub config: WrapperConfig,
}

impl WrapperContext {
    /// Build from the running executable and the environment.
    ///
    /// The program name in `invocation` is checked before any configuration
    /// is read.
    ///
    /// # Errors
    ///
    /// Returns [`WrapperError::CurrentExe`] if the executable path is
    /// unavailable, [`WrapperError::Dispatch`] if `invocation` does not name
    /// the wrapper, or [`WrapperError::Config`] for invalid configuration.
    pub fn from_env(invocation: &[OsString]) -> Result<Self, WrapperError> {
        let exe = std::env::current_exe().map_err(WrapperError::CurrentExe)?;
        let wrapper = exe.canonicalize().unwrap_or(exe);
        check_invoked_as(&wrapper, invocation)?;

        let mut ctx = Self::new(wrapper, WrapperConfig::default());
        ctx.config = load_config(Some(&config_file_path(&ctx.wrapper_dir)))?;
        Ok(ctx)
    }

    /// Build from an explicit wrapper path and configuration.
    pub fn new(wrapper: PathBuf, config: WrapperConfig) -> Self {
        let wrapper_dir = wrapper
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            wrapper,
            wrapper_dir,
            config,
        }
    }

    /// Where helper scripts are looked up. Always absolute when the wrapper
    /// path is.
    pub fn helper_dir(&self) -> PathBuf {
        self.config.helper_dir_or(&self.wrapper_dir)
    }

    pub fn dispatcher(&self) -> Dispatcher<HelperDir> {
        let helpers = HelperDir::new(self.helper_dir(), self.config.helper_prefix.clone());
        Dispatcher::new(&self.wrapper, helpers).interpret_helpers(self.config.interpret_helpers)
    }

    /// An executor over `PATH` that never resolves `git` to the wrapper.
    pub fn executor(&self) -> Executor {
        Executor::new(SearchPath::from_env())
            .excluding(&self.wrapper)
            .with_python(self.config.python.clone())
    }
}
