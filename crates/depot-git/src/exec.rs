//! Launching a [`ResolvedCommand`].
//!
//! On Unix the current process image is replaced, so a successful launch
//! never returns. Elsewhere the child is spawned and waited on, and its exit
//! status becomes ours.

use std::convert::Infallible;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use crate::command::{Program, ResolvedCommand};
use crate::search::SearchPath;

/// Exit status when the real tool is not on the search path.
pub const EXIT_TOOL_NOT_FOUND: i32 = 127;

/// Exit status when a launch failed without an OS error number.
pub const EXIT_LAUNCH_FAILURE: i32 = 125;

/// Interpreter names tried, in order, when no python is configured.
const PYTHON_NAMES: &[&str] = &["python3", "python"];

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that end a launch attempt.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// A logical program could not be resolved on the search path.
    #[error("{tool} not found")]
    ToolNotFound {
        /// The logical name that was looked up.
        tool: String,
    },

    /// The OS refused to start the resolved executable.
    #[error("Failed to run {command}: {source}")]
    LaunchFailure {
        /// The command line that was attempted.
        command: String,
        #[source]
        source: io::Error,
    },
}

/// A specialized `Result` type for launch operations.
pub type Result<T> = std::result::Result<T, LaunchError>;

impl LaunchError {
    /// The status the wrapper exits with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolNotFound { .. } => EXIT_TOOL_NOT_FOUND,
            Self::LaunchFailure { source, .. } => source
                .raw_os_error()
                .filter(|code| *code > 0)
                .unwrap_or(EXIT_LAUNCH_FAILURE),
        }
    }
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Resolves logical programs and runs commands.
#[derive(Debug, Clone)]
pub struct Executor {
    search: SearchPath,
    wrapper: Option<PathBuf>,
    python: Option<PathBuf>,
}

impl Executor {
    pub fn new(search: SearchPath) -> Self {
        Self {
            search,
            wrapper: None,
            python: None,
        }
    }

    /// Never resolve `git` to `wrapper`.
    pub fn excluding(mut self, wrapper: impl Into<PathBuf>) -> Self {
        self.wrapper = Some(wrapper.into());
        self
    }

    /// Use `python` as the interpreter instead of searching for one.
    pub fn with_python(mut self, python: Option<PathBuf>) -> Self {
        self.python = python;
        self
    }

    /// Turn `program` into a concrete executable path.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::ToolNotFound`] if a logical program has no
    /// match on the search path.
    pub fn resolve_program(&self, program: &Program) -> Result<PathBuf> {
        match program {
            Program::Git => self
                .search
                .find("git", self.wrapper.as_deref())
                .ok_or_else(|| LaunchError::ToolNotFound {
                    tool: "git".to_string(),
                }),
            Program::Python => {
                if let Some(python) = &self.python {
                    return Ok(python.clone());
                }
                PYTHON_NAMES
                    .iter()
                    .find_map(|name| self.search.find(name, None))
                    .ok_or_else(|| LaunchError::ToolNotFound {
                        tool: "python".to_string(),
                    })
            }
            Program::Script(path) => Ok(path.clone()),
        }
    }

    /// Run `command`. Only returns if the launch failed.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::ToolNotFound`] if the program cannot be
    /// resolved, or [`LaunchError::LaunchFailure`] if the OS cannot start it.
    pub fn run(&self, command: &ResolvedCommand) -> Result<Infallible> {
        let program = self.resolve_program(&command.program)?;
        debug!(program = %program.display(), "command: {command}");

        let source = replace_process(&program, &command.args);
        Err(LaunchError::LaunchFailure {
            command: ResolvedCommand::script(program, command.args.iter().cloned()).to_string(),
            source,
        })
    }
}

/// Replace the current process with `program`. Returns only on failure.
#[cfg(unix)]
fn replace_process(program: &Path, args: &[OsString]) -> io::Error {
    use std::os::unix::process::CommandExt;

    Command::new(program).args(args).exec()
}

/// Run `program` to completion and exit with its status. Returns only if
/// the child could not be started.
#[cfg(not(unix))]
fn replace_process(program: &Path, args: &[OsString]) -> io::Error {
    match Command::new(program).args(args).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(err) => err,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
