//! The git wrapper's dispatch rules.
//!
//! Given the raw invocation, decide whether a local helper script handles
//! it or the real git does. Rules, first match wins:
//!
//! 1. `git foo` runs `git-foo` with no arguments.
//! 2. `git help foo ...` and `git --help foo ...` run `git-foo --help ...`.
//! 3. `git foo --help ...` runs `git-foo --help ...`.
//! 4. Anything else, or a rule whose helper does not exist, runs the real
//!    git with the arguments unchanged.
//!
//! `git foo help` is not rewritten and goes to the real git unchanged.

use std::ffi::{OsStr, OsString};
use std::iter;
use std::path::{Path, PathBuf, is_separator};

use depot_git::ResolvedCommand;
use depot_git::search::is_executable;
use thiserror::Error;
use tracing::debug;

/// Exit status when the wrapper runs under a name it does not expect.
pub const EXIT_CONFUSED: i32 = 126;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while classifying an invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// `argv[0]` does not name the wrapper.
    #[error("The wrapper script at {} is confused (invoked as {invoked:?})", wrapper.display())]
    ConfusedInvocation {
        /// The wrapper's own executable.
        wrapper: PathBuf,
        /// What `argv[0]` actually was.
        invoked: String,
    },
}

impl DispatchError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfusedInvocation { .. } => EXIT_CONFUSED,
        }
    }
}

// ---------------------------------------------------------------------------
// Helper lookup
// ---------------------------------------------------------------------------

/// Answers "is there a helper for this sub-command, and where".
pub trait HelperLookup {
    /// Path of the helper named `name`, if one exists.
    fn helper_path(&self, name: &OsStr) -> Option<PathBuf>;
}

/// Helpers stored as `<prefix><name>` executables in one directory.
#[derive(Debug, Clone)]
pub struct HelperDir {
    dir: PathBuf,
    prefix: String,
}

impl HelperDir {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }
}

impl HelperLookup for HelperDir {
    fn helper_path(&self, name: &OsStr) -> Option<PathBuf> {
        // Sub-command names never contain separators; refuse to look outside
        // the helper directory.
        let text = name.to_string_lossy();
        if text.is_empty() || text.contains(is_separator) {
            return None;
        }

        let mut file = OsString::from(&self.prefix);
        file.push(name);
        let path = self.dir.join(file);
        is_executable(&path).then_some(path)
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Classifies invocations of the wrapper.
#[derive(Debug, Clone)]
pub struct Dispatcher<H> {
    wrapper: PathBuf,
    helpers: H,
    interpret_helpers: bool,
}

impl<H: HelperLookup> Dispatcher<H> {
    /// `wrapper` is the wrapper's own executable; `argv[0]` must name it
    /// (see [`check_invoked_as`]).
    pub fn new(wrapper: impl Into<PathBuf>, helpers: H) -> Self {
        Self {
            wrapper: wrapper.into(),
            helpers,
            interpret_helpers: false,
        }
    }

    /// Run helpers through the `python` interpreter.
    pub fn interpret_helpers(mut self, yes: bool) -> Self {
        self.interpret_helpers = yes;
        self
    }

    /// Decide what to run for `invocation` (`argv`, program name first).
    ///
    /// Only checks for helper existence; nothing is executed.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ConfusedInvocation`] if the invocation is
    /// empty or its program name is not the wrapper's.
    pub fn classify(&self, invocation: &[OsString]) -> Result<ResolvedCommand, DispatchError> {
        check_invoked_as(&self.wrapper, invocation)?;
        let args = &invocation[1..];

        let redirected = match args {
            [name] => self.helpers.helper_path(name).map(|path| {
                debug!("redirecting to helper {}", path.display());
                self.helper_command(path, Vec::new())
            }),
            [first, name, rest @ ..] if first == "help" || first == "--help" => {
                self.helpers.helper_path(name).map(|path| {
                    debug!("caught \"git (--)help {}\"", name.to_string_lossy());
                    let helper_args = iter::once(OsString::from("--help"))
                        .chain(rest.iter().cloned())
                        .collect();
                    self.helper_command(path, helper_args)
                })
            }
            [name, flag, ..] if flag == "--help" => self.helpers.helper_path(name).map(|path| {
                debug!("caught \"git {} --help\"", name.to_string_lossy());
                self.helper_command(path, args[1..].to_vec())
            }),
            _ => None,
        };

        Ok(redirected.unwrap_or_else(|| ResolvedCommand::git(args.iter().cloned())))
    }

    fn helper_command(&self, path: PathBuf, args: Vec<OsString>) -> ResolvedCommand {
        if self.interpret_helpers {
            ResolvedCommand::python(path, args)
        } else {
            ResolvedCommand::script(path, args)
        }
    }
}

/// Check that `invocation[0]` names the wrapper at `wrapper`.
///
/// Names are compared by file name; on Windows the extension is ignored so
/// `git` and `git.exe` both match.
///
/// # Errors
///
/// Returns [`DispatchError::ConfusedInvocation`] if the invocation is empty
/// or names something else.
pub fn check_invoked_as(wrapper: &Path, invocation: &[OsString]) -> Result<(), DispatchError> {
    let argv0 = invocation.first().map(OsString::as_os_str).unwrap_or_default();
    if same_program_name(Path::new(argv0), wrapper) {
        return Ok(());
    }
    Err(DispatchError::ConfusedInvocation {
        wrapper: wrapper.to_path_buf(),
        invoked: argv0.to_string_lossy().into_owned(),
    })
}

fn same_program_name(invoked: &Path, wrapper: &Path) -> bool {
    let (invoked, expected) = if cfg!(windows) {
        (invoked.file_stem(), wrapper.file_stem())
    } else {
        (invoked.file_name(), wrapper.file_name())
    };
    matches!((invoked, expected), (Some(a), Some(b)) if a == b)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
