//! Executable lookup on the process search path.
//!
//! The platform's executable-resolution rules are captured by a single
//! value, [`ExecutableSuffixes`]: on Windows the `PATHEXT` extensions, and
//! on every other platform just the bare name.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Extensions tried when `PATHEXT` is not set on Windows.
const DEFAULT_PATHEXT: &str = ".COM;.EXE;.BAT;.CMD";

// ---------------------------------------------------------------------------
// Suffixes
// ---------------------------------------------------------------------------

/// Candidate suffixes appended to an executable name during lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableSuffixes(Vec<OsString>);

impl ExecutableSuffixes {
    /// Use exactly the given suffixes, in order.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self(suffixes.into_iter().map(Into::into).collect())
    }

    /// Only the bare name (no suffix). The rule on Unix-like platforms.
    pub fn bare() -> Self {
        Self(vec![OsString::new()])
    }

    /// Parse a `PATHEXT`-style list (`.COM;.EXE;...`).
    ///
    /// Empty entries are ignored. Falls back to the stock Windows list when
    /// `value` is `None`.
    pub fn from_pathext(value: Option<&OsStr>) -> Self {
        let raw = value
            .map(|v| v.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PATHEXT.to_string());
        Self(
            raw.split(';')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .map(OsString::from)
                .collect(),
        )
    }

    /// The suffixes for the running platform.
    pub fn platform() -> Self {
        if cfg!(windows) {
            Self::from_pathext(env::var_os("PATHEXT").as_deref())
        } else {
            Self::bare()
        }
    }

    /// Every file name worth probing for `name`, in priority order.
    pub fn candidates<'a>(&'a self, name: &'a str) -> impl Iterator<Item = OsString> + 'a {
        self.0.iter().map(move |suffix| {
            let mut file = OsString::from(name);
            file.push(suffix);
            file
        })
    }
}

// ---------------------------------------------------------------------------
// Search path
// ---------------------------------------------------------------------------

/// An ordered list of directories searched for executables.
#[derive(Debug, Clone)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
    suffixes: ExecutableSuffixes,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>, suffixes: ExecutableSuffixes) -> Self {
        Self { dirs, suffixes }
    }

    /// Build from `PATH` and the platform suffixes.
    pub fn from_env() -> Self {
        let dirs = env::var_os("PATH")
            .map(|value| env::split_paths(&value).collect())
            .unwrap_or_default();
        Self::new(dirs, ExecutableSuffixes::platform())
    }

    /// Return the first executable called `name` on the search path.
    ///
    /// Candidates are canonicalized before being checked, and a candidate
    /// that resolves to `exclude` is skipped, so a wrapper never finds
    /// itself.
    pub fn find(&self, name: &str, exclude: Option<&Path>) -> Option<PathBuf> {
        let exclude = exclude.map(|p| p.canonicalize().unwrap_or_else(|_| p.to_path_buf()));

        for dir in &self.dirs {
            for file in self.suffixes.candidates(name) {
                let Ok(path) = dir.join(&file).canonicalize() else {
                    continue;
                };
                if !is_executable(&path) {
                    continue;
                }
                if exclude.as_deref().is_some_and(|ex| same_file_name(ex, &path)) {
                    debug!(path = %path.display(), "skipping the wrapper itself");
                    continue;
                }
                debug!(path = %path.display(), "found {name}");
                return Some(path);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Whether `path` is a regular file the current user may execute.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

/// Whether `path` is a regular file the current user may execute.
///
/// Outside Unix, executability is carried by the extension, which the
/// lookup already accounted for.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Path comparison following the platform's case rules.
fn same_file_name(a: &Path, b: &Path) -> bool {
    if cfg!(windows) {
        a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
    } else {
        a == b
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
