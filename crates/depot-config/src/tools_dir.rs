//! Discovery of the `depot_tools` directory.
//!
//! The directory is looked for, in order, in an explicit search list (such
//! as `PYTHONPATH`), in `PATH`, and finally by walking up from a starting
//! directory looking for `depot_tools/breakpad.py`. The result is a plain
//! value; callers keep it for as long as they need it.

use std::path::{Path, PathBuf, is_separator};

use tracing::debug;

use crate::config::ConfigError;

/// Name of the tools directory.
pub const DEPOT_TOOLS_NAME: &str = "depot_tools";

/// File whose presence marks a real `depot_tools` checkout during the
/// upward walk.
const MARKER_FILE: &str = "breakpad.py";

/// Which probe found the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoundIn {
    /// Already on the search list.
    SearchList,
    /// An entry of `PATH`.
    Path,
    /// A sibling of the starting directory or one of its ancestors.
    Ancestor,
}

/// A located `depot_tools` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepotToolsDir {
    pub path: PathBuf,
    pub found_in: FoundIn,
}

/// Search for `depot_tools`.
///
/// `search_list` and `path_dirs` entries match when, with trailing
/// separators removed, they end with `depot_tools`. `start` is where the
/// upward walk begins; `None` skips the walk.
///
/// # Examples
///
/// ```no_run
/// use depot_config::tools_dir::find_depot_tools;
/// use std::path::Path;
///
/// if let Some(dir) = find_depot_tools(&[], &[], Some(Path::new("."))) {
///     println!("Found depot_tools at {}", dir.path.display());
/// }
/// ```
pub fn find_depot_tools(
    search_list: &[PathBuf],
    path_dirs: &[PathBuf],
    start: Option<&Path>,
) -> Option<DepotToolsDir> {
    // 1. Already on the search list.
    if let Some(path) = search_list.iter().find_map(|p| names_depot_tools(p)) {
        debug!(path = %path.display(), "depot_tools already on the search list");
        return Some(DepotToolsDir {
            path,
            found_in: FoundIn::SearchList,
        });
    }

    // 2. On PATH, the common case.
    if let Some(path) = path_dirs.iter().find_map(|p| names_depot_tools(p)) {
        debug!(path = %path.display(), "depot_tools found on PATH");
        return Some(DepotToolsDir {
            path,
            found_in: FoundIn::Path,
        });
    }

    // 3. Walk up towards the filesystem root.
    let start = start?.canonicalize().ok()?;
    let mut current = start.as_path();
    loop {
        let candidate = current.join(DEPOT_TOOLS_NAME);
        if candidate.join(MARKER_FILE).is_file() {
            debug!(path = %candidate.display(), "depot_tools found next to an ancestor");
            return Some(DepotToolsDir {
                path: candidate,
                found_in: FoundIn::Ancestor,
            });
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
            }
            _ => break,
        }
    }

    None
}

/// Like [`find_depot_tools`], but not finding it is an error.
///
/// # Errors
///
/// Returns [`ConfigError::DepotToolsNotFound`] if every probe fails.
pub fn find_depot_tools_or_error(
    search_list: &[PathBuf],
    path_dirs: &[PathBuf],
    start: Option<&Path>,
) -> Result<DepotToolsDir, ConfigError> {
    find_depot_tools(search_list, path_dirs, start).ok_or(ConfigError::DepotToolsNotFound)
}

/// Return `search_list` with `found` appended, unless it came from the
/// search list itself or is already present.
pub fn augment_search_list(search_list: &[PathBuf], found: &DepotToolsDir) -> Vec<PathBuf> {
    let mut list = search_list.to_vec();
    if found.found_in != FoundIn::SearchList && !list.contains(&found.path) {
        list.push(found.path.clone());
    }
    list
}

/// The entry without trailing separators, if it names `depot_tools`.
fn names_depot_tools(entry: &Path) -> Option<PathBuf> {
    let text = entry.to_string_lossy();
    let trimmed = text.trim_end_matches(is_separator);
    trimmed
        .ends_with(DEPOT_TOOLS_NAME)
        .then(|| PathBuf::from(trimmed))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
