//! The `find-depot-tools` command.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use depot_config::tools_dir::{augment_search_list, find_depot_tools_or_error};

use crate::cli::FindDepotToolsCli;

/// Find depot_tools and return the line to print.
///
/// `path_var` is the value of `PATH`.
pub fn run(cli: &FindDepotToolsCli, path_var: Option<&OsStr>) -> Result<String> {
    let search_list = split_list(cli.search_list.as_deref());
    let path_dirs = split_list(path_var);
    let start = match &cli.start {
        Some(start) => Some(start.clone()),
        None => env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf)),
    };

    let found = find_depot_tools_or_error(&search_list, &path_dirs, start.as_deref())?;

    if cli.export {
        let augmented = augment_search_list(&search_list, &found);
        let joined = env::join_paths(&augmented).context("cannot join the augmented search list")?;
        Ok(format!("PYTHONPATH={}", joined.to_string_lossy()))
    } else {
        Ok(found.path.display().to_string())
    }
}

/// Split a platform path list, dropping empty entries.
fn split_list(value: Option<&OsStr>) -> Vec<PathBuf> {
    value
        .map(|v| {
            env::split_paths(v)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default()
}
