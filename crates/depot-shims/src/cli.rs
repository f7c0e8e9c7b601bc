//! Clap CLI definitions for `find-depot-tools`.
//!
//! The git wrapper has no CLI of its own: every argument belongs to git or
//! to a helper and is passed through untouched.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Locate depot_tools.
///
/// Checks the search list, then PATH, then walks up from the start
/// directory looking for depot_tools/breakpad.py.
#[derive(Parser, Debug)]
#[command(
    name = "find-depot-tools",
    about = "Locate the depot_tools directory",
    version
)]
pub struct FindDepotToolsCli {
    /// Directory the upward search starts from (default: this executable's directory).
    #[arg(long, value_name = "DIR")]
    pub start: Option<PathBuf>,

    /// Print `PYTHONPATH=...` with depot_tools appended instead of the directory.
    #[arg(long)]
    pub export: bool,

    /// Search list checked first.
    #[arg(long, env = "PYTHONPATH", value_name = "PATHS", hide_env_values = true)]
    pub search_list: Option<OsString>,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
