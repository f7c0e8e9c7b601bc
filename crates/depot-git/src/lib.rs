//! Executable lookup and process replacement for the git wrapper.
//!
//! This crate resolves the logical program names used by the wrapper
//! (`git`, `python`) to concrete executables on the search path, and
//! replaces the running process with the resolved command.

pub mod command;
pub mod exec;
pub mod search;

pub use command::{Program, ResolvedCommand};
pub use exec::{Executor, LaunchError};
pub use search::{ExecutableSuffixes, SearchPath};
