//! Configuration and `depot_tools` discovery for the depot shims.
//!
//! This crate loads the git wrapper's settings from defaults, an optional
//! YAML file and `GIT_WRAPPER_*` environment variables, and locates the
//! `depot_tools` directory so it can be appended to a search list.

pub mod config;
pub mod tools_dir;
