//! Command-line shims shipped with depot_tools.
//!
//! Two binaries live here:
//!
//! - `git`, a wrapper that sends `git foo`, `git help foo` and
//!   `git foo --help` to a local `git-foo` helper script when one exists and
//!   defers to the real git otherwise;
//! - `find-depot-tools`, which locates the `depot_tools` directory and
//!   prints it, or a `PYTHONPATH` with it appended.

pub mod cli;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod locate;
pub mod logging;

use std::convert::Infallible;
use std::ffi::OsString;

use tracing::info;

use context::WrapperContext;
use error::WrapperError;

/// Run the git wrapper for `invocation`. Only returns on failure.
///
/// # Errors
///
/// Any [`WrapperError`]; its [`exit_code`](WrapperError::exit_code) is the
/// status the process should end with.
pub fn run_wrapper(invocation: &[OsString]) -> Result<Infallible, WrapperError> {
    let ctx = WrapperContext::from_env(invocation)?;
    logging::init(ctx.config.verbose);

    let command = ctx.dispatcher().classify(invocation)?;
    info!(%command, "resolved");

    Ok(ctx.executor().run(&command)?)
}
