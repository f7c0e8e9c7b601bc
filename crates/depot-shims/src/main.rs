//! `git` -- the depot_tools git wrapper.
//!
//! Sends `git foo`, `git help foo` and `git foo --help` to a `git-foo`
//! helper next to this executable when one exists, and hands everything
//! else to the real git found on `PATH`.

use std::ffi::OsString;

fn main() {
    let invocation: Vec<OsString> = std::env::args_os().collect();

    // Only returns on failure; on success the process image is replaced.
    let Err(err) = depot_shims::run_wrapper(&invocation);
    eprintln!("{err}");
    std::process::exit(err.exit_code());
}
