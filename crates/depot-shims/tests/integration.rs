//! End-to-end tests for the `git` wrapper and `find-depot-tools` binaries.
//!
//! Each test builds a temp directory holding a fake real `git` and some
//! helper scripts, then runs the cargo-built binaries as subprocesses via
//! `assert_cmd`. The fakes are shell scripts, so these tests are Unix-only.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A sandbox with a fake real git on `bin/` and helpers in `helpers/`.
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("bin")).unwrap();
        std::fs::create_dir(root.path().join("helpers")).unwrap();
        let sandbox = Self { root };
        sandbox.script("bin", "git", "echo \"real-git[$*]\"");
        sandbox
    }

    fn bin(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    fn helpers(&self) -> PathBuf {
        self.root.path().join("helpers")
    }

    /// Write an executable `/bin/sh` script.
    fn script(&self, dir: &str, name: &str, body: &str) -> PathBuf {
        let path = self.root.path().join(dir).join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn helper(&self, name: &str) -> PathBuf {
        self.script("helpers", &format!("git-{name}"), &format!("echo \"helper-{name}[$*]\""))
    }

    /// The wrapper, pointed at this sandbox.
    fn git(&self) -> Command {
        let mut cmd = Command::cargo_bin("git").unwrap();
        self.configure(&mut cmd);
        cmd
    }

    fn configure(&self, cmd: &mut Command) {
        cmd.env("PATH", self.bin())
            .env("GIT_WRAPPER_HELPER_DIR", self.helpers())
            .env_remove("GIT_WRAPPER_CONFIG")
            .env_remove("GIT_WRAPPER_VERBOSE")
            .env_remove("GIT_WRAPPER_INTERPRET_HELPERS")
            .env_remove("GIT_WRAPPER_HELPER_PREFIX")
            .env_remove("GIT_WRAPPER_PYTHON")
            .env_remove("RUST_LOG");
    }
}

fn find_depot_tools() -> Command {
    Command::cargo_bin("find-depot-tools").unwrap()
}

fn make_checkout(root: &Path) -> PathBuf {
    let tools = root.join("depot_tools");
    std::fs::create_dir_all(&tools).unwrap();
    std::fs::write(tools.join("breakpad.py"), "").unwrap();
    tools.canonicalize().unwrap()
}

// ---------------------------------------------------------------------------
// Dispatch scenarios
// ---------------------------------------------------------------------------

#[test]
fn unknown_subcommand_runs_real_git() {
    let sandbox = Sandbox::new();
    sandbox.helper("foo");

    sandbox
        .git()
        .arg("status")
        .assert()
        .success()
        .stdout("real-git[status]\n");
}

#[test]
fn single_argument_runs_helper() {
    let sandbox = Sandbox::new();
    sandbox.helper("foo");

    sandbox
        .git()
        .arg("foo")
        .assert()
        .success()
        .stdout("helper-foo[]\n");
}

#[test]
fn help_foo_runs_helper_with_help_flag() {
    let sandbox = Sandbox::new();
    sandbox.helper("foo");

    sandbox
        .git()
        .args(["help", "foo"])
        .assert()
        .success()
        .stdout("helper-foo[--help]\n");

    sandbox
        .git()
        .args(["--help", "foo", "extra"])
        .assert()
        .success()
        .stdout("helper-foo[--help extra]\n");
}

#[test]
fn foo_help_flag_keeps_trailing_arguments() {
    let sandbox = Sandbox::new();
    sandbox.helper("foo");

    sandbox
        .git()
        .args(["foo", "--help", "extra"])
        .assert()
        .success()
        .stdout("helper-foo[--help extra]\n");
}

#[test]
fn foo_help_word_is_passed_to_real_git() {
    let sandbox = Sandbox::new();
    sandbox.helper("foo");

    sandbox
        .git()
        .args(["foo", "help"])
        .assert()
        .success()
        .stdout("real-git[foo help]\n");
}

#[test]
fn exit_status_of_helper_is_propagated() {
    let sandbox = Sandbox::new();
    sandbox.script("helpers", "git-fail", "exit 3");

    sandbox.git().arg("fail").assert().code(3);
}

#[test]
fn non_executable_helper_is_ignored() {
    let sandbox = Sandbox::new();
    let helper = sandbox.helper("foo");
    std::fs::set_permissions(&helper, std::fs::Permissions::from_mode(0o644)).unwrap();

    sandbox
        .git()
        .arg("foo")
        .assert()
        .success()
        .stdout("real-git[foo]\n");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn unexpected_name_is_confused() {
    let sandbox = Sandbox::new();
    sandbox.helper("foo");

    let mut std_cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("git"));
    std_cmd.arg0("svn").arg("foo");
    let mut cmd = Command::from_std(std_cmd);
    sandbox.configure(&mut cmd);

    cmd.assert()
        .code(126)
        .stdout("")
        .stderr(predicate::str::contains("is confused"));
}

#[test]
fn unexpected_name_wins_over_bad_config() {
    let sandbox = Sandbox::new();

    let mut std_cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("git"));
    std_cmd.arg0("svn").arg("status");
    let mut cmd = Command::from_std(std_cmd);
    sandbox.configure(&mut cmd);

    cmd.env("GIT_WRAPPER_VERBOSE", "loudly")
        .assert()
        .code(126)
        .stderr(predicate::str::contains("is confused"));
}

#[test]
fn missing_real_git_exits_127() {
    let sandbox = Sandbox::new();
    let empty = TempDir::new().unwrap();

    sandbox
        .git()
        .env("PATH", empty.path())
        .arg("status")
        .assert()
        .code(127)
        .stderr(predicate::str::contains("git not found"));
}

#[test]
fn helper_that_cannot_start_reports_os_error() {
    let sandbox = Sandbox::new();
    let helper = sandbox.helpers().join("git-broken");
    std::fs::write(&helper, "#!/nonexistent/interpreter\n").unwrap();
    std::fs::set_permissions(&helper, std::fs::Permissions::from_mode(0o755)).unwrap();

    sandbox
        .git()
        .arg("broken")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to run"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn interpreted_helpers_go_through_python() {
    let sandbox = Sandbox::new();
    let helper = sandbox.helper("foo");
    let python = sandbox.script("bin", "fake-python", "echo \"python[$*]\"");

    sandbox
        .git()
        .env("GIT_WRAPPER_INTERPRET_HELPERS", "true")
        .env("GIT_WRAPPER_PYTHON", &python)
        .args(["foo", "--help"])
        .assert()
        .success()
        .stdout(format!("python[{} --help]\n", helper.display()));
}

#[test]
fn config_file_sets_prefix() {
    let sandbox = Sandbox::new();
    sandbox.script("helpers", "tool-foo", "echo \"tool-foo[$*]\"");
    let config = sandbox.root.path().join("wrapper.yaml");
    std::fs::write(&config, "helper_prefix: tool-\n").unwrap();

    sandbox
        .git()
        .env("GIT_WRAPPER_CONFIG", &config)
        .arg("foo")
        .assert()
        .success()
        .stdout("tool-foo[]\n");
}

#[test]
fn unreadable_config_file_is_reported() {
    let sandbox = Sandbox::new();
    let config_dir = sandbox.root.path().join("config-dir");
    std::fs::create_dir(&config_dir).unwrap();

    sandbox
        .git()
        .env("GIT_WRAPPER_CONFIG", &config_dir)
        .arg("status")
        .assert()
        .code(125)
        .stdout("")
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn empty_helper_dir_does_not_search_current_directory() {
    let sandbox = Sandbox::new();
    let cwd = TempDir::new().unwrap();
    let stray = cwd.path().join("git-foo");
    std::fs::write(&stray, "#!/bin/sh\necho stray\n").unwrap();
    std::fs::set_permissions(&stray, std::fs::Permissions::from_mode(0o755)).unwrap();

    sandbox
        .git()
        .env("GIT_WRAPPER_HELPER_DIR", "")
        .current_dir(cwd.path())
        .arg("foo")
        .assert()
        .success()
        .stdout("real-git[foo]\n");
}

#[test]
fn invalid_config_exits_125() {
    let sandbox = Sandbox::new();

    sandbox
        .git()
        .env("GIT_WRAPPER_VERBOSE", "loudly")
        .arg("status")
        .assert()
        .code(125)
        .stderr(predicate::str::contains("invalid wrapper configuration"));
}

#[test]
fn verbose_mode_only_adds_stderr() {
    let sandbox = Sandbox::new();
    sandbox.helper("foo");

    sandbox
        .git()
        .env("GIT_WRAPPER_VERBOSE", "true")
        .args(["help", "foo"])
        .assert()
        .success()
        .stdout("helper-foo[--help]\n")
        .stderr(predicate::str::contains("resolved"));
}

// ---------------------------------------------------------------------------
// find-depot-tools
// ---------------------------------------------------------------------------

#[test]
fn find_depot_tools_on_path() {
    find_depot_tools()
        .env("PATH", "/usr/bin:/src/depot_tools/")
        .env_remove("PYTHONPATH")
        .assert()
        .success()
        .stdout("/src/depot_tools\n");
}

#[test]
fn find_depot_tools_walks_up_and_exports() {
    let dir = TempDir::new().unwrap();
    let tools = make_checkout(dir.path());
    let nested = dir.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    find_depot_tools()
        .env("PATH", "/usr/bin")
        .env("PYTHONPATH", "/site")
        .arg("--start")
        .arg(&nested)
        .arg("--export")
        .assert()
        .success()
        .stdout(format!("PYTHONPATH=/site:{}\n", tools.display()));
}

#[test]
fn find_depot_tools_not_found() {
    let dir = TempDir::new().unwrap();

    find_depot_tools()
        .env("PATH", "/usr/bin")
        .env_remove("PYTHONPATH")
        .arg("--start")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to find depot_tools"));
}
