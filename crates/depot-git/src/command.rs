//! The resolved command handed from the dispatcher to the executor.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// The program a [`ResolvedCommand`] runs.
///
/// `Git` and `Python` are logical tokens: they are only turned into
/// concrete paths by the [`Executor`](crate::Executor) at launch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Program {
    /// The real git binary, found on the search path.
    Git,
    /// A python interpreter.
    Python,
    /// A helper script, by absolute path.
    Script(PathBuf),
}

impl Program {
    /// The token or path that ends up in `argv[0]` of the resolved command.
    pub fn as_os_string(&self) -> OsString {
        match self {
            Self::Git => OsString::from("git"),
            Self::Python => OsString::from("python"),
            Self::Script(path) => path.clone().into_os_string(),
        }
    }
}

/// A program plus the arguments it should receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub program: Program,
    pub args: Vec<OsString>,
}

impl ResolvedCommand {
    /// Defer to the real git with `args` unchanged.
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: Program::Git,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run the helper script at `path` directly.
    pub fn script<I, S>(path: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: Program::Script(path.into()),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run the helper script at `path` through the python interpreter.
    pub fn python<I, S>(path: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut all = vec![path.into().into_os_string()];
        all.extend(args.into_iter().map(Into::into));
        Self {
            program: Program::Python,
            args: all,
        }
    }

    /// The full argument vector, program first.
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.as_os_string());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .argv()
            .iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
