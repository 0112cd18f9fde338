use std::env as stdenv;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory searched for commands when the interpreter starts.
pub const DEFAULT_SEARCH_PATH: &str = "/bin";

/// Ordered list of directories used to resolve bare command names.
///
/// Order is priority: [`SearchPath::resolve`] returns the first match, not the best one.
/// The list can only be replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Discard the current list and use `dirs` instead.
    pub fn replace<I, P>(&mut self, dirs: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        *self = Self::new(dirs);
    }

    /// Find `<dir>/<name>` for the first directory where it is an executable file.
    ///
    /// `name` is appended to every directory as written, so `/bin/true` is looked up
    /// as `<dir>//bin/true` and never runs on its own.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let found = self
            .dirs
            .iter()
            .map(|dir| candidate(dir, name))
            .find(|candidate| is_executable(candidate));
        tracing::trace!(name, ?found, "resolved command");
        found
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        Self::new([DEFAULT_SEARCH_PATH])
    }
}

// `Path::join` would drop `dir` for an absolute `name`.
fn candidate(dir: &Path, name: &str) -> PathBuf {
    let mut path = dir.as_os_str().to_owned();
    path.push("/");
    path.push(name);
    PathBuf::from(path)
}

/// A regular file the current user is allowed to execute.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    if !fs::metadata(path).is_ok_and(|meta| meta.is_file()) {
        return false;
    }
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is NUL-terminated and outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}

/// Mutable state of one interpreter.
///
/// Only builtins modify it; external commands read the search path and working directory.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Directories consulted to resolve external commands.
    pub search_path: SearchPath,
    /// The working directory, kept in sync with the process by `cd`.
    pub current_dir: PathBuf,
    /// Set by `exit`; the runner stops dispatching once it sees it.
    pub should_exit: bool,
}

impl Environment {
    /// Capture the current working directory and start with the default search path.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            search_path: SearchPath::default(),
            current_dir,
            should_exit: false,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
