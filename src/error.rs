use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The only message a user ever sees, whatever went wrong.
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

/// Result type alias using [`ShellError`].
pub type Result<T> = std::result::Result<T, ShellError>;

/// Everything that can go wrong while running a line.
///
/// All variants are reported to the user as [`ERROR_MESSAGE`]; the variant and its
/// `Display` text only show up in logs and tests.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Bad command-line arguments or an unreadable batch file.
    #[error("startup: {0}")]
    Startup(String),

    /// A builtin was called with the wrong arguments or failed to do its job.
    #[error("{name}: {reason}")]
    Builtin { name: &'static str, reason: String },

    /// The command name was not found in any search path directory.
    #[error("command not found: {0}")]
    Resolution(String),

    /// The redirection target could not be opened for writing.
    #[error("cannot redirect to {}: {source}", .path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The child process could not be created or could not exec.
    #[error("failed to spawn {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ShellError {
    pub(crate) fn builtin(name: &'static str, reason: impl Into<String>) -> Self {
        ShellError::Builtin {
            name,
            reason: reason.into(),
        }
    }

    /// Write the user-visible report for this error.
    pub fn report(&self, out: &mut dyn io::Write) -> io::Result<()> {
        tracing::debug!(error = %self, "reporting error");
        out.write_all(ERROR_MESSAGE.as_bytes())?;
        out.flush()
    }
}
