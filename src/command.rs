use crate::env::Environment;
use crate::error::Result;
use std::io;
use std::path::Path;
use std::process::{Child, ExitStatus};

/// What happened when a command ran without error.
#[derive(Debug)]
pub enum Outcome {
    /// A builtin finished in-process.
    Completed,
    /// An external program was started and is still owned by the caller.
    Spawned(ChildHandle),
}

/// A child process started by the launcher.
///
/// The interpreter keeps these until the end-of-line barrier waits on them. Dropping a
/// handle neither waits for nor kills the child.
#[derive(Debug)]
pub struct ChildHandle {
    child: Child,
}

impl ChildHandle {
    pub(crate) fn new(child: Child) -> Self {
        Self { child }
    }

    /// OS process id of the child.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Block until the child exits.
    pub fn wait(mut self) -> io::Result<ExitStatus> {
        self.child.wait()
    }
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// Implemented by builtins via a blanket impl and by external commands.
pub trait ExecutableCommand {
    /// Execute the command.
    ///
    /// `redirect` is the segment's output file, if one was given. Builtins ignore it.
    fn execute(
        self: Box<Self>,
        redirect: Option<&Path>,
        env: &mut Environment,
    ) -> Result<Outcome>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`.
/// Implementations can use the environment to resolve executables against the search path.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
