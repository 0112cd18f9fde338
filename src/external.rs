use crate::command::{ChildHandle, CommandFactory, ExecutableCommand, Outcome};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use crate::interpreter::Factory;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// Command that is not a builtin, already resolved against the search path.
pub struct ExternalCommand {
    /// Name as typed; becomes `argv[0]` of the child.
    name: OsString,
    /// Absolute location found by [`SearchPath::resolve`](crate::env::SearchPath::resolve).
    program: PathBuf,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(name: OsString, program: PathBuf, args: Vec<OsString>) -> Self {
        Self {
            name,
            program,
            args,
        }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let program = env.search_path.resolve(name)?;
        Some(Box::new(ExternalCommand::new(
            name.into(),
            program,
            args.iter().map(|x| x.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    /// Spawn the program and return without waiting for it.
    ///
    /// The redirect file is opened here, before anything is spawned, so a bad target
    /// never leaves a child behind.
    fn execute(
        self: Box<Self>,
        redirect: Option<&Path>,
        env: &mut Environment,
    ) -> Result<Outcome> {
        let stdout = match redirect {
            Some(target) => Stdio::from(open_redirect(&env.current_dir.join(target))?),
            None => Stdio::inherit(),
        };

        let mut cmd = std::process::Command::new(&self.program);
        set_arg0(&mut cmd, &self.name);
        let child = cmd
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .current_dir(&env.current_dir)
            .spawn()
            .map_err(|source| ShellError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        tracing::debug!(program = %self.program.display(), pid = child.id(), "spawned");
        Ok(Outcome::Spawned(ChildHandle::new(child)))
    }
}

/// Create or truncate `path` for the child's standard output.
fn open_redirect(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| ShellError::Redirect {
            path: path.to_owned(),
            source,
        })
}

#[cfg(unix)]
fn set_arg0(cmd: &mut std::process::Command, name: &OsString) {
    use std::os::unix::process::CommandExt;
    cmd.arg0(name);
}

#[cfg(not(unix))]
fn set_arg0(_cmd: &mut std::process::Command, _name: &OsString) {}

/// Shell-style exit code of a finished child.
#[cfg(unix)]
pub(crate) fn exit_code(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(code) = exit_status.code() {
        code
    } else if let Some(signal) = exit_status.signal() {
        128 + signal
    } else {
        -1
    }
}

#[cfg(not(unix))]
pub(crate) fn exit_code(exit_status: ExitStatus) -> i32 {
    exit_status.code().unwrap_or(-1)
}
