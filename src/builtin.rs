use crate::command::{CommandFactory, ExecutableCommand, Outcome};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use crate::interpreter::Factory;
use argh::{EarlyExit, FromArgs};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process. They are the only commands that get mutable access to the [`Environment`],
/// so their effects land in the interpreter and never in a child.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// Executes the command against the interpreter state.
    fn execute(self, env: &mut Environment) -> Result<()>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        redirect: Option<&Path>,
        env: &mut Environment,
    ) -> Result<Outcome> {
        if let Some(target) = redirect {
            tracing::debug!(builtin = T::name(), target = %target.display(), "ignoring redirect");
        }
        T::execute(*self, env)?;
        Ok(Outcome::Completed)
    }
}

/// Stand-in for a builtin whose arguments did not parse.
struct InvalidArgs {
    name: &'static str,
    output: String,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        _redirect: Option<&Path>,
        _env: &mut Environment,
    ) -> Result<Outcome> {
        Err(ShellError::builtin(self.name, self.output.trim_end()))
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            // Builtins take no flags: every word is a positional, even `help` or `-x`.
            let mut words = Vec::with_capacity(args.len() + 1);
            words.push("--");
            words.extend_from_slice(args);
            Some(match T::from_args(&[name], &words) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, .. }) => Box::new(InvalidArgs {
                    name: T::name(),
                    output,
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Leave the interpreter.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        env.should_exit = true;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: String,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        let new_dir = env.current_dir.join(&self.target);

        let canonical = fs::canonicalize(&new_dir).map_err(|e| {
            ShellError::builtin("cd", format!("can't canonicalize {}: {e}", new_dir.display()))
        })?;

        env::set_current_dir(&canonical).map_err(|e| {
            ShellError::builtin("cd", format!("can't chdir to {}: {e}", canonical.display()))
        })?;
        env.current_dir = canonical;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Replace the list of directories searched for commands.
pub struct SetPath {
    #[argh(positional, greedy)]
    /// directories in search order; none at all empties the list.
    pub dirs: Vec<String>,
}

impl BuiltinCommand for SetPath {
    fn name() -> &'static str {
        "path"
    }

    fn execute(self, env: &mut Environment) -> Result<()> {
        env.search_path.replace(self.dirs.into_iter().map(PathBuf::from));
        tracing::debug!(dirs = ?env.search_path.dirs(), "search path replaced");
        Ok(())
    }
}
