use crate::command::{ChildHandle, CommandFactory, Outcome};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use crate::external::exit_code;
use crate::input::LineSource;
use crate::lexer::{self, Command};
use std::io::{self, Write};

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports the command types defined in this crate: builtins and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// What happened on one input line.
#[derive(Debug, Default)]
pub struct LineReport {
    /// Errors in segment order; each one was already reported when it happened.
    pub errors: Vec<ShellError>,
    /// Process ids of the children started by this line.
    pub spawned: Vec<u32>,
    /// `exit` ran; the rest of the line was abandoned.
    pub exit: bool,
}

/// A minimal command interpreter that runs builtins in-process and everything else as
/// child processes.
///
/// The interpreter owns an [`Environment`] and a list of [`CommandFactory`] objects that
/// are queried in order to create commands by name. Builtins come first, so a name like
/// `cd` never reaches the search path.
///
/// Example
/// ```no_run
/// use dash::Interpreter;
/// let mut sh = Interpreter::default();
/// let report = sh.run_line("path /bin /usr/bin & echo hello > greeting.txt");
/// assert!(report.errors.is_empty());
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
    children: Vec<ChildHandle>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            commands,
            children: Vec::new(),
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Read lines from `input` and run them until `exit` or end of input.
    pub fn repl(&mut self, input: &mut dyn LineSource) -> anyhow::Result<()> {
        while !self.env.should_exit {
            match input.read_line()? {
                Some(line) => {
                    self.run_line(&line);
                }
                None => break,
            }
        }
        Ok(())
    }

    /// Run every segment of `line`, reporting errors to standard error.
    pub fn run_line(&mut self, line: &str) -> LineReport {
        self.run_line_with_redefined_stderr(line, &mut io::stderr())
    }

    /// Run every segment of `line`, then wait for all children before returning.
    ///
    /// Segments are dispatched left to right, so builtins take effect before later
    /// segments are resolved. Only `exit` skips the final wait.
    pub fn run_line_with_redefined_stderr(
        &mut self,
        line: &str,
        stderr: &mut dyn Write,
    ) -> LineReport {
        let mut report = LineReport::default();

        for segment in lexer::split_segments(line) {
            let command = lexer::tokenize(segment);
            if command.is_empty() {
                continue;
            }

            match self.dispatch(&command) {
                Ok(Outcome::Spawned(child)) => {
                    report.spawned.push(child.id());
                    self.children.push(child);
                }
                Ok(Outcome::Completed) => {}
                Err(err) => {
                    if let Err(e) = err.report(stderr) {
                        tracing::warn!(error = %e, "failed to report error");
                    }
                    report.errors.push(err);
                }
            }

            if self.env.should_exit {
                tracing::debug!(outstanding = self.children.len(), "exit requested");
                report.exit = true;
                return report;
            }
        }

        self.wait_all();
        report
    }

    /// Run a single command: builtins in-process, anything else as a new child.
    pub fn dispatch(&mut self, command: &Command) -> Result<Outcome> {
        let Some(name) = command.name() else {
            return Ok(Outcome::Completed);
        };
        let args: Vec<&str> = command.args().iter().map(String::as_str).collect();
        tracing::debug!(name, ?args, redirect = ?command.redirect, "dispatching");

        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, &args) {
                return cmd.execute(command.redirect.as_deref(), &mut self.env);
            }
        }
        Err(ShellError::Resolution(name.to_owned()))
    }

    /// Block until every child this interpreter started has exited.
    pub fn wait_all(&mut self) {
        for child in self.children.drain(..) {
            let pid = child.id();
            match child.wait() {
                Ok(status) => tracing::debug!(pid, code = exit_code(status), "child exited"),
                Err(e) => tracing::warn!(pid, error = %e, "failed to wait for child"),
            }
        }
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default set of commands:
    /// - built-ins: `exit`, `cd`, `path`
    /// - external command launcher
    fn default() -> Self {
        use crate::builtin::*;
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<SetPath>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
