//! A small line-oriented command interpreter.
//!
//! Each input line is split on `&` into segments that run side by side. A segment is a
//! command name, its arguments and an optional `> file` redirecting standard output.
//! The builtins `exit`, `cd` and `path` run inside the interpreter; every other name is
//! resolved against the search path set by `path` and started as a child process. The
//! interpreter waits for all children of a line before it reads the next one.
//!
//! The main entry point is [`Interpreter`]. The public modules [`command`], [`env`],
//! [`input`] and [`lexer`] expose the pieces it is built from.

mod builtin;
pub mod command;
pub mod env;
pub mod error;
mod external;
pub mod input;
mod interpreter;
pub mod lexer;

pub use error::{ERROR_MESSAGE, ShellError};
/// Just a convenient re-export of the command runner.
///
/// See [`Interpreter`] for the high-level API.
pub use interpreter::{Interpreter, LineReport};
