//! Tokenization of a single command segment.
//!
//! The grammar is deliberately tiny: words are separated by runs of whitespace, and the
//! first `>` splits off an output redirection target. There is no quoting or escaping.

use std::path::PathBuf;

/// Character that separates a command from its output redirection target.
pub const REDIRECT_MARKER: char = '>';

/// Character that separates independent commands on one input line.
pub const PARALLEL_DELIMITER: char = '&';

/// One parsed unit of work: a program name, its arguments and an optional output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Words of the command; `argv[0]` is the program name.
    pub argv: Vec<String>,
    /// Target of `>` with surrounding whitespace trimmed, if any.
    pub redirect: Option<PathBuf>,
}

impl Command {
    /// Program name, or `None` for an empty command.
    pub fn name(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }

    /// An empty command is skipped without reporting anything.
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

/// Split a raw input line into independently dispatched segments.
pub fn split_segments(line: &str) -> impl Iterator<Item = &str> {
    line.split(PARALLEL_DELIMITER)
}

/// Turn one segment into a [`Command`].
///
/// Redirection is split off before word splitting, so `echo hi>out` redirects to `out`.
/// When there are no words, the redirection target is dropped as there is nothing to redirect.
pub fn tokenize(segment: &str) -> Command {
    let (text, redirect) = match segment.split_once(REDIRECT_MARKER) {
        Some((text, target)) => (text, Some(PathBuf::from(target.trim()))),
        None => (segment, None),
    };

    let argv: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
    let redirect = if argv.is_empty() { None } else { redirect };

    Command { argv, redirect }
}
