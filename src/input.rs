//! Where input lines come from: the terminal or a batch file.

use crate::error::ShellError;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Prompt shown before each interactive read.
pub const PROMPT: &str = "dash> ";

/// A stream of raw command lines.
pub trait LineSource {
    /// Next line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Lines typed at the terminal, with a prompt and in-memory history.
pub struct Interactive {
    editor: DefaultEditor,
}

impl Interactive {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Interactive {
    fn read_line(&mut self) -> Result<Option<String>> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    self.editor.add_history_entry(line.as_str())?;
                    return Ok(Some(line));
                }
                // Ctrl-C drops the half-typed line.
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Lines read from a file without prompting.
pub struct Batch<R> {
    reader: R,
}

impl<R: BufRead> Batch<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl Batch<BufReader<File>> {
    /// Open `path` read-only; failing to do so is fatal at startup.
    pub fn open(path: &Path) -> std::result::Result<Self, ShellError> {
        let file = File::open(path).map_err(|e| {
            ShellError::Startup(format!("cannot open batch file {}: {e}", path.display()))
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource for Batch<R> {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};

    #[test]
    fn test_batch_yields_lines_then_none() {
        let mut input = Batch::new(Cursor::new("path /bin\r\nls -l\nlast"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("path /bin\r\n"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("ls -l\n"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(input.read_line().unwrap(), None);
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn test_batch_open_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "cmd1\ncmd2\n").unwrap();

        let mut input = Batch::open(file.path()).unwrap();
        assert_eq!(input.read_line().unwrap().as_deref(), Some("cmd1\n"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("cmd2\n"));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn test_batch_open_missing_file_is_startup_error() {
        let res = Batch::open(Path::new("/definitely/not/here.txt"));
        assert!(matches!(res, Err(ShellError::Startup(_))));
    }
}
