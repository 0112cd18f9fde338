use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use dash::input::{Batch, Interactive};
use dash::{ERROR_MESSAGE, Interpreter, ShellError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `DASH_LOG=debug`.
const LOG_ENV: &str = "DASH_LOG";

#[derive(FromArgs)]
/// Run commands typed at the prompt or read from a batch file.
struct Args {
    #[argh(positional)]
    /// file to read commands from; no prompt is shown.
    batch: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "fatal");
            // Nothing better to do if stderr itself is gone.
            let _ = std::io::stderr().write_all(ERROR_MESSAGE.as_bytes());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = parse_args()?;

    let mut sh = Interpreter::default();
    match args.batch {
        Some(path) => sh.repl(&mut Batch::open(&path)?),
        None => sh.repl(&mut Interactive::new()?),
    }
}

/// Parse the command line. The single argument is always a file name, so `--help`
/// or `-script` name batch files and anything argh rejects is a startup error.
fn parse_args() -> Result<Args, ShellError> {
    let mut strings = std::env::args();
    let cmd = strings.next().unwrap_or_else(|| "dash".to_string());
    let rest: Vec<String> = strings.collect();
    let words: Vec<&str> = std::iter::once("--")
        .chain(rest.iter().map(String::as_str))
        .collect();

    Args::from_args(&[cmd.as_str()], &words)
        .map_err(|EarlyExit { output, .. }| ShellError::Startup(output))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
