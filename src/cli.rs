//! Command-line surface of the `algotrace` binary.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(
    name = "algotrace",
    version,
    about = "Compile an algorithm description into a trace and replay it",
    after_help = "Examples:\n  algotrace test.algo               Compile and visualize in the terminal\n  algotrace -j test.algo            Generate JavaScript for the web visualizer\n  algotrace -j test.algo --js-output viz.js"
)]
pub struct Cli {
    /// Program to compile, or a trace file with --from-trace.
    pub input: PathBuf,

    /// Replay the trace in the terminal (default).
    #[arg(short, long)]
    pub visualize: bool,

    /// Emit JavaScript for Algorithm Visualizer instead of replaying.
    #[arg(short = 'j', long = "json-to-js")]
    pub json_to_js: bool,

    /// Where the trace is written.
    #[arg(short, long, default_value = "output.json")]
    pub output: PathBuf,

    /// Where the JavaScript is written with --json-to-js.
    #[arg(long, default_value = "visualizer.js")]
    pub js_output: PathBuf,

    /// Treat the input as an existing trace file instead of a program.
    #[arg(long)]
    pub from_trace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Visualize,
    JavaScript,
}

/// Where the trace comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Program(PathBuf),
    Trace(PathBuf),
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub source: Source,
    pub mode: Mode,
    /// `None` when replaying an existing trace file.
    pub trace_output: Option<PathBuf>,
    pub js_output: PathBuf,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("--visualize and --json-to-js are mutually exclusive")]
    ConflictingModes,
    #[error("trace output and JavaScript output are both {0}")]
    SameOutput(PathBuf),
}

impl TryFrom<Cli> for Options {
    type Error = OptionsError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let mode = match (cli.visualize, cli.json_to_js) {
            (true, true) => return Err(OptionsError::ConflictingModes),
            (_, true) => Mode::JavaScript,
            _ => Mode::Visualize,
        };
        if mode == Mode::JavaScript && !cli.from_trace && cli.output == cli.js_output {
            return Err(OptionsError::SameOutput(cli.output));
        }
        let (source, trace_output) = if cli.from_trace {
            (Source::Trace(cli.input), None)
        } else {
            (Source::Program(cli.input), Some(cli.output))
        };
        Ok(Options {
            source,
            mode,
            trace_output,
            js_output: cli.js_output,
        })
    }
}
