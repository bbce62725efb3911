// algotrace: compile algorithm descriptions into replayable traces

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use algotrace::cli::{Cli, Mode, Options, Source};
use algotrace::compiler::compile_source;
use algotrace::emitter::{self, PLAYGROUND_URL};
use algotrace::logging::init_logger;
use algotrace::replay::PlayerState;
use algotrace::trace::{codec, Trace};
use algotrace::ui::App;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logger();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = Options::try_from(cli)?;
    let trace = load(&options.source)?;

    if let Some(path) = &options.trace_output {
        codec::write_file(&trace, path)?;
        println!(
            "[SUCCESS] Compilation successful! Output written to {}",
            path.display()
        );
    }

    match options.mode {
        Mode::JavaScript => {
            emitter::write_file(&trace, &options.js_output)?;
            println!(
                "[SUCCESS] JavaScript code generated: {}",
                options.js_output.display()
            );
            println!("  Paste this into Algorithm Visualizer: {}", PLAYGROUND_URL);
        }
        Mode::Visualize => {
            if play(trace)? == PlayerState::Cancelled {
                println!("[Interrupted] Exiting visualization...");
            }
        }
    }
    Ok(())
}

fn load(source: &Source) -> Result<Trace> {
    match source {
        Source::Program(path) => compile_file(path),
        Source::Trace(path) => {
            info!(path = %path.display(), "reading trace");
            let decoded = codec::read_file(path)?;
            if !decoded.is_clean() {
                warn!(
                    problems = decoded.diagnostics.len(),
                    "trace read with problems; replaying what could be recovered"
                );
            }
            Ok(decoded.trace)
        }
    }
}

fn compile_file(path: &Path) -> Result<Trace> {
    info!(path = %path.display(), "compiling");
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to open input file {}", path.display()))?;
    let trace = compile_source(&source).context("compilation failed")?;
    info!(
        algorithm = trace.kind().display_name(),
        events = trace.len(),
        "code generation"
    );
    Ok(trace)
}

fn play(trace: Trace) -> Result<PlayerState> {
    let mut app = App::new(trace);
    app.player
        .cancel_token()
        .register_signals()
        .context("failed to install signal handlers")?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal playback failed")
}
