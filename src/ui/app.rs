//! Main TUI application state and logic

use crate::replay::{CancelToken, Input, Player, PlayerState, StepInput};
use crate::trace::{SubjectKind, Trace};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// How often a waiting player re-checks the cancel flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Keys that stop playback. Every other key advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    pub cancel_keys: Vec<KeyCode>,
    /// Treat Ctrl+C as cancel. Raw mode delivers it as a key press.
    pub ctrl_c_cancels: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            cancel_keys: vec![KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')],
            ctrl_c_cancels: true,
        }
    }
}

impl PlayerConfig {
    pub fn classify(&self, key: KeyEvent) -> Input {
        let ctrl_c =
            key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
        if (self.ctrl_c_cancels && ctrl_c) || self.cancel_keys.contains(&key.code) {
            Input::Cancel
        } else {
            Input::Advance
        }
    }
}

/// Key reader. Raises the shared cancel flag on a cancel key, and gives up
/// waiting once the flag is raised elsewhere (a signal handler).
struct KeyInput<'a> {
    config: &'a PlayerConfig,
    cancel: CancelToken,
}

impl StepInput for KeyInput<'_> {
    fn wait(&mut self) -> io::Result<Input> {
        loop {
            if self.cancel.is_cancelled() {
                return Ok(Input::Cancel);
            }
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let input = self.config.classify(key);
                    if input == Input::Cancel {
                        self.cancel.cancel();
                    }
                    return Ok(input);
                }
            }
        }
    }
}

/// The main application state
pub struct App {
    pub player: Player,
    pub config: PlayerConfig,
}

impl App {
    pub fn new(trace: Trace) -> Self {
        Self::with_config(trace, PlayerConfig::default())
    }

    pub fn with_config(trace: Trace, config: PlayerConfig) -> Self {
        App {
            player: Player::new(trace),
            config,
        }
    }

    /// Run the TUI until playback finishes or is cancelled.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<PlayerState> {
        let mut input = KeyInput {
            config: &self.config,
            cancel: self.player.cancel_token(),
        };
        self.player.run(&mut input, |player| {
            terminal.draw(|f| render(f, player))?;
            Ok(())
        })
    }
}

/// Render one frame for the player's current state.
pub fn render(frame: &mut Frame, player: &Player) {
    let size = frame.area();

    // Header, panes, status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    let kind = player.trace().kind();
    let replay = player.replay();
    super::panes::render_header(frame, main_chunks[0], kind, player.counters());

    let structure_area = columns[0];
    match kind {
        SubjectKind::StackOps => super::panes::render_stack_pane(frame, structure_area, replay, true),
        SubjectKind::QueueOps => super::panes::render_queue_pane(frame, structure_area, replay, true),
        SubjectKind::TreeOps => super::panes::render_tree_pane(frame, structure_area, replay, true),
        SubjectKind::GraphOps => super::panes::render_graph_pane(frame, structure_area, replay, true),
        _ => super::panes::render_array_pane(frame, structure_area, replay, true),
    }

    super::panes::render_narration_pane(frame, columns[1], player.narration(), false);

    super::panes::render_status_bar(frame, main_chunks[2], player.state(), player.trace().len());
}
