//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: key handling and the frame layout around a [`Player`]
//! - **[`panes`]**: stateless render functions for each visible pane (header,
//!   structure view, narration, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a trace and
//! call [`App::run`] to start playback.
//!
//! [`Player`]: crate::replay::Player
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::{App, PlayerConfig};
