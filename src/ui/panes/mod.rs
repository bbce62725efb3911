//! TUI pane rendering modules
//!
//! Each pane module exports a `render_*` function that draws one area of the
//! frame from the current replay state, plus a `*_lines` builder where the
//! content is worth testing without a terminal.
//!
//! # Pane Modules
//!
//! - [`header`]: subject name and running counters
//! - [`array`]: array grid with highlighted and sorted cells
//! - [`stack`], [`queue`], [`tree`], [`graph`]: one view per structure kind
//! - [`narration`]: the current step's description
//! - [`status`]: status bar with keybindings and playback state

mod utils;

pub mod array;
pub mod graph;
pub mod header;
pub mod narration;
pub mod queue;
pub mod stack;
pub mod status;
pub mod tree;

pub use array::render_array_pane;
pub use graph::render_graph_pane;
pub use header::render_header;
pub use narration::render_narration_pane;
pub use queue::render_queue_pane;
pub use stack::render_stack_pane;
pub use status::render_status_bar;
pub use tree::render_tree_pane;
