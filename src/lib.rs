//! # Introduction
//!
//! algotrace compiles a small algorithm-description language into an
//! execution trace: the ordered list of primitive events (compare, swap,
//! push, visit, ...) a sort or data-structure session performs. The trace is
//! written to a JSON-like file and replayed either step by step in a
//! terminal UI built with [ratatui](https://docs.rs/ratatui), or as a
//! JavaScript program for the Algorithm Visualizer web player.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Validator → Generator → Trace → { file, TUI, JS }
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST.
//! 2. [`compiler`]: validates names against the fixed vocabularies and runs
//!    the matching interpreter to produce a [`trace::Trace`].
//! 3. [`structures`]: the binary tree and graph models shared by the
//!    generator and the replay engines.
//! 4. [`trace`]: the event IR and its file codec.
//! 5. [`replay`]: incremental replay state, counters, narration and the
//!    step-at-a-time [`replay::Player`].
//! 6. [`emitter`]: JavaScript generation.
//! 7. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported programs
//!
//! Sorts: `bubble_sort`, `insertion_sort`, `selection_sort`, `merge_sort`,
//! `quick_sort` over a declared integer array. Structures: `stack.push/pop/peek`,
//! `queue.enqueue/dequeue`,
//! `tree.insert/traverse_inorder/traverse_preorder/traverse_postorder`,
//! `graph.add_node/add_edge/bfs/dfs`.

pub mod cli;
pub mod compiler;
pub mod emitter;
pub mod logging;
pub mod parser;
pub mod replay;
pub mod structures;
pub mod trace;
pub mod ui;
