//! JavaScript generation for the Algorithm Visualizer web player
//!
//! The emitter walks the trace once and writes one block of tracer calls per
//! event. Apart from a shadow copy of the array, used so log lines can name
//! the values being swapped, it keeps no state. Events that are malformed,
//! unknown, or point outside the array produce no output.

use crate::trace::{Action, Subject, Trace, TraceEvent};
use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Where the generated script is meant to be pasted.
pub const PLAYGROUND_URL: &str = "https://algorithm-visualizer.org/";

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot write script {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct Emitter {
    title: &'static str,
    graph_like: bool,
    shadow: Vec<i64>,
}

impl Emitter {
    pub fn new(subject: &Subject) -> Self {
        Self {
            title: subject.kind.display_name(),
            graph_like: subject.kind.is_graph_like(),
            shadow: subject.initial.clone(),
        }
    }

    /// The array as swaps so far have left it.
    pub fn shadow(&self) -> &[i64] {
        &self.shadow
    }

    pub fn preamble(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "// === Auto-Generated Visualization Script ===")?;
        if self.graph_like {
            writeln!(
                out,
                "const {{ Array1DTracer, GraphTracer, LogTracer, Layout, VerticalLayout, HorizontalLayout, Tracer }} = require('algorithm-visualizer');\n"
            )?;
        } else {
            writeln!(
                out,
                "const {{ Array1DTracer, LogTracer, Layout, VerticalLayout, Tracer }} = require('algorithm-visualizer');\n"
            )?;
        }

        let values: Vec<String> = self.shadow.iter().map(i64::to_string).collect();
        writeln!(out, "const array = [{}];", values.join(", "))?;
        let tracer = if self.graph_like {
            "GraphTracer"
        } else {
            "Array1DTracer"
        };
        writeln!(out, "const tracer = new {tracer}('{}');", self.title)?;
        writeln!(out, "const log = new LogTracer('Log');\n")?;
        writeln!(out, "Layout.setRoot(new VerticalLayout([tracer, log]));")?;
        if !self.graph_like {
            writeln!(out, "tracer.set(array);")?;
        }
        writeln!(out, "Tracer.delay();\n")?;

        writeln!(out, "function swap(i, j) {{")?;
        writeln!(out, "  const temp = array[i];")?;
        writeln!(out, "  array[i] = array[j];")?;
        writeln!(out, "  array[j] = temp;")?;
        writeln!(out, "  tracer.set(array);")?;
        writeln!(out, "  Tracer.delay();")?;
        writeln!(out, "}}\n")?;

        writeln!(out, "// === Step Playback ===")
    }

    /// Write the block for one event. Returns `false` if nothing was written.
    pub fn step(&mut self, event: &TraceEvent, out: &mut String) -> Result<bool, fmt::Error> {
        if !event.is_well_formed() {
            return Ok(false);
        }
        let op = |i: usize| event.operand(i).unwrap_or_default();
        let in_range = |i: usize| i < self.shadow.len();

        match event.action {
            Action::Compare => {
                let Some((i, j)) = event.pair().filter(|&(i, j)| in_range(i) && in_range(j))
                else {
                    return Ok(false);
                };
                writeln!(out, "tracer.select({i}, {j});")?;
                writeln!(
                    out,
                    "log.println('Compare {} and {}');",
                    self.shadow[i], self.shadow[j]
                )?;
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::Swap => {
                let Some((i, j)) = event.pair().filter(|&(i, j)| in_range(i) && in_range(j))
                else {
                    return Ok(false);
                };
                writeln!(
                    out,
                    "log.println('Swapping {} and {}');",
                    self.shadow[i], self.shadow[j]
                )?;
                writeln!(out, "swap({i}, {j});")?;
                self.shadow.swap(i, j);
                writeln!(out, "tracer.deselect({i}, {j});")?;
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::NoSwap => {
                let Some((i, j)) = event.pair().filter(|&(i, j)| in_range(i) && in_range(j))
                else {
                    return Ok(false);
                };
                writeln!(out, "log.println('No swap needed');")?;
                writeln!(out, "tracer.deselect({i}, {j});")?;
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::MarkSorted => {
                let Some(i) = event.index(0).filter(|&i| in_range(i)) else {
                    return Ok(false);
                };
                writeln!(out, "log.println('✅ Element at index {i} sorted');")?;
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::Push => {
                writeln!(out, "log.println('Pushing {} onto stack');", op(1))?;
                writeln!(out, "tracer.patch({}, {});", op(0), op(1))?;
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::Pop => {
                writeln!(out, "log.println('Popping {} from stack');", op(1))?;
                writeln!(out, "tracer.depatch({});", op(0))?;
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::Peek => {
                writeln!(out, "log.println('Peeking at top of stack');")?;
                select_flash(out, op(0))?;
            }
            Action::Enqueue => {
                writeln!(out, "log.println('Enqueuing {}');", op(1))?;
                writeln!(out, "tracer.patch({}, {});", op(0), op(1))?;
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::Dequeue => {
                writeln!(out, "log.println('Dequeuing {}');", op(1))?;
                writeln!(out, "tracer.depatch({});", op(0))?;
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::Insert => {
                let (value, parent) = (op(0), op(1));
                if parent == -1 {
                    writeln!(out, "log.println('Inserting {value} as root');")?;
                    writeln!(
                        out,
                        "tracer.setTreeData({{ '{value}': {{ value: {value} }} }});"
                    )?;
                } else {
                    let left = op(2) == 1;
                    let side = if left { "left" } else { "right" };
                    writeln!(
                        out,
                        "log.println('Inserting {value} as {side} child of {parent}');"
                    )?;
                    writeln!(
                        out,
                        "tracer.setTreeData({{ '{value}': {{ value: {value}, parent: '{parent}', left: {left} }} }});"
                    )?;
                }
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::Visit => {
                writeln!(out, "log.println('Visiting node: {}');", op(0))?;
                select_flash(out, op(0))?;
            }
            Action::AddNode => {
                writeln!(out, "log.println('Adding node {}');", op(0))?;
                writeln!(out, "tracer.addNode({});", op(0))?;
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::AddEdge => {
                writeln!(out, "log.println('Adding edge from {} to {}');", op(0), op(1))?;
                writeln!(out, "tracer.addEdge({}, {});", op(0), op(1))?;
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::BfsStart | Action::DfsStart => {
                let name = if event.action == Action::BfsStart {
                    "BFS"
                } else {
                    "DFS"
                };
                writeln!(out, "log.println('Starting {name} from node {}');", op(0))?;
                writeln!(out, "tracer.select({});", op(0))?;
                writeln!(out, "Tracer.delay();\n")?;
            }
            Action::Unknown(_) => return Ok(false),
        }
        Ok(true)
    }

    pub fn finish(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "log.println('Done!');")
    }
}

fn select_flash(out: &mut String, target: i64) -> fmt::Result {
    writeln!(out, "tracer.select({target});")?;
    writeln!(out, "Tracer.delay();")?;
    writeln!(out, "tracer.deselect({target});")?;
    writeln!(out, "Tracer.delay();\n")
}

fn write_script(trace: &Trace, out: &mut String) -> fmt::Result {
    let mut emitter = Emitter::new(trace.subject());
    emitter.preamble(out)?;
    let mut silent = 0;
    for event in trace.events() {
        if !emitter.step(event, out)? {
            silent += 1;
        }
    }
    if silent > 0 {
        debug!(silent, "events without output");
    }
    emitter.finish(out)
}

/// Render the whole script.
pub fn emit(trace: &Trace) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_script(trace, &mut out);
    out
}

pub fn write_file(trace: &Trace, path: &Path) -> Result<(), EmitError> {
    fs::write(path, emit(trace)).map_err(|source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{SubjectKind, TraceBuilder};

    fn trace(kind: SubjectKind, initial: Vec<i64>, events: &[(Action, &[i64])]) -> Trace {
        let mut builder = TraceBuilder::new(Subject::new(kind, initial));
        for (action, operands) in events {
            builder.emit(action.clone(), operands);
        }
        builder.finish()
    }

    #[test]
    fn test_array_preamble_and_swap_logs_pre_swap_values() {
        let t = trace(
            SubjectKind::BubbleSort,
            vec![5, 3],
            &[
                (Action::Compare, &[0, 1]),
                (Action::Swap, &[0, 1]),
                (Action::Compare, &[0, 1]),
            ],
        );
        let js = emit(&t);
        assert!(js.starts_with("// === Auto-Generated Visualization Script ===\n"));
        assert!(js.contains("const tracer = new Array1DTracer('Bubble Sort');"));
        assert!(js.contains("tracer.set(array);\nTracer.delay();"));
        assert!(js.contains("log.println('Compare 5 and 3');"));
        assert!(js.contains("log.println('Swapping 5 and 3');\nswap(0, 1);\ntracer.deselect(0, 1);"));
        assert!(js.contains("log.println('Compare 3 and 5');"));
        assert!(js.ends_with("log.println('Done!');\n"));
    }

    #[test]
    fn test_graph_preamble_has_no_array_set() {
        let t = trace(SubjectKind::GraphOps, vec![5, 3, 8, 4, 2], &[(Action::AddNode, &[0])]);
        let js = emit(&t);
        assert!(js.contains("new GraphTracer('Graph Operations')"));
        assert!(!js.contains("tracer.set(array);\nTracer.delay();\n\nfunction"));
        assert!(js.contains("tracer.addNode(0);"));
    }

    #[test]
    fn test_tree_insert_blocks() {
        let t = trace(
            SubjectKind::TreeOps,
            vec![5, 3],
            &[(Action::Insert, &[5, -1, -1, 0]), (Action::Insert, &[3, 5, 1, 0])],
        );
        let js = emit(&t);
        assert!(js.contains("tracer.setTreeData({ '5': { value: 5 } });"));
        assert!(js.contains(
            "tracer.setTreeData({ '3': { value: 3, parent: '5', left: true } });"
        ));
    }

    #[test]
    fn test_malformed_and_unknown_events_are_silent() {
        let clean = emit(&trace(SubjectKind::BubbleSort, vec![1, 2], &[]));
        let noisy = emit(&trace(
            SubjectKind::BubbleSort,
            vec![1, 2],
            &[
                (Action::Swap, &[0]),
                (Action::Swap, &[0, 9]),
                (Action::Compare, &[1]),
                (Action::Unknown("teleport".into()), &[3]),
            ],
        ));
        assert_eq!(clean, noisy);
    }

    #[test]
    fn test_out_of_range_positions_skipped_like_replay() {
        let t = trace(
            SubjectKind::BubbleSort,
            vec![1, 2],
            &[
                (Action::NoSwap, &[9, 9]),
                (Action::MarkSorted, &[2]),
                (Action::MarkSorted, &[-1]),
                (Action::NoSwap, &[0, 1]),
                (Action::MarkSorted, &[1]),
            ],
        );
        let js = emit(&t);
        assert!(!js.contains("tracer.deselect(9, 9);"));
        assert!(!js.contains("index 2 sorted"));
        assert!(!js.contains("index -1 sorted"));
        assert!(js.contains("tracer.deselect(0, 1);"));
        assert!(js.contains("index 1 sorted"));

        let state = crate::replay::reconstruct(&t, t.len());
        assert_eq!(state.skipped(), 3);
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("visualizer.js");
        let t = trace(SubjectKind::StackOps, vec![5, 3, 8, 4, 2], &[(Action::Push, &[0, 7])]);
        write_file(&t, &path).expect("written");
        let js = fs::read_to_string(&path).expect("read back");
        assert!(js.contains("tracer.patch(0, 7);"));
    }
}
