//! Trace file format
//!
//! The writer produces one canonical document with a fixed key order and
//! fixed indentation; the reader accepts that document and anything
//! whitespace-equivalent to it, with keys in any order.
//!
//! ```text
//! {
//!   "algorithm": "Bubble Sort",
//!   "array": [5, 3, 8, 4, 2],
//!   "steps": [
//!     {
//!       "action": "compare",
//!       "indices": [0, 1]
//!     }
//!   ],
//!   "metadata": { ... }
//! }
//! ```
//!
//! Reading never aborts on malformed input. Problems are collected as
//! [`Diagnostic`]s next to the best-effort [`Trace`]; callers that need a
//! clean file use [`decode_strict`].

use super::cursor::{Cursor, TextPos};
use super::event::{Action, MAX_OPERANDS};
use super::{Subject, SubjectKind, Trace, TraceBuilder, DEFAULT_ARRAY};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const TIME_COMPLEXITY: &str = "O(n²)";
const SPACE_COMPLEXITY: &str = "O(1)";
const DESCRIPTION: &str = "Generated from algorithm visualization compiler.";

/// Errors surfaced by the codec's file and strict entry points.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("cannot read trace file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write trace file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "malformed trace ({} problem(s)); first: {}",
        .0.len(),
        .0.first().map(ToString::to_string).unwrap_or_default()
    )]
    Malformed(Vec<Diagnostic>),
}

/// A problem found while reading a trace document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub at: TextPos,
    pub kind: DiagnosticKind,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.at, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("document does not start with '{{'")]
    NotAnObject,
    #[error("missing \"algorithm\" key")]
    MissingAlgorithm,
    #[error("unknown algorithm name \"{0}\"")]
    UnknownAlgorithm(String),
    #[error("missing \"array\" key")]
    MissingArray,
    #[error("missing \"steps\" key")]
    MissingSteps,
    #[error("expected {0}")]
    Expected(&'static str),
    #[error("step {0} skipped: {1}")]
    MalformedStep(usize, &'static str),
    #[error("step {0} has more than {max} operands and will be skipped", max = MAX_OPERANDS)]
    TooManyOperands(usize),
    #[error("step {0} has unknown action \"{1}\"")]
    UnknownAction(usize, String),
    #[error("unexpected data after the document")]
    TrailingData,
}

/// Result of a permissive read.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub trace: Trace,
    pub diagnostics: Vec<Diagnostic>,
}

impl Decoded {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Render a trace in the canonical layout.
pub fn encode(trace: &Trace) -> String {
    let mut out = String::new();
    out.push_str("{\n");
    // Writing into a String cannot fail.
    let _ = writeln!(out, "  \"algorithm\": \"{}\",", trace.kind().display_name());

    out.push_str("  \"array\": [");
    if trace.subject().initial.is_empty() {
        out.push_str(&join(&DEFAULT_ARRAY));
    } else {
        out.push_str(&join(&trace.subject().initial));
    }
    out.push_str("],\n");

    out.push_str("  \"steps\": [\n");
    let last = trace.len().saturating_sub(1);
    for (i, event) in trace.events().iter().enumerate() {
        out.push_str("    {\n");
        let _ = write!(out, "      \"action\": \"{}\"", event.action.name());
        match event.operands.as_slice() {
            [] => {}
            [single] => {
                let _ = write!(out, ",\n      \"index\": {}", single);
            }
            many => {
                let _ = write!(out, ",\n      \"indices\": [{}]", join(many));
            }
        }
        out.push_str("\n    }");
        if i != last {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("  ],\n");

    out.push_str("  \"metadata\": {\n");
    let _ = writeln!(out, "    \"timeComplexity\": \"{}\",", TIME_COMPLEXITY);
    let _ = writeln!(out, "    \"spaceComplexity\": \"{}\",", SPACE_COMPLEXITY);
    let _ = writeln!(out, "    \"description\": \"{}\"", DESCRIPTION);
    out.push_str("  }\n");
    out.push_str("}\n");
    out
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Write `trace` to `path` in the canonical layout.
pub fn write_file(trace: &Trace, path: &Path) -> Result<(), CodecError> {
    fs::write(path, encode(trace)).map_err(|source| CodecError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), events = trace.len(), "trace written");
    Ok(())
}

/// Read a trace document, collecting problems instead of failing.
pub fn decode(text: &str) -> Decoded {
    let mut reader = Reader::new(text);
    let trace = reader.document();
    for diagnostic in &reader.diagnostics {
        warn!(%diagnostic, "trace reader");
    }
    Decoded {
        trace,
        diagnostics: reader.diagnostics,
    }
}

/// Read a trace document, rejecting it if any problem was found.
pub fn decode_strict(text: &str) -> Result<Trace, CodecError> {
    let decoded = decode(text);
    if decoded.is_clean() {
        Ok(decoded.trace)
    } else {
        Err(CodecError::Malformed(decoded.diagnostics))
    }
}

/// Read and permissively decode the trace file at `path`.
pub fn read_file(path: &Path) -> Result<Decoded, CodecError> {
    let text = fs::read_to_string(path).map_err(|source| CodecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode(&text))
}

struct Reader {
    cursor: Cursor,
    diagnostics: Vec<Diagnostic>,
}

/// A step as read, before it is checked against the vocabulary.
struct RawStep {
    action: Option<String>,
    operands: Vec<i64>,
}

impl Reader {
    fn new(text: &str) -> Self {
        Self {
            cursor: Cursor::new(text),
            diagnostics: Vec::new(),
        }
    }

    fn report(&mut self, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic {
            at: self.cursor.text_pos(),
            kind,
        });
    }

    fn document(&mut self) -> Trace {
        let mut algorithm: Option<String> = None;
        let mut array: Option<Vec<i64>> = None;
        let mut steps: Option<Vec<RawStep>> = None;

        if !self.cursor.eat('{') {
            self.report(DiagnosticKind::NotAnObject);
        } else {
            loop {
                if self.cursor.eat('}') {
                    break;
                }
                let Some(key) = self.cursor.read_string() else {
                    self.report(DiagnosticKind::Expected("a key or '}'"));
                    break;
                };
                if !self.cursor.eat(':') {
                    self.report(DiagnosticKind::Expected("':' after a key"));
                    break;
                }
                match key.as_str() {
                    "algorithm" => match self.cursor.read_string() {
                        Some(name) => algorithm = Some(name),
                        None => {
                            self.report(DiagnosticKind::Expected("a string for \"algorithm\""));
                            self.cursor.skip_value();
                        }
                    },
                    "array" => array = Some(self.int_array()),
                    "steps" => steps = Some(self.steps()),
                    _ => self.cursor.skip_value(),
                }
                if !self.cursor.eat(',') {
                    if !self.cursor.eat('}') {
                        self.report(DiagnosticKind::Expected("',' or '}' after a value"));
                    }
                    break;
                }
            }
            self.cursor.skip_whitespace();
            if !self.cursor.is_at_end() {
                self.report(DiagnosticKind::TrailingData);
            }
        }

        let kind = match algorithm {
            Some(name) => SubjectKind::from_display_name(&name).unwrap_or_else(|| {
                self.report(DiagnosticKind::UnknownAlgorithm(name));
                SubjectKind::BubbleSort
            }),
            None => {
                self.report(DiagnosticKind::MissingAlgorithm);
                SubjectKind::BubbleSort
            }
        };
        let initial = array.unwrap_or_else(|| {
            self.report(DiagnosticKind::MissingArray);
            DEFAULT_ARRAY.to_vec()
        });
        let steps = steps.unwrap_or_else(|| {
            self.report(DiagnosticKind::MissingSteps);
            Vec::new()
        });

        let mut builder = TraceBuilder::new(Subject::new(kind, initial));
        for (i, step) in steps.into_iter().enumerate() {
            let Some(name) = step.action else { continue };
            let action = Action::from_name(&name);
            if let Action::Unknown(name) = &action {
                self.report(DiagnosticKind::UnknownAction(i, name.clone()));
            }
            builder.emit(action, &step.operands);
        }
        builder.finish()
    }

    fn int_array(&mut self) -> Vec<i64> {
        let mut values = Vec::new();
        if !self.cursor.eat('[') {
            self.report(DiagnosticKind::Expected("'['"));
            self.cursor.skip_value();
            return values;
        }
        if self.cursor.eat(']') {
            return values;
        }
        loop {
            match self.cursor.read_int() {
                Some(v) => values.push(v),
                None => {
                    self.report(DiagnosticKind::Expected("an integer"));
                    self.cursor.skip_past(']');
                    return values;
                }
            }
            if self.cursor.eat(',') {
                continue;
            }
            if !self.cursor.eat(']') {
                self.report(DiagnosticKind::Expected("',' or ']' in an array"));
                self.cursor.skip_past(']');
            }
            return values;
        }
    }

    fn steps(&mut self) -> Vec<RawStep> {
        let mut steps = Vec::new();
        if !self.cursor.eat('[') {
            self.report(DiagnosticKind::Expected("'[' to open \"steps\""));
            self.cursor.skip_value();
            return steps;
        }
        if self.cursor.eat(']') {
            return steps;
        }
        loop {
            let index = steps.len();
            match self.step(index) {
                Some(step) => steps.push(step),
                None => {
                    // Keep the slot so later step numbers match the file.
                    steps.push(RawStep {
                        action: None,
                        operands: Vec::new(),
                    });
                }
            }
            if self.cursor.eat(',') {
                continue;
            }
            if !self.cursor.eat(']') {
                self.report(DiagnosticKind::Expected("',' or ']' between steps"));
            }
            return steps;
        }
    }

    fn step(&mut self, index: usize) -> Option<RawStep> {
        if !self.cursor.eat('{') {
            self.report(DiagnosticKind::MalformedStep(index, "not an object"));
            self.cursor.skip_value();
            return None;
        }
        let mut action = None;
        let mut operands: Option<Vec<i64>> = None;
        loop {
            if self.cursor.eat('}') {
                break;
            }
            let Some(key) = self.cursor.read_string() else {
                self.report(DiagnosticKind::MalformedStep(index, "expected a key"));
                self.cursor.skip_past('}');
                return None;
            };
            if !self.cursor.eat(':') {
                self.report(DiagnosticKind::MalformedStep(index, "expected ':'"));
                self.cursor.skip_past('}');
                return None;
            }
            match key.as_str() {
                "action" => action = self.cursor.read_string(),
                "indices" => operands = Some(self.int_array()),
                "index" => match self.cursor.read_int() {
                    Some(v) => operands = Some(vec![v]),
                    None => {
                        self.report(DiagnosticKind::MalformedStep(index, "\"index\" is not an integer"));
                        self.cursor.skip_value();
                    }
                },
                _ => self.cursor.skip_value(),
            }
            if !self.cursor.eat(',') {
                if !self.cursor.eat('}') {
                    self.report(DiagnosticKind::MalformedStep(index, "expected ',' or '}'"));
                    self.cursor.skip_past('}');
                    return None;
                }
                break;
            }
        }
        if action.is_none() {
            self.report(DiagnosticKind::MalformedStep(index, "no \"action\""));
            return None;
        }
        // Oversized steps stay whole; consumers skip them on arity.
        let operands = operands.unwrap_or_default();
        if operands.len() > MAX_OPERANDS {
            self.report(DiagnosticKind::TooManyOperands(index));
        }
        Some(RawStep { action, operands })
    }
}
