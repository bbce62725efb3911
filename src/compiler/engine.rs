//! Trace generation entry points.

use super::errors::{CompileError, SemanticError};
use super::operations;
use super::sorts;
use super::validate::{validate, Plan};
use crate::parser::ast::Program;
use crate::parser::parse_source;
use crate::trace::{Subject, Trace, TraceBuilder};
use tracing::{debug, info};

/// Run a validated plan and collect its events.
pub fn generate(plan: &Plan) -> Trace {
    match plan {
        Plan::Sort { algorithm, array } => {
            let subject = Subject::new(algorithm.kind(), array.clone());
            // Run on the possibly truncated subject array, not the raw input.
            let initial = subject.initial.clone();
            let mut out = TraceBuilder::new(subject);
            sorts::generate(*algorithm, &initial, &mut out);
            out.finish()
        }
        Plan::Structure {
            structure,
            operations,
        } => {
            let mut out = TraceBuilder::new(Subject::with_default_array(structure.kind()));
            operations::generate(*structure, operations, &mut out);
            out.finish()
        }
    }
}

/// Validate and generate in one step.
pub fn compile(program: &Program) -> Result<Trace, SemanticError> {
    let plan = validate(program)?;
    let trace = generate(&plan);
    debug!(
        kind = trace.kind().display_name(),
        events = trace.len(),
        "trace generated"
    );
    Ok(trace)
}

/// Parse, validate and generate from program text.
pub fn compile_source(source: &str) -> Result<Trace, CompileError> {
    info!("syntax analysis");
    let program = parse_source(source)?;
    info!(statements = program.nodes.len(), "semantic analysis");
    Ok(compile(&program)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::validate::Algorithm;
    use crate::trace::{codec, Action, SubjectKind};

    #[test]
    fn test_compile_default_program() {
        let trace = compile_source("").expect("compiles");
        assert_eq!(trace.kind(), SubjectKind::BubbleSort);
        assert_eq!(trace.subject().initial, vec![5, 3, 8, 4, 2]);
        assert_eq!(trace.count(&Action::MarkSorted), 4);
    }

    #[test]
    fn test_empty_plan_array_sorts_default_and_round_trips() {
        let trace = generate(&Plan::Sort {
            algorithm: Algorithm::Bubble,
            array: Vec::new(),
        });
        assert_eq!(trace.subject().initial, vec![5, 3, 8, 4, 2]);
        assert_eq!(trace.count(&Action::MarkSorted), 4);
        let decoded = codec::decode(&codec::encode(&trace));
        assert!(decoded.is_clean(), "{:?}", decoded.diagnostics);
        assert_eq!(decoded.trace, trace);
    }

    #[test]
    fn test_long_array_is_truncated_before_sorting() {
        let values: Vec<String> = (0..300).rev().map(|v| v.to_string()).collect();
        let source = format!("array a = [{}];\ninsertion_sort(a);", values.join(", "));
        let trace = compile_source(&source).expect("compiles");
        assert_eq!(trace.subject().initial.len(), 256);
        let max_index = trace
            .events()
            .iter()
            .flat_map(|e| e.operands.iter().copied())
            .max()
            .unwrap_or(0);
        assert!(max_index < 256);
    }

    #[test]
    fn test_errors_abort_before_generation() {
        assert!(matches!(
            compile_source("stack.push(1"),
            Err(CompileError::Parse(_))
        ));
        assert!(matches!(
            compile_source("stack.fly();"),
            Err(CompileError::Semantic(SemanticError::UnknownOperation { .. }))
        ));
    }
}
