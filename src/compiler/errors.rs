//! Semantic error types
//!
//! Every error names the offending token and where it appeared. The first
//! error aborts compilation; nothing is generated or written after it.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// Errors raised while validating a parsed program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error(
        "Semantic error at {location}: Unknown algorithm '{name}'. Valid algorithms are: \
         bubble_sort, insertion_sort, selection_sort, merge_sort, quick_sort"
    )]
    UnknownAlgorithm {
        name: String,
        location: SourceLocation,
    },

    #[error(
        "Semantic error at {location}: Unknown data structure '{name}'. Valid options are: \
         stack, queue, tree, graph"
    )]
    UnknownDataStructure {
        name: String,
        location: SourceLocation,
    },

    #[error(
        "Semantic error at {location}: Invalid {structure} operation '{name}'. Valid operations are: {valid}"
    )]
    UnknownOperation {
        structure: String,
        name: String,
        valid: String,
        location: SourceLocation,
    },

    #[error("Semantic error at {location}: Invalid call: {reason}")]
    MalformedCall {
        reason: String,
        location: SourceLocation,
    },

    #[error("Semantic error at {location}: Invalid assignment: missing variable name")]
    MalformedAssignment { location: SourceLocation },

    #[error("Semantic error at {location}: Invalid array declaration: missing array name")]
    MalformedDeclaration { location: SourceLocation },
}

impl SemanticError {
    pub fn location(&self) -> SourceLocation {
        match self {
            SemanticError::UnknownAlgorithm { location, .. }
            | SemanticError::UnknownDataStructure { location, .. }
            | SemanticError::UnknownOperation { location, .. }
            | SemanticError::MalformedCall { location, .. }
            | SemanticError::MalformedAssignment { location }
            | SemanticError::MalformedDeclaration { location } => *location,
        }
    }
}

/// Any failure between source text and a finished trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] crate::parser::parser::ParseError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl CompileError {
    pub fn location(&self) -> SourceLocation {
        match self {
            CompileError::Parse(e) => e.location,
            CompileError::Semantic(e) => e.location(),
        }
    }
}
