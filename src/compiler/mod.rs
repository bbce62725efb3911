//! Semantic analysis and trace generation
//!
//! - [`validate`]: checks names against the fixed vocabularies and builds a [`Plan`]
//! - [`sorts`]: the five sort interpreters
//! - [`operations`]: stack, queue, tree and graph interpreters
//! - [`engine`]: ties the passes together
//! - [`errors`]: [`SemanticError`] and [`CompileError`]

pub mod engine;
pub mod errors;
pub mod operations;
pub mod sorts;
pub mod validate;

pub use engine::{compile, compile_source, generate};
pub use errors::{CompileError, SemanticError};
pub use validate::{validate, Algorithm, Operation, Plan, Structure};
