// AST definitions for the algorithm description language

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A parsed program: its top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub nodes: Vec<AstNode>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<AstNode>) -> Self {
        Self { nodes }
    }
}

/// AST node kinds.
///
/// Names are optional because programs may be assembled by other front ends;
/// the semantic validator reports a missing name as a malformed statement.
/// Conditions and compound expressions are never evaluated and are kept as
/// [`AstNode::Value`] holding their source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    /// `name = value;`
    Assign {
        name: Option<String>,
        value: Box<AstNode>,
        location: SourceLocation,
    },

    /// `for (init; condition; increment) { body }` or `while (condition) { body }`
    Loop {
        init: Option<Box<AstNode>>,
        condition: Option<Box<AstNode>>,
        increment: Option<Box<AstNode>>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },

    /// `if (condition) { body }`
    If {
        condition: Box<AstNode>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },

    /// Identifier or unevaluated expression text
    Value {
        text: String,
        location: SourceLocation,
    },

    Number {
        value: i64,
        location: SourceLocation,
    },

    /// `{ ... }` block
    Sequence {
        nodes: Vec<AstNode>,
        location: SourceLocation,
    },

    /// `array name = [1, 2, 3];`
    ArrayDecl {
        name: Option<String>,
        values: Vec<i64>,
        location: SourceLocation,
    },

    /// `bubble_sort(arr);` or `stack.push(5);`
    Call {
        name: Option<String>,
        args: Vec<AstNode>,
        location: SourceLocation,
    },
}

impl AstNode {
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::Assign { location, .. }
            | AstNode::Loop { location, .. }
            | AstNode::If { location, .. }
            | AstNode::Value { location, .. }
            | AstNode::Number { location, .. }
            | AstNode::Sequence { location, .. }
            | AstNode::ArrayDecl { location, .. }
            | AstNode::Call { location, .. } => *location,
        }
    }

    /// Integer meaning of an argument: a number literal, or value text that
    /// parses as an integer. Anything else has none.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AstNode::Number { value, .. } => Some(*value),
            AstNode::Value { text, .. } => text.trim().parse().ok(),
            _ => None,
        }
    }
}
