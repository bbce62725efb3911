//! Semantic validation
//!
//! One pass over the program, in statement order, recursing into loop and
//! `if` bodies. The pass checks every call against the fixed vocabularies,
//! picks up the initial array (the first declaration wins and later ones are
//! ignored; an empty one means the default array) and produces a [`Plan`]
//! for the generator.

use super::errors::SemanticError;
use crate::parser::ast::{AstNode, Program, SourceLocation};
use crate::structures::Order;
use crate::trace::{SubjectKind, DEFAULT_ARRAY};
use tracing::debug;

/// The five supported sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bubble,
    Insertion,
    Selection,
    Merge,
    Quick,
}

impl Algorithm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bubble_sort" => Some(Algorithm::Bubble),
            "insertion_sort" => Some(Algorithm::Insertion),
            "selection_sort" => Some(Algorithm::Selection),
            "merge_sort" => Some(Algorithm::Merge),
            "quick_sort" | "quicksort" => Some(Algorithm::Quick),
            _ => None,
        }
    }

    pub fn kind(self) -> SubjectKind {
        match self {
            Algorithm::Bubble => SubjectKind::BubbleSort,
            Algorithm::Insertion => SubjectKind::InsertionSort,
            Algorithm::Selection => SubjectKind::SelectionSort,
            Algorithm::Merge => SubjectKind::MergeSort,
            Algorithm::Quick => SubjectKind::QuickSort,
        }
    }
}

/// The four supported data structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    Stack,
    Queue,
    Tree,
    Graph,
}

impl Structure {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "stack" => Some(Structure::Stack),
            "queue" => Some(Structure::Queue),
            "tree" => Some(Structure::Tree),
            "graph" => Some(Structure::Graph),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Structure::Stack => "stack",
            Structure::Queue => "queue",
            Structure::Tree => "tree",
            Structure::Graph => "graph",
        }
    }

    pub fn kind(self) -> SubjectKind {
        match self {
            Structure::Stack => SubjectKind::StackOps,
            Structure::Queue => SubjectKind::QueueOps,
            Structure::Tree => SubjectKind::TreeOps,
            Structure::Graph => SubjectKind::GraphOps,
        }
    }

    /// Operation names accepted for this structure, for error messages.
    pub fn valid_operations(self) -> &'static str {
        match self {
            Structure::Stack => "push, pop, peek, top",
            Structure::Queue => "enqueue, dequeue",
            Structure::Tree => "insert, traverse_inorder, traverse_preorder, traverse_postorder",
            Structure::Graph => "add_node, add_edge, bfs, dfs",
        }
    }

    /// Resolve an operation name with its integer arguments. Missing
    /// arguments count as 0.
    pub fn operation(self, name: &str, args: &[i64]) -> Option<Operation> {
        let a = args.first().copied().unwrap_or(0);
        let b = args.get(1).copied().unwrap_or(0);
        let op = match (self, name) {
            (Structure::Stack, "push") => Operation::Push(a),
            (Structure::Stack, "pop") => Operation::Pop,
            (Structure::Stack, "peek" | "top") => Operation::Peek,
            (Structure::Queue, "enqueue") => Operation::Enqueue(a),
            (Structure::Queue, "dequeue") => Operation::Dequeue,
            (Structure::Tree, "insert") => Operation::Insert(a),
            (Structure::Tree, "traverse_inorder") => Operation::Traverse(Order::In),
            (Structure::Tree, "traverse_preorder") => Operation::Traverse(Order::Pre),
            (Structure::Tree, "traverse_postorder") => Operation::Traverse(Order::Post),
            (Structure::Graph, "add_node") => Operation::AddNode(a),
            (Structure::Graph, "add_edge") => Operation::AddEdge(a, b),
            (Structure::Graph, "bfs") => Operation::Bfs(a),
            (Structure::Graph, "dfs") => Operation::Dfs(a),
            _ => return None,
        };
        Some(op)
    }
}

/// A validated structure operation with its arguments resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Push(i64),
    Pop,
    Peek,
    Enqueue(i64),
    Dequeue,
    Insert(i64),
    Traverse(Order),
    AddNode(i64),
    AddEdge(i64, i64),
    Bfs(i64),
    Dfs(i64),
}

/// What the generator should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Sort {
        algorithm: Algorithm,
        array: Vec<i64>,
    },
    Structure {
        structure: Structure,
        operations: Vec<Operation>,
    },
}

impl Plan {
    pub fn kind(&self) -> SubjectKind {
        match self {
            Plan::Sort { algorithm, .. } => algorithm.kind(),
            Plan::Structure { structure, .. } => structure.kind(),
        }
    }
}

/// Validate `program` and decide what to generate.
///
/// Structure operations take precedence over sort calls. With several sort
/// calls the last one is used; with none the program defaults to bubble sort.
pub fn validate(program: &Program) -> Result<Plan, SemanticError> {
    let mut collector = Collector::default();
    collector.visit_all(&program.nodes)?;

    let plan = match collector.structure {
        Some(structure) if !collector.operations.is_empty() => Plan::Structure {
            structure,
            operations: collector.operations,
        },
        _ => Plan::Sort {
            algorithm: collector.algorithm.unwrap_or(Algorithm::Bubble),
            array: collector
                .array
                .filter(|values| !values.is_empty())
                .unwrap_or_else(|| DEFAULT_ARRAY.to_vec()),
        },
    };
    debug!(kind = plan.kind().display_name(), "program validated");
    Ok(plan)
}

#[derive(Default)]
struct Collector {
    array: Option<Vec<i64>>,
    algorithm: Option<Algorithm>,
    structure: Option<Structure>,
    operations: Vec<Operation>,
}

impl Collector {
    fn visit_all(&mut self, nodes: &[AstNode]) -> Result<(), SemanticError> {
        nodes.iter().try_for_each(|node| self.visit(node))
    }

    fn visit(&mut self, node: &AstNode) -> Result<(), SemanticError> {
        match node {
            AstNode::ArrayDecl {
                name,
                values,
                location,
            } => {
                if is_blank(name) {
                    return Err(SemanticError::MalformedDeclaration {
                        location: *location,
                    });
                }
                if self.array.is_none() {
                    self.array = Some(values.clone());
                }
            }
            AstNode::Assign { name, location, .. } => {
                if is_blank(name) {
                    return Err(SemanticError::MalformedAssignment {
                        location: *location,
                    });
                }
            }
            AstNode::Call {
                name,
                args,
                location,
            } => match name.as_deref() {
                None | Some("") => {
                    return Err(SemanticError::MalformedCall {
                        reason: "missing function name".to_string(),
                        location: *location,
                    })
                }
                Some(name) if name.contains('.') => self.structure_call(name, args, *location)?,
                Some(name) => self.algorithm_call(name, args, *location)?,
            },
            AstNode::Loop {
                init,
                increment,
                body,
                ..
            } => {
                if let Some(init) = init {
                    self.visit(init)?;
                }
                if let Some(increment) = increment {
                    self.visit(increment)?;
                }
                self.visit_all(body)?;
            }
            AstNode::If { body, .. } => self.visit_all(body)?,
            AstNode::Sequence { nodes, .. } => self.visit_all(nodes)?,
            AstNode::Value { .. } | AstNode::Number { .. } => {}
        }
        Ok(())
    }

    fn algorithm_call(
        &mut self,
        name: &str,
        args: &[AstNode],
        location: SourceLocation,
    ) -> Result<(), SemanticError> {
        let algorithm = Algorithm::from_name(name).ok_or_else(|| SemanticError::UnknownAlgorithm {
            name: name.to_string(),
            location,
        })?;
        if self.array.is_none() && args.is_empty() {
            return Err(SemanticError::MalformedCall {
                reason: format!(
                    "algorithm '{}' called without array argument. Use: {}(array_var)",
                    name, name
                ),
                location,
            });
        }
        self.algorithm = Some(algorithm);
        Ok(())
    }

    fn structure_call(
        &mut self,
        name: &str,
        args: &[AstNode],
        location: SourceLocation,
    ) -> Result<(), SemanticError> {
        let (target, op_name) = match name.split_once('.') {
            Some((target, op)) if !target.is_empty() && !op.is_empty() && !op.contains('.') => {
                (target, op)
            }
            _ => {
                return Err(SemanticError::MalformedCall {
                    reason: format!(
                        "'{}' does not match the expected 'structure.operation(args)' form",
                        name
                    ),
                    location,
                })
            }
        };

        let structure =
            Structure::from_name(target).ok_or_else(|| SemanticError::UnknownDataStructure {
                name: target.to_string(),
                location,
            })?;
        let established = *self.structure.get_or_insert(structure);

        let values: Vec<i64> = args.iter().map(|a| a.as_int().unwrap_or(0)).collect();
        let operation = (structure == established)
            .then(|| structure.operation(op_name, &values))
            .flatten()
            .ok_or_else(|| SemanticError::UnknownOperation {
                structure: established.name().to_string(),
                name: if structure == established {
                    op_name.to_string()
                } else {
                    name.to_string()
                },
                valid: established.valid_operations().to_string(),
                location,
            })?;
        self.operations.push(operation);
        Ok(())
    }
}

fn is_blank(name: &Option<String>) -> bool {
    name.as_deref().map_or(true, |n| n.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn plan(source: &str) -> Result<Plan, SemanticError> {
        validate(&parse_source(source).expect("parse"))
    }

    #[test]
    fn test_empty_program_defaults_to_bubble_sort() {
        assert_eq!(
            plan("").expect("valid"),
            Plan::Sort {
                algorithm: Algorithm::Bubble,
                array: DEFAULT_ARRAY.to_vec()
            }
        );
    }

    #[test]
    fn test_first_array_declaration_wins() {
        let result = plan("array a = [9, 1];\narray b = [4, 4, 4];\nquicksort(a);").expect("valid");
        assert_eq!(
            result,
            Plan::Sort {
                algorithm: Algorithm::Quick,
                array: vec![9, 1]
            }
        );
    }

    #[test]
    fn test_empty_first_declaration_means_default_array() {
        let result = plan("array a = [];\narray b = [9, 1];\nbubble_sort(b);").expect("valid");
        assert_eq!(
            result,
            Plan::Sort {
                algorithm: Algorithm::Bubble,
                array: DEFAULT_ARRAY.to_vec()
            }
        );
    }

    #[test]
    fn test_last_sort_call_wins() {
        let result = plan("array a = [2, 1];\nbubble_sort(a);\nmerge_sort(a);").expect("valid");
        assert_eq!(result.kind(), SubjectKind::MergeSort);
    }

    #[test]
    fn test_declaration_inside_loop_body_is_found() {
        let result = plan("for (i = 0; i < 1; i++) { array a = [3, 2, 1]; }\ninsertion_sort(a);")
            .expect("valid");
        assert!(matches!(result, Plan::Sort { array, .. } if array == vec![3, 2, 1]));
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = plan("array a = [1];\nbogo_sort(a);").unwrap_err();
        assert!(matches!(err, SemanticError::UnknownAlgorithm { ref name, .. } if name == "bogo_sort"));
        assert_eq!(err.location().line, 2);
        assert!(err.to_string().contains("Valid algorithms are"));
    }

    #[test]
    fn test_sort_without_array_or_argument() {
        let err = plan("selection_sort();").unwrap_err();
        assert!(matches!(err, SemanticError::MalformedCall { .. }));
    }

    #[test]
    fn test_structure_ops_take_precedence() {
        let result = plan("array a = [1, 2];\nbubble_sort(a);\nstack.push(4);\nstack.top();").expect("valid");
        assert_eq!(
            result,
            Plan::Structure {
                structure: Structure::Stack,
                operations: vec![Operation::Push(4), Operation::Peek]
            }
        );
    }

    #[test]
    fn test_unknown_structure_and_operation() {
        assert!(matches!(
            plan("heap.push(1);").unwrap_err(),
            SemanticError::UnknownDataStructure { .. }
        ));
        let err = plan("queue.push(1);").unwrap_err();
        assert!(matches!(err, SemanticError::UnknownOperation { ref name, .. } if name == "push"));
        assert!(err.to_string().contains("enqueue, dequeue"));
    }

    #[test]
    fn test_mixing_structures_is_rejected() {
        let err = plan("stack.push(1);\nqueue.enqueue(2);").unwrap_err();
        match err {
            SemanticError::UnknownOperation {
                structure, name, ..
            } => {
                assert_eq!(structure, "stack");
                assert_eq!(name, "queue.enqueue");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_malformed_dotted_name() {
        assert!(matches!(
            plan("graph.a.b(1);").unwrap_err(),
            SemanticError::MalformedCall { .. }
        ));
    }

    #[test]
    fn test_non_numeric_arguments_count_as_zero() {
        let result = plan("graph.add_edge(x, 3);\ngraph.bfs();").expect("valid");
        assert_eq!(
            result,
            Plan::Structure {
                structure: Structure::Graph,
                operations: vec![Operation::AddEdge(0, 3), Operation::Bfs(0)]
            }
        );
    }

    #[test]
    fn test_missing_names_from_hand_built_ast() {
        let loc = SourceLocation::new(4, 2);
        let program = Program::from_nodes(vec![AstNode::Assign {
            name: None,
            value: Box::new(AstNode::Number {
                value: 1,
                location: loc,
            }),
            location: loc,
        }]);
        assert_eq!(
            validate(&program).unwrap_err(),
            SemanticError::MalformedAssignment { location: loc }
        );

        let program = Program::from_nodes(vec![AstNode::ArrayDecl {
            name: Some(String::new()),
            values: vec![1],
            location: loc,
        }]);
        assert!(matches!(
            validate(&program).unwrap_err(),
            SemanticError::MalformedDeclaration { .. }
        ));

        let program = Program::from_nodes(vec![AstNode::Call {
            name: None,
            args: Vec::new(),
            location: loc,
        }]);
        assert!(matches!(
            validate(&program).unwrap_err(),
            SemanticError::MalformedCall { .. }
        ));
    }
}
