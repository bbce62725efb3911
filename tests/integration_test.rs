// Integration tests for the compile → trace → replay pipeline

use algotrace::compiler::{compile_source, CompileError, SemanticError};
use algotrace::emitter::{self, Emitter};
use algotrace::replay::{reconstruct, Player, PlayerState};
use algotrace::trace::{codec, Action, SubjectKind, Trace};

fn compile(source: &str) -> Trace {
    compile_source(source).expect("program compiles")
}

fn rendered(trace: &Trace) -> Vec<String> {
    trace.events().iter().map(|e| e.to_string()).collect()
}

fn play_to_end(trace: Trace) -> Player {
    let mut player = Player::new(trace);
    while !player.advance().is_terminal() {}
    player
}

#[test]
fn test_bubble_sort_example() {
    let source = r#"
        // the canonical five-element example
        array a = [5, 3, 8, 4, 2];
        bubble_sort(a);
    "#;
    let trace = compile(source);
    assert_eq!(trace.kind(), SubjectKind::BubbleSort);
    assert_eq!(
        rendered(&trace)[..3],
        ["compare(0, 1)", "swap(0, 1)", "compare(1, 2)"]
    );
    assert_eq!(trace.count(&Action::MarkSorted), 4);

    let player = play_to_end(trace);
    assert_eq!(player.state(), PlayerState::Finished);
    assert_eq!(player.replay().array, vec![2, 3, 4, 5, 8]);
    assert_eq!(player.counters().passes, 4);
}

#[test]
fn test_sort_inside_loop_body() {
    let source = r#"
        array nums = [3, 1, 2];
        for (i = 0; i < 1; i++) {
            selection_sort(nums);
        }
    "#;
    let trace = compile(source);
    assert_eq!(trace.kind(), SubjectKind::SelectionSort);
    assert_eq!(reconstruct(&trace, trace.len()).array, vec![1, 2, 3]);
}

#[test]
fn test_tree_example() {
    let source = r#"
        tree.insert(5);
        tree.insert(3);
        tree.insert(8);
        tree.traverse_inorder();
    "#;
    let trace = compile(source);
    assert_eq!(
        rendered(&trace),
        [
            "insert(5, -1, -1, 0)",
            "insert(3, 5, 1, 0)",
            "insert(8, 5, 0, 0)",
            "visit(3)",
            "visit(5)",
            "visit(8)",
        ]
    );

    let player = play_to_end(trace);
    assert_eq!(player.replay().tree.len(), 3);
    assert_eq!(player.replay().tree.height(), 2);
    assert_eq!(player.replay().visited, vec![3, 5, 8]);
}

#[test]
fn test_graph_bfs_example() {
    let source = r#"
        graph.add_node(0);
        graph.add_node(1);
        graph.add_node(2);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.bfs(0);
    "#;
    let trace = compile(source);
    let visits: Vec<i64> = trace
        .events()
        .iter()
        .filter(|e| e.action == Action::Visit)
        .filter_map(|e| e.operand(0))
        .collect();
    assert_eq!(visits, vec![0, 1, 2]);

    let player = play_to_end(trace);
    assert_eq!(player.counters().nodes, 3);
    assert_eq!(player.counters().edges, 2);
    assert!(player.narration().details.contains(&"Total vertices: 3".to_string()));
}

#[test]
fn test_lone_pop_on_empty_stack() {
    let trace = compile("stack.pop();");
    assert!(trace.is_empty());
    let player = play_to_end(trace);
    assert_eq!(player.counters().pops, 0);
    assert!(player
        .narration()
        .details
        .contains(&"Stack is currently empty".to_string()));
}

#[test]
fn test_semantic_errors_name_the_offender() {
    let err = compile_source("array a = [1];\nshell_sort(a);").expect_err("unknown sort");
    match err {
        CompileError::Semantic(SemanticError::UnknownAlgorithm { name, location }) => {
            assert_eq!(name, "shell_sort");
            assert_eq!(location.line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = compile_source("heap.push(3);").expect_err("unknown structure");
    assert!(err.to_string().contains("heap"));
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("output.json");
    let trace = compile("array a = [9, 4, 7, 1];\nquick_sort(a);");

    codec::write_file(&trace, &path).expect("written");
    let decoded = codec::read_file(&path).expect("read back");
    assert!(decoded.is_clean(), "{:?}", decoded.diagnostics);
    assert_eq!(decoded.trace, trace);

    let text = std::fs::read_to_string(&path).expect("text");
    assert!(text.starts_with("{\n  \"algorithm\": \"Quick Sort\",\n  \"array\": [9, 4, 7, 1],"));
}

#[test]
fn test_hand_edited_trace_is_replayed_best_effort() {
    let text = r#"{"steps": [{"action": "swap", "indices": [0, 1]}, {"action": "levitate"},
        {"action": "swap", "indices": [0, 99]}], "algorithm": "Bubble", "array": [2, 1]}"#;
    let decoded = codec::decode(text);
    assert!(!decoded.is_clean());
    let player = play_to_end(decoded.trace);
    assert_eq!(player.replay().array, vec![1, 2]);
    assert!(player.replay().skipped() >= 1);
}

#[test]
fn test_emitter_and_player_agree_on_array_state() {
    let trace = compile("array a = [6, 2, 9, 1, 5, 3];\ninsertion_sort(a);");
    let mut emitter = Emitter::new(trace.subject());
    let mut sink = String::new();
    let mut player = Player::new(trace.clone());
    for event in trace.events() {
        emitter.step(event, &mut sink).expect("string write");
        player.advance();
        assert_eq!(emitter.shadow(), player.replay().array.as_slice());
    }
}

#[test]
fn test_emitted_script_for_stack_program() {
    let trace = compile("stack.push(1);\nstack.push(2);\nstack.peek();\nstack.pop();");
    let js = emitter::emit(&trace);
    assert!(js.contains("const tracer = new Array1DTracer('Stack Operations');"));
    assert!(js.contains("tracer.patch(1, 2);"));
    assert!(js.contains("log.println('Peeking at top of stack');\ntracer.select(1);"));
    assert!(js.contains("log.println('Popping 2 from stack');\ntracer.depatch(1);"));
    assert!(js.ends_with("log.println('Done!');\n"));
}
