// Property tests over generated traces

use algotrace::compiler::{generate, Algorithm, Operation, Plan, Structure};
use algotrace::replay::{reconstruct, Player, PlayerState};
use algotrace::structures::Order;
use algotrace::trace::{codec, Action, Trace};
use proptest::prelude::*;
use std::collections::HashSet;

fn sort_trace(algorithm: Algorithm, array: &[i64]) -> Trace {
    generate(&Plan::Sort {
        algorithm,
        array: array.to_vec(),
    })
}

fn in_place_sort() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Bubble),
        Just(Algorithm::Insertion),
        Just(Algorithm::Selection),
        Just(Algorithm::Quick),
    ]
}

fn any_sort() -> impl Strategy<Value = Algorithm> {
    prop_oneof![in_place_sort(), Just(Algorithm::Merge)]
}

fn structure_session() -> impl Strategy<Value = (Structure, Vec<Operation>)> {
    let value = -20i64..20;
    prop_oneof![
        prop::collection::vec(
            prop_oneof![
                value.clone().prop_map(Operation::Push),
                Just(Operation::Pop),
                Just(Operation::Peek),
            ],
            0..30
        )
        .prop_map(|ops| (Structure::Stack, ops)),
        prop::collection::vec(
            prop_oneof![
                value.clone().prop_map(Operation::Enqueue),
                Just(Operation::Dequeue),
            ],
            0..30
        )
        .prop_map(|ops| (Structure::Queue, ops)),
        prop::collection::vec(
            prop_oneof![
                value.clone().prop_map(Operation::Insert),
                Just(Operation::Traverse(Order::In)),
                Just(Operation::Traverse(Order::Post)),
            ],
            0..20
        )
        .prop_map(|ops| (Structure::Tree, ops)),
        prop::collection::vec(
            prop_oneof![
                (0i64..6).prop_map(Operation::AddNode),
                (0i64..6, 0i64..6).prop_map(|(u, v)| Operation::AddEdge(u, v)),
                (0i64..6).prop_map(Operation::Bfs),
                (0i64..6).prop_map(Operation::Dfs),
            ],
            0..20
        )
        .prop_map(|ops| (Structure::Graph, ops)),
    ]
}

proptest! {
    #[test]
    fn prop_in_place_sorts_fold_to_sorted(
        algorithm in in_place_sort(),
        array in prop::collection::vec(-100i64..100, 0..24),
    ) {
        let trace = sort_trace(algorithm, &array);
        let mut expected = trace.subject().initial.clone();
        expected.sort();
        prop_assert_eq!(reconstruct(&trace, trace.len()).array, expected);
    }

    #[test]
    fn prop_mark_sorted_positions_are_distinct(
        algorithm in any_sort(),
        array in prop::collection::vec(-100i64..100, 0..24),
    ) {
        let trace = sort_trace(algorithm, &array);
        let marks: Vec<i64> = trace
            .events()
            .iter()
            .filter(|e| e.action == Action::MarkSorted)
            .filter_map(|e| e.operand(0))
            .collect();
        let n = trace.subject().initial.len();
        let distinct: HashSet<i64> = marks.iter().copied().collect();
        prop_assert_eq!(distinct.len(), marks.len());
        prop_assert!(marks.len() <= n);
        if matches!(algorithm, Algorithm::Bubble | Algorithm::Insertion | Algorithm::Selection) {
            prop_assert_eq!(marks.len(), n - 1);
        }
    }

    #[test]
    fn prop_sort_traces_round_trip(
        algorithm in any_sort(),
        array in prop::collection::vec(-1000i64..1000, 0..16),
    ) {
        let trace = sort_trace(algorithm, &array);
        let decoded = codec::decode(&codec::encode(&trace));
        prop_assert!(decoded.is_clean(), "{:?}", decoded.diagnostics);
        prop_assert_eq!(decoded.trace, trace);
    }

    #[test]
    fn prop_structure_traces_round_trip((structure, ops) in structure_session()) {
        let trace = generate(&Plan::Structure { structure, operations: ops });
        let decoded = codec::decode(&codec::encode(&trace));
        prop_assert!(decoded.is_clean(), "{:?}", decoded.diagnostics);
        prop_assert_eq!(decoded.trace, trace);
    }

    #[test]
    fn prop_player_matches_reconstruct_at_every_prefix((structure, ops) in structure_session()) {
        let trace = generate(&Plan::Structure { structure, operations: ops });
        let mut player = Player::new(trace);
        while let PlayerState::ShowingStep(i) = player.advance() {
            prop_assert_eq!(player.replay(), &reconstruct(player.trace(), i + 1));
        }
        prop_assert_eq!(player.state(), PlayerState::Finished);
        prop_assert_eq!(player.replay().skipped(), 0);
    }

    #[test]
    fn prop_generated_sort_events_are_never_skipped(
        algorithm in any_sort(),
        array in prop::collection::vec(-100i64..100, 0..24),
    ) {
        let trace = sort_trace(algorithm, &array);
        let state = reconstruct(&trace, trace.len());
        prop_assert_eq!(state.skipped(), 0);
    }
}
