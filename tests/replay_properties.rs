// Property tests: structural invariants of traces and their replays

use proptest::prelude::*;
use recurtty::algorithms::Algorithm;
use recurtty::errors::ReplayError;
use recurtty::replay::hanoi::moves;
use recurtty::replay::narrative::describe;
use recurtty::replay::{reconstruct, reconstruct_rods, NodeStatus, Rod};
use recurtty::trace::Event;

fn algorithm_and_n() -> impl Strategy<Value = (Algorithm, i64)> {
    prop_oneof![
        (0i64..=10).prop_map(|n| (Algorithm::Fibonacci, n)),
        (0i64..=12).prop_map(|n| (Algorithm::Factorial, n)),
        (1i64..=5).prop_map(|n| (Algorithm::Hanoi, n)),
    ]
}

proptest! {
    #[test]
    fn events_pair_up_with_calls((algorithm, n) in algorithm_and_n()) {
        let run = algorithm.run(n);
        let calls = run.trace.calls().len();
        let starts = run.trace.events().iter().filter(|e| e.is_start()).count();
        let ends = run.trace.events().len() - starts;
        prop_assert_eq!(starts, calls);
        prop_assert_eq!(ends, calls);
        prop_assert!(run.trace.is_balanced());

        // Every call starts before it ends, and its parent is still running then.
        let mut open = Vec::new();
        for event in run.trace.events() {
            match event {
                Event::Start { call_id } => {
                    let call = run.trace.call(*call_id).unwrap();
                    prop_assert_eq!(call.parent_id, open.last().copied());
                    open.push(*call_id);
                }
                Event::End { call_id, .. } => {
                    prop_assert_eq!(open.pop(), Some(*call_id));
                }
            }
        }
        prop_assert!(open.is_empty());
    }

    #[test]
    fn visible_nodes_grow_with_step((algorithm, n) in algorithm_and_n()) {
        let run = algorithm.run(n);
        let mut previous = 0;
        for step in 0..=run.trace.len() {
            let tree = reconstruct(&run.trace, step).unwrap();
            prop_assert!(tree.nodes.len() >= previous);
            previous = tree.nodes.len();

            // Active and completed never overlap, and together they are all visible nodes.
            prop_assert!(tree.active.iter().all(|id| !tree.completed.contains(id)));
            prop_assert_eq!(tree.active.len() + tree.completed.len(), tree.nodes.len());
        }
    }

    #[test]
    fn last_step_completes_everything((algorithm, n) in algorithm_and_n()) {
        let run = algorithm.run(n);
        let tree = reconstruct(&run.trace, run.trace.len()).unwrap();
        prop_assert!(tree.active.is_empty());
        prop_assert_eq!(tree.completed.len(), tree.nodes.len());
        prop_assert_eq!(tree.nodes.len(), run.trace.calls().len());
        prop_assert!(tree.nodes.iter().all(|node| node.status == NodeStatus::Completed));
    }

    #[test]
    fn replay_is_deterministic((algorithm, n) in algorithm_and_n(), frac in 0.0f64..=1.0) {
        let run = algorithm.run(n);
        let step = (run.trace.len() as f64 * frac) as usize;
        let first = reconstruct(&run.trace, step).unwrap();
        let second = reconstruct(&run.trace, step).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn steps_past_the_end_are_rejected((algorithm, n) in algorithm_and_n(), extra in 1usize..10) {
        let run = algorithm.run(n);
        let len = run.trace.len();
        let step = len + extra;
        let out_of_range = ReplayError::StepOutOfRange { step, len };
        prop_assert_eq!(reconstruct(&run.trace, step), Err(out_of_range.clone()));
        prop_assert_eq!(moves(&run.trace, step), Err(out_of_range.clone()));
        prop_assert_eq!(reconstruct_rods(3, &run.trace, step), Err(out_of_range.clone()));
        prop_assert_eq!(describe(&run.trace, step), Err(out_of_range));
    }

    #[test]
    fn hanoi_disks_are_conserved(n in 1u32..=5, frac in 0.0f64..=1.0) {
        let run = Algorithm::Hanoi.run(n as i64);
        let step = (run.trace.len() as f64 * frac) as usize;
        let state = reconstruct_rods(n, &run.trace, step).unwrap();

        let mut disks: Vec<u32> = Rod::ALL
            .iter()
            .flat_map(|rod| state.rod(*rod).iter().copied())
            .collect();
        disks.sort_unstable();
        prop_assert_eq!(disks, (1..=n).collect::<Vec<_>>());

        // No disk ever sits on a smaller one.
        for rod in Rod::ALL {
            prop_assert!(state.rod(rod).windows(2).all(|w| w[0] > w[1]));
        }
    }
}
