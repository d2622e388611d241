// Integration tests for tracing and replay

use recurtty::algorithms::factorial::factorial;
use recurtty::algorithms::Algorithm;
use recurtty::errors::AlgorithmError;
use recurtty::playback::Playback;
use recurtty::replay::hanoi::moves;
use recurtty::replay::{reconstruct, reconstruct_rods, NodeStatus, Rod};
use recurtty::trace::instrument::int_arg;
use recurtty::trace::{CallId, Event, Instrumented, TraceSession, Value};

fn start_count(events: &[Event]) -> usize {
    events.iter().filter(|e| e.is_start()).count()
}

#[test]
fn test_factorial_three() {
    let run = Algorithm::Factorial.run(3);
    assert_eq!(run.outcome, Ok(Value::Int(6)));

    let signatures: Vec<String> = run.trace.calls().iter().map(|c| c.signature()).collect();
    assert_eq!(
        signatures,
        vec!["factorial(3)", "factorial(2)", "factorial(1)", "factorial(0)"]
    );

    // Each call's parent is the one before it.
    for (i, call) in run.trace.calls().iter().enumerate() {
        let expected = i.checked_sub(1).map(CallId);
        assert_eq!(call.parent_id, expected);
    }

    // Return values unwind innermost first: 1, 1, 2, 6
    let returns: Vec<&Value> = run
        .trace
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::End { return_value, .. } => Some(return_value),
            Event::Start { .. } => None,
        })
        .collect();
    assert_eq!(
        returns,
        vec![&Value::Int(1), &Value::Int(1), &Value::Int(2), &Value::Int(6)]
    );

    let tree = reconstruct(&run.trace, run.trace.len()).unwrap();
    let root = tree.node(CallId(0)).unwrap();
    assert_eq!(root.return_label.as_deref(), Some("6"));
    assert_eq!(run.trace.root().unwrap().return_value, Some(Value::Int(6)));
}

#[test]
fn test_fibonacci_three() {
    let run = Algorithm::Fibonacci.run(3);
    assert_eq!(run.outcome, Ok(Value::Int(2)));

    let signatures: Vec<String> = run.trace.calls().iter().map(|c| c.signature()).collect();
    assert_eq!(
        signatures,
        vec![
            "fibonacci(3)",
            "fibonacci(2)",
            "fibonacci(1)",
            "fibonacci(0)",
            "fibonacci(1)"
        ]
    );
}

#[test]
fn test_hanoi_two_disks() {
    let run = Algorithm::Hanoi.run(2);
    let len = run.trace.len();

    let labels: Vec<(Rod, Rod)> = moves(&run.trace, len)
        .unwrap()
        .into_iter()
        .map(|m| (m.from, m.to))
        .collect();
    assert_eq!(labels, vec![(Rod::A, Rod::B), (Rod::A, Rod::C), (Rod::B, Rod::C)]);

    let rods = reconstruct_rods(2, &run.trace, len).unwrap();
    assert_eq!(rods.rod(Rod::C), &[2, 1]);
    assert!(rods.rod(Rod::A).is_empty());
    assert!(rods.rod(Rod::B).is_empty());
}

#[test]
fn test_hanoi_intermediate_states() {
    let run = Algorithm::Hanoi.run(2);
    // Events: s0 s1 e1 s2 e2 e0
    let expect = [
        (0, vec![2, 1], vec![], vec![]),
        (1, vec![2, 1], vec![], vec![]),
        (2, vec![2, 1], vec![], vec![]),
        (3, vec![], vec![1], vec![2]),
        (4, vec![], vec![1], vec![2]),
        (5, vec![], vec![], vec![2, 1]),
        (6, vec![], vec![], vec![2, 1]),
    ];
    for (step, a, b, c) in expect {
        let rods = reconstruct_rods(2, &run.trace, step).unwrap();
        assert_eq!(rods.rod(Rod::A), a.as_slice(), "A at step {}", step);
        assert_eq!(rods.rod(Rod::B), b.as_slice(), "B at step {}", step);
        assert_eq!(rods.rod(Rod::C), c.as_slice(), "C at step {}", step);
    }
}

#[test]
fn test_hanoi_five_disks_solves() {
    let run = Algorithm::Hanoi.run(5);
    let all = moves(&run.trace, run.trace.len()).unwrap();
    assert_eq!(all.len(), 31);

    let rods = reconstruct_rods(5, &run.trace, run.trace.len()).unwrap();
    assert_eq!(rods.rod(Rod::C), &[5, 4, 3, 2, 1]);
}

// Recurses down to zero, but fails on the way back up from n == 2.
fn fragile(
    this: &Instrumented,
    session: &mut TraceSession,
    args: &[Value],
) -> Result<Value, AlgorithmError> {
    let n = int_arg(this.name(), args, 0)?;
    if n == 0 {
        return Ok(Value::Int(0));
    }
    this.call(session, vec![Value::Int(n - 1)])?;
    if n == 2 {
        return Err(AlgorithmError::InvalidArgument {
            function: this.name().to_string(),
            message: "two is unlucky".to_string(),
        });
    }
    Ok(Value::Int(n))
}

#[test]
fn test_error_path_unwinds_stack() {
    let fragile_fn = Instrumented::new("fragile", fragile);
    let mut session = TraceSession::new();
    let err = fragile_fn
        .call(&mut session, vec![Value::Int(4)])
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid argument to fragile(): two is unlucky");

    assert!(session.is_balanced());
    let trace = session.take();
    assert_eq!(start_count(trace.events()), trace.calls().len());
    assert_eq!(trace.events().len(), 2 * trace.calls().len());

    // fragile(2) is call #2; calls below it returned normally.
    let failing = trace.call(CallId(2)).unwrap();
    assert_eq!(
        failing.return_value,
        Some(Value::Error("invalid argument to fragile(): two is unlucky".to_string()))
    );
    assert_eq!(trace.call(CallId(3)).unwrap().return_value, Some(Value::Int(1)));

    // The partial trace still replays.
    let tree = reconstruct(&trace, trace.len()).unwrap();
    assert!(tree.active.is_empty());
    assert_eq!(tree.completed.len(), 5);
}

#[test]
fn test_factorial_overflow_trace_is_replayable() {
    let mut session = TraceSession::new();
    assert!(matches!(
        factorial(&mut session, 21),
        Err(AlgorithmError::Overflow { n: 21, .. })
    ));
    let trace = session.take();
    let tree = reconstruct(&trace, trace.len()).unwrap();
    let root = tree.node(CallId(0)).unwrap();
    assert_eq!(root.status, NodeStatus::Completed);
    assert_eq!(root.return_label.as_deref(), Some("Error: integer ov..."));
}

#[test]
fn test_runs_do_not_leak_into_each_other() {
    let mut session = TraceSession::new();
    let fib = Algorithm::Fibonacci.run_in(&mut session, 4);
    let fact = Algorithm::Factorial.run_in(&mut session, 2);

    assert_eq!(fib.trace.calls().len(), 9);
    assert_eq!(fact.trace.calls().len(), 3);
    assert!(fact
        .trace
        .calls()
        .iter()
        .all(|c| c.func_name == "factorial"));
    assert_eq!(fact.trace.root().map(|c| c.id), Some(CallId(0)));
}

#[test]
fn test_playback_walkthrough() {
    let mut playback = Playback::new(Algorithm::Factorial.run(2));
    let mut headlines = Vec::new();
    while playback.step_forward().is_ok() {
        let narrative = playback.narrative().unwrap().unwrap();
        headlines.push(narrative.headline);
    }
    assert_eq!(
        headlines,
        vec![
            "Calling factorial(2)",
            "Calling factorial(1)",
            "Calling factorial(0)",
            "Returning from factorial(0)",
            "Returning from factorial(1)",
            "Returning from factorial(2)",
        ]
    );

    let highlight = playback.highlight().unwrap();
    assert_eq!(highlight.comment, "n=2, returns 2 × factorial(1) = 2");
}
