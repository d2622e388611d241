//! The fixed demo algorithms
//!
//! - [`fibonacci`]: tree recursion with overlapping subproblems
//! - [`factorial`]: linear recursion
//! - [`hanoi`]: Tower of Hanoi, whose disk moves are inferred during replay
//! - [`listing`]: static source listings and per-event line highlighting
//!
//! Each algorithm is an [`Instrumented`] function; [`Algorithm::run`] traces
//! one invocation from a clean session and returns the resulting [`Run`].

pub mod factorial;
pub mod fibonacci;
pub mod hanoi;
pub mod listing;

use crate::errors::AlgorithmError;
use crate::trace::{Instrumented, Trace, TraceSession, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use tracing::info;

/// Which demo to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Fibonacci,
    Factorial,
    #[value(alias = "tower-of-hanoi")]
    Hanoi,
}

/// Educational blurb shown alongside an algorithm
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmInfo {
    pub description: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub insight: &'static str,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Fibonacci, Algorithm::Factorial, Algorithm::Hanoi];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fibonacci => "Fibonacci",
            Algorithm::Factorial => "Factorial",
            Algorithm::Hanoi => "Tower of Hanoi",
        }
    }

    pub fn instrumented(self) -> &'static Instrumented {
        match self {
            Algorithm::Fibonacci => &fibonacci::FIBONACCI,
            Algorithm::Factorial => &factorial::FACTORIAL,
            Algorithm::Hanoi => &hanoi::TOWER_OF_HANOI,
        }
    }

    pub fn info(self) -> AlgorithmInfo {
        match self {
            Algorithm::Fibonacci => AlgorithmInfo {
                description: "Calculates the nth number in the Fibonacci sequence, where each number is the sum of the two preceding ones.",
                time_complexity: "O(2ⁿ) (Exponential)",
                space_complexity: "O(n) (Stack depth)",
                insight: "Notice how the same values (e.g., fib(2)) are recalculated multiple times. This overlapping subproblems property is why dynamic programming is often preferred.",
            },
            Algorithm::Factorial => AlgorithmInfo {
                description: "Calculates the product of all positive integers less than or equal to n.",
                time_complexity: "O(n) (Linear)",
                space_complexity: "O(n) (Stack depth)",
                insight: "This is a linear recursion. The stack grows linearly with n until the base case (n=0) is reached, then unwinds.",
            },
            Algorithm::Hanoi => AlgorithmInfo {
                description: "Moves n disks from a source rod to a target rod using an auxiliary rod, following specific rules.",
                time_complexity: "O(2ⁿ) (Exponential)",
                space_complexity: "O(n) (Stack depth)",
                insight: "The problem is solved by moving n-1 disks to the auxiliary rod, moving the largest disk to the target, and then moving the n-1 disks from auxiliary to target.",
            },
        }
    }

    /// Inputs the front end offers. Advisory only: [`Algorithm::run`] accepts any n.
    pub fn input_range(self) -> RangeInclusive<i64> {
        match self {
            Algorithm::Fibonacci | Algorithm::Factorial => 0..=10,
            Algorithm::Hanoi => 1..=5,
        }
    }

    pub fn default_input(self) -> i64 {
        match self {
            Algorithm::Fibonacci => 4,
            Algorithm::Factorial => 5,
            Algorithm::Hanoi => 3,
        }
    }

    /// Warning for inputs that produce an unwieldy call tree
    pub fn warning(self, n: i64) -> Option<String> {
        match self {
            Algorithm::Fibonacci if n > 6 => Some(format!(
                "n={} will generate ~{} calls! The graph may be large.",
                n,
                fibonacci::call_count(n)
            )),
            Algorithm::Hanoi if n > 4 => Some(format!(
                "{} disks will require {} moves. The graph will be complex.",
                n,
                hanoi::move_count(n)
            )),
            _ => None,
        }
    }

    /// Positional arguments of the outermost call
    pub fn root_args(self, n: i64) -> Vec<Value> {
        match self {
            Algorithm::Fibonacci | Algorithm::Factorial => vec![Value::Int(n)],
            Algorithm::Hanoi => hanoi::hanoi_args(n, hanoi::SOURCE, hanoi::TARGET, hanoi::AUXILIARY),
        }
    }

    /// Trace one run in a fresh session
    pub fn run(self, n: i64) -> Run {
        self.run_in(&mut TraceSession::new(), n)
    }

    /// Trace one run in `session`, discarding whatever it held before
    pub fn run_in(self, session: &mut TraceSession, n: i64) -> Run {
        session.reset();
        let outcome = self.instrumented().call(session, self.root_args(n));
        let trace = session.take();

        match &outcome {
            Ok(value) => info!(
                algorithm = self.name(),
                n,
                calls = trace.calls().len(),
                events = trace.len(),
                "run returned {}",
                value
            ),
            Err(err) => info!(
                algorithm = self.name(),
                n,
                calls = trace.calls().len(),
                events = trace.len(),
                "run raised: {}",
                err
            ),
        }

        Run {
            algorithm: self,
            n,
            trace,
            outcome,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A finished, traced invocation of one algorithm
#[derive(Debug, Clone)]
pub struct Run {
    pub algorithm: Algorithm,
    pub n: i64,
    pub trace: Trace,
    /// Return value of the outermost call, or the error it raised
    pub outcome: Result<Value, AlgorithmError>,
}

/// Decode a recursive call's return value as an integer
pub(crate) fn returned_int(function: &str, value: Value) -> Result<i64, AlgorithmError> {
    value.as_int().ok_or_else(|| AlgorithmError::InvalidArgument {
        function: function.to_string(),
        message: format!("expected an integer result, got {}", value),
    })
}
