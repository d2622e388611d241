//! Static source listings with per-event line highlighting
//!
//! Each algorithm ships a fixed listing of its body. A start event points at
//! the base-case check; an end event points at whichever `return` produced
//! the value, with a short comment explaining it.

use super::Algorithm;
use crate::trace::{Call, Event, Value};

/// Source listing of one algorithm, with the line indices events map onto
#[derive(Debug, Clone, Copy)]
pub struct Listing {
    pub lines: &'static [&'static str],
    pub base_check: usize,
    pub base_return: usize,
    pub recursive_return: usize,
}

/// Line to highlight for one event, with an explanatory comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// 0-based index into [`Listing::lines`]
    pub line: usize,
    pub comment: String,
}

const FIBONACCI: Listing = Listing {
    lines: &[
        "fn fibonacci(n: i64) -> i64 {",
        "    if n <= 1 {",
        "        return n;",
        "    }",
        "    fibonacci(n - 1) + fibonacci(n - 2)",
        "}",
    ],
    base_check: 1,
    base_return: 2,
    recursive_return: 4,
};

const FACTORIAL: Listing = Listing {
    lines: &[
        "fn factorial(n: i64) -> i64 {",
        "    if n == 0 {",
        "        return 1;",
        "    }",
        "    n * factorial(n - 1)",
        "}",
    ],
    base_check: 1,
    base_return: 2,
    recursive_return: 4,
};

const TOWER_OF_HANOI: Listing = Listing {
    lines: &[
        "fn tower_of_hanoi(n: i64, source: &str, target: &str, auxiliary: &str) -> String {",
        "    if n == 1 {",
        "        return format!(\"{source}->{target}\");",
        "    }",
        "    tower_of_hanoi(n - 1, source, auxiliary, target);",
        "    // disk n moves from source to target here",
        "    tower_of_hanoi(n - 1, auxiliary, target, source);",
        "    \"Done\".to_string()",
        "}",
    ],
    base_check: 1,
    base_return: 2,
    recursive_return: 7,
};

impl Algorithm {
    pub fn listing(self) -> &'static Listing {
        match self {
            Algorithm::Fibonacci => &FIBONACCI,
            Algorithm::Factorial => &FACTORIAL,
            Algorithm::Hanoi => &TOWER_OF_HANOI,
        }
    }

    /// Which listing line `event` corresponds to, for the call it belongs to
    pub fn highlight(self, event: &Event, call: &Call) -> Highlight {
        let listing = self.listing();
        let n = call.n().unwrap_or(0);

        let return_value = match event {
            Event::Start { .. } => {
                return Highlight {
                    line: listing.base_check,
                    comment: format!("n={}, checking base case", n),
                };
            }
            Event::End { return_value, .. } => return_value,
        };

        if return_value.is_error() {
            return Highlight {
                line: listing.recursive_return,
                comment: format!("n={}, raised {}", n, return_value),
            };
        }

        match self {
            Algorithm::Fibonacci if n <= 1 => Highlight {
                line: listing.base_return,
                comment: format!("n={}, base case! Returns {}", n, return_value),
            },
            Algorithm::Fibonacci => Highlight {
                line: listing.recursive_return,
                comment: format!(
                    "n={}, returns fib({}) + fib({}) = {}",
                    n,
                    n - 1,
                    n - 2,
                    return_value
                ),
            },
            Algorithm::Factorial if n == 0 => Highlight {
                line: listing.base_return,
                comment: "n=0, base case! Returns 1".to_string(),
            },
            Algorithm::Factorial => Highlight {
                line: listing.recursive_return,
                comment: format!(
                    "n={}, returns {} × factorial({}) = {}",
                    n,
                    n,
                    n - 1,
                    return_value
                ),
            },
            Algorithm::Hanoi if n == 1 => {
                let rod = |i: usize| call.args.get(i).map_or("?".to_string(), Value::to_string);
                Highlight {
                    line: listing.base_return,
                    comment: format!("n=1, base case! Move disk {}→{}", rod(1), rod(2)),
                }
            }
            Algorithm::Hanoi => Highlight {
                line: listing.recursive_return,
                comment: format!("n={}, all recursive moves complete", n),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{CallId, CallStatus};

    fn call(func: &str, args: Vec<Value>) -> Call {
        Call {
            id: CallId(0),
            parent_id: None,
            func_name: func.to_string(),
            args,
            kwargs: Vec::new(),
            return_value: None,
            status: CallStatus::Completed,
        }
    }

    fn end(value: Value) -> Event {
        Event::End {
            call_id: CallId(0),
            return_value: value,
        }
    }

    #[test]
    fn start_points_at_base_check() {
        let c = call("fibonacci", vec![Value::Int(3)]);
        let h = Algorithm::Fibonacci.highlight(&Event::Start { call_id: CallId(0) }, &c);
        assert_eq!(h.line, 1);
        assert_eq!(h.comment, "n=3, checking base case");
        assert_eq!(Algorithm::Fibonacci.listing().lines[h.line].trim(), "if n <= 1 {");
    }

    #[test]
    fn fibonacci_recursive_return() {
        let c = call("fibonacci", vec![Value::Int(3)]);
        let h = Algorithm::Fibonacci.highlight(&end(Value::Int(2)), &c);
        assert_eq!(h.line, 4);
        assert_eq!(h.comment, "n=3, returns fib(2) + fib(1) = 2");
    }

    #[test]
    fn factorial_base_case() {
        let c = call("factorial", vec![Value::Int(0)]);
        let h = Algorithm::Factorial.highlight(&end(Value::Int(1)), &c);
        assert_eq!(h.line, 2);
        assert_eq!(h.comment, "n=0, base case! Returns 1");
    }

    #[test]
    fn hanoi_base_case_names_rods() {
        let c = call(
            "tower_of_hanoi",
            vec![Value::Int(1), Value::from("A"), Value::from("C"), Value::from("B")],
        );
        let h = Algorithm::Hanoi.highlight(&end(Value::from("A->C")), &c);
        assert_eq!(h.line, 2);
        assert_eq!(h.comment, "n=1, base case! Move disk A→C");

        let h = Algorithm::Hanoi.highlight(
            &end(Value::from("Done")),
            &call("tower_of_hanoi", vec![Value::Int(2)]),
        );
        assert_eq!(h.line, 7);
        assert_eq!(h.comment, "n=2, all recursive moves complete");
    }

    #[test]
    fn error_return_is_explained() {
        let c = call("factorial", vec![Value::Int(21)]);
        let h = Algorithm::Factorial.highlight(
            &end(Value::Error("integer overflow in factorial(21)".to_string())),
            &c,
        );
        assert_eq!(
            h.comment,
            "n=21, raised Error: integer overflow in factorial(21)"
        );
    }
}
