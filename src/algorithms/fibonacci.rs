use super::returned_int;
use crate::errors::AlgorithmError;
use crate::trace::instrument::{expect_arity, int_arg};
use crate::trace::{Instrumented, TraceSession, Value};

/// Traced `fibonacci(n)`: `n` for `n <= 1`, otherwise `fib(n-1) + fib(n-2)`
pub const FIBONACCI: Instrumented = Instrumented::new("fibonacci", body);

fn body(
    this: &Instrumented,
    session: &mut TraceSession,
    args: &[Value],
) -> Result<Value, AlgorithmError> {
    expect_arity(this.name(), args, 1)?;
    let n = int_arg(this.name(), args, 0)?;
    if n <= 1 {
        return Ok(Value::Int(n));
    }

    let a = returned_int(this.name(), this.call(session, vec![Value::Int(n - 1)])?)?;
    let b = returned_int(this.name(), this.call(session, vec![Value::Int(n - 2)])?)?;
    a.checked_add(b)
        .map(Value::Int)
        .ok_or_else(|| AlgorithmError::Overflow {
            function: this.name().to_string(),
            n,
        })
}

/// Run traced Fibonacci into `session`
pub fn fibonacci(session: &mut TraceSession, n: i64) -> Result<i64, AlgorithmError> {
    let value = FIBONACCI.call(session, vec![Value::Int(n)])?;
    returned_int(FIBONACCI.name(), value)
}

/// Number of calls `fibonacci(n)` makes, computed without tracing
pub fn call_count(n: i64) -> u64 {
    if n <= 1 {
        return 1;
    }
    // calls(n) = 2 * fib(n + 1) - 1, saturating at u64::MAX
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..=n {
        if a == u64::MAX {
            break;
        }
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    a.checked_mul(2).map_or(u64::MAX, |twice| twice - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values() {
        let expected = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55];
        for (n, want) in expected.iter().enumerate() {
            let mut session = TraceSession::new();
            assert_eq!(fibonacci(&mut session, n as i64), Ok(*want));
            assert!(session.is_balanced());
        }
    }

    #[test]
    fn call_count_matches_trace() {
        for n in 0..=10 {
            let mut session = TraceSession::new();
            fibonacci(&mut session, n).unwrap();
            assert_eq!(session.calls().len() as u64, call_count(n), "n = {}", n);
        }
    }

    #[test]
    fn call_count_saturates_for_huge_n() {
        // fib(92) still fits twice over; fib(93) does not
        assert_eq!(call_count(91), 2 * 7_540_113_804_746_346_429 - 1);
        assert_eq!(call_count(92), u64::MAX);
        assert_eq!(call_count(i64::MAX), u64::MAX);
    }

    #[test]
    fn negative_input_is_a_base_case() {
        let mut session = TraceSession::new();
        assert_eq!(fibonacci(&mut session, -4), Ok(-4));
        assert_eq!(session.calls().len(), 1);
    }
}
