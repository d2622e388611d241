use super::returned_int;
use crate::errors::AlgorithmError;
use crate::trace::instrument::{expect_arity, int_arg};
use crate::trace::{Instrumented, TraceSession, Value};

/// Traced `factorial(n)`: `1` for `n == 0`, otherwise `n * factorial(n-1)`
pub const FACTORIAL: Instrumented = Instrumented::new("factorial", body);

fn body(
    this: &Instrumented,
    session: &mut TraceSession,
    args: &[Value],
) -> Result<Value, AlgorithmError> {
    expect_arity(this.name(), args, 1)?;
    let n = int_arg(this.name(), args, 0)?;
    if n < 0 {
        return Err(AlgorithmError::NegativeInput {
            function: this.name().to_string(),
            n,
        });
    }
    if n == 0 {
        return Ok(Value::Int(1));
    }

    let rest = returned_int(this.name(), this.call(session, vec![Value::Int(n - 1)])?)?;
    // Overflow is raised by the call that multiplies, after its child returned.
    n.checked_mul(rest)
        .map(Value::Int)
        .ok_or_else(|| AlgorithmError::Overflow {
            function: this.name().to_string(),
            n,
        })
}

/// Run traced factorial into `session`
pub fn factorial(session: &mut TraceSession, n: i64) -> Result<i64, AlgorithmError> {
    let value = FACTORIAL.call(session, vec![Value::Int(n)])?;
    returned_int(FACTORIAL.name(), value)
}
