use crate::errors::AlgorithmError;
use crate::trace::instrument::{expect_arity, int_arg, text_arg};
use crate::trace::{Instrumented, TraceSession, Value};

/// Traced `tower_of_hanoi(n, source, target, auxiliary)`.
///
/// The base case returns `"source->target"`. The recursive case moves
/// `n - 1` disks out of the way, moves disk `n` between its two recursive
/// calls, and returns `"Done"`. That middle move is not a call of its own;
/// replay infers it from call completion order.
pub const TOWER_OF_HANOI: Instrumented = Instrumented::new("tower_of_hanoi", body);

/// Rod labels used for a standard run: all disks start on `A` and end on `C`
pub const SOURCE: &str = "A";
pub const TARGET: &str = "C";
pub const AUXILIARY: &str = "B";

fn body(
    this: &Instrumented,
    session: &mut TraceSession,
    args: &[Value],
) -> Result<Value, AlgorithmError> {
    expect_arity(this.name(), args, 4)?;
    let n = int_arg(this.name(), args, 0)?;
    let source = text_arg(this.name(), args, 1)?;
    let target = text_arg(this.name(), args, 2)?;
    let auxiliary = text_arg(this.name(), args, 3)?;

    if n < 1 {
        return Err(AlgorithmError::InvalidArgument {
            function: this.name().to_string(),
            message: format!("need at least one disk, got {}", n),
        });
    }
    if n == 1 {
        return Ok(Value::Text(format!("{}->{}", source, target)));
    }

    this.call(session, hanoi_args(n - 1, source, auxiliary, target))?;
    this.call(session, hanoi_args(n - 1, auxiliary, target, source))?;
    Ok(Value::from("Done"))
}

/// Positional arguments for one `tower_of_hanoi` invocation
pub fn hanoi_args(n: i64, source: &str, target: &str, auxiliary: &str) -> Vec<Value> {
    vec![
        Value::Int(n),
        Value::from(source),
        Value::from(target),
        Value::from(auxiliary),
    ]
}

/// Run traced Tower of Hanoi into `session`, moving `n` disks from A to C
pub fn tower_of_hanoi(session: &mut TraceSession, n: i64) -> Result<(), AlgorithmError> {
    TOWER_OF_HANOI
        .call(session, hanoi_args(n, SOURCE, TARGET, AUXILIARY))
        .map(|_| ())
}

/// Number of disk moves needed for `n` disks
pub fn move_count(n: i64) -> u64 {
    if n < 1 {
        return 0;
    }
    u32::try_from(n)
        .ok()
        .and_then(|shift| 1u64.checked_shl(shift))
        .map_or(u64::MAX, |p| p - 1)
}
