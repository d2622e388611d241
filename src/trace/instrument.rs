//! Higher-order instrumentation of recursive functions
//!
//! An [`Instrumented`] pairs a function name with a body. Calling it records
//! a start event, runs the body, and records an end event whatever the body
//! returns. The body receives the wrapper itself, so recursive invocations go
//! through the same bracketing.

use super::session::TraceSession;
use super::value::Value;
use crate::errors::AlgorithmError;
use std::fmt;

/// Signature of an instrumented function body
pub type Body = fn(&Instrumented, &mut TraceSession, &[Value]) -> Result<Value, AlgorithmError>;

/// A named recursive function whose every invocation is traced
#[derive(Clone, Copy)]
pub struct Instrumented {
    name: &'static str,
    body: Body,
}

impl Instrumented {
    pub const fn new(name: &'static str, body: Body) -> Self {
        Instrumented { name, body }
    }

    /// Name the function was registered under
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invoke with positional arguments only
    pub fn call(
        &self,
        session: &mut TraceSession,
        args: Vec<Value>,
    ) -> Result<Value, AlgorithmError> {
        self.call_with(session, args, Vec::new())
    }

    /// Invoke with positional and named arguments.
    ///
    /// Named arguments are recorded for display only; the body sees the
    /// positional list.
    pub fn call_with(
        &self,
        session: &mut TraceSession,
        args: Vec<Value>,
        kwargs: Vec<(String, Value)>,
    ) -> Result<Value, AlgorithmError> {
        session.start_call(self.name, args.clone(), kwargs);
        match (self.body)(self, session, &args) {
            Ok(value) => {
                session.end_call(value.clone());
                Ok(value)
            }
            Err(err) => {
                session.end_call(Value::error(&err));
                Err(err)
            }
        }
    }
}

impl fmt::Debug for Instrumented {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrumented")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Positional argument `index` as an integer
pub fn int_arg(function: &str, args: &[Value], index: usize) -> Result<i64, AlgorithmError> {
    match args.get(index) {
        Some(Value::Int(n)) => Ok(*n),
        Some(other) => Err(AlgorithmError::ArgumentType {
            function: function.to_string(),
            index,
            expected: "int",
            got: other.type_name().to_string(),
        }),
        None => Err(AlgorithmError::ArgumentCount {
            function: function.to_string(),
            expected: index + 1,
            got: args.len(),
        }),
    }
}

/// Positional argument `index` as text
pub fn text_arg<'a>(
    function: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a str, AlgorithmError> {
    match args.get(index) {
        Some(Value::Text(s)) => Ok(s),
        Some(other) => Err(AlgorithmError::ArgumentType {
            function: function.to_string(),
            index,
            expected: "text",
            got: other.type_name().to_string(),
        }),
        None => Err(AlgorithmError::ArgumentCount {
            function: function.to_string(),
            expected: index + 1,
            got: args.len(),
        }),
    }
}

/// Reject calls with the wrong number of positional arguments
pub fn expect_arity(function: &str, args: &[Value], expected: usize) -> Result<(), AlgorithmError> {
    if args.len() != expected {
        return Err(AlgorithmError::ArgumentCount {
            function: function.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}
