//! Call records and trace events

use super::value::Value;
use serde::Serialize;
use std::fmt;

/// Identifier of one recorded invocation.
///
/// Ids are dense and assigned in the order calls start, so the first call of
/// a run is always `CallId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CallId(pub usize);

impl CallId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Lifecycle of a call. `Completed` is terminal, including for calls that raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Running,
    Completed,
}

/// One invocation of an instrumented function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    pub id: CallId,
    pub parent_id: Option<CallId>,
    pub func_name: String,
    pub args: Vec<Value>,
    pub kwargs: Vec<(String, Value)>,
    pub return_value: Option<Value>,
    pub status: CallStatus,
}

impl Call {
    /// `func(arg, ..., key=value)` as shown in tree labels and narration
    pub fn signature(&self) -> String {
        let mut parts: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
        parts.extend(self.kwargs.iter().map(|(k, v)| format!("{}={}", k, v)));
        format!("{}({})", self.func_name, parts.join(", "))
    }

    pub fn is_completed(&self) -> bool {
        self.status == CallStatus::Completed
    }

    /// First positional argument as an integer (the `n` of every demo algorithm)
    pub fn n(&self) -> Option<i64> {
        self.args.first().and_then(Value::as_int)
    }
}

/// A single start or end notification in the event log
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Start { call_id: CallId },
    End { call_id: CallId, return_value: Value },
}

impl Event {
    pub fn call_id(&self) -> CallId {
        match self {
            Event::Start { call_id } => *call_id,
            Event::End { call_id, .. } => *call_id,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, Event::Start { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(args: Vec<Value>, kwargs: Vec<(String, Value)>) -> Call {
        Call {
            id: CallId(0),
            parent_id: None,
            func_name: "tower_of_hanoi".to_string(),
            args,
            kwargs,
            return_value: None,
            status: CallStatus::Running,
        }
    }

    #[test]
    fn signature_includes_kwargs_in_order() {
        let c = call(
            vec![Value::Int(2), Value::from("A")],
            vec![
                ("target".to_string(), Value::from("C")),
                ("auxiliary".to_string(), Value::from("B")),
            ],
        );
        assert_eq!(c.signature(), "tower_of_hanoi(2, A, target=C, auxiliary=B)");
    }

    #[test]
    fn signature_with_only_kwargs() {
        let c = call(Vec::new(), vec![("n".to_string(), Value::Int(1))]);
        assert_eq!(c.signature(), "tower_of_hanoi(n=1)");
        assert_eq!(c.n(), None);
    }

    #[test]
    fn event_json_is_tagged_by_type() {
        let json = serde_json::to_string(&Event::Start { call_id: CallId(3) }).unwrap();
        assert_eq!(json, r#"{"type":"start","call_id":3}"#);
    }

    #[test]
    fn ids_past_u32_keep_their_index() {
        let id = CallId((1usize << 32) + 1);
        assert_eq!(id.index(), 4_294_967_297);
        assert_eq!(id.to_string(), "4294967297");
        assert_eq!(format!("#{:<3}", CallId(7)), "#7  ");
    }
}
