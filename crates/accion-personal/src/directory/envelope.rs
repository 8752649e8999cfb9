use serde_json::Value;
use tracing::warn;

/// Envelope shape the personnel API wrapped its roster in.
///
/// The upstream backend has shipped several response shapes over time; the
/// unwrap step makes the precedence explicit instead of duck-typing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterShape {
    Bare,
    Data,
    Users,
    Result,
    Unrecognized,
}

impl RosterShape {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bare => "bare",
            Self::Data => "data",
            Self::Users => "users",
            Self::Result => "result",
            Self::Unrecognized => "unrecognized",
        }
    }
}

const KEYED_SHAPES: [(RosterShape, &str); 3] = [
    (RosterShape::Data, "data"),
    (RosterShape::Users, "users"),
    (RosterShape::Result, "result"),
];

/// Unwrap the roster sequence from whichever envelope the backend used.
///
/// Precedence: a bare array, then the `data`, `users`, and `result` keys in
/// that order. Anything else is an unrecognized shape and maps to an empty
/// roster, logged for diagnosis.
pub fn unwrap_roster(value: Value) -> (RosterShape, Vec<Value>) {
    match value {
        Value::Array(items) => (RosterShape::Bare, items),
        Value::Object(mut map) => {
            for (shape, key) in KEYED_SHAPES {
                let Some(found) = map.remove(key) else {
                    continue;
                };
                return match found {
                    Value::Array(items) => (shape, items),
                    other => {
                        warn!(
                            key,
                            value_type = json_type(&other),
                            "roster key did not hold a sequence"
                        );
                        (RosterShape::Unrecognized, Vec::new())
                    }
                };
            }
            warn!(
                keys = %map.keys().cloned().collect::<Vec<_>>().join(","),
                "roster envelope had no recognized key"
            );
            (RosterShape::Unrecognized, Vec::new())
        }
        other => {
            warn!(value_type = json_type(&other), "roster body was not structured");
            (RosterShape::Unrecognized, Vec::new())
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
