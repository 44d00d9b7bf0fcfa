// File: src/request/value.rs
// Purpose: Values accepted by query parameters and headers

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::ValueError;

type Producer = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// A query parameter or header value, coerced to text when a request is built
#[derive(Clone)]
pub enum Value {
    Null,
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// Rendered as RFC 3339 in UTC (`2022-11-08T12:13:14Z`)
    Time(DateTime<Utc>),
    Json(serde_json::Value),
    /// Computed when coerced; `None` means no text could be produced
    Lazy(Producer),
    /// A value that has no text form
    Unknown,
}

impl Value {
    /// A value computed at coercion time
    pub fn lazy(producer: impl Fn() -> Option<String> + Send + Sync + 'static) -> Self {
        Value::Lazy(Arc::new(producer))
    }

    /// Any serializable value, carried as JSON
    ///
    /// A value that fails to serialize becomes [`Value::Unknown`].
    pub fn serialized<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Value::Json(json),
            Err(err) => {
                tracing::debug!(%err, "value failed to serialize");
                Value::Unknown
            }
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text form of the value; `Ok(None)` for [`Value::Null`]
    pub fn coerce(&self) -> Result<Option<String>, ValueError> {
        let text = match self {
            Value::Null => return Ok(None),
            Value::String(s) => s.clone(),
            Value::Int(n) => n.to_string(),
            Value::UInt(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Time(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::Json(json) => json_text(json)?,
            Value::Lazy(producer) => producer().ok_or(ValueError::UnknownValueType)?,
            Value::Unknown => return Err(ValueError::UnknownValueType),
        };
        Ok(Some(text))
    }

    /// Text form of the value, treating null as an error
    pub fn to_text(&self) -> Result<String, ValueError> {
        self.coerce()?.ok_or(ValueError::UnknownValueType)
    }
}

fn json_text(json: &serde_json::Value) -> Result<String, ValueError> {
    match json {
        serde_json::Value::Null => Err(ValueError::UnknownValueType),
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => serde_json::to_string(other).map_err(|_| ValueError::UnknownValueType),
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::UInt(n) => f.debug_tuple("UInt").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Time(dt) => f.debug_tuple("Time").field(dt).finish(),
            Value::Json(json) => f.debug_tuple("Json").field(json).finish(),
            Value::Lazy(_) => write!(f, "Lazy(..)"),
            Value::Unknown => write!(f, "Unknown"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Unknown, Value::Unknown) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Json(a), Value::Json(b)) => a == b,
            (Value::Lazy(a), Value::Lazy(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

macro_rules! from_int {
    ($variant:ident, $target:ty, $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::$variant(n as $target)
                }
            }
        )+
    };
}

from_int!(Int, i64, i8, i16, i32, i64, isize);
from_int!(UInt, u64, u8, u16, u32, u64, usize);

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::Time(dt)
    }
}

impl From<&DateTime<Utc>> for Value {
    fn from(dt: &DateTime<Utc>) -> Self {
        Value::Time(*dt)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::Json(json)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
