//! Value types for parsed criteria and runtime field comparison.
//!
//! [`TypedValue`] is what a strategy produces from raw criterion input.
//! [`Value`] is the runtime value of a field, borrowed from a record, that
//! compiled clauses are evaluated against.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A criterion value converted to the target field's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TypedValue {
    /// Text value, unchanged from input.
    Text(String),
    /// Signed integer value.
    Integer(i64),
    /// Exact decimal value.
    Decimal(Decimal),
    /// Boolean value.
    Boolean(bool),
    /// Instant in time.
    Temporal(Timestamp),
    /// Enumeration variant literal.
    Enum(String),
    /// Ordered sequence of typed values (multi-valued criterion).
    List(Vec<TypedValue>),
}

impl TypedValue {
    /// Returns `true` if this is a `List` value.
    pub fn is_list(&self) -> bool {
        matches!(self, TypedValue::List(_))
    }

    /// Returns the list items, if this is a `List` value.
    pub fn as_list(&self) -> Option<&[TypedValue]> {
        match self {
            TypedValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Extracts the text value, if present.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Wraps a single value into a one-element list; lists are returned unchanged.
    pub fn into_list(self) -> TypedValue {
        match self {
            TypedValue::List(_) => self,
            single => TypedValue::List(vec![single]),
        }
    }

    /// Borrows this value as a runtime [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            TypedValue::Text(s) => Value::Text(s),
            TypedValue::Integer(n) => Value::Integer(*n),
            TypedValue::Decimal(d) => Value::Decimal(*d),
            TypedValue::Boolean(b) => Value::Boolean(*b),
            TypedValue::Temporal(t) => Value::Temporal(*t),
            TypedValue::Enum(v) => Value::Enum(v),
            TypedValue::List(items) => Value::List(items.iter().map(TypedValue::as_value).collect()),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Text(s) | TypedValue::Enum(s) => write!(f, "{s}"),
            TypedValue::Integer(n) => write!(f, "{n}"),
            TypedValue::Decimal(d) => write!(f, "{d}"),
            TypedValue::Boolean(b) => write!(f, "{b}"),
            TypedValue::Temporal(t) => write!(f, "{t}"),
            TypedValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Runtime value of a record field, borrowed from the source struct.
///
/// Collection-shaped fields are exposed as `List`; nested entity fields are
/// reached by the accessor walking the path.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Text value (borrowed).
    Text(&'a str),
    /// Integer value.
    Integer(i64),
    /// Decimal value.
    Decimal(Decimal),
    /// Boolean value.
    Boolean(bool),
    /// Timestamp value.
    Temporal(Timestamp),
    /// Enumeration variant literal.
    Enum(&'a str),
    /// Values of a collection-shaped field.
    List(Vec<Value<'a>>),
    /// Field not present, null, or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this is a `List` value.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Extracts the text value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// This provides a simple, timezone-agnostic representation suitable
/// for comparison operations.
///
/// # Example
///
/// ```
/// use sift::Timestamp;
///
/// assert!(Timestamp(1000) < Timestamp(2000));
/// assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs * 1000)
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the timestamp as seconds since Unix epoch.
    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }

    /// Converts to a UTC date-time, if in range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Timestamp(dt.and_utc().timestamp_millis())
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Timestamp::from(date.and_time(NaiveTime::MIN))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
            None => write!(f, "{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_value_into_list() {
        let single = TypedValue::Integer(3).into_list();
        assert_eq!(single, TypedValue::List(vec![TypedValue::Integer(3)]));

        let list = TypedValue::List(vec![TypedValue::Boolean(true)]);
        assert_eq!(list.clone().into_list(), list);
    }

    #[test]
    fn typed_value_as_value() {
        let value = TypedValue::List(vec![TypedValue::Text("a".into()), TypedValue::Enum("B".into())]);
        assert_eq!(
            value.as_value(),
            Value::List(vec![Value::Text("a"), Value::Enum("B")])
        );
    }

    #[test]
    fn typed_value_display() {
        let value = TypedValue::List(vec![TypedValue::Integer(1), TypedValue::Integer(2)]);
        assert_eq!(value.to_string(), "[1, 2]");
        assert_eq!(TypedValue::Temporal(Timestamp(0)).to_string(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn timestamp_conversions() {
        assert_eq!(Timestamp::from_secs(1).as_millis(), 1000);
        assert_eq!(Timestamp::from_millis(5000).as_secs(), 5);

        let date = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(Timestamp::from(date), Timestamp(86_400_000));
    }

    #[test]
    fn timestamp_ordering() {
        assert!(Timestamp(1000) < Timestamp(2000));
        assert_eq!(Timestamp(1000), Timestamp(1000));
    }
}
