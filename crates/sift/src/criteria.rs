//! Search criteria: one key/operator/value triple.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};
use crate::op::Op;

/// Separator between nested segments of a criterion key.
pub const PATH_SEPARATOR: char = '.';

/// Raw, unconverted criterion value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A single textual token.
    Single(String),
    /// An ordered sequence of textual tokens.
    List(Vec<String>),
}

impl RawValue {
    pub fn is_list(&self) -> bool {
        matches!(self, RawValue::List(_))
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Single(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Single(s)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(items: Vec<String>) -> Self {
        RawValue::List(items)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(items: Vec<&str>) -> Self {
        RawValue::List(items.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RawValue {
    fn from(items: [&str; N]) -> Self {
        RawValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Single(s) => f.write_str(s),
            RawValue::List(items) => write!(f, "{}", items.join(",")),
        }
    }
}

/// One search criterion: a dotted field path, an operator and a raw value.
///
/// # Example
///
/// ```
/// use sift::{Op, SearchCriteria};
///
/// let criteria = SearchCriteria::new("address.city", Op::Eq, "Paris").unwrap();
/// assert_eq!(criteria.prefix(), ["address"]);
/// assert_eq!(criteria.terminal(), "city");
///
/// assert!(SearchCriteria::new("address..city", Op::Eq, "Paris").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    key: String,
    operation: Op,
    value: RawValue,
}

impl SearchCriteria {
    /// Creates a criterion, rejecting empty keys and empty path segments.
    pub fn new(key: impl Into<String>, operation: Op, value: impl Into<RawValue>) -> Result<Self> {
        let key = key.into();
        if key.split(PATH_SEPARATOR).any(str::is_empty) {
            return Err(SiftError::InvalidKey(key));
        }
        Ok(SearchCriteria {
            key,
            operation,
            value: value.into(),
        })
    }

    /// Creates a criterion from an operator token such as `"gte"` or `">:"`.
    pub fn parse(key: impl Into<String>, operation: &str, value: impl Into<RawValue>) -> Result<Self> {
        SearchCriteria::new(key, operation.parse()?, value)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn operation(&self) -> Op {
        self.operation
    }

    pub fn value(&self) -> &RawValue {
        &self.value
    }

    /// All path segments, in order.
    pub fn segments(&self) -> Vec<&str> {
        self.key.split(PATH_SEPARATOR).collect()
    }

    /// Navigation prefix: every segment but the last.
    pub fn prefix(&self) -> Vec<&str> {
        let mut segments = self.segments();
        segments.pop();
        segments
    }

    /// Terminal field name: the last segment.
    pub fn terminal(&self) -> &str {
        match self.key.rsplit_once(PATH_SEPARATOR) {
            Some((_, terminal)) => terminal,
            None => &self.key,
        }
    }
}

impl fmt::Display for SearchCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.key, self.operation, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_prefix_and_terminal() {
        let criteria = SearchCriteria::new("a.b.c", Op::Eq, "x").unwrap();
        assert_eq!(criteria.segments(), ["a", "b", "c"]);
        assert_eq!(criteria.prefix(), ["a", "b"]);
        assert_eq!(criteria.terminal(), "c");
    }

    #[test]
    fn top_level_key_has_empty_prefix() {
        let criteria = SearchCriteria::new("name", Op::Eq, "x").unwrap();
        assert!(criteria.prefix().is_empty());
        assert_eq!(criteria.terminal(), "name");
    }

    #[test]
    fn rejects_empty_segments() {
        for key in ["", ".", "a.", ".a", "a..b"] {
            let err = SearchCriteria::new(key, Op::Eq, "x").unwrap_err();
            assert!(matches!(err, SiftError::InvalidKey(_)), "key {key:?}");
        }
    }

    #[test]
    fn parses_operator_token() {
        let criteria = SearchCriteria::parse("age", ">:", "18").unwrap();
        assert_eq!(criteria.operation(), Op::Gte);
        assert!(SearchCriteria::parse("age", "??", "18").is_err());
    }

    #[test]
    fn list_values() {
        let criteria = SearchCriteria::new("tags", Op::Eq, ["a", "b"]).unwrap();
        assert!(criteria.value().is_list());
        assert_eq!(criteria.to_string(), "tags:eq:a,b");
    }

    #[test]
    fn raw_value_deserializes_untagged() {
        let single: RawValue = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(single, RawValue::Single("x".into()));
        let list: RawValue = serde_json::from_str("[\"x\", \"y\"]").unwrap();
        assert_eq!(list, RawValue::from(vec!["x", "y"]));
    }
}
