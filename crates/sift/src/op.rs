//! Comparison operators for search criteria.
//!
//! The [`Op`] enum defines all supported operator tokens, organized by
//! the value kinds they apply to. Not all operators are valid for all kinds.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::SiftError;

/// Operator token of a search criterion.
///
/// Operators are grouped by the kinds they support:
/// - **Universal**: `Eq`, `Ne`, `In`, `NotIn`
/// - **Text**: `StartsWith`, `EndsWith`, `Contains`, `Regex`
/// - **Ordered** (integer, decimal, temporal): `Gt`, `Gte`, `Lt`, `Lte`
/// - **Temporal aliases**: `Before` (alias for `Lt`), `After` (alias for `Gt`)
/// - **Boolean alias**: `Is` (alias for `Eq`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // Universal operators
    /// Equal (exact match).
    Eq,
    /// Not equal.
    Ne,

    // Text operators
    /// Text starts with prefix.
    StartsWith,
    /// Text ends with suffix.
    EndsWith,
    /// Text contains substring.
    Contains,
    /// Text matches regular expression.
    Regex,

    // Ordered comparison operators
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,

    // Temporal aliases
    /// Earlier than (alias for `Lt`).
    Before,
    /// Later than (alias for `Gt`).
    After,

    // Membership operators
    /// Value is one of the given set.
    In,
    /// Value is none of the given set.
    NotIn,

    /// Alias for `Eq` (reads naturally: `archived:is:true`).
    Is,
}

impl Op {
    /// Returns `true` if this operator is valid for text comparisons.
    pub fn is_text_op(self) -> bool {
        matches!(
            self,
            Op::Eq
                | Op::Ne
                | Op::StartsWith
                | Op::EndsWith
                | Op::Contains
                | Op::Regex
                | Op::In
                | Op::NotIn
        )
    }

    /// Returns `true` if this operator is valid for integer and decimal comparisons.
    pub fn is_number_op(self) -> bool {
        matches!(
            self,
            Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte | Op::In | Op::NotIn
        )
    }

    /// Returns `true` if this operator is valid for temporal comparisons.
    pub fn is_temporal_op(self) -> bool {
        self.is_number_op() || matches!(self, Op::Before | Op::After)
    }

    /// Returns `true` if this operator is valid for enumeration comparisons.
    pub fn is_enum_op(self) -> bool {
        matches!(self, Op::Eq | Op::Ne | Op::In | Op::NotIn)
    }

    /// Returns `true` if this operator is valid for boolean comparisons.
    pub fn is_bool_op(self) -> bool {
        matches!(self, Op::Eq | Op::Ne | Op::Is)
    }

    /// Returns `true` if this operator can be expressed as set membership.
    pub fn is_membership_op(self) -> bool {
        matches!(self, Op::Eq | Op::Ne | Op::Is | Op::In | Op::NotIn)
    }

    /// Normalizes aliases to their canonical form.
    ///
    /// - `Before` -> `Lt`
    /// - `After` -> `Gt`
    /// - `Is` -> `Eq`
    /// - Others unchanged
    pub fn normalize(self) -> Op {
        match self {
            Op::Before => Op::Lt,
            Op::After => Op::Gt,
            Op::Is => Op::Eq,
            other => other,
        }
    }

    /// Maps an operator onto its membership form.
    ///
    /// Equality becomes `In`, inequality becomes `NotIn`. Returns `None`
    /// for operators with no membership reading.
    pub fn as_membership(self) -> Option<Op> {
        match self.normalize() {
            Op::Eq | Op::In => Some(Op::In),
            Op::Ne | Op::NotIn => Some(Op::NotIn),
            _ => None,
        }
    }

    /// Evaluates a comparison given an ordering result.
    ///
    /// This is used for numeric and temporal comparisons where we have
    /// an `Ordering` from comparing two values.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self.normalize() {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false, // Not an ordering-based operator
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::StartsWith => "startswith",
            Op::EndsWith => "endswith",
            Op::Contains => "contains",
            Op::Regex => "regex",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::Before => "before",
            Op::After => "after",
            Op::In => "in",
            Op::NotIn => "notin",
            Op::Is => "is",
        }
    }
}

impl FromStr for Op {
    type Err = SiftError;

    /// Parses word tokens (`eq`, `gte`, ...) case-insensitively, plus the
    /// symbolic tokens used by `field:op:value` style query strings.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let op = match token.to_ascii_lowercase().as_str() {
            "eq" | ":" | "=" | "==" => Op::Eq,
            "ne" | "!" | "!=" | "<>" => Op::Ne,
            "startswith" | "starts_with" => Op::StartsWith,
            "endswith" | "ends_with" => Op::EndsWith,
            "contains" | "like" => Op::Contains,
            "regex" | "~" => Op::Regex,
            "gt" | ">" => Op::Gt,
            "gte" | "ge" | ">=" | ">:" => Op::Gte,
            "lt" | "<" => Op::Lt,
            "lte" | "le" | "<=" | "<:" => Op::Lte,
            "before" => Op::Before,
            "after" => Op::After,
            "in" => Op::In,
            "notin" | "not_in" | "nin" => Op::NotIn,
            "is" => Op::Is,
            _ => return Err(SiftError::UnknownOperator(token.to_string())),
        };
        Ok(op)
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
