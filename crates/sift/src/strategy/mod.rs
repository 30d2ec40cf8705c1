//! Type-specific parsing and predicate strategies.
//!
//! A [`ParsingStrategy`] converts raw criterion input into a
//! [`TypedValue`] of its kind and turns a typed value plus an operator into
//! a [`Clause`]. The built-in strategies cover every [`ValueKind`]; the
//! [`StrategyTable`] maps a field's kind and shape onto one of them.
//!
//! [`ValueKind`]: crate::ValueKind

use std::fmt;

use crate::clause::Clause;
use crate::error::{ConversionError, Result, SiftError};
use crate::op::Op;
use crate::path::FieldPath;
use crate::schema::ValueType;
use crate::value::TypedValue;

mod boolean;
mod collection;
mod enumeration;
mod number;
mod table;
mod temporal;
mod text;

pub use boolean::BooleanStrategy;
pub use collection::CollectionStrategy;
pub use enumeration::EnumerationStrategy;
pub use number::{DecimalStrategy, IntegerStrategy};
pub use table::{Selected, StrategyTable};
pub use temporal::TemporalStrategy;
pub use text::TextStrategy;

/// Conversion and predicate-construction logic for one value kind.
///
/// Implementations are stateless apart from configuration fixed at
/// construction, and are shared across threads.
pub trait ParsingStrategy: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Converts a single raw token.
    fn parse(&self, raw: &str, ty: &ValueType) -> std::result::Result<TypedValue, ConversionError>;

    /// Converts a sequence of raw tokens into a [`TypedValue::List`].
    fn parse_list(
        &self,
        raw: &[String],
        ty: &ValueType,
    ) -> std::result::Result<TypedValue, ConversionError> {
        raw.iter()
            .map(|token| self.parse(token, ty))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(TypedValue::List)
    }

    /// Builds the clause for `target` from an operator and a parsed value.
    fn build_predicate(&self, target: FieldPath, op: Op, value: TypedValue) -> Result<Clause>;
}

/// Builds a clause for a scalar strategy.
///
/// List values turn equality operators into membership (`In`/`NotIn`);
/// membership operators given a single value get a one-element set. Any
/// other operator must pass `valid`.
pub(crate) fn scalar_clause(
    target: FieldPath,
    op: Op,
    value: TypedValue,
    kind: &'static str,
    valid: fn(Op) -> bool,
) -> Result<Clause> {
    let membership = matches!(op, Op::In | Op::NotIn) || value.is_list();
    if membership {
        let op = match op.as_membership() {
            Some(op) if valid(op) => op,
            _ => return Err(SiftError::InvalidOperator { op, kind }),
        };
        return Ok(Clause::new(target, op, value.into_list()));
    }

    if !valid(op) {
        return Err(SiftError::InvalidOperator { op, kind });
    }
    Ok(Clause::new(target, op, value))
}
