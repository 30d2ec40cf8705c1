//! Raw value conversion with uniform error reporting.

use tracing::debug;

use crate::criteria::RawValue;
use crate::error::{Result, SiftError};
use crate::schema::ValueType;
use crate::strategy::ParsingStrategy;
use crate::value::TypedValue;

/// Converts a raw criterion value with the selected strategy.
///
/// Single tokens go through [`ParsingStrategy::parse`], sequences through
/// [`ParsingStrategy::parse_list`]. Any conversion failure becomes
/// [`SiftError::BadInput`] naming the field and the expected type; the
/// underlying error is logged and kept as the error's source.
pub fn parse_value(
    strategy: &dyn ParsingStrategy,
    value_type: &ValueType,
    field: &str,
    raw: &RawValue,
) -> Result<TypedValue> {
    let parsed = match raw {
        RawValue::Single(token) => strategy.parse(token, value_type),
        RawValue::List(tokens) => strategy.parse_list(tokens, value_type),
    };

    parsed.map_err(|source| {
        debug!(
            field,
            expected = value_type.name(),
            strategy = strategy.name(),
            error = %source,
            "value conversion failed"
        );
        SiftError::BadInput {
            field: field.to_string(),
            expected: value_type.name().to_string(),
            source,
        }
    })
}
