use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::{scalar_clause, ParsingStrategy};
use crate::clause::Clause;
use crate::error::{ConversionError, Result};
use crate::op::Op;
use crate::path::FieldPath;
use crate::schema::ValueType;
use crate::value::{Timestamp, TypedValue};

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date/time strategy.
///
/// Accepts RFC 3339 instants, local date-times (`2024-03-01T12:30:00`,
/// optionally with fractional seconds or a space separator) and plain
/// dates. Values without an offset are read as UTC; dates as midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemporalStrategy;

impl TemporalStrategy {
    fn parse_timestamp(raw: &str) -> Option<Timestamp> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Timestamp::from(dt));
        }
        for format in DATE_TIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Timestamp::from(dt));
            }
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .map(Timestamp::from)
    }
}

impl ParsingStrategy for TemporalStrategy {
    fn name(&self) -> &'static str {
        "temporal"
    }

    fn parse(&self, raw: &str, _ty: &ValueType) -> std::result::Result<TypedValue, ConversionError> {
        TemporalStrategy::parse_timestamp(raw)
            .map(TypedValue::Temporal)
            .ok_or_else(|| ConversionError::Temporal(raw.to_string()))
    }

    fn build_predicate(&self, target: FieldPath, op: Op, value: TypedValue) -> Result<Clause> {
        scalar_clause(target, op, value, "Temporal", Op::is_temporal_op)
    }
}
