use super::{scalar_clause, ParsingStrategy};
use crate::clause::Clause;
use crate::error::{ConversionError, Result};
use crate::op::Op;
use crate::path::FieldPath;
use crate::schema::ValueType;
use crate::value::TypedValue;

/// Boolean strategy. Accepts `true/false`, `yes/no` and `1/0`, ignoring case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanStrategy;

impl ParsingStrategy for BooleanStrategy {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn parse(&self, raw: &str, _ty: &ValueType) -> std::result::Result<TypedValue, ConversionError> {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(TypedValue::Boolean(true)),
            "false" | "no" | "0" => Ok(TypedValue::Boolean(false)),
            _ => Err(ConversionError::Boolean(raw.to_string())),
        }
    }

    fn build_predicate(&self, target: FieldPath, op: Op, value: TypedValue) -> Result<Clause> {
        scalar_clause(target, op, value, "Boolean", |op| {
            op.is_bool_op() || op.is_membership_op()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literals() {
        let ty = ValueType::boolean();
        for raw in ["true", "TRUE", "yes", "1"] {
            assert_eq!(BooleanStrategy.parse(raw, &ty).unwrap(), TypedValue::Boolean(true));
        }
        for raw in ["false", "No", "0"] {
            assert_eq!(BooleanStrategy.parse(raw, &ty).unwrap(), TypedValue::Boolean(false));
        }
        assert!(BooleanStrategy.parse("maybe", &ty).is_err());
    }

    #[test]
    fn is_alias_accepted() {
        let clause = BooleanStrategy
            .build_predicate(FieldPath::field_only("active"), Op::Is, TypedValue::Boolean(true))
            .unwrap();
        assert_eq!(clause.op(), Op::Is);
        assert!(BooleanStrategy
            .build_predicate(FieldPath::field_only("active"), Op::Gt, TypedValue::Boolean(true))
            .is_err());
    }
}
