use std::str::FromStr;

use rust_decimal::Decimal;

use super::{scalar_clause, ParsingStrategy};
use crate::clause::Clause;
use crate::error::{ConversionError, Result};
use crate::op::Op;
use crate::path::FieldPath;
use crate::schema::ValueType;
use crate::value::TypedValue;

/// Signed 64-bit integer strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerStrategy;

impl ParsingStrategy for IntegerStrategy {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn parse(&self, raw: &str, _ty: &ValueType) -> std::result::Result<TypedValue, ConversionError> {
        Ok(TypedValue::Integer(raw.parse::<i64>()?))
    }

    fn build_predicate(&self, target: FieldPath, op: Op, value: TypedValue) -> Result<Clause> {
        scalar_clause(target, op, value, "Integer", Op::is_number_op)
    }
}

/// Exact decimal strategy; accepts plain and scientific notation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalStrategy;

impl ParsingStrategy for DecimalStrategy {
    fn name(&self) -> &'static str {
        "decimal"
    }

    fn parse(&self, raw: &str, _ty: &ValueType) -> std::result::Result<TypedValue, ConversionError> {
        let decimal = match Decimal::from_str(raw) {
            Ok(decimal) => decimal,
            Err(err) if raw.contains(['e', 'E']) => {
                Decimal::from_scientific(raw).map_err(|_| err)?
            }
            Err(err) => return Err(err.into()),
        };
        Ok(TypedValue::Decimal(decimal))
    }

    fn build_predicate(&self, target: FieldPath, op: Op, value: TypedValue) -> Result<Clause> {
        scalar_clause(target, op, value, "Decimal", Op::is_number_op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiftError;

    #[test]
    fn integer_parse() {
        let ty = ValueType::integer();
        assert_eq!(IntegerStrategy.parse("42", &ty).unwrap(), TypedValue::Integer(42));
        assert_eq!(IntegerStrategy.parse("-7", &ty).unwrap(), TypedValue::Integer(-7));
        assert!(IntegerStrategy.parse("abc", &ty).is_err());
        assert!(IntegerStrategy.parse("4.2", &ty).is_err());
        assert!(IntegerStrategy.parse("", &ty).is_err());
    }

    #[test]
    fn integer_list_parse() {
        let raw = vec!["1".to_string(), "2".to_string()];
        let value = IntegerStrategy.parse_list(&raw, &ValueType::integer()).unwrap();
        assert_eq!(
            value,
            TypedValue::List(vec![TypedValue::Integer(1), TypedValue::Integer(2)])
        );

        let raw = vec!["1".to_string(), "x".to_string()];
        assert!(IntegerStrategy.parse_list(&raw, &ValueType::integer()).is_err());
    }

    #[test]
    fn decimal_parse() {
        let ty = ValueType::decimal();
        assert_eq!(
            DecimalStrategy.parse("10.25", &ty).unwrap(),
            TypedValue::Decimal(Decimal::new(1025, 2))
        );
        assert_eq!(
            DecimalStrategy.parse("1.5e2", &ty).unwrap(),
            TypedValue::Decimal(Decimal::new(150, 0))
        );
        assert!(DecimalStrategy.parse("ten", &ty).is_err());
    }

    #[test]
    fn number_operators() {
        let target = FieldPath::field_only("age");
        let clause = IntegerStrategy
            .build_predicate(target.clone(), Op::Gte, TypedValue::Integer(18))
            .unwrap();
        assert_eq!(clause.op(), Op::Gte);

        let err = IntegerStrategy
            .build_predicate(target, Op::StartsWith, TypedValue::Integer(1))
            .unwrap_err();
        assert!(matches!(err, SiftError::InvalidOperator { kind: "Integer", .. }));
    }
}
