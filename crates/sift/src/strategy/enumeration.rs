use super::{scalar_clause, ParsingStrategy};
use crate::clause::Clause;
use crate::error::{ConversionError, Result};
use crate::op::Op;
use crate::path::FieldPath;
use crate::schema::ValueType;
use crate::value::TypedValue;

/// Enumeration strategy: the raw token must be one of the declared variant
/// literals, matched exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationStrategy;

impl ParsingStrategy for EnumerationStrategy {
    fn name(&self) -> &'static str {
        "enumeration"
    }

    fn parse(&self, raw: &str, ty: &ValueType) -> std::result::Result<TypedValue, ConversionError> {
        ty.variants()
            .iter()
            .find(|variant| variant.as_str() == raw)
            .map(|variant| TypedValue::Enum(variant.clone()))
            .ok_or_else(|| ConversionError::UnknownVariant {
                literal: raw.to_string(),
                type_name: ty.name().to_string(),
            })
    }

    fn build_predicate(&self, target: FieldPath, op: Op, value: TypedValue) -> Result<Clause> {
        scalar_clause(target, op, value, "Enumeration", Op::is_enum_op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> ValueType {
        ValueType::enumeration("Status", ["ACTIVE", "ARCHIVED"])
    }

    #[test]
    fn parses_declared_variants() {
        assert_eq!(
            EnumerationStrategy.parse("ACTIVE", &status()).unwrap(),
            TypedValue::Enum("ACTIVE".into())
        );
    }

    #[test]
    fn unknown_literal_fails() {
        let err = EnumerationStrategy.parse("active", &status()).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::UnknownVariant { ref literal, ref type_name }
                if literal == "active" && type_name == "Status"
        ));
    }

    #[test]
    fn rejects_ordering_operators() {
        assert!(EnumerationStrategy
            .build_predicate(FieldPath::field_only("status"), Op::Lt, TypedValue::Enum("ACTIVE".into()))
            .is_err());
    }
}
