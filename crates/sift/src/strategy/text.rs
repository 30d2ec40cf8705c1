use regex::RegexBuilder;

use super::{scalar_clause, ParsingStrategy};
use crate::clause::Clause;
use crate::error::{ConversionError, Result, SiftError};
use crate::op::Op;
use crate::path::FieldPath;
use crate::schema::ValueType;
use crate::value::TypedValue;

/// Text strategy: values pass through unchanged, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStrategy {
    case_sensitive: bool,
}

impl TextStrategy {
    pub fn new(case_sensitive: bool) -> Self {
        TextStrategy { case_sensitive }
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

impl Default for TextStrategy {
    fn default() -> Self {
        TextStrategy::new(true)
    }
}

impl ParsingStrategy for TextStrategy {
    fn name(&self) -> &'static str {
        if self.case_sensitive {
            "text"
        } else {
            "text-insensitive"
        }
    }

    fn parse(&self, raw: &str, _ty: &ValueType) -> std::result::Result<TypedValue, ConversionError> {
        Ok(TypedValue::Text(raw.to_string()))
    }

    fn build_predicate(&self, target: FieldPath, op: Op, value: TypedValue) -> Result<Clause> {
        if op == Op::Regex {
            if value.is_list() {
                return Err(SiftError::InvalidOperator { op, kind: "Text" });
            }
            let pattern = value.as_text().unwrap_or_default();
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(!self.case_sensitive)
                .build()?;
            return Ok(Clause::new(target, op, value)
                .with_regex(regex)
                .with_case_sensitive(self.case_sensitive));
        }

        scalar_clause(target, op, value, "Text", Op::is_text_op)
            .map(|clause| clause.with_case_sensitive(self.case_sensitive))
    }
}
