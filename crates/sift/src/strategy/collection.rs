use std::sync::Arc;

use super::ParsingStrategy;
use crate::clause::Clause;
use crate::error::{ConversionError, Result, SiftError};
use crate::op::Op;
use crate::path::FieldPath;
use crate::schema::{FieldShape, ValueType};
use crate::value::TypedValue;

/// Strategy for collection-shaped fields.
///
/// Wraps the element kind's strategy. Every input, single or multi-valued,
/// parses to a [`TypedValue::List`], and equality operators become set
/// membership: `Eq`/`In` match when the field holds any of the values,
/// `Ne`/`NotIn` when it holds none of them.
#[derive(Debug, Clone)]
pub struct CollectionStrategy {
    element: Arc<dyn ParsingStrategy>,
}

impl CollectionStrategy {
    pub fn new(element: Arc<dyn ParsingStrategy>) -> Self {
        CollectionStrategy { element }
    }

    /// The strategy used for each element.
    pub fn element(&self) -> &Arc<dyn ParsingStrategy> {
        &self.element
    }
}

impl ParsingStrategy for CollectionStrategy {
    fn name(&self) -> &'static str {
        "collection"
    }

    fn parse(&self, raw: &str, ty: &ValueType) -> std::result::Result<TypedValue, ConversionError> {
        self.element.parse(raw, ty).map(TypedValue::into_list)
    }

    fn parse_list(
        &self,
        raw: &[String],
        ty: &ValueType,
    ) -> std::result::Result<TypedValue, ConversionError> {
        self.element.parse_list(raw, ty)
    }

    fn build_predicate(&self, target: FieldPath, op: Op, value: TypedValue) -> Result<Clause> {
        let membership = op
            .as_membership()
            .ok_or(SiftError::InvalidOperator { op, kind: "Collection" })?;
        self.element
            .build_predicate(target, membership, value.into_list())
            .map(|clause| clause.with_shape(FieldShape::Collection))
    }
}
