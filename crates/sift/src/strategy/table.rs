use std::sync::Arc;

use tracing::trace;

use super::{
    BooleanStrategy, CollectionStrategy, DecimalStrategy, EnumerationStrategy, IntegerStrategy,
    ParsingStrategy, TemporalStrategy, TextStrategy,
};
use crate::error::{Result, SiftError};
use crate::schema::{FieldShape, TypeHandle, ValueKind, ValueType};

/// Total mapping from value kind and shape to a strategy.
///
/// Built once and shared read-only. Every [`ValueKind`] has exactly one
/// scalar entry (text has one per case mode); collection-shaped fields get
/// the scalar entry wrapped in a [`CollectionStrategy`].
#[derive(Debug, Clone)]
pub struct StrategyTable {
    text: Arc<dyn ParsingStrategy>,
    text_insensitive: Arc<dyn ParsingStrategy>,
    integer: Arc<dyn ParsingStrategy>,
    decimal: Arc<dyn ParsingStrategy>,
    boolean: Arc<dyn ParsingStrategy>,
    temporal: Arc<dyn ParsingStrategy>,
    enumeration: Arc<dyn ParsingStrategy>,
}

/// A selected strategy together with the value type it converts to.
#[derive(Debug, Clone)]
pub struct Selected<'a> {
    pub strategy: Arc<dyn ParsingStrategy>,
    pub value_type: &'a ValueType,
}

impl Default for StrategyTable {
    fn default() -> Self {
        StrategyTable {
            text: Arc::new(TextStrategy::new(true)),
            text_insensitive: Arc::new(TextStrategy::new(false)),
            integer: Arc::new(IntegerStrategy),
            decimal: Arc::new(DecimalStrategy),
            boolean: Arc::new(BooleanStrategy),
            temporal: Arc::new(TemporalStrategy),
            enumeration: Arc::new(EnumerationStrategy),
        }
    }
}

impl StrategyTable {
    pub fn new() -> Self {
        StrategyTable::default()
    }

    /// Replaces the scalar strategy registered for `kind`.
    ///
    /// Registering a text strategy replaces both case modes.
    pub fn register(mut self, kind: ValueKind, strategy: Arc<dyn ParsingStrategy>) -> Self {
        match kind {
            ValueKind::Text => {
                self.text = Arc::clone(&strategy);
                self.text_insensitive = strategy;
            }
            ValueKind::Integer => self.integer = strategy,
            ValueKind::Decimal => self.decimal = strategy,
            ValueKind::Boolean => self.boolean = strategy,
            ValueKind::Temporal => self.temporal = strategy,
            ValueKind::Enumeration => self.enumeration = strategy,
        }
        self
    }

    /// The scalar strategy for a kind.
    pub fn scalar(&self, kind: ValueKind, case_sensitive: bool) -> &Arc<dyn ParsingStrategy> {
        match kind {
            ValueKind::Text if case_sensitive => &self.text,
            ValueKind::Text => &self.text_insensitive,
            ValueKind::Integer => &self.integer,
            ValueKind::Decimal => &self.decimal,
            ValueKind::Boolean => &self.boolean,
            ValueKind::Temporal => &self.temporal,
            ValueKind::Enumeration => &self.enumeration,
        }
    }

    /// Selects the strategy for a field of the declared type.
    ///
    /// A `custom` strategy takes precedence over the table entry. Either
    /// is wrapped in a [`CollectionStrategy`] when the field is
    /// collection-shaped. Entity and opaque types have no strategy and fail
    /// with [`SiftError::UnsupportedType`].
    pub fn select<'a>(
        &self,
        declared: &'a TypeHandle,
        field: &str,
        case_sensitive: bool,
        custom: Option<&Arc<dyn ParsingStrategy>>,
        shape: FieldShape,
    ) -> Result<Selected<'a>> {
        let value_type = declared
            .value_type()
            .ok_or_else(|| SiftError::UnsupportedType {
                field: field.to_string(),
                type_name: declared.type_name().to_string(),
            })?;

        let scalar = match custom {
            Some(strategy) => Arc::clone(strategy),
            None => Arc::clone(self.scalar(value_type.kind(), case_sensitive)),
        };
        let strategy: Arc<dyn ParsingStrategy> = match shape {
            FieldShape::Scalar => scalar,
            FieldShape::Collection => Arc::new(CollectionStrategy::new(scalar)),
        };

        trace!(
            field,
            kind = %value_type.kind(),
            ?shape,
            strategy = strategy.name(),
            "selected strategy"
        );
        Ok(Selected {
            strategy,
            value_type,
        })
    }
}
