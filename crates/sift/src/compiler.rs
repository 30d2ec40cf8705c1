//! Predicate compilation.
//!
//! [`PredicateCompiler`] turns one [`SearchCriteria`] into one fragment of
//! the caller's [`QueryBuilder`]. Compilation is a pure, synchronous walk
//! over immutable schema metadata; a compiler can be shared across threads
//! and called concurrently.

use std::sync::Arc;

use tracing::debug;

use crate::builder::QueryBuilder;
use crate::config::SearchConfig;
use crate::criteria::SearchCriteria;
use crate::error::{Result, SiftError};
use crate::parse::parse_value;
use crate::path::{attribute_for, resolve};
use crate::schema::{EntitySchema, TypeHandle};
use crate::shape::field_shape;
use crate::strategy::StrategyTable;
use crate::traits::Searchable;

/// Compiles search criteria against a root entity schema.
///
/// # Example
///
/// ```
/// use sift::{ClauseBuilder, EntitySchema, Op, PredicateCompiler, SearchConfig, SearchCriteria, TypedValue};
///
/// let address = EntitySchema::builder("Address").text("city").build();
/// let person = EntitySchema::builder("Person")
///     .text("name")
///     .integer("age")
///     .entity("address", address)
///     .build();
///
/// let compiler = PredicateCompiler::new(person);
/// let criteria = SearchCriteria::parse("Address.City", "eq", "Paris").unwrap();
/// let clause = compiler
///     .compile(&criteria, &SearchConfig::default(), &ClauseBuilder)
///     .unwrap();
///
/// assert_eq!(clause.path().to_string(), "address.city");
/// assert_eq!(clause.op(), Op::Eq);
/// assert_eq!(clause.value(), &TypedValue::Text("Paris".into()));
/// ```
#[derive(Debug, Clone)]
pub struct PredicateCompiler {
    root: TypeHandle,
    strategies: Arc<StrategyTable>,
}

impl PredicateCompiler {
    /// Creates a compiler with the default strategy table.
    pub fn new(root: Arc<EntitySchema>) -> Self {
        PredicateCompiler {
            root: TypeHandle::Entity(root),
            strategies: Arc::new(StrategyTable::default()),
        }
    }

    /// Creates a compiler for a [`Searchable`] type.
    pub fn for_type<T: Searchable>() -> Self {
        PredicateCompiler::new(T::schema())
    }

    /// Replaces the strategy table.
    pub fn with_table(mut self, strategies: Arc<StrategyTable>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn root(&self) -> &TypeHandle {
        &self.root
    }

    pub fn strategies(&self) -> &StrategyTable {
        &self.strategies
    }

    /// Compiles one criterion into one fragment.
    ///
    /// # Errors
    ///
    /// - [`SiftError::FieldNotFound`] when any segment of the key does not
    ///   exist on its schema context
    /// - [`SiftError::BadInput`] when the value cannot be converted to the
    ///   field's type
    /// - [`SiftError::UnsupportedType`] when the field's type has no strategy
    /// - [`SiftError::InvalidOperator`] or [`SiftError::InvalidRegex`] when
    ///   the operator cannot be applied to the field
    pub fn compile<B>(
        &self,
        criteria: &SearchCriteria,
        config: &SearchConfig,
        builder: &B,
    ) -> Result<B::Fragment>
    where
        B: QueryBuilder + ?Sized,
    {
        let resolved = resolve(&self.root, criteria.key())?;
        let context = resolved.context();

        let attribute = attribute_for(context, resolved.terminal())?;
        let attribute_name = attribute
            .map(|attribute| attribute.name())
            .unwrap_or_else(|| resolved.terminal());

        // Only a structured context declares types for its fields.
        let declared = attribute
            .map(|attribute| attribute.declared())
            .ok_or_else(|| SiftError::field_not_found(attribute_name, context.type_name()))?;

        let shape = field_shape(context, attribute_name);
        let target = resolved.field_path(attribute_name);
        let field = target.to_string();
        let case_sensitive = config.case_sensitivity_for(&field, attribute);

        let selected =
            self.strategies
                .select(declared, &field, case_sensitive, config.strategy(), shape)?;
        let value = parse_value(
            selected.strategy.as_ref(),
            selected.value_type,
            &field,
            criteria.value(),
        )?;

        debug!(
            key = criteria.key(),
            field = %field,
            op = %criteria.operation(),
            strategy = selected.strategy.name(),
            ?shape,
            "compiled criterion"
        );

        let clause = selected
            .strategy
            .build_predicate(target, criteria.operation(), value)?;
        builder.build(clause)
    }

    /// Compiles each criterion in order, stopping at the first failure.
    ///
    /// Fragments are returned uncombined.
    pub fn compile_all<B>(
        &self,
        criteria: &[SearchCriteria],
        config: &SearchConfig,
        builder: &B,
    ) -> Result<Vec<B::Fragment>>
    where
        B: QueryBuilder + ?Sized,
    {
        criteria
            .iter()
            .map(|criterion| self.compile(criterion, config, builder))
            .collect()
    }
}
