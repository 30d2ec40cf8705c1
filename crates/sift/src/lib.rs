//! Sift - compiles search criteria into typed predicates.
//!
//! A search criterion is a flat `key`/`operator`/`value` triple such as
//! `address.city:eq:Paris`. Sift resolves the dotted key through a
//! described entity schema, finds the target field's declared type and
//! shape (scalar or collection), picks a type-specific parsing strategy,
//! converts the raw value and emits one predicate fragment through a
//! caller-supplied [`QueryBuilder`].
//!
//! # Quick Start
//!
//! ```rust
//! use sift::{
//!     EntitySchema, Op, PredicateCompiler, SearchConfig, SearchCriteria, SqlBuilder, TypedValue,
//! };
//!
//! let address = EntitySchema::builder("Address").text("city").build();
//! let person = EntitySchema::builder("Person")
//!     .text("name")
//!     .integer("age")
//!     .entity("address", address)
//!     .build();
//!
//! let compiler = PredicateCompiler::new(person);
//! let config = SearchConfig::new().case_insensitive();
//!
//! let criteria = SearchCriteria::parse("address.city", ":", "Paris").unwrap();
//! let fragment = compiler.compile(&criteria, &config, &SqlBuilder).unwrap();
//! assert_eq!(fragment.sql, "LOWER(\"address\".\"city\") = ?");
//! assert_eq!(fragment.params, vec![TypedValue::Text("paris".into())]);
//!
//! let criteria = SearchCriteria::new("AGE", Op::Gt, "30").unwrap();
//! let fragment = compiler.compile(&criteria, &config, &SqlBuilder).unwrap();
//! assert_eq!(fragment.sql, "\"age\" > ?");
//! ```
//!
//! # Compilation Steps
//!
//! 1. Split the key on `.` into a navigation prefix and a terminal field.
//! 2. Walk the prefix through nested schemas ([`resolve`]).
//! 3. Look up the terminal attribute, matching names case-insensitively.
//! 4. Take the field's declared type.
//! 5. Classify the field as scalar or collection ([`field_shape`]).
//! 6. Select a strategy from the [`StrategyTable`].
//! 7. Convert the raw value ([`parse_value`]).
//! 8. Build the [`Clause`] and hand it to the builder.
//!
//! # Field Kinds and Operators
//!
//! | Kind | Operators |
//! |------|-----------|
//! | Text | `Eq`, `Ne`, `StartsWith`, `EndsWith`, `Contains`, `Regex`, `In`, `NotIn` |
//! | Integer, Decimal | `Eq`, `Ne`, `Gt`, `Gte`, `Lt`, `Lte`, `In`, `NotIn` |
//! | Temporal | as numbers, plus `Before`, `After` |
//! | Enumeration | `Eq`, `Ne`, `In`, `NotIn` |
//! | Boolean | `Eq`, `Ne`, `Is`, `In`, `NotIn` |
//! | Collection of any kind | `Eq`/`In` (any of), `Ne`/`NotIn` (none of) |
//!
//! # Errors
//!
//! Every failure is a [`SiftError`]. [`SiftError::status`] classifies it
//! the way an HTTP surface would report it: unknown fields are
//! unprocessable, malformed input is a bad request and types with no
//! strategy are internal errors.

mod builder;
mod clause;
mod compiler;
mod config;
mod criteria;
mod error;
mod op;
mod parse;
mod path;
mod schema;
mod shape;
pub mod strategy;
mod traits;
mod value;

// Re-export public API
pub use builder::{ClauseBuilder, MemoryBuilder, QueryBuilder, RecordPredicate, SqlBuilder, SqlFragment};
pub use clause::Clause;
pub use compiler::PredicateCompiler;
pub use config::{FieldConfig, SearchConfig};
pub use criteria::{RawValue, SearchCriteria, PATH_SEPARATOR};
pub use error::{ConversionError, Result, SiftError, Status};
pub use op::Op;
pub use parse::parse_value;
pub use path::{attribute_for, resolve, FieldPath, ResolvedPath};
pub use schema::{
    Attribute, Container, EntitySchema, EntitySchemaBuilder, FieldShape, RawField,
    SchemaDescriptor, TypeHandle, ValueKind, ValueType,
};
pub use shape::{field_shape, is_collection_shaped};
pub use strategy::{ParsingStrategy, StrategyTable};
pub use traits::{
    optional_value, SearchDecimal, SearchEnum, SearchInteger, SearchTimestamp, Searchable,
};
pub use value::{Timestamp, TypedValue, Value};
