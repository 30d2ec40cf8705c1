//! Query builders: sinks that lower compiled clauses into fragments.
//!
//! The compiler hands each [`Clause`] to a [`QueryBuilder`], which owns the
//! representation of the resulting fragment. Three builders ship with the
//! crate:
//!
//! - [`ClauseBuilder`] returns the clause unchanged
//! - [`MemoryBuilder`] returns a predicate closure over [`Searchable`] records
//! - [`SqlBuilder`] returns a parameterised SQL condition

use std::fmt;
use std::marker::PhantomData;

use crate::clause::Clause;
use crate::error::{Result, SiftError};
use crate::op::Op;
use crate::traits::Searchable;
use crate::value::TypedValue;

/// Sink turning compiled clauses into predicate fragments.
pub trait QueryBuilder {
    /// Fragment produced for one criterion.
    type Fragment;

    fn build(&self, clause: Clause) -> Result<Self::Fragment>;
}

/// Builder whose fragments are the clauses themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClauseBuilder;

impl QueryBuilder for ClauseBuilder {
    type Fragment = Clause;

    fn build(&self, clause: Clause) -> Result<Clause> {
        Ok(clause)
    }
}

/// Predicate over in-memory records.
pub type RecordPredicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Builder producing closures that evaluate a clause against records.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sift::{
///     EntitySchema, MemoryBuilder, Op, PredicateCompiler, SearchConfig, SearchCriteria,
///     Searchable, Value,
/// };
///
/// struct Book {
///     title: String,
///     pages: i64,
/// }
///
/// impl Searchable for Book {
///     fn schema() -> Arc<EntitySchema> {
///         EntitySchema::builder("Book").text("title").integer("pages").build()
///     }
///
///     fn search_value(&self, path: &[&str]) -> Value<'_> {
///         match path {
///             ["title"] => Value::Text(&self.title),
///             ["pages"] => Value::Integer(self.pages),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let compiler = PredicateCompiler::for_type::<Book>();
/// let criteria = SearchCriteria::parse("Pages", "gt", "300").unwrap();
/// let predicate = compiler
///     .compile(&criteria, &SearchConfig::default(), &MemoryBuilder::<Book>::new())
///     .unwrap();
///
/// let books = vec![
///     Book { title: "Short".into(), pages: 120 },
///     Book { title: "Long".into(), pages: 900 },
/// ];
/// let found: Vec<&Book> = books.iter().filter(|b| predicate(*b)).collect();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].title, "Long");
/// ```
pub struct MemoryBuilder<T> {
    _record: PhantomData<fn(&T)>,
}

impl<T> MemoryBuilder<T> {
    pub fn new() -> Self {
        MemoryBuilder {
            _record: PhantomData,
        }
    }
}

impl<T> Default for MemoryBuilder<T> {
    fn default() -> Self {
        MemoryBuilder::new()
    }
}

impl<T> fmt::Debug for MemoryBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBuilder").finish()
    }
}

impl<T: Searchable + 'static> QueryBuilder for MemoryBuilder<T> {
    type Fragment = RecordPredicate<T>;

    fn build(&self, clause: Clause) -> Result<RecordPredicate<T>> {
        Ok(Box::new(move |record: &T| {
            let path: Vec<&str> = clause.path().iter().collect();
            clause.matches(&record.search_value(&path))
        }))
    }
}

/// Parameterised SQL condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFragment {
    /// Condition text with `?` placeholders.
    pub sql: String,
    /// Bound values, in placeholder order.
    pub params: Vec<TypedValue>,
}

/// Builder producing SQL conditions with positional parameters.
///
/// Nested paths become qualified, quoted identifiers
/// (`"address"."city"`). Case-insensitive text compares `LOWER(column)`
/// with a lowercased parameter. Collection fields are read as element
/// relations with a `value` column, so any-of becomes
/// `EXISTS (SELECT 1 FROM "tags" WHERE "value" IN (?))` and none-of its
/// `NOT EXISTS` form. Regex clauses have no portable SQL form and are
/// rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlBuilder;

impl SqlBuilder {
    fn identifier(clause: &Clause) -> String {
        clause
            .path()
            .iter()
            .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn column(clause: &Clause) -> String {
        let column = Self::identifier(clause);
        if Self::folds_case(clause) {
            format!("LOWER({column})")
        } else {
            column
        }
    }

    fn folds_case(clause: &Clause) -> bool {
        !clause.is_case_sensitive() && Self::is_text(clause.value())
    }

    fn is_text(value: &TypedValue) -> bool {
        match value {
            TypedValue::Text(_) => true,
            TypedValue::List(items) => items.first().is_some_and(Self::is_text),
            _ => false,
        }
    }

    fn param(value: &TypedValue, fold: bool) -> TypedValue {
        match value {
            TypedValue::Text(s) if fold => TypedValue::Text(s.to_lowercase()),
            other => other.clone(),
        }
    }

    /// Returns `true` for `NotIn`, `false` for `In`.
    fn is_negated(op: Op, kind: &'static str) -> Result<bool> {
        match op.as_membership() {
            Some(Op::In) => Ok(false),
            Some(_) => Ok(true),
            None => Err(SiftError::InvalidOperator { op, kind }),
        }
    }

    fn empty_set(negated: bool) -> SqlFragment {
        let sql = if negated { "1 = 1" } else { "1 = 0" };
        SqlFragment {
            sql: sql.to_string(),
            params: Vec::new(),
        }
    }

    fn placeholders(count: usize) -> String {
        vec!["?"; count].join(", ")
    }

    fn element_membership(clause: &Clause, op: Op, fold: bool) -> Result<SqlFragment> {
        let negated = Self::is_negated(op, "Collection")?;
        let items = match clause.value() {
            TypedValue::List(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };
        if items.is_empty() {
            return Ok(Self::empty_set(negated));
        }
        let element = if fold { "LOWER(\"value\")" } else { "\"value\"" };
        let keyword = if negated { "NOT EXISTS" } else { "EXISTS" };
        Ok(SqlFragment {
            sql: format!(
                "{keyword} (SELECT 1 FROM {} WHERE {element} IN ({}))",
                Self::identifier(clause),
                Self::placeholders(items.len()),
            ),
            params: items.iter().map(|item| Self::param(item, fold)).collect(),
        })
    }

    fn like_pattern(value: &TypedValue, fold: bool, prefix: &str, suffix: &str) -> TypedValue {
        let text = value.as_text().unwrap_or_default();
        let escaped = text
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("{prefix}{escaped}{suffix}");
        TypedValue::Text(if fold { pattern.to_lowercase() } else { pattern })
    }
}

impl QueryBuilder for SqlBuilder {
    type Fragment = SqlFragment;

    fn build(&self, clause: Clause) -> Result<SqlFragment> {
        let fold = Self::folds_case(&clause);
        let op = clause.op().normalize();

        if clause.shape().is_collection() {
            return Self::element_membership(&clause, op, fold);
        }

        let column = Self::column(&clause);
        if let TypedValue::List(items) = clause.value() {
            let negated = Self::is_negated(op, "SQL membership")?;
            if items.is_empty() {
                return Ok(Self::empty_set(negated));
            }
            let keyword = if negated { "NOT IN" } else { "IN" };
            return Ok(SqlFragment {
                sql: format!(
                    "{column} {keyword} ({})",
                    Self::placeholders(items.len())
                ),
                params: items.iter().map(|item| Self::param(item, fold)).collect(),
            });
        }

        let value = clause.value();
        let (sql, param) = match op {
            Op::Eq => (format!("{column} = ?"), Self::param(value, fold)),
            Op::Ne => (format!("{column} <> ?"), Self::param(value, fold)),
            Op::Gt => (format!("{column} > ?"), Self::param(value, fold)),
            Op::Gte => (format!("{column} >= ?"), Self::param(value, fold)),
            Op::Lt => (format!("{column} < ?"), Self::param(value, fold)),
            Op::Lte => (format!("{column} <= ?"), Self::param(value, fold)),
            Op::StartsWith => (
                format!("{column} LIKE ? ESCAPE '\\'"),
                Self::like_pattern(value, fold, "", "%"),
            ),
            Op::EndsWith => (
                format!("{column} LIKE ? ESCAPE '\\'"),
                Self::like_pattern(value, fold, "%", ""),
            ),
            Op::Contains => (
                format!("{column} LIKE ? ESCAPE '\\'"),
                Self::like_pattern(value, fold, "%", "%"),
            ),
            other => return Err(SiftError::InvalidOperator { op: other, kind: "SQL" }),
        };

        Ok(SqlFragment {
            sql,
            params: vec![param],
        })
    }
}
