//! Compiled predicate fragments.
//!
//! A [`Clause`] is the neutral fragment a strategy emits for one criterion:
//! a resolved field path, an operator and a typed value. Query builders
//! lower clauses into their own fragment types; [`Clause::matches`]
//! evaluates one directly against a runtime [`Value`].

use regex::Regex;
use rust_decimal::Decimal;

use crate::op::Op;
use crate::path::FieldPath;
use crate::schema::FieldShape;
use crate::value::{TypedValue, Value};

/// A single compiled predicate.
///
/// # Example
///
/// ```
/// use sift::{Clause, FieldPath, Op, TypedValue, Value};
///
/// let clause = Clause::new(
///     FieldPath::field_only("name"),
///     Op::Contains,
///     TypedValue::Text("ann".into()),
/// )
/// .with_case_sensitive(false);
///
/// assert!(clause.matches(&Value::Text("Joanna")));
/// assert!(clause.matches(&Value::Text("ANNE")));
/// ```
#[derive(Debug, Clone)]
pub struct Clause {
    path: FieldPath,
    op: Op,
    value: TypedValue,
    case_sensitive: bool,
    shape: FieldShape,
    regex: Option<Regex>,
}

impl Clause {
    /// Creates a case-sensitive clause over a scalar field.
    pub fn new(path: FieldPath, op: Op, value: TypedValue) -> Self {
        Clause {
            path,
            op,
            value,
            case_sensitive: true,
            shape: FieldShape::Scalar,
            regex: None,
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Marks the target field as scalar or collection-shaped.
    pub fn with_shape(mut self, shape: FieldShape) -> Self {
        self.shape = shape;
        self
    }

    /// Attaches the compiled pattern of a `Regex` clause.
    pub fn with_regex(mut self, regex: Regex) -> Self {
        self.regex = Some(regex);
        self
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn value(&self) -> &TypedValue {
        &self.value
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Shape of the target field. Collection clauses test membership of
    /// the field's elements rather than of the field itself.
    pub fn shape(&self) -> FieldShape {
        self.shape
    }

    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    /// Evaluates this clause against a field value.
    ///
    /// Collection field values match membership clauses when any element
    /// is in the clause's set (`In`) or when none is (`NotIn`); other
    /// operators match when any element matches. Missing values and type
    /// mismatches never match.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match (field_value, &self.value) {
            (Value::None, _) => false,
            (Value::List(items), _) => self.match_collection(items),
            (_, TypedValue::List(set)) => self.match_membership(field_value, set),
            (_, clause_value) => self.compare(self.op, field_value, clause_value),
        }
    }

    fn match_collection(&self, items: &[Value<'_>]) -> bool {
        let candidates = match &self.value {
            TypedValue::List(set) => set.as_slice(),
            single => std::slice::from_ref(single),
        };
        let any_member = || {
            items
                .iter()
                .any(|item| candidates.iter().any(|c| self.compare(Op::Eq, item, c)))
        };

        match self.op.normalize() {
            Op::Eq | Op::In => any_member(),
            Op::Ne | Op::NotIn => !any_member(),
            op => items
                .iter()
                .any(|item| candidates.iter().any(|c| self.compare(op, item, c))),
        }
    }

    fn match_membership(&self, field_value: &Value<'_>, set: &[TypedValue]) -> bool {
        let contained = set.iter().any(|c| self.compare(Op::Eq, field_value, c));
        match self.op.as_membership() {
            Some(Op::In) => contained,
            Some(Op::NotIn) => !contained,
            _ => false,
        }
    }

    fn compare(&self, op: Op, field: &Value<'_>, clause: &TypedValue) -> bool {
        match (clause, field) {
            (TypedValue::Text(pattern), Value::Text(s)) => self.match_text(op, s, pattern),

            (TypedValue::Integer(c), Value::Integer(f)) => op.eval_ordering(f.cmp(c)),
            (TypedValue::Integer(c), Value::Decimal(f)) => {
                op.eval_ordering(f.cmp(&Decimal::from(*c)))
            }
            (TypedValue::Decimal(c), Value::Decimal(f)) => op.eval_ordering(f.cmp(c)),
            (TypedValue::Decimal(c), Value::Integer(f)) => {
                op.eval_ordering(Decimal::from(*f).cmp(c))
            }

            (TypedValue::Temporal(c), Value::Temporal(f)) => op.eval_ordering(f.cmp(c)),

            (TypedValue::Enum(c), Value::Enum(f)) => match_equality(op, *f == c.as_str()),
            (TypedValue::Boolean(c), Value::Boolean(f)) => match_equality(op, f == c),

            // Type mismatch - doesn't match
            _ => false,
        }
    }

    fn match_text(&self, op: Op, field: &str, pattern: &str) -> bool {
        if op == Op::Regex {
            return self.regex.as_ref().is_some_and(|regex| regex.is_match(field));
        }

        if self.case_sensitive {
            return match_text_op(op, field, pattern);
        }
        let field = field.to_lowercase();
        let pattern = pattern.to_lowercase();
        match_text_op(op, &field, &pattern)
    }
}

fn match_text_op(op: Op, field: &str, pattern: &str) -> bool {
    match op.normalize() {
        Op::StartsWith => field.starts_with(pattern),
        Op::EndsWith => field.ends_with(pattern),
        Op::Contains => field.contains(pattern),
        other => other.eval_ordering(field.cmp(pattern)),
    }
}

fn match_equality(op: Op, equal: bool) -> bool {
    match op.normalize() {
        Op::Eq => equal,
        Op::Ne => !equal,
        _ => false,
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.op == other.op
            && self.value == other.value
            && self.case_sensitive == other.case_sensitive
            && self.shape == other.shape
            && self.regex.as_ref().map(Regex::as_str) == other.regex.as_ref().map(Regex::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Timestamp;

    fn clause(op: Op, value: TypedValue) -> Clause {
        Clause::new(FieldPath::field_only("field"), op, value)
    }

    fn text(s: &str) -> TypedValue {
        TypedValue::Text(s.to_string())
    }

    #[test]
    fn text_eq_is_case_sensitive_by_default() {
        let c = clause(Op::Eq, text("hello"));
        assert!(c.matches(&Value::Text("hello")));
        assert!(!c.matches(&Value::Text("Hello")));
    }

    #[test]
    fn text_case_insensitive() {
        let c = clause(Op::Eq, text("hello")).with_case_sensitive(false);
        assert!(c.matches(&Value::Text("HeLLo")));

        let c = clause(Op::StartsWith, text("HEL")).with_case_sensitive(false);
        assert!(c.matches(&Value::Text("hello")));
    }

    #[test]
    fn text_string_ops() {
        assert!(clause(Op::StartsWith, text("hel")).matches(&Value::Text("hello")));
        assert!(!clause(Op::StartsWith, text("hel")).matches(&Value::Text("shell")));
        assert!(clause(Op::EndsWith, text("llo")).matches(&Value::Text("hello")));
        assert!(clause(Op::Contains, text("ell")).matches(&Value::Text("hello")));
        assert!(clause(Op::Ne, text("a")).matches(&Value::Text("b")));
    }

    #[test]
    fn text_regex() {
        let regex = Regex::new(r"^ab\d+$").unwrap();
        let c = clause(Op::Regex, text(r"^ab\d+$")).with_regex(regex);
        assert!(c.matches(&Value::Text("ab12")));
        assert!(!c.matches(&Value::Text("ab")));

        // No compiled pattern attached: never matches.
        assert!(!clause(Op::Regex, text("a")).matches(&Value::Text("a")));
    }

    #[test]
    fn numeric_comparisons() {
        let gt = clause(Op::Gt, TypedValue::Integer(10));
        assert!(gt.matches(&Value::Integer(11)));
        assert!(!gt.matches(&Value::Integer(10)));

        let lte = clause(Op::Lte, TypedValue::Decimal(Decimal::new(105, 1)));
        assert!(lte.matches(&Value::Decimal(Decimal::new(105, 1))));
        assert!(lte.matches(&Value::Integer(10)));
        assert!(!lte.matches(&Value::Integer(11)));
    }

    #[test]
    fn temporal_aliases() {
        let before = clause(Op::Before, TypedValue::Temporal(Timestamp(1000)));
        assert!(before.matches(&Value::Temporal(Timestamp(500))));
        assert!(!before.matches(&Value::Temporal(Timestamp(1000))));

        let after = clause(Op::After, TypedValue::Temporal(Timestamp(1000)));
        assert!(after.matches(&Value::Temporal(Timestamp(1500))));
    }

    #[test]
    fn enum_and_bool_equality() {
        let status = clause(Op::Eq, TypedValue::Enum("ACTIVE".into()));
        assert!(status.matches(&Value::Enum("ACTIVE")));
        assert!(!status.matches(&Value::Enum("ARCHIVED")));

        let flag = clause(Op::Is, TypedValue::Boolean(true));
        assert!(flag.matches(&Value::Boolean(true)));
        assert!(!flag.matches(&Value::Boolean(false)));
    }

    #[test]
    fn scalar_membership() {
        let set = TypedValue::List(vec![TypedValue::Integer(1), TypedValue::Integer(3)]);
        let within = clause(Op::In, set.clone());
        assert!(within.matches(&Value::Integer(3)));
        assert!(!within.matches(&Value::Integer(2)));

        let outside = clause(Op::NotIn, set);
        assert!(outside.matches(&Value::Integer(2)));
        assert!(!outside.matches(&Value::Integer(1)));
    }

    #[test]
    fn collection_membership() {
        let tags = Value::List(vec![Value::Text("rust"), Value::Text("db")]);

        let any = clause(Op::In, TypedValue::List(vec![text("go"), text("db")]));
        assert!(any.matches(&tags));

        let none = clause(Op::NotIn, TypedValue::List(vec![text("go"), text("db")]));
        assert!(!none.matches(&tags));

        let absent = clause(Op::In, TypedValue::List(vec![text("go")]));
        assert!(!absent.matches(&tags));
    }

    #[test]
    fn collection_element_ops() {
        let tags = Value::List(vec![Value::Text("rustacean"), Value::Text("db")]);
        assert!(clause(Op::StartsWith, text("rust")).matches(&tags));
        assert!(!clause(Op::StartsWith, text("go")).matches(&tags));
    }

    #[test]
    fn none_and_mismatch_never_match() {
        assert!(!clause(Op::Eq, text("x")).matches(&Value::None));
        assert!(!clause(Op::Ne, text("x")).matches(&Value::None));
        assert!(!clause(Op::Eq, text("1")).matches(&Value::Integer(1)));
    }

    #[test]
    fn shape_defaults_to_scalar_and_takes_part_in_equality() {
        let scalar = clause(Op::In, TypedValue::List(vec![text("a")]));
        assert_eq!(scalar.shape(), FieldShape::Scalar);

        let collection = scalar.clone().with_shape(FieldShape::Collection);
        assert_eq!(collection.shape(), FieldShape::Collection);
        assert_ne!(scalar, collection);
    }

    #[test]
    fn equality_compares_regex_source() {
        let a = clause(Op::Regex, text("a+")).with_regex(Regex::new("a+").unwrap());
        let b = clause(Op::Regex, text("a+")).with_regex(Regex::new("a+").unwrap());
        assert_eq!(a, b);
        assert_ne!(a, clause(Op::Regex, text("a+")));
    }
}
