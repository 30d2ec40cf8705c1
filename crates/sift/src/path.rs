//! Path resolution through nested schemas.
//!
//! A dotted key is walked segment by segment: each prefix segment must name
//! an attribute of the current schema context, and the context then moves
//! to that attribute's declared type. Attribute names match
//! case-insensitively.

use std::fmt;

use tracing::trace;

use crate::criteria::PATH_SEPARATOR;
use crate::error::{Result, SiftError};
use crate::schema::{Attribute, SchemaDescriptor, TypeHandle};

/// Looks up the attribute named `name` on a schema context.
///
/// Returns `Ok(None)` when the context is not a structured type at all.
/// A structured type without a matching attribute is a
/// [`SiftError::FieldNotFound`].
pub fn attribute_for<'a, D>(context: &'a D, name: &str) -> Result<Option<&'a Attribute>>
where
    D: SchemaDescriptor + ?Sized,
{
    if !context.has_attributes() {
        return Ok(None);
    }

    context
        .attributes()
        .iter()
        .find(|attribute| names_match(attribute.name(), name))
        .map(Some)
        .ok_or_else(|| SiftError::field_not_found(name, context.type_name()))
}

/// Case-insensitive attribute name comparison.
pub(crate) fn names_match(declared: &str, requested: &str) -> bool {
    declared.eq_ignore_ascii_case(requested)
        || declared
            .chars()
            .flat_map(char::to_lowercase)
            .eq(requested.chars().flat_map(char::to_lowercase))
}

/// Outcome of walking a key's navigation prefix.
#[derive(Debug, Clone)]
pub struct ResolvedPath {
    segments: Vec<String>,
    context: TypeHandle,
    terminal: String,
}

impl ResolvedPath {
    /// Canonical attribute names of the navigated prefix.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The schema context that encloses the terminal field.
    pub fn context(&self) -> &TypeHandle {
        &self.context
    }

    /// The terminal field name, as written in the key.
    pub fn terminal(&self) -> &str {
        &self.terminal
    }

    /// Builds the full field path for the given terminal attribute name.
    pub fn field_path(&self, field: &str) -> FieldPath {
        FieldPath {
            segments: self.segments.clone(),
            field: field.to_string(),
        }
    }
}

/// Resolves the navigation prefix of `key` starting at `root`.
///
/// Every prefix segment must resolve to an attribute; a segment reached
/// through a terminal (non-structured) type fails with
/// [`SiftError::FieldNotFound`], as does any unknown name.
pub fn resolve(root: &TypeHandle, key: &str) -> Result<ResolvedPath> {
    let mut segments: Vec<&str> = key.split(PATH_SEPARATOR).collect();
    let terminal = match segments.pop() {
        Some(terminal) if !terminal.is_empty() => terminal,
        _ => return Err(SiftError::InvalidKey(key.to_string())),
    };

    let mut context = root.clone();
    let mut navigated = Vec::with_capacity(segments.len());

    for segment in segments {
        let attribute = attribute_for(&context, segment)?
            .ok_or_else(|| SiftError::field_not_found(segment, context.type_name()))?;
        trace!(
            segment,
            attribute = attribute.name(),
            from = context.type_name(),
            to = attribute.declared().type_name(),
            "resolved path segment"
        );
        navigated.push(attribute.name().to_string());
        let next = attribute.declared().clone();
        context = next;
    }

    Ok(ResolvedPath {
        segments: navigated,
        context,
        terminal: terminal.to_string(),
    })
}

/// Fully resolved location of a field: navigated segments plus field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
    field: String,
}

impl FieldPath {
    pub fn new<I, S>(segments: I, field: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldPath {
            segments: segments.into_iter().map(Into::into).collect(),
            field: field.into(),
        }
    }

    /// A top-level field with no navigation prefix.
    pub fn field_only(field: impl Into<String>) -> Self {
        FieldPath {
            segments: Vec::new(),
            field: field.into(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Iterates over every part of the path, terminal field last.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.field.as_str()))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{segment}{PATH_SEPARATOR}")?;
        }
        f.write_str(&self.field)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::schema::{EntitySchema, ValueType};

    fn root() -> TypeHandle {
        let country = EntitySchema::builder("Country").text("code").build();
        let address = EntitySchema::builder("Address")
            .text("city")
            .entity("country", country)
            .build();
        TypeHandle::Entity(
            EntitySchema::builder("Person")
                .text("name")
                .entity("homeAddress", address)
                .build(),
        )
    }

    #[test]
    fn attribute_lookup_is_case_insensitive() {
        let root = root();
        let upper = attribute_for(&root, "NAME").unwrap().unwrap();
        let lower = attribute_for(&root, "name").unwrap().unwrap();
        assert_eq!(upper.name(), "name");
        assert_eq!(lower.name(), "name");
        assert_eq!(
            attribute_for(&root, "HOMEADDRESS").unwrap().unwrap().name(),
            "homeAddress"
        );
    }

    #[test]
    fn attribute_lookup_on_terminal_type_is_absent() {
        let terminal = TypeHandle::Value(ValueType::text());
        assert!(attribute_for(&terminal, "anything").unwrap().is_none());
    }

    #[test]
    fn attribute_lookup_unknown_name_fails() {
        let err = attribute_for(&root(), "nickname").unwrap_err();
        match err {
            SiftError::FieldNotFound { field, schema } => {
                assert_eq!(field, "nickname");
                assert_eq!(schema, "Person");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn resolve_top_level_keeps_root() {
        let root = root();
        let resolved = resolve(&root, "name").unwrap();
        assert!(resolved.segments().is_empty());
        assert_eq!(resolved.context().type_name(), "Person");
        assert_eq!(resolved.terminal(), "name");
    }

    #[test]
    fn resolve_walks_nested_contexts() {
        let resolved = resolve(&root(), "HomeAddress.Country.code").unwrap();
        assert_eq!(resolved.segments(), ["homeAddress", "country"]);
        assert_eq!(resolved.context().type_name(), "Country");
        assert_eq!(resolved.terminal(), "code");
        assert_eq!(resolved.field_path("code").to_string(), "homeAddress.country.code");
    }

    #[test]
    fn resolve_unknown_prefix_segment_fails() {
        let err = resolve(&root(), "homeAddress.planet.name").unwrap_err();
        assert!(matches!(err, SiftError::FieldNotFound { ref field, .. } if field == "planet"));
    }

    #[test]
    fn resolve_through_terminal_type_fails() {
        let err = resolve(&root(), "name.first.initial").unwrap_err();
        assert!(matches!(
            err,
            SiftError::FieldNotFound { ref field, ref schema } if field == "first" && schema == "Text"
        ));
    }

    #[test]
    fn resolve_rejects_empty_terminal() {
        assert!(matches!(resolve(&root(), "name."), Err(SiftError::InvalidKey(_))));
    }

    #[test]
    fn field_path_iteration() {
        let path = FieldPath::new(["a", "b"], "c");
        assert_eq!(path.iter().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(FieldPath::field_only("x").to_string(), "x");
    }

    #[test]
    fn resolved_context_is_shared_not_copied() {
        let root = root();
        let resolved = resolve(&root, "homeAddress.city").unwrap();
        let from_root = root.as_entity().unwrap().attributes()[1]
            .declared()
            .as_entity()
            .unwrap()
            .clone();
        assert!(Arc::ptr_eq(resolved.context().as_entity().unwrap(), &from_root));
    }
}
