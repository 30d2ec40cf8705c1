//! Entity schema descriptions.
//!
//! A schema is an explicit, read-only description of an entity type: its
//! queryable attributes (by query name, with declared types) and its raw
//! field descriptors (by storage name, with container shape). Schemas are
//! built once, shared behind [`Arc`], and never mutated afterwards.
//!
//! # Example
//!
//! ```
//! use sift::{Container, EntitySchema, SchemaDescriptor, ValueType};
//!
//! let address = EntitySchema::builder("Address")
//!     .text("city")
//!     .text("street")
//!     .build();
//!
//! let person = EntitySchema::builder("Person")
//!     .text("name")
//!     .integer("age")
//!     .entity("address", address)
//!     .collection("tags", ValueType::text(), Container::Sequence)
//!     .build();
//!
//! assert!(person.has_attributes());
//! assert_eq!(person.attributes().len(), 4);
//! assert!(person.raw_field_shape("tags").unwrap().is_collection());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Closed set of value kinds that have a search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    Temporal,
    Enumeration,
}

impl ValueKind {
    /// All value kinds, in declaration order.
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Text,
        ValueKind::Integer,
        ValueKind::Decimal,
        ValueKind::Boolean,
        ValueKind::Temporal,
        ValueKind::Enumeration,
    ];

    /// Returns the display name of this kind.
    pub fn display_name(self) -> &'static str {
        match self {
            ValueKind::Text => "Text",
            ValueKind::Integer => "Integer",
            ValueKind::Decimal => "Decimal",
            ValueKind::Boolean => "Boolean",
            ValueKind::Temporal => "Temporal",
            ValueKind::Enumeration => "Enumeration",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Declared type of a terminal (non-navigable) field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueType {
    kind: ValueKind,
    name: Cow<'static, str>,
    variants: Vec<String>,
}

impl ValueType {
    /// Creates a value type named after its kind.
    pub fn new(kind: ValueKind) -> Self {
        ValueType {
            kind,
            name: Cow::Borrowed(kind.display_name()),
            variants: Vec::new(),
        }
    }

    pub fn text() -> Self {
        ValueType::new(ValueKind::Text)
    }

    pub fn integer() -> Self {
        ValueType::new(ValueKind::Integer)
    }

    pub fn decimal() -> Self {
        ValueType::new(ValueKind::Decimal)
    }

    pub fn boolean() -> Self {
        ValueType::new(ValueKind::Boolean)
    }

    pub fn temporal() -> Self {
        ValueType::new(ValueKind::Temporal)
    }

    /// Creates an enumeration type with its declared variant literals.
    pub fn enumeration<I, S>(name: impl Into<Cow<'static, str>>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValueType {
            kind: ValueKind::Enumeration,
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    /// Overrides the display name (e.g. `"Age"` for an integer newtype).
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Display name used in caller-facing errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared variant literals; empty for non-enumerations.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Handle to a declared type: the schema context during path resolution.
#[derive(Debug, Clone)]
pub enum TypeHandle {
    /// A terminal value type with a search strategy.
    Value(ValueType),
    /// A structured entity type whose attributes can be navigated.
    Entity(Arc<EntitySchema>),
    /// A terminal type with neither attributes nor a strategy.
    Opaque(Cow<'static, str>),
}

impl TypeHandle {
    /// Returns the display name of the underlying type.
    pub fn type_name(&self) -> &str {
        match self {
            TypeHandle::Value(ty) => ty.name(),
            TypeHandle::Entity(schema) => schema.name(),
            TypeHandle::Opaque(name) => name,
        }
    }

    /// Returns the value type, if this is a terminal value.
    pub fn value_type(&self) -> Option<&ValueType> {
        match self {
            TypeHandle::Value(ty) => Some(ty),
            _ => None,
        }
    }

    /// Returns the entity schema, if this is a structured type.
    pub fn as_entity(&self) -> Option<&Arc<EntitySchema>> {
        match self {
            TypeHandle::Entity(schema) => Some(schema),
            _ => None,
        }
    }
}

impl From<ValueType> for TypeHandle {
    fn from(ty: ValueType) -> Self {
        TypeHandle::Value(ty)
    }
}

impl From<Arc<EntitySchema>> for TypeHandle {
    fn from(schema: Arc<EntitySchema>) -> Self {
        TypeHandle::Entity(schema)
    }
}

/// Scalar vs. collection classification of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldShape {
    Scalar,
    Collection,
}

impl FieldShape {
    pub fn is_collection(self) -> bool {
        self == FieldShape::Collection
    }
}

/// Container form of a raw field's storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// Single value (including optional values).
    Scalar,
    /// Fixed-size array or slice.
    Array,
    /// Ordered growable sequence (`Vec`, `VecDeque`, ...).
    Sequence,
    /// Unordered set (`HashSet`, `BTreeSet`, ...).
    Set,
}

impl Container {
    pub fn shape(self) -> FieldShape {
        match self {
            Container::Scalar => FieldShape::Scalar,
            Container::Array | Container::Sequence | Container::Set => FieldShape::Collection,
        }
    }
}

/// Raw field descriptor, keyed by the field's storage name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    name: String,
    container: Container,
}

impl RawField {
    pub fn new(name: impl Into<String>, container: Container) -> Self {
        RawField {
            name: name.into(),
            container,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn container(&self) -> Container {
        self.container
    }
}

/// A queryable attribute of a structured type.
///
/// For collection-shaped fields the declared type is the element type;
/// the shape itself comes from the raw field descriptor.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    declared: TypeHandle,
    case_sensitive: Option<bool>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, declared: impl Into<TypeHandle>) -> Self {
        Attribute {
            name: name.into(),
            declared: declared.into(),
            case_sensitive: None,
        }
    }

    /// Sets the field-level case sensitivity for text comparisons.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared(&self) -> &TypeHandle {
        &self.declared
    }

    /// Field-level case sensitivity, if declared.
    pub fn case_sensitive(&self) -> Option<bool> {
        self.case_sensitive
    }
}

/// Reflection-like description of a type, as consumed by path resolution.
pub trait SchemaDescriptor {
    /// Display name of the described type.
    fn type_name(&self) -> &str;

    /// Whether the type is structured (has navigable attributes at all).
    fn has_attributes(&self) -> bool;

    /// Declared attributes; empty for terminal types.
    fn attributes(&self) -> &[Attribute];

    /// Shape of the raw field with exactly this storage name, if declared.
    fn raw_field_shape(&self, name: &str) -> Option<FieldShape>;
}

/// Description of a structured entity type.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    name: String,
    attributes: Vec<Attribute>,
    raw_fields: Vec<RawField>,
}

impl EntitySchema {
    /// Starts building a schema for the named entity type.
    pub fn builder(name: impl Into<String>) -> EntitySchemaBuilder {
        EntitySchemaBuilder {
            schema: EntitySchema {
                name: name.into(),
                attributes: Vec::new(),
                raw_fields: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw field descriptors, by storage name.
    pub fn raw_fields(&self) -> &[RawField] {
        &self.raw_fields
    }
}

impl SchemaDescriptor for EntitySchema {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn has_attributes(&self) -> bool {
        true
    }

    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn raw_field_shape(&self, name: &str) -> Option<FieldShape> {
        self.raw_fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.container.shape())
    }
}

impl SchemaDescriptor for TypeHandle {
    fn type_name(&self) -> &str {
        TypeHandle::type_name(self)
    }

    fn has_attributes(&self) -> bool {
        matches!(self, TypeHandle::Entity(_))
    }

    fn attributes(&self) -> &[Attribute] {
        match self {
            TypeHandle::Entity(schema) => schema.attributes(),
            _ => &[],
        }
    }

    fn raw_field_shape(&self, name: &str) -> Option<FieldShape> {
        match self {
            TypeHandle::Entity(schema) => schema.raw_field_shape(name),
            _ => None,
        }
    }
}

/// Fluent builder for [`EntitySchema`].
///
/// The shorthand methods declare an attribute and a raw field with the
/// same name; [`attribute`](Self::attribute) and
/// [`raw_field`](Self::raw_field) declare each side separately, which is
/// how renamed fields are described.
#[derive(Debug)]
pub struct EntitySchemaBuilder {
    schema: EntitySchema,
}

impl EntitySchemaBuilder {
    pub fn text(self, name: &str) -> Self {
        self.scalar(name, ValueType::text())
    }

    pub fn integer(self, name: &str) -> Self {
        self.scalar(name, ValueType::integer())
    }

    pub fn decimal(self, name: &str) -> Self {
        self.scalar(name, ValueType::decimal())
    }

    pub fn boolean(self, name: &str) -> Self {
        self.scalar(name, ValueType::boolean())
    }

    pub fn temporal(self, name: &str) -> Self {
        self.scalar(name, ValueType::temporal())
    }

    pub fn enumeration<I, S>(self, name: &str, type_name: &'static str, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scalar(name, ValueType::enumeration(type_name, variants))
    }

    /// Declares a nested entity field.
    pub fn entity(self, name: &str, schema: Arc<EntitySchema>) -> Self {
        self.scalar(name, TypeHandle::Entity(schema))
    }

    /// Declares a field whose type has no search strategy.
    pub fn opaque(self, name: &str, type_name: &'static str) -> Self {
        self.scalar(name, TypeHandle::Opaque(Cow::Borrowed(type_name)))
    }

    /// Declares a collection-shaped field of the given element type.
    pub fn collection(
        self,
        name: &str,
        element: impl Into<TypeHandle>,
        container: Container,
    ) -> Self {
        self.attribute(Attribute::new(name, element))
            .raw_field(RawField::new(name, container))
    }

    /// Declares a scalar field with an arbitrary declared type.
    pub fn scalar(self, name: &str, declared: impl Into<TypeHandle>) -> Self {
        self.attribute(Attribute::new(name, declared))
            .raw_field(RawField::new(name, Container::Scalar))
    }

    /// Declares an attribute without a raw field descriptor.
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.schema.attributes.push(attribute);
        self
    }

    /// Declares a raw field descriptor without an attribute.
    pub fn raw_field(mut self, field: RawField) -> Self {
        self.schema.raw_fields.push(field);
        self
    }

    pub fn build(self) -> Arc<EntitySchema> {
        Arc::new(self.schema)
    }
}
