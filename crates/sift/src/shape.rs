//! Collection-shape detection from raw field descriptors.

use tracing::debug;

use crate::schema::{FieldShape, SchemaDescriptor};

/// Classifies a field of `enclosing` as scalar or collection-shaped.
///
/// The raw field descriptor is looked up by exact name. When no descriptor
/// has that name (for instance an attribute renamed away from its storage
/// name) the field is treated as [`FieldShape::Scalar`].
pub fn field_shape<D>(enclosing: &D, field_name: &str) -> FieldShape
where
    D: SchemaDescriptor + ?Sized,
{
    match enclosing.raw_field_shape(field_name) {
        Some(shape) => shape,
        None => {
            debug!(
                field = field_name,
                schema = enclosing.type_name(),
                "no raw field descriptor, assuming scalar shape"
            );
            FieldShape::Scalar
        }
    }
}

/// Returns `true` if the field is an array or a sequence/set container.
pub fn is_collection_shaped<D>(enclosing: &D, field_name: &str) -> bool
where
    D: SchemaDescriptor + ?Sized,
{
    field_shape(enclosing, field_name).is_collection()
}
