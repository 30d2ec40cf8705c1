//! Traits for derive macro support.
//!
//! This module provides the [`Searchable`] trait which is implemented by
//! the `#[derive(Searchable)]` macro to describe an entity's schema and
//! expose its field values at runtime.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::schema::EntitySchema;
use crate::value::{Timestamp, Value};

/// Trait for entity types that can be searched.
///
/// This trait is typically derived using `#[derive(Searchable)]` from the
/// `sift-macros` crate, but can also be implemented manually.
///
/// # Derive Usage
///
/// ```ignore
/// use sift_macros::Searchable;
///
/// #[derive(Searchable)]
/// struct Person {
///     #[search(Text)]
///     name: String,
///     #[search(Integer)]
///     age: u32,
///     #[search(Text, rename = "labels")]
///     tags: Vec<String>,
///     #[search(Entity)]
///     address: Address,
/// }
/// ```
///
/// # Manual Implementation
///
/// ```
/// use std::sync::Arc;
/// use sift::{EntitySchema, Searchable, Value};
///
/// struct Task {
///     name: String,
///     priority: i64,
/// }
///
/// impl Searchable for Task {
///     fn schema() -> Arc<EntitySchema> {
///         EntitySchema::builder("Task").text("name").integer("priority").build()
///     }
///
///     fn search_value(&self, path: &[&str]) -> Value<'_> {
///         match path {
///             ["name"] => Value::Text(&self.name),
///             ["priority"] => Value::Integer(self.priority),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Searchable {
    /// Builds the schema description of this type.
    ///
    /// Build it once at configuration time and share the returned `Arc`.
    fn schema() -> Arc<EntitySchema>
    where
        Self: Sized;

    /// Returns the value at a resolved attribute path.
    ///
    /// The path holds canonical attribute names, as recorded in compiled
    /// clauses. Returns [`Value::None`] for unknown or non-terminal paths.
    fn search_value(&self, path: &[&str]) -> Value<'_>;
}

/// Helper trait for enumeration fields.
///
/// Used by the `#[derive(Searchable)]` macro when a field is marked with
/// `#[search(Enum)]`.
///
/// # Example
///
/// ```
/// use sift::SearchEnum;
///
/// enum Status {
///     Active,
///     Archived,
/// }
///
/// impl SearchEnum for Status {
///     const VARIANTS: &'static [&'static str] = &["ACTIVE", "ARCHIVED"];
///
///     fn variant_name(&self) -> &'static str {
///         match self {
///             Status::Active => "ACTIVE",
///             Status::Archived => "ARCHIVED",
///         }
///     }
/// }
/// ```
pub trait SearchEnum {
    /// Every variant literal accepted in criteria.
    const VARIANTS: &'static [&'static str];

    /// The literal of this variant; must be one of [`VARIANTS`](Self::VARIANTS).
    fn variant_name(&self) -> &'static str;
}

/// Helper trait for converting types to timestamps.
///
/// Used by the `#[derive(Searchable)]` macro when a field is marked with
/// `#[search(Temporal)]`.
pub trait SearchTimestamp {
    /// Converts this value to a [`Timestamp`] for comparison.
    fn search_timestamp(&self) -> Timestamp;
}

impl SearchTimestamp for Timestamp {
    fn search_timestamp(&self) -> Timestamp {
        *self
    }
}

impl SearchTimestamp for i64 {
    fn search_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl<Tz: chrono::TimeZone> SearchTimestamp for DateTime<Tz> {
    fn search_timestamp(&self) -> Timestamp {
        Timestamp(self.timestamp_millis())
    }
}

impl SearchTimestamp for NaiveDateTime {
    fn search_timestamp(&self) -> Timestamp {
        Timestamp::from(*self)
    }
}

impl SearchTimestamp for NaiveDate {
    fn search_timestamp(&self) -> Timestamp {
        Timestamp::from(*self)
    }
}

/// Helper trait for decimal fields.
///
/// Used by the `#[derive(Searchable)]` macro when a field is marked with
/// `#[search(Decimal)]`. Returns `None` for values with no decimal form
/// (NaN, infinities).
pub trait SearchDecimal {
    fn search_decimal(&self) -> Option<Decimal>;
}

impl SearchDecimal for Decimal {
    fn search_decimal(&self) -> Option<Decimal> {
        Some(*self)
    }
}

impl SearchDecimal for f64 {
    fn search_decimal(&self) -> Option<Decimal> {
        Decimal::from_f64(*self)
    }
}

impl SearchDecimal for f32 {
    fn search_decimal(&self) -> Option<Decimal> {
        Decimal::from_f32(*self)
    }
}

/// Helper trait for integer fields.
///
/// Used by the `#[derive(Searchable)]` macro when a field is marked with
/// `#[search(Integer)]`. Returns `None` when the value does not fit `i64`.
pub trait SearchInteger {
    fn search_integer(&self) -> Option<i64>;
}

macro_rules! impl_search_integer {
    ($($ty:ty),*) => {
        $(
            impl SearchInteger for $ty {
                fn search_integer(&self) -> Option<i64> {
                    i64::try_from(*self).ok()
                }
            }
        )*
    };
}

impl_search_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Converts an optional field value, mapping `None` to [`Value::None`].
pub fn optional_value<'a, T, F>(value: &'a Option<T>, convert: F) -> Value<'a>
where
    F: FnOnce(&'a T) -> Value<'a>,
{
    match value {
        Some(inner) => convert(inner),
        None => Value::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[derive(Clone, Copy)]
    enum Status {
        Pending,
        Active,
    }

    impl SearchEnum for Status {
        const VARIANTS: &'static [&'static str] = &["PENDING", "ACTIVE"];

        fn variant_name(&self) -> &'static str {
            match self {
                Status::Pending => "PENDING",
                Status::Active => "ACTIVE",
            }
        }
    }

    #[test]
    fn search_enum_variant_names() {
        assert_eq!(Status::Pending.variant_name(), "PENDING");
        assert_eq!(Status::Active.variant_name(), "ACTIVE");
        assert!(Status::VARIANTS.contains(&Status::Active.variant_name()));
    }

    #[test]
    fn search_timestamp_conversions() {
        assert_eq!(1000i64.search_timestamp(), Timestamp(1000));

        let dt = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(dt.search_timestamp(), Timestamp(1000));
    }

    #[test]
    fn search_integer_bounds() {
        assert_eq!(42u8.search_integer(), Some(42));
        assert_eq!((-7i32).search_integer(), Some(-7));
        assert_eq!(u64::MAX.search_integer(), None);
    }

    #[test]
    fn search_decimal_conversions() {
        assert_eq!(Decimal::new(15, 1).search_decimal(), Some(Decimal::new(15, 1)));
        assert_eq!(2.5f64.search_decimal(), Decimal::from_f64(2.5));
        assert_eq!(f64::NAN.search_decimal(), None);
    }

    #[test]
    fn optional_value_maps_none() {
        let present = Some(String::from("x"));
        let absent: Option<String> = None;
        assert_eq!(optional_value(&present, |s| Value::Text(s)), Value::Text("x"));
        assert_eq!(optional_value(&absent, |s| Value::Text(s)), Value::None);
    }
}
