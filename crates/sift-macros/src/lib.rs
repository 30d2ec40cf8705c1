//! Proc macros for Sift.
//!
//! # Available Macros
//!
//! - [`Searchable`] - Generate a schema descriptor and field accessor from
//!   struct field annotations
//!
//! # Examples
//!
//! For working examples, see `sift/tests/searchable_derive.rs`.

mod searchable;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Searchable` trait for structs with searchable fields.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `Text` | Text field (`String`, `&str`, anything `AsRef<str>`) |
/// | `Integer` | Integer field (any primitive integer) |
/// | `Decimal` | Decimal field (`rust_decimal::Decimal`, `f64`, `f32`) |
/// | `Boolean` | Boolean field |
/// | `Temporal` | Date/time field - requires `SearchTimestamp` impl |
/// | `Enum` | Enum field - requires `SearchEnum` impl |
/// | `Entity` | Nested struct - requires `Searchable` impl |
/// | `skip` | Exclude this field from the schema |
/// | `rename = "..."` | Use a custom name for criteria keys |
/// | `case_insensitive` / `case_sensitive` | Per-field text comparison mode |
/// | `ty = "..."` | Kind given as a string, for keywords like `enum` |
///
/// Fields without a kind are not searchable.
///
/// # Field Shapes
///
/// `Vec<T>`, `VecDeque<T>`, `LinkedList<T>`, `HashSet<T>`, `BTreeSet<T>`
/// and arrays are collection-shaped: the kind describes the element, and
/// criteria on them compile to membership tests. `Option<T>` fields read
/// as absent when `None`.
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Person::NAME`, `Person::HOME_ADDRESS`)
/// 2. `Searchable::schema()`, declaring one attribute per field under its
///    query name and one raw field under its Rust name
/// 3. `Searchable::search_value()`, walking nested entities by path
///
/// A renamed collection field is declared under a name with no matching
/// raw field, so its shape reads as scalar.
///
/// # Example
///
/// ```ignore
/// use sift::{PredicateCompiler, SearchConfig, SearchCriteria, MemoryBuilder};
/// use sift_macros::Searchable;
///
/// #[derive(Searchable)]
/// struct Address {
///     #[search(Text, case_insensitive)]
///     city: String,
/// }
///
/// #[derive(Searchable)]
/// struct Person {
///     #[search(Text)]
///     name: String,
///
///     #[search(Integer)]
///     age: u32,
///
///     #[search(Text)]
///     tags: Vec<String>,
///
///     #[search(Entity)]
///     address: Address,
///
///     #[search(skip)]
///     internal_id: u64,
/// }
///
/// let compiler = PredicateCompiler::for_type::<Person>();
/// let criteria = SearchCriteria::parse(Person::AGE, "gte", "18").unwrap();
/// let adult = compiler
///     .compile(&criteria, &SearchConfig::default(), &MemoryBuilder::<Person>::new())
///     .unwrap();
/// ```
#[proc_macro_derive(Searchable, attributes(search))]
pub fn searchable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    searchable::searchable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
