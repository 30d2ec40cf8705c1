//! Implementation of the `#[derive(Searchable)]` macro.
//!
//! This macro generates an implementation of the `Searchable` trait: a
//! schema descriptor built from field annotations and a runtime accessor
//! walking attribute paths. It also emits field name constants.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result,
    Type,
};

use super::attrs::{parse_search_attrs, SearchKind};

/// Storage container of a field, as read from its declared Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Scalar,
    Array,
    Sequence,
    Set,
}

impl ContainerKind {
    fn tokens(self) -> TokenStream {
        match self {
            ContainerKind::Scalar => quote! { ::sift::Container::Scalar },
            ContainerKind::Array => quote! { ::sift::Container::Array },
            ContainerKind::Sequence => quote! { ::sift::Container::Sequence },
            ContainerKind::Set => quote! { ::sift::Container::Set },
        }
    }
}

/// Shape of a field type: optionality, container and element type.
struct FieldType<'a> {
    optional: bool,
    container: ContainerKind,
    element: &'a Type,
}

/// Returns the single generic argument of a path type named one of `names`.
fn generic_arg<'a>(ty: &'a Type, names: &[&str]) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if !names.iter().any(|name| segment.ident == name) {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

fn analyze(ty: &Type) -> FieldType<'_> {
    let (optional, ty) = match generic_arg(ty, &["Option"]) {
        Some(inner) => (true, inner),
        None => (false, ty),
    };

    let (container, element) = if let Some(inner) =
        generic_arg(ty, &["Vec", "VecDeque", "LinkedList"])
    {
        (ContainerKind::Sequence, inner)
    } else if let Some(inner) = generic_arg(ty, &["HashSet", "BTreeSet"]) {
        (ContainerKind::Set, inner)
    } else {
        match ty {
            Type::Array(array) => (ContainerKind::Array, array.elem.as_ref()),
            Type::Slice(slice) => (ContainerKind::Array, slice.elem.as_ref()),
            other => (ContainerKind::Scalar, other),
        }
    };

    FieldType {
        optional,
        container,
        element,
    }
}

/// Display name of a type: the last path segment's identifier.
fn type_display_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

/// Expression converting `v: &Element` into a `::sift::Value`.
fn scalar_value(kind: SearchKind) -> TokenStream {
    match kind {
        SearchKind::Text => {
            quote! { ::sift::Value::Text(::core::convert::AsRef::<str>::as_ref(v)) }
        }
        SearchKind::Integer => quote! {
            ::sift::SearchInteger::search_integer(v)
                .map_or(::sift::Value::None, ::sift::Value::Integer)
        },
        SearchKind::Decimal => quote! {
            ::sift::SearchDecimal::search_decimal(v)
                .map_or(::sift::Value::None, ::sift::Value::Decimal)
        },
        SearchKind::Boolean => quote! { ::sift::Value::Boolean(*v) },
        SearchKind::Temporal => quote! {
            ::sift::Value::Temporal(::sift::SearchTimestamp::search_timestamp(v))
        },
        SearchKind::Enum => quote! {
            ::sift::Value::Enum(::sift::SearchEnum::variant_name(v))
        },
        // Entities are navigated through, never compared directly.
        SearchKind::Entity => quote! { ::sift::Value::None },
    }
}

/// Wraps a per-element expression (over `v`) for the field's container and
/// optionality, reading from `self.#field`.
fn field_access(field: &syn::Ident, shape: &FieldType<'_>, per_element: TokenStream) -> TokenStream {
    match (shape.container, shape.optional) {
        (ContainerKind::Scalar, false) => quote! {{
            let v = &self.#field;
            #per_element
        }},
        (ContainerKind::Scalar, true) => quote! {
            ::sift::optional_value(&self.#field, |v| #per_element)
        },
        (_, false) => quote! {
            ::sift::Value::List(self.#field.iter().map(|v| #per_element).collect())
        },
        (_, true) => quote! {
            ::sift::optional_value(&self.#field, |c| {
                ::sift::Value::List(c.iter().map(|v| #per_element).collect())
            })
        },
    }
}

/// Main implementation of the Searchable derive macro.
pub fn searchable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let schema_name = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Searchable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Searchable can only be derived for structs",
            ))
        }
    };

    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut schema_entries: Vec<TokenStream> = Vec::new();
    let mut value_arms: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let search_attrs = parse_search_attrs(&field.attrs)?;

        // Skip if marked with #[search(skip)]
        if search_attrs.skip {
            continue;
        }

        // Fields without a kind are not searchable
        let kind = match search_attrs.kind {
            Some(kind) => kind,
            None => continue,
        };

        let storage_name = field_name.to_string();
        let query_name = search_attrs.rename.unwrap_or_else(|| storage_name.clone());
        let shape = analyze(&field.ty);
        let element = shape.element;

        // Generate constant name (SCREAMING_SNAKE_CASE)
        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));
        field_constants.push(quote! {
            /// Field name constant for search criteria.
            pub const #const_name: &'static str = #query_name;
        });

        let declared = match kind {
            SearchKind::Text => quote! { ::sift::ValueType::text() },
            SearchKind::Integer => quote! { ::sift::ValueType::integer() },
            SearchKind::Decimal => quote! { ::sift::ValueType::decimal() },
            SearchKind::Boolean => quote! { ::sift::ValueType::boolean() },
            SearchKind::Temporal => quote! { ::sift::ValueType::temporal() },
            SearchKind::Enum => {
                let enum_name = type_display_name(element).ok_or_else(|| {
                    Error::new(element.span(), "enum fields must have a named type")
                })?;
                quote! {
                    ::sift::ValueType::enumeration(
                        #enum_name,
                        <#element as ::sift::SearchEnum>::VARIANTS.iter().copied(),
                    )
                }
            }
            SearchKind::Entity => quote! { <#element as ::sift::Searchable>::schema() },
        };

        let case = search_attrs
            .case_sensitive
            .map(|case_sensitive| quote! { .with_case_sensitive(#case_sensitive) });
        let container = shape.container.tokens();

        schema_entries.push(quote! {
            .attribute(::sift::Attribute::new(#query_name, #declared) #case)
            .raw_field(::sift::RawField::new(#storage_name, #container))
        });

        let terminal = field_access(field_name, &shape, scalar_value(kind));
        value_arms.push(quote! {
            [#query_name] => #terminal,
        });

        if kind == SearchKind::Entity {
            let nested = field_access(
                field_name,
                &shape,
                quote! { ::sift::Searchable::search_value(v, rest) },
            );
            value_arms.push(quote! {
                [#query_name, rest @ ..] => #nested,
            });
        }
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::sift::Searchable for #struct_name #ty_generics #where_clause {
            fn schema() -> ::std::sync::Arc<::sift::EntitySchema> {
                ::sift::EntitySchema::builder(#schema_name)
                    #(#schema_entries)*
                    .build()
            }

            fn search_value(&self, path: &[&str]) -> ::sift::Value<'_> {
                match path {
                    #(#value_arms)*
                    _ => ::sift::Value::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(tokens: &str) -> Type {
        syn::parse_str(tokens).unwrap()
    }

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("name"), "NAME");
        assert_eq!(to_screaming_snake_case("created_at"), "CREATED_AT");
        assert_eq!(to_screaming_snake_case("homeAddress"), "HOME_ADDRESS");
        assert_eq!(to_screaming_snake_case("my-field"), "MY_FIELD");
    }

    #[test]
    fn test_analyze_containers() {
        let scalar = ty("String");
        let shape = analyze(&scalar);
        assert_eq!(shape.container, ContainerKind::Scalar);
        assert!(!shape.optional);

        let seq = ty("Vec<String>");
        let shape = analyze(&seq);
        assert_eq!(shape.container, ContainerKind::Sequence);
        assert_eq!(type_display_name(shape.element).as_deref(), Some("String"));

        let set = ty("std::collections::BTreeSet<Status>");
        assert_eq!(analyze(&set).container, ContainerKind::Set);

        let array = ty("[i32; 4]");
        assert_eq!(analyze(&array).container, ContainerKind::Array);
    }

    #[test]
    fn test_analyze_optional() {
        let opt = ty("Option<i64>");
        let shape = analyze(&opt);
        assert!(shape.optional);
        assert_eq!(shape.container, ContainerKind::Scalar);
        assert_eq!(type_display_name(shape.element).as_deref(), Some("i64"));

        let opt_seq = ty("Option<Vec<Tag>>");
        let shape = analyze(&opt_seq);
        assert!(shape.optional);
        assert_eq!(shape.container, ContainerKind::Sequence);
        assert_eq!(type_display_name(shape.element).as_deref(), Some("Tag"));
    }

    #[test]
    fn test_rejects_tuple_structs() {
        let input: DeriveInput = syn::parse_str("struct Point(i32, i32);").unwrap();
        let err = searchable_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn test_generates_schema_and_accessor() {
        let input: DeriveInput = syn::parse_str(
            r#"
            struct Person {
                #[search(Text, case_insensitive)]
                name: String,
                #[search(Text, rename = "labels")]
                tags: Vec<String>,
                #[search(Entity)]
                address: Address,
                internal: u64,
            }
            "#,
        )
        .unwrap();
        let output = searchable_derive_impl(input).unwrap().to_string();
        assert!(output.contains("pub const NAME"));
        assert!(output.contains("pub const LABELS"));
        assert!(!output.contains("INTERNAL"));
        assert!(output.contains("\"labels\""));
        assert!(output.contains("\"tags\""));
        assert!(output.contains("Container :: Sequence"));
        assert!(output.contains("with_case_sensitive (false)"));
        assert!(output.contains("rest @ .."));
    }
}
