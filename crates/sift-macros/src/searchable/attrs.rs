//! Attribute parsing for the Searchable derive macro.
//!
//! This module provides parsers for the `#[search(...)]` field attributes
//! used by the `Searchable` derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Ident, Lit, LitStr, Meta, Result, Token,
};

const EXPECTED_KINDS: &str = "Text, Integer, Decimal, Boolean, Temporal, Enum, Entity";

/// The kind of a searchable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Text field: `#[search(Text)]`
    Text,
    /// Integer field: `#[search(Integer)]`
    Integer,
    /// Decimal field: `#[search(Decimal)]`
    Decimal,
    /// Boolean field: `#[search(Boolean)]`
    Boolean,
    /// Date/time field: `#[search(Temporal)]`
    Temporal,
    /// Enumeration field: `#[search(Enum)]`
    Enum,
    /// Nested searchable struct: `#[search(Entity)]`
    Entity,
}

impl SearchKind {
    fn lookup(name: &str) -> Option<Self> {
        let kind = match name {
            "Text" | "text" | "String" | "string" => SearchKind::Text,
            "Integer" | "integer" | "Int" | "int" => SearchKind::Integer,
            "Decimal" | "decimal" => SearchKind::Decimal,
            "Boolean" | "boolean" | "Bool" | "bool" => SearchKind::Boolean,
            "Temporal" | "temporal" | "Timestamp" | "timestamp" => SearchKind::Temporal,
            "Enum" | "enum" | "enumeration" => SearchKind::Enum,
            "Entity" | "entity" => SearchKind::Entity,
            _ => return None,
        };
        Some(kind)
    }

    /// Parse a search kind from an identifier.
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        let name = ident.to_string();
        Self::lookup(&name).ok_or_else(|| {
            Error::new(
                ident.span(),
                format!("unknown search kind: '{name}'. Expected one of: {EXPECTED_KINDS}"),
            )
        })
    }

    /// Parse a search kind from a string literal (`ty = "enum"`).
    pub fn from_lit(lit: &LitStr) -> Result<Self> {
        let name = lit.value();
        Self::lookup(&name).ok_or_else(|| {
            Error::new(
                lit.span(),
                format!("unknown search kind: '{name}'. Expected one of: {EXPECTED_KINDS}"),
            )
        })
    }
}

/// Field-level attributes from `#[search(...)]`.
#[derive(Debug, Clone)]
pub struct SearchAttr {
    /// The kind of this searchable field.
    pub kind: Option<SearchKind>,
    /// Exclude this field from the schema.
    pub skip: bool,
    /// Query name (default: field name).
    pub rename: Option<String>,
    /// Per-field case sensitivity for text comparisons.
    pub case_sensitive: Option<bool>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for SearchAttr {
    fn default() -> Self {
        SearchAttr {
            kind: None,
            skip: false,
            rename: None,
            case_sensitive: None,
            span: Span::call_site(),
        }
    }
}

fn string_value<'a>(expr: &'a Expr, what: &str) -> Result<&'a LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s),
        other => Err(Error::new(
            other.span(),
            format!("{what} must be a string literal"),
        )),
    }
}

impl Parse for SearchAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = SearchAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                // Kind or flag: search(Text), search(skip), search(case_insensitive)
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("case_insensitive") {
                        attr.case_sensitive = Some(false);
                    } else if p.is_ident("case_sensitive") {
                        attr.case_sensitive = Some(true);
                    } else if let Some(ident) = p.get_ident() {
                        attr.kind = Some(SearchKind::from_ident(ident)?);
                        attr.span = ident.span();
                    } else {
                        return Err(Error::new(
                            p.span(),
                            format!("expected search kind: {EXPECTED_KINDS}, or skip"),
                        ));
                    }
                }

                // rename = "custom_name" or ty = "enum"
                Meta::NameValue(nv) => {
                    if nv.path.is_ident("rename") {
                        attr.rename = Some(string_value(&nv.value, "rename")?.value());
                    } else if nv.path.is_ident("ty") {
                        let lit = string_value(&nv.value, "ty")?;
                        attr.kind = Some(SearchKind::from_lit(lit)?);
                        attr.span = lit.span();
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename or ty",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown search attribute. Expected a kind, skip, case_insensitive, case_sensitive, rename = \"...\", or ty = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[search(...)]` attributes from a field's attributes.
pub fn parse_search_attrs(attrs: &[Attribute]) -> Result<SearchAttr> {
    for attr in attrs {
        if attr.path().is_ident("search") {
            return attr.parse_args::<SearchAttr>();
        }
    }
    Ok(SearchAttr::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_search(tokens: &str) -> Result<SearchAttr> {
        syn::parse_str::<SearchAttr>(tokens)
    }

    #[test]
    fn test_search_text() {
        let attr = parse_search("Text").unwrap();
        assert_eq!(attr.kind, Some(SearchKind::Text));
        assert!(!attr.skip);
        assert_eq!(attr.case_sensitive, None);
    }

    #[test]
    fn test_search_kind_aliases() {
        assert_eq!(parse_search("string").unwrap().kind, Some(SearchKind::Text));
        assert_eq!(parse_search("integer").unwrap().kind, Some(SearchKind::Integer));
        assert_eq!(parse_search("Decimal").unwrap().kind, Some(SearchKind::Decimal));
        assert_eq!(parse_search("Bool").unwrap().kind, Some(SearchKind::Boolean));
        assert_eq!(parse_search("Timestamp").unwrap().kind, Some(SearchKind::Temporal));
        assert_eq!(parse_search("enumeration").unwrap().kind, Some(SearchKind::Enum));
        assert_eq!(parse_search("Entity").unwrap().kind, Some(SearchKind::Entity));
    }

    #[test]
    fn test_search_enum_via_ty() {
        // `enum` is a keyword, so the lowercase form goes through `ty`
        let attr = parse_search(r#"ty = "enum""#).unwrap();
        assert_eq!(attr.kind, Some(SearchKind::Enum));
    }

    #[test]
    fn test_search_skip() {
        let attr = parse_search("skip").unwrap();
        assert!(attr.skip);
        assert_eq!(attr.kind, None);
    }

    #[test]
    fn test_search_rename_and_case() {
        let attr = parse_search(r#"Text, rename = "labels", case_insensitive"#).unwrap();
        assert_eq!(attr.kind, Some(SearchKind::Text));
        assert_eq!(attr.rename, Some("labels".to_string()));
        assert_eq!(attr.case_sensitive, Some(false));

        let attr = parse_search("Text, case_sensitive").unwrap();
        assert_eq!(attr.case_sensitive, Some(true));
    }

    #[test]
    fn test_search_invalid_kind() {
        let result = parse_search("Uuid");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown search kind"));

        assert!(parse_search(r#"ty = "blob""#).is_err());
    }

    #[test]
    fn test_search_rename_requires_string() {
        let result = parse_search("Text, rename = 3");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("rename must be a string literal"));
    }

    #[test]
    fn test_search_unknown_name_value() {
        assert!(parse_search(r#"alias = "x""#).is_err());
    }
}
