//! Attribute parsing for the Entity derive macro.
//!
//! Handles struct-level and field-level `#[orm(...)]` attributes.

use syn::{DeriveInput, Result};

/// Sort direction named in a `sort = "..."` attribute value.
#[derive(Clone, Copy, PartialEq)]
pub(crate) enum SortKind {
    Ascending,
    Descending,
}

/// Parsed field-level `#[orm(...)]` attribute contents.
#[derive(Default)]
pub(crate) struct FieldAttr {
    pub column: Option<String>,
    pub label: Option<String>,
    pub primary_key: bool,
    pub read_only: bool,
    pub autogenerated: bool,
    pub summary: bool,
    pub sort: Option<SortKind>,
}

impl syn::parse::Parse for FieldAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        // Comma-separated flags and key = "value" pairs.
        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;

            if input.peek(syn::Token![=]) {
                let _: syn::Token![=] = input.parse()?;
                let value: syn::LitStr = input.parse()?;
                if ident == "column" {
                    attr.column = Some(value.value());
                } else if ident == "label" {
                    attr.label = Some(value.value());
                } else if ident == "sort" {
                    attr.sort = Some(match value.value().as_str() {
                        "asc" => SortKind::Ascending,
                        "desc" => SortKind::Descending,
                        other => {
                            return Err(syn::Error::new_spanned(
                                &value,
                                format!("unknown sort direction '{other}', expected \"asc\" or \"desc\""),
                            ));
                        }
                    });
                } else {
                    return Err(syn::Error::new_spanned(
                        &ident,
                        format!("unknown orm attribute '{ident}'"),
                    ));
                }
            } else if ident == "primary_key" {
                attr.primary_key = true;
            } else if ident == "read_only" {
                attr.read_only = true;
            } else if ident == "autogenerated" {
                attr.autogenerated = true;
            } else if ident == "summary" {
                attr.summary = true;
            } else {
                return Err(syn::Error::new_spanned(
                    &ident,
                    format!("unknown orm attribute '{ident}'"),
                ));
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attr)
    }
}

/// Extract the table name from the struct-level
/// `#[orm(table = "...")]` attribute.
pub(crate) fn get_table_name(input: &DeriveInput) -> Result<String> {
    for attr in &input.attrs {
        if attr.path().is_ident("orm") {
            let nested = attr.parse_args::<syn::MetaNameValue>()?;
            if nested.path.is_ident("table") {
                if let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit),
                    ..
                }) = &nested.value
                {
                    return Ok(lit.value());
                }
            }
            return Err(syn::Error::new_spanned(
                attr,
                "expected #[orm(table = \"table_name\")]",
            ));
        }
    }
    Err(syn::Error::new_spanned(
        input,
        "Entity requires a #[orm(table = \"table_name\")] attribute",
    ))
}

/// Merge every field-level `#[orm(...)]` attribute on one field.
pub(crate) fn get_field_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut merged = FieldAttr::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        let parsed = attr.parse_args::<FieldAttr>()?;
        if parsed.column.is_some() {
            merged.column = parsed.column;
        }
        if parsed.label.is_some() {
            merged.label = parsed.label;
        }
        if parsed.sort.is_some() {
            merged.sort = parsed.sort;
        }
        merged.primary_key |= parsed.primary_key;
        merged.read_only |= parsed.read_only;
        merged.autogenerated |= parsed.autogenerated;
        merged.summary |= parsed.summary;
    }
    Ok(merged)
}
