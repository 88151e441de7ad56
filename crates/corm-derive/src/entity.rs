//! Entity derive macro implementation.
//!
//! Emits a static field-mapping table plus `corm::Entity` and
//! `corm::Described` impls for the annotated struct.

use heck::ToTitleCase;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{SortKind, get_field_attr, get_table_name};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let table = get_table_name(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Entity can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Entity can only be derived for structs",
            ));
        }
    };
    if fields.is_empty() {
        return Err(syn::Error::new_spanned(
            &input,
            "Entity requires at least one mapped field",
        ));
    }

    let mut metas = Vec::new();
    let mut read_arms = Vec::new();
    let mut write_arms = Vec::new();

    for field in fields {
        let ident = field.ident.as_ref().unwrap();
        let ty = &field.ty;
        let attr = get_field_attr(field)?;

        let column = attr.column.unwrap_or_else(|| ident.to_string());
        let label = attr
            .label
            .unwrap_or_else(|| ident.to_string().to_title_case());
        let primary_key = attr.primary_key;
        let read_only = attr.read_only;
        let autogenerated = attr.autogenerated;
        let summary = attr.summary;
        let sort = match attr.sort {
            Some(SortKind::Ascending) => quote!(corm::SortOrder::Ascending),
            Some(SortKind::Descending) => quote!(corm::SortOrder::Descending),
            None => quote!(corm::SortOrder::None),
        };

        metas.push(quote! {
            corm::FieldMeta {
                column: #column,
                label: #label,
                ty: <#ty as corm::Scalar>::SQL_TYPE,
                primary_key: #primary_key,
                read_only: #read_only,
                autogenerated: #autogenerated,
                sort: #sort,
                in_summary: #summary,
            }
        });
        read_arms.push(quote! {
            #column => corm::Scalar::to_value(&self.#ident),
        });
        write_arms.push(quote! {
            #column => self.#ident = corm::Scalar::from_value(value)?,
        });
    }

    Ok(quote! {
        impl corm::Described for #name {
            fn describe() -> &'static corm::EntityMeta {
                static META: corm::EntityMeta = corm::EntityMeta {
                    table: #table,
                    fields: &[#(#metas),*],
                };
                &META
            }
        }

        impl corm::Entity for #name {
            fn meta(&self) -> &'static corm::EntityMeta {
                <Self as corm::Described>::describe()
            }

            fn read(&self, column: &str) -> corm::SqlValue {
                match column {
                    #(#read_arms)*
                    _ => corm::SqlValue::Null,
                }
            }

            fn write(&mut self, column: &str, value: corm::SqlValue) -> corm::OrmResult<()> {
                match column {
                    #(#write_arms)*
                    _ => {}
                }
                Ok(())
            }
        }
    })
}
