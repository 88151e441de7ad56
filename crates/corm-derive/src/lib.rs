//! Derive macros for corm
//!
//! Provides the `#[derive(Entity)]` macro.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod entity;

/// Derive the `Entity` mapping for a struct.
///
/// # Example
///
/// ```ignore
/// use corm::Entity;
///
/// #[derive(Entity)]
/// #[orm(table = "weather")]
/// struct Weather {
///     #[orm(summary, sort = "asc")]
///     city: String,
///     #[orm(column = "tempmin", label = "Min. Temperature", summary)]
///     temp_min: i16,
///     #[orm(primary_key, autogenerated)]
///     id: Option<i32>,
/// }
/// ```
///
/// # Attributes
///
/// Struct level:
///
/// - `#[orm(table = "name")]` - Table the struct maps to (required)
///
/// Field level:
///
/// - `column = "name"` - Column name (defaults to the field name)
/// - `label = "text"` - Display label (defaults to the title-cased
///   field name)
/// - `primary_key` - Part of the primary key
/// - `read_only` - Never written by INSERT or UPDATE
/// - `autogenerated` - Filled by the database; excluded from INSERT
/// - `sort = "asc" | "desc"` - Participates in the default ordering
/// - `summary` - Included in summary SELECT column lists
#[proc_macro_derive(Entity, attributes(orm))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
