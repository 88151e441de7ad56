//! Entity field-mapping tables and the accessor traits over them.
//!
//! Mapping metadata is static: `#[derive(Entity)]` emits one
//! [`EntityMeta`] per struct at compile time. Hand-written impls are
//! also possible; [`EntityMeta::validate`] is the runtime guard for
//! those.

use crate::error::{OrmError, OrmResult};
use crate::value::{SqlType, SqlValue};

/// Sort participation of a mapped field in generated SELECT statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

/// Mapping descriptor for one struct field.
#[derive(Debug, Clone)]
pub struct FieldMeta {
    /// Database column name.
    pub column: &'static str,
    /// Human-readable display label, emitted as the SELECT column alias.
    pub label: &'static str,
    /// Declared type family.
    pub ty: SqlType,
    /// Part of the table's primary key.
    pub primary_key: bool,
    /// Never written by generated INSERT or UPDATE statements.
    pub read_only: bool,
    /// Populated by the database; excluded from INSERT.
    pub autogenerated: bool,
    pub sort: SortOrder,
    /// Included in summary (non-`all_columns`) SELECT lists.
    pub in_summary: bool,
}

/// Mapping descriptor for one entity type.
#[derive(Debug, Clone)]
pub struct EntityMeta {
    pub table: &'static str,
    /// Field descriptors in declaration order. Statement builders
    /// preserve this order everywhere.
    pub fields: &'static [FieldMeta],
}

impl EntityMeta {
    /// A mapping with no fields cannot generate any statement.
    pub fn validate(&self) -> OrmResult<()> {
        if self.fields.is_empty() {
            return Err(OrmError::invalid_mapping(format!(
                "entity mapped to table '{}' declares no fields",
                self.table
            )));
        }
        Ok(())
    }

    /// Primary-key fields in declaration order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &FieldMeta> {
        self.fields.iter().filter(|f| f.primary_key)
    }

    pub fn has_primary_key(&self) -> bool {
        self.fields.iter().any(|f| f.primary_key)
    }

    pub fn has_sorted_fields(&self) -> bool {
        self.fields.iter().any(|f| f.sort != SortOrder::None)
    }
}

/// A mapped record instance. Object-safe so drivers can operate on
/// `&dyn Entity` / `&mut dyn Entity`.
pub trait Entity: Send + Sync {
    /// The static mapping table for this entity type.
    fn meta(&self) -> &'static EntityMeta;

    /// Read the current value of the field mapped to `column`.
    /// Unknown columns read as `Null`.
    fn read(&self, column: &str) -> SqlValue;

    /// Write a decoded row value into the field mapped to `column`.
    /// Unknown columns are ignored.
    fn write(&mut self, column: &str, value: SqlValue) -> OrmResult<()>;
}

/// Type-level metadata lookup, for operations that take no instance
/// (listing a table, for example).
pub trait Described: Entity {
    fn describe() -> &'static EntityMeta;
}

#[cfg(test)]
mod tests {
    use super::*;

    static EMPTY: EntityMeta = EntityMeta {
        table: "nothing",
        fields: &[],
    };

    static KEYED: EntityMeta = EntityMeta {
        table: "keyed",
        fields: &[
            FieldMeta {
                column: "id",
                label: "Id",
                ty: SqlType::Int,
                primary_key: true,
                read_only: false,
                autogenerated: true,
                sort: SortOrder::None,
                in_summary: false,
            },
            FieldMeta {
                column: "name",
                label: "Name",
                ty: SqlType::Text,
                primary_key: false,
                read_only: false,
                autogenerated: false,
                sort: SortOrder::Ascending,
                in_summary: true,
            },
        ],
    };

    #[test]
    fn empty_mapping_fails_validation() {
        assert!(EMPTY.validate().unwrap_err().is_invalid_mapping());
        assert!(KEYED.validate().is_ok());
    }

    #[test]
    fn primary_key_fields_keep_declaration_order() {
        let keys: Vec<_> = KEYED.primary_key_fields().map(|f| f.column).collect();
        assert_eq!(keys, ["id"]);
        assert!(KEYED.has_primary_key());
        assert!(!EMPTY.has_primary_key());
    }

    #[test]
    fn sorted_field_detection() {
        assert!(KEYED.has_sorted_fields());
        assert!(!EMPTY.has_sorted_fields());
    }
}
