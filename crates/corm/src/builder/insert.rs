use crate::codec;
use crate::dialect::Dialect;
use crate::error::{OrmError, OrmResult};
use crate::meta::Entity;

/// INSERT with one encoded literal per writable column.
///
/// Read-only and autogenerated fields are left out of both the column
/// list and the value list; the database fills them.
pub fn insert(dialect: &Dialect, record: &dyn Entity) -> OrmResult<String> {
    let meta = record.meta();
    meta.validate()?;

    let mut columns = Vec::new();
    let mut literals = Vec::new();
    for field in meta.fields.iter().filter(|f| !f.read_only && !f.autogenerated) {
        columns.push(field.column);
        literals.push(codec::encode(dialect, &record.read(field.column)));
    }
    if columns.is_empty() {
        return Err(OrmError::invalid_mapping(format!(
            "entity mapped to table '{}' declares no insertable fields",
            meta.table
        )));
    }

    Ok(format!(
        "{} {} ({}) {} ({})",
        dialect.insert_into,
        meta.table,
        columns.join(", "),
        dialect.values,
        literals.join(", ")
    ))
}
