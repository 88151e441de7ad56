use crate::builder::filter;
use crate::codec;
use crate::dialect::Dialect;
use crate::error::{OrmError, OrmResult};
use crate::meta::Entity;

/// UPDATE of the row addressed by the record's primary key.
///
/// The SET list excludes primary-key and read-only fields; the key goes
/// in the WHERE clause instead.
pub fn update(dialect: &Dialect, record: &dyn Entity) -> OrmResult<String> {
    let meta = record.meta();
    let predicate = filter(dialect, record)?;

    let mut assignments = Vec::new();
    for field in meta.fields.iter().filter(|f| !f.primary_key && !f.read_only) {
        let literal = codec::encode(dialect, &record.read(field.column));
        assignments.push(format!("{} = {}", field.column, literal));
    }
    if assignments.is_empty() {
        return Err(OrmError::invalid_mapping(format!(
            "entity mapped to table '{}' declares no updatable fields",
            meta.table
        )));
    }

    Ok(format!(
        "{} {} {} {} {}",
        dialect.update,
        meta.table,
        dialect.set,
        assignments.join(", "),
        predicate
    ))
}
