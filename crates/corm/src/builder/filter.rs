use crate::codec;
use crate::dialect::Dialect;
use crate::error::{OrmError, OrmResult};
use crate::meta::Entity;

/// WHERE clause matching the record's primary key, predicates in
/// declaration order joined with the dialect AND keyword.
///
/// Shared by get, update and delete: a mapping with no primary key
/// cannot address a single row, so it is rejected here before any
/// statement text is assembled.
pub fn filter(dialect: &Dialect, record: &dyn Entity) -> OrmResult<String> {
    let meta = record.meta();
    meta.validate()?;

    let mut predicates = Vec::new();
    for field in meta.primary_key_fields() {
        let literal = codec::encode(dialect, &record.read(field.column));
        predicates.push(format!("{} = {}", field.column, literal));
    }
    if predicates.is_empty() {
        return Err(OrmError::invalid_mapping(format!(
            "entity mapped to table '{}' declares no primary key",
            meta.table
        )));
    }

    Ok(format!(
        "{} {}",
        dialect.r#where,
        predicates.join(&format!(" {} ", dialect.and))
    ))
}
