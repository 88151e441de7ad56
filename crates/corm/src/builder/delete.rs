use crate::builder::filter;
use crate::dialect::Dialect;
use crate::error::OrmResult;
use crate::meta::Entity;

/// DELETE of the row addressed by the record's primary key.
pub fn delete(dialect: &Dialect, record: &dyn Entity) -> OrmResult<String> {
    let meta = record.meta();
    let predicate = filter(dialect, record)?;
    Ok(format!("{} {} {}", dialect.delete_from, meta.table, predicate))
}
