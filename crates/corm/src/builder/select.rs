use crate::builder::filter;
use crate::dialect::Dialect;
use crate::error::{OrmError, OrmResult};
use crate::meta::{Entity, EntityMeta, SortOrder};

/// SELECT over the whole table, columns aliased with their display
/// labels.
///
/// With `all_columns` false only summary fields are listed; a mapping
/// that marks none is rejected. An ORDER BY clause is appended only
/// when some field declares a sort, ascending fields first, then
/// descending, declaration order within each group.
pub fn select(dialect: &Dialect, meta: &EntityMeta, all_columns: bool) -> OrmResult<String> {
    meta.validate()?;

    let columns: Vec<String> = meta
        .fields
        .iter()
        .filter(|f| all_columns || f.in_summary)
        .map(|f| format!("{} As \"{}\"", f.column, f.label))
        .collect();
    if columns.is_empty() {
        return Err(OrmError::invalid_mapping(format!(
            "entity mapped to table '{}' declares no summary fields",
            meta.table
        )));
    }

    let mut sql = format!(
        "{} {} {} {}",
        dialect.select,
        columns.join(", "),
        dialect.from,
        meta.table
    );

    if meta.has_sorted_fields() {
        let mut terms = Vec::new();
        for field in meta.fields.iter().filter(|f| f.sort == SortOrder::Ascending) {
            terms.push(format!("{} {}", field.column, dialect.asc));
        }
        for field in meta.fields.iter().filter(|f| f.sort == SortOrder::Descending) {
            terms.push(format!("{} {}", field.column, dialect.desc));
        }
        sql.push_str(&format!(" {} {}", dialect.order_by, terms.join(", ")));
    }

    Ok(sql)
}

/// SELECT of a single row addressed by the record's primary key.
/// Columns are listed plainly (no aliases) so result columns map back
/// onto fields by name.
pub fn get_by_key(dialect: &Dialect, record: &dyn Entity) -> OrmResult<String> {
    let meta = record.meta();
    let predicate = filter(dialect, record)?;

    let columns: Vec<&str> = meta.fields.iter().map(|f| f.column).collect();
    Ok(format!(
        "{} {} {} {} {}",
        dialect.select,
        columns.join(", "),
        dialect.from,
        meta.table,
        predicate
    ))
}
