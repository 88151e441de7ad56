//! Dialect keyword tables.

/// The keyword and formatting table for one target database product.
///
/// Every statement the builders emit is assembled from these entries, so
/// each concrete driver must match the target database's accepted syntax
/// exactly.
#[derive(Debug, Clone)]
pub struct Dialect {
    pub select: &'static str,
    pub from: &'static str,
    pub order_by: &'static str,
    pub asc: &'static str,
    pub desc: &'static str,
    pub insert_into: &'static str,
    pub values: &'static str,
    pub delete_from: &'static str,
    pub r#where: &'static str,
    pub and: &'static str,
    pub update: &'static str,
    pub set: &'static str,
    /// The NULL literal, emitted unquoted.
    pub null: &'static str,
    /// chrono format string for DATE literals.
    pub date_format: &'static str,
    /// chrono format string for TIME literals.
    pub time_format: &'static str,
    /// chrono format string for TIMESTAMP literals.
    pub timestamp_format: &'static str,
}

/// Keyword table for PostgreSQL 9.x and later.
///
/// The `Asc` / `Desc` / `And` capitalization is part of the statement
/// surface existing deployments accept and compare against; keep it as-is.
pub const POSTGRES: Dialect = Dialect {
    select: "SELECT",
    from: "FROM",
    order_by: "ORDER BY",
    asc: "Asc",
    desc: "Desc",
    insert_into: "INSERT INTO",
    values: "VALUES",
    delete_from: "DELETE FROM",
    r#where: "WHERE",
    and: "And",
    update: "UPDATE",
    set: "SET",
    null: "NULL",
    date_format: "%Y/%m/%d",
    time_format: "%H:%M:%S",
    timestamp_format: "%Y/%m/%d %H:%M:%S",
};
