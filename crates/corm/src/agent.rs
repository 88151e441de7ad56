//! Connection agents: the seam between the driver and the database
//! client library.
//!
//! A driver never holds an open connection. For each operation it asks
//! its [`AgentProvider`] for a fresh agent, connects, executes, and
//! disconnects before returning, whatever the outcome.

use async_trait::async_trait;

use crate::error::OrmResult;
use crate::value::SqlValue;

/// One result row: ordered column-name / value pairs, in result-set
/// column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: SqlValue) {
        self.columns.push((column.into(), value));
    }

    /// First value stored under `column`, if any.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl FromIterator<(String, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, SqlValue)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// A single database connection with statement execution over it.
#[async_trait]
pub trait ConnectionAgent: Send {
    /// Open the underlying connection.
    async fn connect(&mut self) -> OrmResult<()>;

    /// Close the underlying connection. Idempotent.
    async fn disconnect(&mut self);

    /// Run a statement that returns no rows; yields the affected-row
    /// count.
    async fn execute(&mut self, sql: &str) -> OrmResult<u64>;

    /// Run a query and materialize every result row.
    async fn execute_query(&mut self, sql: &str) -> OrmResult<Vec<Row>>;

    /// Commit the current transaction. A no-op for agents running in
    /// autocommit mode.
    async fn commit(&mut self) -> OrmResult<()>;
}

/// Hands out a fresh, unconnected agent per operation.
pub trait AgentProvider: Send + Sync {
    fn agent(&self) -> OrmResult<Box<dyn ConnectionAgent>>;
}

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_lookup_by_column_name() {
        let mut row = Row::new();
        row.push("id", SqlValue::Int(7));
        row.push("city", SqlValue::Text("Girona".into()));
        assert_eq!(row.get("id"), Some(&SqlValue::Int(7)));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
    }

    #[test]
    fn row_preserves_insertion_order() {
        let row: Row = [
            ("b".to_string(), SqlValue::Int(2)),
            ("a".to_string(), SqlValue::Int(1)),
        ]
        .into_iter()
        .collect();
        let names: Vec<_> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
