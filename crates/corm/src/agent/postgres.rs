//! Stock tokio-postgres connection agent.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio_postgres::NoTls;
use tokio_postgres::types::Type;

use crate::agent::{AgentProvider, ConnectionAgent, Row};
use crate::error::{OrmError, OrmResult};
use crate::value::SqlValue;

/// One tokio-postgres connection. Runs in autocommit mode, so `commit`
/// is a no-op.
pub struct PgAgent {
    config: String,
    client: Option<tokio_postgres::Client>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl PgAgent {
    /// Build an agent from data-source parameters. Recognized keys:
    /// `host`, `port`, `user`, `password`, `dbname`.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut parts = Vec::new();
        for key in ["host", "port", "user", "password", "dbname"] {
            if let Some(value) = params.get(key) {
                parts.push(format!("{key}={value}"));
            }
        }
        Self {
            config: parts.join(" "),
            client: None,
            handle: None,
        }
    }

    fn client(&mut self) -> OrmResult<&tokio_postgres::Client> {
        self.client
            .as_ref()
            .ok_or_else(|| OrmError::Connection("agent is not connected".into()))
    }
}

#[async_trait]
impl ConnectionAgent for PgAgent {
    async fn connect(&mut self) -> OrmResult<()> {
        let (client, connection) = tokio_postgres::connect(&self.config, NoTls)
            .await
            .map_err(|e| OrmError::Connection(e.to_string()))?;
        self.handle = Some(tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "postgres connection task ended with error");
            }
        }));
        self.client = Some(client);
        Ok(())
    }

    async fn disconnect(&mut self) {
        // Dropping the client closes the socket; the connection task
        // then finishes on its own.
        self.client = None;
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    async fn execute(&mut self, sql: &str) -> OrmResult<u64> {
        self.client()?
            .execute(sql, &[])
            .await
            .map_err(|e| OrmError::Execution(e.to_string()))
    }

    async fn execute_query(&mut self, sql: &str) -> OrmResult<Vec<Row>> {
        let rows = self
            .client()?
            .query(sql, &[])
            .await
            .map_err(|e| OrmError::Execution(e.to_string()))?;
        rows.iter().map(row_to_values).collect()
    }

    async fn commit(&mut self) -> OrmResult<()> {
        Ok(())
    }
}

/// Map one tokio-postgres row into the plain-row currency, column by
/// column.
fn row_to_values(row: &tokio_postgres::Row) -> OrmResult<Row> {
    fn opt<'a, T, F>(row: &'a tokio_postgres::Row, idx: usize, wrap: F) -> OrmResult<SqlValue>
    where
        T: tokio_postgres::types::FromSql<'a>,
        F: FnOnce(T) -> SqlValue,
    {
        let value: Option<T> = row
            .try_get(idx)
            .map_err(|e| OrmError::decode(row.columns()[idx].name(), e.to_string()))?;
        Ok(value.map(wrap).unwrap_or(SqlValue::Null))
    }

    let mut out = Row::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let ty = column.type_();
        let value = if *ty == Type::BOOL {
            opt(row, idx, SqlValue::Bool)?
        } else if *ty == Type::CHAR {
            opt(row, idx, SqlValue::TinyInt)?
        } else if *ty == Type::INT2 {
            opt(row, idx, SqlValue::SmallInt)?
        } else if *ty == Type::INT4 {
            opt(row, idx, SqlValue::Int)?
        } else if *ty == Type::INT8 {
            opt(row, idx, SqlValue::BigInt)?
        } else if *ty == Type::FLOAT4 {
            opt(row, idx, SqlValue::Float)?
        } else if *ty == Type::FLOAT8 {
            opt(row, idx, SqlValue::Double)?
        } else if *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::BPCHAR || *ty == Type::NAME {
            opt(row, idx, SqlValue::Text)?
        } else if *ty == Type::DATE {
            opt(row, idx, SqlValue::Date)?
        } else if *ty == Type::TIME {
            opt(row, idx, SqlValue::Time)?
        } else if *ty == Type::TIMESTAMP {
            opt(row, idx, SqlValue::Timestamp)?
        } else {
            return Err(OrmError::decode(
                column.name(),
                format!("unsupported postgres column type '{}'", ty.name()),
            ));
        };
        out.push(column.name(), value);
    }
    Ok(out)
}

/// Provider handing out one [`PgAgent`] per operation, all built from
/// the same data-source parameters.
pub struct PgAgentProvider {
    params: HashMap<String, String>,
}

impl PgAgentProvider {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }
}

impl AgentProvider for PgAgentProvider {
    fn agent(&self) -> OrmResult<Box<dyn ConnectionAgent>> {
        Ok(Box::new(PgAgent::from_params(&self.params)))
    }
}
