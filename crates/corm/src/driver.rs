//! Drivers: dialect + agent provider + the five entity operations.
//!
//! Every operation is self-contained: it builds its statement, takes a
//! fresh agent from the provider, connects, executes and disconnects,
//! then returns an outcome struct carrying the generated SQL so callers
//! can log or surface it without any driver-level mutable state.

use async_trait::async_trait;

use crate::agent::{AgentProvider, Row};
use crate::builder;
use crate::codec;
use crate::dialect::Dialect;
use crate::error::OrmResult;
use crate::meta::{Described, Entity, EntityMeta};

/// Outcome of a multi-row query.
#[derive(Debug)]
pub struct Query {
    /// The statement that was executed.
    pub sql: String,
    pub rows: Vec<Row>,
}

/// Outcome of a single-row fetch.
#[derive(Debug)]
pub struct Fetch {
    pub sql: String,
    /// Whether a row matched the key and was written into the record.
    pub found: bool,
}

/// Outcome of an INSERT, UPDATE or DELETE.
#[derive(Debug)]
pub struct Mutation {
    pub sql: String,
    pub rows_affected: u64,
}

/// A database-product-specific CORM driver.
///
/// Concrete drivers supply identity, a dialect and an agent provider;
/// the entity operations are provided on top of those and are the same
/// for every product.
#[async_trait]
pub trait OrmDriver: Send + Sync {
    /// Human-readable provider name, for diagnostics.
    fn provider_name(&self) -> &'static str;

    /// Name of the client library the stock agent rides on.
    fn connection_driver(&self) -> &'static str;

    fn dialect(&self) -> &Dialect;

    fn provider(&self) -> &dyn AgentProvider;

    /// List the mapped table, every column or summary columns only.
    async fn select(&self, meta: &EntityMeta, all_columns: bool) -> OrmResult<Query> {
        let sql = builder::select(self.dialect(), meta, all_columns)?;
        tracing::debug!(table = meta.table, sql = %sql, "select");
        let rows = run_query(self.provider(), &sql).await?;
        Ok(Query { sql, rows })
    }

    /// Fetch the row addressed by the record's primary key and write
    /// the column values back into the record. `found` is false when no
    /// row matched; the record is left untouched in that case.
    async fn get(&self, record: &mut dyn Entity) -> OrmResult<Fetch> {
        let sql = builder::get_by_key(self.dialect(), record)?;
        let meta = record.meta();
        tracing::debug!(table = meta.table, sql = %sql, "get");
        let rows = run_query(self.provider(), &sql).await?;
        let Some(row) = rows.first() else {
            return Ok(Fetch { sql, found: false });
        };
        // Decode every column before writing any of them, so a decode
        // failure leaves the record untouched.
        let mut decoded = Vec::with_capacity(meta.fields.len());
        for field in meta.fields {
            if let Some(value) = row.get(field.column) {
                decoded.push((field.column, codec::decode(value.clone(), field.ty)?));
            }
        }
        for (column, value) in decoded {
            record.write(column, value)?;
        }
        Ok(Fetch { sql, found: true })
    }

    async fn insert(&self, record: &dyn Entity) -> OrmResult<Mutation> {
        let sql = builder::insert(self.dialect(), record)?;
        tracing::debug!(table = record.meta().table, sql = %sql, "insert");
        let rows_affected = run_execute(self.provider(), &sql).await?;
        Ok(Mutation { sql, rows_affected })
    }

    async fn update(&self, record: &dyn Entity) -> OrmResult<Mutation> {
        let sql = builder::update(self.dialect(), record)?;
        tracing::debug!(table = record.meta().table, sql = %sql, "update");
        let rows_affected = run_execute(self.provider(), &sql).await?;
        Ok(Mutation { sql, rows_affected })
    }

    async fn delete(&self, record: &dyn Entity) -> OrmResult<Mutation> {
        let sql = builder::delete(self.dialect(), record)?;
        tracing::debug!(table = record.meta().table, sql = %sql, "delete");
        let rows_affected = run_execute(self.provider(), &sql).await?;
        Ok(Mutation { sql, rows_affected })
    }
}

impl std::fmt::Debug for dyn OrmDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrmDriver")
            .field("provider_name", &self.provider_name())
            .field("connection_driver", &self.connection_driver())
            .finish()
    }
}

async fn run_query(provider: &dyn AgentProvider, sql: &str) -> OrmResult<Vec<Row>> {
    let mut agent = provider.agent()?;
    agent.connect().await?;
    let result = agent.execute_query(sql).await;
    agent.disconnect().await;
    result
}

async fn run_execute(provider: &dyn AgentProvider, sql: &str) -> OrmResult<u64> {
    let mut agent = provider.agent()?;
    agent.connect().await?;
    let result = agent.execute(sql).await;
    agent.disconnect().await;
    result
}

/// Typed convenience layer over the object-safe driver operations.
pub trait OrmDriverExt: OrmDriver {
    /// List the table mapped by `E`.
    fn select_as<E: Described>(
        &self,
        all_columns: bool,
    ) -> impl std::future::Future<Output = OrmResult<Query>> + Send {
        self.select(E::describe(), all_columns)
    }

    /// Fetch by primary key; `None` when no row matched.
    fn fetch<E: Described + 'static>(
        &self,
        mut record: E,
    ) -> impl std::future::Future<Output = OrmResult<Option<E>>> + Send {
        async move {
            let outcome = self.get(&mut record).await?;
            Ok(outcome.found.then_some(record))
        }
    }
}

impl<D: OrmDriver + ?Sized> OrmDriverExt for D {}

pub mod postgres;
