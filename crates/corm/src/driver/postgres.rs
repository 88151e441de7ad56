//! PostgreSQL CORM driver.

use std::sync::Arc;

use crate::agent::AgentProvider;
use crate::dialect::{Dialect, POSTGRES};
use crate::driver::OrmDriver;

/// Driver for PostgreSQL 9.x and later.
pub struct PostgresDriver {
    provider: Arc<dyn AgentProvider>,
}

impl PostgresDriver {
    pub const PROVIDER_NAME: &'static str = "PostgreSQL CORM Driver";
    pub const CONNECTION_DRIVER: &'static str = "tokio-postgres";

    /// Driver with the stock tokio-postgres agent, built from
    /// data-source parameters.
    #[cfg(feature = "postgres")]
    pub fn new(params: std::collections::HashMap<String, String>) -> Self {
        Self {
            provider: Arc::new(crate::agent::postgres::PgAgentProvider::new(params)),
        }
    }

    /// Driver over a caller-supplied agent provider. This is how tests
    /// plug in an in-memory agent.
    pub fn with_provider(provider: Arc<dyn AgentProvider>) -> Self {
        Self { provider }
    }
}

impl OrmDriver for PostgresDriver {
    fn provider_name(&self) -> &'static str {
        Self::PROVIDER_NAME
    }

    fn connection_driver(&self) -> &'static str {
        Self::CONNECTION_DRIVER
    }

    fn dialect(&self) -> &Dialect {
        &POSTGRES
    }

    fn provider(&self) -> &dyn AgentProvider {
        self.provider.as_ref()
    }
}
