//! # corm
//!
//! Annotation-driven object-relational mapping core: map plain structs
//! to tables with `#[derive(Entity)]`, and let a product-specific
//! driver generate and execute the SELECT / GET / INSERT / UPDATE /
//! DELETE statements for them.
//!
//! ## Features
//!
//! - `derive` (default): the `#[derive(Entity)]` macro.
//! - `postgres` (default): the tokio-postgres connection agent and the
//!   built-in `postgresql` registry entry.
//!
//! ## Example
//!
//! ```ignore
//! use corm::{Entity, OrmDriver, OrmDriverExt, PostgresDriver};
//!
//! #[derive(Entity, Default)]
//! #[orm(table = "weather")]
//! struct Weather {
//!     #[orm(summary, sort = "asc")]
//!     city: String,
//!     #[orm(column = "tempmin", summary)]
//!     temp_min: i16,
//!     #[orm(column = "tempmax")]
//!     temp_max: i16,
//!     precipitation: i16,
//!     #[orm(primary_key, autogenerated)]
//!     id: Option<i32>,
//! }
//!
//! # async fn run(driver: PostgresDriver) -> corm::OrmResult<()> {
//! let girona = Weather {
//!     city: "Girona".into(),
//!     temp_min: 2,
//!     temp_max: 14,
//!     precipitation: 3,
//!     id: None,
//! };
//! let outcome = driver.insert(&girona).await?;
//! println!("ran: {}", outcome.sql);
//!
//! let found = driver
//!     .fetch(Weather { id: Some(7), ..Default::default() })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod builder;
pub mod codec;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod meta;
pub mod registry;
pub mod value;

pub use agent::{AgentProvider, ConnectionAgent, Row};
pub use codec::Scalar;
pub use dialect::{Dialect, POSTGRES};
pub use driver::postgres::PostgresDriver;
pub use driver::{Fetch, Mutation, OrmDriver, OrmDriverExt, Query};
pub use error::{DriverLoadError, OrmError, OrmResult};
pub use meta::{Described, Entity, EntityMeta, FieldMeta, SortOrder};
pub use registry::{DataSourceConfig, DriverCtor, OrmConfig, OrmRegistry};
pub use value::{SqlType, SqlValue};

#[cfg(feature = "derive")]
pub use corm_derive::Entity;
