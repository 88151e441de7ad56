//! Data-source configuration and driver resolution.
//!
//! Drivers are resolved by data-source id: the configuration names a
//! driver, the registry looks the name up in its constructor table and
//! memoizes the constructed instance. Loaded drivers stay loaded for
//! the lifetime of the registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::driver::OrmDriver;
use crate::error::{DriverLoadError, OrmError, OrmResult};

/// One configured data source: the CORM driver name plus whatever
/// connection parameters that driver understands.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceConfig {
    pub driver: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// The data-source table, keyed by data-source id.
///
/// TOML front end:
///
/// ```toml
/// [data_source.main]
/// driver = "postgresql"
/// params = { host = "localhost", dbname = "meteo" }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrmConfig {
    #[serde(default, rename = "data_source")]
    pub data_sources: HashMap<String, DataSourceConfig>,
}

impl OrmConfig {
    pub fn from_toml(text: &str) -> OrmResult<Self> {
        toml::from_str(text).map_err(|e| OrmError::Configuration(e.to_string()))
    }
}

/// Constructor for one driver kind, registered under its driver name.
pub type DriverCtor = fn(&DataSourceConfig) -> OrmResult<Arc<dyn OrmDriver>>;

/// Resolves data-source ids to driver instances.
///
/// Construction happens at most once per id; the memo table is behind a
/// mutex and the lock is held across construction, so concurrent
/// resolvers of the same id observe the same instance.
pub struct OrmRegistry {
    config: OrmConfig,
    ctors: HashMap<String, DriverCtor>,
    loaded: Mutex<HashMap<String, Arc<dyn OrmDriver>>>,
}

impl OrmRegistry {
    /// Registry with the built-in driver constructors.
    pub fn new(config: OrmConfig) -> Self {
        #[allow(unused_mut)]
        let mut ctors: HashMap<String, DriverCtor> = HashMap::new();
        #[cfg(feature = "postgres")]
        ctors.insert("postgresql".to_string(), |cfg| {
            Ok(Arc::new(crate::driver::postgres::PostgresDriver::new(
                cfg.params.clone(),
            )))
        });
        Self {
            config,
            ctors,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Register (or replace) a constructor under a driver name.
    pub fn register(&mut self, name: impl Into<String>, ctor: DriverCtor) {
        self.ctors.insert(name.into(), ctor);
    }

    /// Resolve a data-source id to its driver, constructing and caching
    /// it on first use.
    pub fn resolve(&self, id: &str) -> OrmResult<Arc<dyn OrmDriver>> {
        let mut loaded = self.loaded.lock().expect("driver cache poisoned");
        if let Some(driver) = loaded.get(id) {
            return Ok(Arc::clone(driver));
        }

        let source = self
            .config
            .data_sources
            .get(id)
            .ok_or_else(|| DriverLoadError::UnknownDataSource(id.to_string()))?;
        if source.driver.is_empty() {
            return Err(DriverLoadError::EmptyDriverName(id.to_string()).into());
        }
        let ctor = self
            .ctors
            .get(&source.driver)
            .ok_or_else(|| DriverLoadError::NotFound(source.driver.clone()))?;
        let driver = ctor(source).map_err(|e| DriverLoadError::ConstructionFailed {
            name: source.driver.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            data_source = id,
            driver = %source.driver,
            provider = driver.provider_name(),
            "loaded driver"
        );

        loaded.insert(id.to_string(), Arc::clone(&driver));
        Ok(driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentProvider, ConnectionAgent};
    use crate::dialect::{Dialect, POSTGRES};

    struct StubProvider;

    impl AgentProvider for StubProvider {
        fn agent(&self) -> OrmResult<Box<dyn ConnectionAgent>> {
            Err(OrmError::Connection("stub provider".into()))
        }
    }

    struct StubDriver;

    impl OrmDriver for StubDriver {
        fn provider_name(&self) -> &'static str {
            "Stub CORM Driver"
        }
        fn connection_driver(&self) -> &'static str {
            "none"
        }
        fn dialect(&self) -> &Dialect {
            &POSTGRES
        }
        fn provider(&self) -> &dyn AgentProvider {
            &StubProvider
        }
    }

    fn config(driver: &str) -> OrmConfig {
        let mut data_sources = HashMap::new();
        data_sources.insert(
            "main".to_string(),
            DataSourceConfig {
                driver: driver.to_string(),
                params: HashMap::new(),
            },
        );
        OrmConfig { data_sources }
    }

    #[test]
    fn resolves_and_memoizes_per_data_source() {
        let mut registry = OrmRegistry::new(config("stub"));
        registry.register("stub", |_| Ok(Arc::new(StubDriver)));
        let first = registry.resolve("main").unwrap();
        let second = registry.resolve("main").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.provider_name(), "Stub CORM Driver");
    }

    #[test]
    fn unknown_data_source() {
        let registry = OrmRegistry::new(OrmConfig::default());
        let err = registry.resolve("missing").unwrap_err();
        assert!(matches!(
            err,
            OrmError::DriverLoad(DriverLoadError::UnknownDataSource(_))
        ));
    }

    #[test]
    fn empty_driver_name() {
        let registry = OrmRegistry::new(config(""));
        let err = registry.resolve("main").unwrap_err();
        assert!(matches!(
            err,
            OrmError::DriverLoad(DriverLoadError::EmptyDriverName(_))
        ));
    }

    #[test]
    fn unregistered_driver_name() {
        let registry = OrmRegistry::new(config("no-such-driver"));
        let err = registry.resolve("main").unwrap_err();
        assert!(matches!(
            err,
            OrmError::DriverLoad(DriverLoadError::NotFound(_))
        ));
    }

    #[test]
    fn constructor_failure_is_reported_with_driver_name() {
        let mut registry = OrmRegistry::new(config("stub"));
        registry.register("stub", |_| {
            Err(OrmError::Configuration("missing dbname".into()))
        });
        let err = registry.resolve("main").unwrap_err();
        match err {
            OrmError::DriverLoad(DriverLoadError::ConstructionFailed { name, message }) => {
                assert_eq!(name, "stub");
                assert!(message.contains("missing dbname"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parses_toml_data_source_table() {
        let config = OrmConfig::from_toml(
            r#"
            [data_source.main]
            driver = "postgresql"
            params = { host = "localhost", dbname = "meteo" }
            "#,
        )
        .unwrap();
        let source = &config.data_sources["main"];
        assert_eq!(source.driver, "postgresql");
        assert_eq!(source.params["dbname"], "meteo");
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = OrmConfig::from_toml("data_source = 3").unwrap_err();
        assert!(matches!(err, OrmError::Configuration(_)));
    }
}
