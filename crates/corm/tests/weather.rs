//! End-to-end driver tests over an in-memory connection agent.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use corm::{
    AgentProvider, ConnectionAgent, Entity, OrmConfig, OrmDriver, OrmDriverExt, OrmRegistry,
    OrmResult, PostgresDriver, Row, SqlValue,
};

#[derive(Entity, Debug, Default, PartialEq)]
#[orm(table = "weather")]
struct Weather {
    #[orm(label = "Ciutat", summary, sort = "asc")]
    city: String,
    #[orm(column = "tempmin", summary)]
    temp_min: i16,
    #[orm(column = "tempmax")]
    temp_max: i16,
    precipitation: i16,
    #[orm(primary_key, autogenerated)]
    id: Option<i32>,
}

#[derive(Entity, Debug, Default)]
#[orm(table = "observation")]
struct Observation {
    #[orm(primary_key)]
    id: i32,
    taken_on: Option<NaiveDate>,
}

// No primary key: single-row operations must fail before any SQL runs.
#[derive(Entity, Debug, Default)]
#[orm(table = "scratch")]
struct Scratch {
    body: String,
}

/// Shared ledger behind the mock agents: every statement that ran, plus
/// the rows the next query should return and connect/disconnect
/// accounting.
#[derive(Default)]
struct MockStore {
    executed: Vec<String>,
    rows: Vec<Row>,
    connects: usize,
    disconnects: usize,
}

struct MockAgent {
    store: Arc<Mutex<MockStore>>,
}

#[async_trait]
impl ConnectionAgent for MockAgent {
    async fn connect(&mut self) -> OrmResult<()> {
        self.store.lock().unwrap().connects += 1;
        Ok(())
    }

    async fn disconnect(&mut self) {
        self.store.lock().unwrap().disconnects += 1;
    }

    async fn execute(&mut self, sql: &str) -> OrmResult<u64> {
        self.store.lock().unwrap().executed.push(sql.to_string());
        Ok(1)
    }

    async fn execute_query(&mut self, sql: &str) -> OrmResult<Vec<Row>> {
        let mut store = self.store.lock().unwrap();
        store.executed.push(sql.to_string());
        Ok(store.rows.clone())
    }

    async fn commit(&mut self) -> OrmResult<()> {
        Ok(())
    }
}

struct MockProvider {
    store: Arc<Mutex<MockStore>>,
}

impl AgentProvider for MockProvider {
    fn agent(&self) -> OrmResult<Box<dyn ConnectionAgent>> {
        Ok(Box::new(MockAgent {
            store: Arc::clone(&self.store),
        }))
    }
}

fn mock_driver() -> (PostgresDriver, Arc<Mutex<MockStore>>) {
    let store = Arc::new(Mutex::new(MockStore::default()));
    let driver = PostgresDriver::with_provider(Arc::new(MockProvider {
        store: Arc::clone(&store),
    }));
    (driver, store)
}

fn girona() -> Weather {
    Weather {
        city: "Girona".into(),
        temp_min: 2,
        temp_max: 14,
        precipitation: 3,
        id: None,
    }
}

#[tokio::test]
async fn insert_runs_expected_statement_once() {
    let (driver, store) = mock_driver();
    let outcome = driver.insert(&girona()).await.unwrap();
    assert_eq!(
        outcome.sql,
        "INSERT INTO weather (city, tempmin, tempmax, precipitation) \
         VALUES ('Girona', 2, 14, 3)"
    );
    assert_eq!(outcome.rows_affected, 1);

    let store = store.lock().unwrap();
    assert_eq!(store.executed, [outcome.sql.clone()]);
    assert_eq!(store.connects, 1);
    assert_eq!(store.disconnects, 1);
}

#[tokio::test]
async fn fetch_populates_record_from_matching_row() {
    let (driver, store) = mock_driver();
    {
        let mut store = store.lock().unwrap();
        let mut row = Row::new();
        row.push("city", SqlValue::Text("Girona".into()));
        row.push("tempmin", SqlValue::SmallInt(2));
        row.push("tempmax", SqlValue::SmallInt(14));
        row.push("precipitation", SqlValue::SmallInt(3));
        row.push("id", SqlValue::Int(7));
        store.rows.push(row);
    }

    let probe = Weather {
        id: Some(7),
        ..Default::default()
    };
    let found = driver.fetch(probe).await.unwrap().unwrap();
    assert_eq!(
        found,
        Weather {
            city: "Girona".into(),
            temp_min: 2,
            temp_max: 14,
            precipitation: 3,
            id: Some(7),
        }
    );

    let store = store.lock().unwrap();
    assert_eq!(
        store.executed,
        ["SELECT city, tempmin, tempmax, precipitation, id FROM weather WHERE id = 7"]
    );
}

#[tokio::test]
async fn fetch_of_missing_row_is_none() {
    let (driver, _) = mock_driver();
    let probe = Weather {
        id: Some(404),
        ..Default::default()
    };
    assert!(driver.fetch(probe).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_addresses_row_by_key() {
    let (driver, store) = mock_driver();
    let record = Weather {
        id: Some(7),
        ..girona()
    };
    let outcome = driver.delete(&record).await.unwrap();
    assert_eq!(outcome.sql, "DELETE FROM weather WHERE id = 7");
    assert_eq!(store.lock().unwrap().executed, [outcome.sql.clone()]);
}

#[tokio::test]
async fn keyless_update_and_delete_issue_no_sql() {
    let (driver, store) = mock_driver();
    let record = Scratch {
        body: "note".into(),
    };
    assert!(driver.update(&record).await.unwrap_err().is_invalid_mapping());
    assert!(driver.delete(&record).await.unwrap_err().is_invalid_mapping());

    let store = store.lock().unwrap();
    assert!(store.executed.is_empty());
    assert_eq!(store.connects, 0);
}

#[tokio::test]
async fn none_date_encodes_as_null_literal() {
    let (driver, _) = mock_driver();
    let record = Observation {
        id: 3,
        taken_on: None,
    };
    let outcome = driver.insert(&record).await.unwrap();
    assert_eq!(
        outcome.sql,
        "INSERT INTO observation (id, taken_on) VALUES (3, NULL)"
    );
}

#[tokio::test]
async fn date_fields_round_trip_through_the_driver() {
    let (driver, store) = mock_driver();
    let day = NaiveDate::from_ymd_opt(2014, 7, 9).unwrap();

    let outcome = driver
        .insert(&Observation {
            id: 3,
            taken_on: Some(day),
        })
        .await
        .unwrap();
    assert_eq!(
        outcome.sql,
        "INSERT INTO observation (id, taken_on) VALUES (3, '2014/07/09')"
    );

    {
        let mut store = store.lock().unwrap();
        let mut row = Row::new();
        row.push("id", SqlValue::Int(3));
        row.push("taken_on", SqlValue::Date(day));
        store.rows.push(row);
    }
    let mut probe = Observation {
        id: 3,
        taken_on: None,
    };
    let fetched = driver.get(&mut probe).await.unwrap();
    assert!(fetched.found);
    assert_eq!(probe.taken_on, Some(day));
}

#[tokio::test]
async fn get_leaves_record_untouched_when_a_column_fails_to_decode() {
    let (driver, store) = mock_driver();
    {
        let mut store = store.lock().unwrap();
        let mut row = Row::new();
        row.push("city", SqlValue::Text("Girona".into()));
        row.push("tempmin", SqlValue::Text("not a number".into()));
        row.push("tempmax", SqlValue::SmallInt(14));
        row.push("precipitation", SqlValue::SmallInt(3));
        row.push("id", SqlValue::Int(7));
        store.rows.push(row);
    }

    let mut probe = Weather {
        id: Some(7),
        ..Default::default()
    };
    let err = driver.get(&mut probe).await.unwrap_err();
    assert!(err.is_invalid_mapping());
    // The valid city column came before the bad one; nothing may have
    // been written.
    assert_eq!(
        probe,
        Weather {
            id: Some(7),
            ..Default::default()
        }
    );
}

#[tokio::test]
async fn select_uses_labels_and_summary_filtering() {
    let (driver, _) = mock_driver();
    let all = driver.select_as::<Weather>(true).await.unwrap();
    assert_eq!(
        all.sql,
        "SELECT city As \"Ciutat\", tempmin As \"Temp Min\", tempmax As \"Temp Max\", \
         precipitation As \"Precipitation\", id As \"Id\" FROM weather \
         ORDER BY city Asc"
    );

    let summary = driver.select_as::<Weather>(false).await.unwrap();
    assert_eq!(
        summary.sql,
        "SELECT city As \"Ciutat\", tempmin As \"Temp Min\" FROM weather \
         ORDER BY city Asc"
    );
}

#[tokio::test]
async fn registry_resolves_the_builtin_postgres_driver() {
    let config = OrmConfig::from_toml(
        r#"
        [data_source.main]
        driver = "postgresql"
        params = { host = "localhost", dbname = "meteo" }
        "#,
    )
    .unwrap();
    let registry = OrmRegistry::new(config);

    let driver = registry.resolve("main").unwrap();
    assert_eq!(driver.provider_name(), "PostgreSQL CORM Driver");
    assert_eq!(driver.connection_driver(), "tokio-postgres");

    let again = registry.resolve("main").unwrap();
    assert!(Arc::ptr_eq(&driver, &again));
}
