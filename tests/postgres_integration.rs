//! Tests against a live PostgreSQL server configured through PG* variables.
//!
//! Run with `cargo test --test postgres_integration -- --ignored`.

use chrono::NaiveDate;
use employees_db::{
    save_employee, BatchLoader, ConnectionConfig, Employee, EmployeeStore, Gender, IndexAdvisor,
    PostgresStore, QueryEngine, QueryPredicate,
};
use serial_test::serial;

const PREFIX: &str = "Zztest";

async fn connect() -> PostgresStore {
    let config = ConnectionConfig::from_env().unwrap();
    let mut store = PostgresStore::connect(&config).await.unwrap();
    store.create_schema().await.unwrap();
    sqlx::query("DELETE FROM employees WHERE surname LIKE $1")
        .bind(format!("{}%", PREFIX))
        .execute(store.connection())
        .await
        .unwrap();
    store
}

fn test_employees(n: usize) -> Vec<Employee> {
    (0..n)
        .map(|i| {
            Employee::new(
                format!("{}{:05}", PREFIX, i),
                "Petr",
                "Ivanovich",
                NaiveDate::from_ymd_opt(1980 + (i % 30) as i32, 3, 14).unwrap(),
                if i % 2 == 0 { "Male" } else { "Female" },
            )
        })
        .collect()
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_schema_creation_is_repeatable() {
    let mut store = connect().await;
    store.create_schema().await.unwrap();
    store.create_schema().await.unwrap();
    store.close().await.unwrap();
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_duplicate_insert_is_skipped() {
    let mut store = connect().await;
    let e = Employee::new(
        format!("{}Ivanov", PREFIX),
        "Petr",
        "Sergeevich",
        NaiveDate::from_ymd_opt(2009, 7, 12).unwrap(),
        "Male",
    );

    assert!(save_employee(&mut store, &e).await.unwrap());
    assert!(!save_employee(&mut store, &e).await.unwrap());
    store.close().await.unwrap();
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_chunked_load_and_rerun() {
    let mut store = connect().await;
    let before = store.count().await.unwrap();
    let loader = BatchLoader::new(250).unwrap();

    let first = loader.load(&mut store, test_employees(1_000), |_| {}).await.unwrap();
    assert_eq!(first.inserted, 1_000);
    assert_eq!(first.batches, 4);
    assert_eq!(store.count().await.unwrap(), before + 1_000);

    let second = loader.load(&mut store, test_employees(1_000), |_| {}).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(store.count().await.unwrap(), before + 1_000);
    store.close().await.unwrap();
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_chunk_larger_than_bind_limit() {
    let mut store = connect().await;
    let loader = BatchLoader::new(20_000).unwrap();

    let report = loader.load(&mut store, test_employees(20_000), |_| {}).await.unwrap();
    assert_eq!(report.batches, 1);
    assert_eq!(report.inserted, 20_000);
    store.close().await.unwrap();
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_prefix_query_and_indexes() {
    let mut store = connect().await;
    BatchLoader::default()
        .load(&mut store, test_employees(300), |_| {})
        .await
        .unwrap();

    let predicate = QueryPredicate::new(Gender::Male, PREFIX);
    let engine = QueryEngine::new(10);
    let before = engine.run(&mut store, &predicate).await.unwrap();
    assert_eq!(before.total_matches, 150);
    assert_eq!(before.preview.len(), 10);
    assert!(before.preview_matches());

    let advisor = IndexAdvisor::default();
    assert!(IndexAdvisor::all_succeeded(&advisor.apply(&mut store).await));
    assert!(IndexAdvisor::all_succeeded(&advisor.apply(&mut store).await));

    let after = engine.run(&mut store, &predicate).await.unwrap();
    assert_eq!(after.total_matches, before.total_matches);
    assert_eq!(store.index_names().await.unwrap().len(), 2);
    store.close().await.unwrap();
}
