//! Employee directory backed by PostgreSQL.
//!
//! The crate covers idempotent single inserts, deduplicated listing, bulk
//! synthetic loading in fixed-size chunks, and a timed selective query that
//! can be re-run after [`index_advisor::IndexAdvisor`] adds indexes.
//!
//! ```no_run
//! use employees_db::{
//!     BatchLoader, BulkPlan, ConnectionConfig, EmployeeGenerator, EmployeeStore, NameCatalog,
//!     PostgresStore, QueryEngine, QueryPredicate,
//! };
//!
//! # async fn demo() -> employees_db::Result<()> {
//! let mut store = PostgresStore::connect(&ConnectionConfig::from_env()?).await?;
//! store.create_schema().await?;
//!
//! let catalog = NameCatalog::default();
//! let records = EmployeeGenerator::today(&catalog, rand::rng()).into_bulk(BulkPlan::new(10_000, 100));
//! BatchLoader::default().load(&mut store, records, |_| {}).await?;
//!
//! let report = QueryEngine::default().run(&mut store, &QueryPredicate::default()).await?;
//! println!("{} rows in {:?}", report.total_matches, report.elapsed);
//! # Ok(())
//! # }
//! ```

pub mod benchmark;
pub mod config;
pub mod error;
pub mod generator;
pub mod index_advisor;
pub mod loader;
pub mod logging;
pub mod model;
pub mod store;

pub use benchmark::{BenchmarkComparison, BenchmarkReport, MatchSet, QueryEngine, QueryPredicate};
pub use config::{ConnectionConfig, WorkloadConfig};
pub use error::{Error, Result};
pub use generator::{BulkPlan, BulkRecords, EmployeeGenerator, NameCatalog};
pub use index_advisor::{IndexAdvisor, IndexOutcome, IndexSpec, IndexStatus};
pub use loader::{save_employee, BatchLoader, LoadProgress, LoadReport};
pub use model::{parse_birth_date, parse_full_name, Employee, FullName, Gender, IdentityKey};
pub use store::{EmployeeStore, InMemoryStore, PostgresStore};
