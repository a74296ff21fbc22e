//! Storage seam for employee records
//!
//! An [`EmployeeStore`] is one open handle to the relational store. Each
//! top-level operation opens a handle, owns it for its whole duration and
//! drops it on completion or failure. Uniqueness of the identity key is
//! enforced by the store itself, never by the caller.

pub mod memory;
pub mod postgres;

use crate::benchmark::{MatchSet, QueryPredicate};
use crate::error::Result;
use crate::index_advisor::{IndexSpec, IndexStatus};
use crate::model::Employee;
use async_trait::async_trait;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

pub const TABLE_NAME: &str = "employees";

#[async_trait]
pub trait EmployeeStore: Send {
    /// Create the employees table and its unique key if absent.
    async fn create_schema(&mut self) -> Result<()>;

    /// Insert `batch` as one atomic chunk, skipping rows whose identity key
    /// already exists. Returns the number of rows actually inserted.
    async fn insert_batch(&mut self, batch: &[Employee]) -> Result<u64>;

    /// All distinct records ordered by surname, given name, patronymic.
    async fn list_distinct(&mut self) -> Result<Vec<Employee>>;

    /// Rows matching `predicate` ordered by surname, counting every match
    /// but keeping at most `preview_limit` of them.
    async fn select_matching(
        &mut self,
        predicate: &QueryPredicate,
        preview_limit: usize,
    ) -> Result<MatchSet>;

    /// Create a secondary index if it does not exist yet.
    async fn create_index(&mut self, index: &IndexSpec) -> Result<IndexStatus>;

    /// Names of the secondary indexes currently defined on the table.
    async fn index_names(&mut self) -> Result<Vec<String>>;

    async fn count(&mut self) -> Result<u64>;
}
