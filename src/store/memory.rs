//! In-process store with the same contract as the PostgreSQL one.
//!
//! Clones share the same data, so a clone behaves like a second connection
//! to the same database. Failures can be injected to exercise partial loads
//! and partial index creation.

use super::EmployeeStore;
use crate::benchmark::{MatchSet, QueryPredicate};
use crate::error::{Error, Result};
use crate::index_advisor::{IndexSpec, IndexStatus};
use crate::model::{Employee, IdentityKey};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryState {
    schema_created: bool,
    rows: BTreeMap<IdentityKey, Employee>,
    indexes: BTreeSet<String>,
    failing_indexes: HashSet<String>,
    fail_after_batches: Option<u64>,
    committed_batches: u64,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose schema already exists.
    pub fn with_schema() -> Self {
        let store = Self::new();
        store.state.lock().schema_created = true;
        store
    }

    /// Make creation of index `name` fail.
    pub fn fail_index(&self, name: &str) {
        self.state.lock().failing_indexes.insert(name.to_string());
    }

    /// Fail every insert chunk after `batches` chunks have been committed.
    pub fn fail_after_batches(&self, batches: u64) {
        self.state.lock().fail_after_batches = Some(batches);
    }

    pub fn committed_batches(&self) -> u64 {
        self.state.lock().committed_batches
    }

    pub fn rows(&self) -> Vec<Employee> {
        self.state.lock().rows.values().cloned().collect()
    }
}

fn ensure_schema(state: &MemoryState) -> Result<()> {
    if state.schema_created {
        Ok(())
    } else {
        Err(Error::Storage("relation \"employees\" does not exist".to_string()))
    }
}

#[async_trait]
impl EmployeeStore for InMemoryStore {
    async fn create_schema(&mut self) -> Result<()> {
        self.state.lock().schema_created = true;
        Ok(())
    }

    async fn insert_batch(&mut self, batch: &[Employee]) -> Result<u64> {
        let mut state = self.state.lock();
        ensure_schema(&state)?;
        if state
            .fail_after_batches
            .is_some_and(|limit| state.committed_batches >= limit)
        {
            return Err(Error::Storage("connection reset by peer".to_string()));
        }
        if batch.is_empty() {
            return Ok(0);
        }

        let mut inserted = 0;
        for employee in batch {
            if let Entry::Vacant(slot) = state.rows.entry(employee.identity_key()) {
                slot.insert(employee.clone());
                inserted += 1;
            }
        }
        state.committed_batches += 1;
        Ok(inserted)
    }

    async fn list_distinct(&mut self) -> Result<Vec<Employee>> {
        let state = self.state.lock();
        ensure_schema(&state)?;
        Ok(state.rows.values().cloned().collect())
    }

    async fn select_matching(
        &mut self,
        predicate: &QueryPredicate,
        preview_limit: usize,
    ) -> Result<MatchSet> {
        let state = self.state.lock();
        ensure_schema(&state)?;

        let mut hits: Vec<&Employee> = state.rows.values().filter(|e| predicate.matches(e)).collect();
        hits.sort_by(|a, b| a.surname.cmp(&b.surname));

        let mut matches = MatchSet::with_preview_capacity(preview_limit);
        for employee in hits {
            matches.push(employee.clone(), preview_limit);
        }
        Ok(matches)
    }

    async fn create_index(&mut self, index: &IndexSpec) -> Result<IndexStatus> {
        let mut state = self.state.lock();
        ensure_schema(&state)?;
        if state.failing_indexes.contains(&index.name) {
            return Err(Error::Storage(format!(
                "could not create index \"{}\"",
                index.name
            )));
        }
        if state.indexes.insert(index.name.clone()) {
            Ok(IndexStatus::Created)
        } else {
            Ok(IndexStatus::AlreadyExists)
        }
    }

    async fn index_names(&mut self) -> Result<Vec<String>> {
        let state = self.state.lock();
        ensure_schema(&state)?;
        Ok(state.indexes.iter().cloned().collect())
    }

    async fn count(&mut self) -> Result<u64> {
        let state = self.state.lock();
        ensure_schema(&state)?;
        Ok(state.rows.len() as u64)
    }
}
