//! PostgreSQL store backed by a single sqlx connection.

use super::{EmployeeStore, TABLE_NAME};
use crate::benchmark::{MatchSet, QueryPredicate};
use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::index_advisor::{IndexSpec, IndexStatus};
use crate::model::Employee;
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};
use tracing::{debug, info};

/// PostgreSQL caps bind parameters per statement at 65535; each row binds five.
pub const MAX_ROWS_PER_STATEMENT: usize = 65_535 / 5;

const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS employees (
    id SERIAL PRIMARY KEY,
    surname TEXT NOT NULL,
    given_name TEXT NOT NULL,
    patronymic TEXT NOT NULL,
    date_of_birth DATE NOT NULL,
    gender TEXT NOT NULL,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT now(),
    UNIQUE (surname, given_name, patronymic, date_of_birth)
)";

const INSERT_PREFIX_SQL: &str =
    "INSERT INTO employees (surname, given_name, patronymic, date_of_birth, gender) ";

const ON_CONFLICT_SQL: &str =
    " ON CONFLICT (surname, given_name, patronymic, date_of_birth) DO NOTHING";

const LIST_DISTINCT_SQL: &str = "
SELECT DISTINCT surname, given_name, patronymic, date_of_birth, gender
FROM employees
ORDER BY surname, given_name, patronymic";

const SELECT_MATCHING_SQL: &str = "
SELECT surname, given_name, patronymic, date_of_birth, gender
FROM employees
WHERE gender = $1 AND surname LIKE $2
ORDER BY surname";

const INDEX_EXISTS_SQL: &str =
    "SELECT EXISTS (SELECT 1 FROM pg_indexes WHERE tablename = $1 AND indexname = $2)";

// Indexes backing the primary key and unique constraint are not secondary.
const SECONDARY_INDEXES_SQL: &str = "
SELECT i.indexname FROM pg_indexes i
WHERE i.tablename = $1
  AND NOT EXISTS (SELECT 1 FROM pg_constraint c WHERE c.conname = i.indexname)
ORDER BY i.indexname";

pub struct PostgresStore {
    conn: PgConnection,
}

impl PostgresStore {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        debug!(server = %config, "Opening PostgreSQL connection");
        let conn = PgConnection::connect_with(&config.connect_options()).await?;
        Ok(Self { conn })
    }

    /// Close the connection gracefully. Dropping the store also releases it.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}

#[async_trait]
impl EmployeeStore for PostgresStore {
    async fn create_schema(&mut self) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&mut self.conn).await?;
        info!(table = TABLE_NAME, "Schema ensured");
        Ok(())
    }

    async fn insert_batch(&mut self, batch: &[Employee]) -> Result<u64> {
        if batch.is_empty() {
            return Ok(0);
        }

        let mut tx = self.conn.begin().await?;
        let mut inserted = 0;
        for rows in batch.chunks(MAX_ROWS_PER_STATEMENT) {
            let mut builder = QueryBuilder::<Postgres>::new(INSERT_PREFIX_SQL);
            builder.push_values(rows, |mut row, e| {
                row.push_bind(e.surname.as_str())
                    .push_bind(e.given_name.as_str())
                    .push_bind(e.patronymic.as_str())
                    .push_bind(e.date_of_birth)
                    .push_bind(e.gender.as_str());
            });
            builder.push(ON_CONFLICT_SQL);
            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        debug!(rows = batch.len(), inserted, "Committed insert chunk");
        Ok(inserted)
    }

    async fn list_distinct(&mut self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, Employee>(LIST_DISTINCT_SQL)
            .fetch_all(&mut self.conn)
            .await?;
        Ok(rows)
    }

    async fn select_matching(
        &mut self,
        predicate: &QueryPredicate,
        preview_limit: usize,
    ) -> Result<MatchSet> {
        let mut rows = sqlx::query_as::<_, Employee>(SELECT_MATCHING_SQL)
            .bind(predicate.gender.as_str())
            .bind(predicate.like_pattern())
            .fetch(&mut self.conn);

        let mut matches = MatchSet::with_preview_capacity(preview_limit);
        while let Some(row) = rows.try_next().await? {
            matches.push(row, preview_limit);
        }
        Ok(matches)
    }

    async fn create_index(&mut self, index: &IndexSpec) -> Result<IndexStatus> {
        let exists = sqlx::query_scalar::<_, bool>(INDEX_EXISTS_SQL)
            .bind(TABLE_NAME)
            .bind(index.name.as_str())
            .fetch_one(&mut self.conn)
            .await?;

        let sql = index.create_sql(TABLE_NAME);
        debug!(sql = %sql, "Creating index");
        sqlx::query(&sql).execute(&mut self.conn).await?;

        Ok(if exists {
            IndexStatus::AlreadyExists
        } else {
            IndexStatus::Created
        })
    }

    async fn index_names(&mut self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(SECONDARY_INDEXES_SQL)
            .bind(TABLE_NAME)
            .fetch_all(&mut self.conn)
            .await?;
        Ok(names)
    }

    async fn count(&mut self) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&mut self.conn)
            .await?;
        Ok(count.max(0) as u64)
    }
}
