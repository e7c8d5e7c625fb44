//! Weather observation archive backed by PostgreSQL.

use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use wx_common::{WxError, WxResult};

use crate::model::{Observation, RecordQuery, Statistic, MISSING, PAGE_SIZE};

/// Rows per multi-row INSERT statement. Five binds per row keeps each
/// statement well under PostgreSQL's 65535 bind-parameter limit.
const INSERT_CHUNK: usize = 1000;

/// Database connection pool and archive operations.
pub struct Archive {
    pool: PgPool,
}

impl Archive {
    /// Create a new archive connection from a database URL.
    pub async fn connect(database_url: &str) -> WxResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| WxError::DatabaseError(format!("Connection failed: {}", e)))?;

        Ok(Self { pool })
    }

    /// Create the schema if it does not already exist.
    pub async fn migrate(&self) -> WxResult<()> {
        // Split SQL statements and execute them individually
        for statement in SCHEMA_SQL.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| WxError::DatabaseError(format!("Migration failed: {}", e)))?;
            }
        }

        Ok(())
    }

    /// Remove every observation and statistic row.
    ///
    /// A single statement, so the reset is atomic across both tables.
    pub async fn clear(&self) -> WxResult<()> {
        sqlx::query("TRUNCATE observations, statistics RESTART IDENTITY")
            .execute(&self.pool)
            .await
            .map_err(|e| WxError::DatabaseError(format!("Truncate failed: {}", e)))?;

        Ok(())
    }

    /// Cheap connectivity probe for readiness checks.
    pub async fn ping(&self) -> WxResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| WxError::DatabaseError(format!("Ping failed: {}", e)))?;

        Ok(())
    }

    /// Bulk-insert observations in a single transaction.
    ///
    /// The whole batch commits or none of it does. No dedup and no upsert:
    /// loading the same records twice against a non-cleared archive appends
    /// duplicates. Returns the number of rows inserted.
    pub async fn insert_observations(&self, observations: &[Observation]) -> WxResult<u64> {
        if observations.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| WxError::DatabaseError(format!("Begin failed: {}", e)))?;

        let mut inserted = 0u64;
        for chunk in observations.chunks(INSERT_CHUNK) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO observations \
                 (station, date, maximum_temperature, minimum_temperature, precipitation) ",
            );
            builder.push_values(chunk, |mut row, obs| {
                row.push_bind(&obs.station)
                    .push_bind(&obs.date)
                    .push_bind(obs.maximum_temperature)
                    .push_bind(obs.minimum_temperature)
                    .push_bind(obs.precipitation);
            });

            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| WxError::DatabaseError(format!("Insert failed: {}", e)))?;
            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| WxError::DatabaseError(format!("Commit failed: {}", e)))?;

        Ok(inserted)
    }

    /// Recompute per-station yearly statistics from the stored observations.
    ///
    /// A row carrying the [`MISSING`] sentinel in any measured column is
    /// excluded from all three aggregates, and a station-year with only
    /// sentinel rows produces no statistic at all. Existing statistic rows
    /// are left in place; the caller clears them before reloading. Returns
    /// the number of statistic rows written.
    pub async fn aggregate_statistics(&self) -> WxResult<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| WxError::DatabaseError(format!("Begin failed: {}", e)))?;

        let result = sqlx::query(AGGREGATE_SQL)
            .bind(MISSING)
            .execute(&mut *tx)
            .await
            .map_err(|e| WxError::DatabaseError(format!("Aggregation failed: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| WxError::DatabaseError(format!("Commit failed: {}", e)))?;

        Ok(result.rows_affected())
    }

    /// One page of observations matching the query, in insertion order.
    pub async fn observations(&self, query: &RecordQuery) -> WxResult<Vec<Observation>> {
        let (sql, params) = filtered_select(
            "station, date, maximum_temperature, minimum_temperature, precipitation",
            "observations",
            query,
        );
        debug!(sql = %sql, "Querying observations");

        let mut select = sqlx::query_as::<_, Observation>(&sql);
        for param in &params {
            select = select.bind(param);
        }

        select
            .fetch_all(&self.pool)
            .await
            .map_err(|e| WxError::DatabaseError(format!("Query failed: {}", e)))
    }

    /// One page of yearly statistics matching the query, in insertion order.
    pub async fn statistics(&self, query: &RecordQuery) -> WxResult<Vec<Statistic>> {
        let (sql, params) = filtered_select(
            "station, date, final_maximum_temperature, final_minimum_temperature, \
             final_precipitation",
            "statistics",
            query,
        );
        debug!(sql = %sql, "Querying statistics");

        let mut select = sqlx::query_as::<_, Statistic>(&sql);
        for param in &params {
            select = select.bind(param);
        }

        select
            .fetch_all(&self.pool)
            .await
            .map_err(|e| WxError::DatabaseError(format!("Query failed: {}", e)))
    }
}

/// Build a filtered, paginated SELECT with positional binds.
fn filtered_select(columns: &str, table: &str, query: &RecordQuery) -> (String, Vec<String>) {
    let mut sql = format!("SELECT {} FROM {}", columns, table);
    let mut params: Vec<String> = Vec::new();

    for (column, value) in [("station", &query.station), ("date", &query.date)] {
        if let Some(value) = value {
            let keyword = if params.is_empty() { "WHERE" } else { "AND" };
            params.push(value.clone());
            sql.push_str(&format!(" {} {} = ${}", keyword, column, params.len()));
        }
    }

    sql.push_str(&format!(
        " ORDER BY id LIMIT {} OFFSET {}",
        PAGE_SIZE,
        query.offset()
    ));

    (sql, params)
}

/// Yearly aggregation over the raw observations.
const AGGREGATE_SQL: &str = r#"
INSERT INTO statistics
    (station, date, final_maximum_temperature, final_minimum_temperature, final_precipitation)
SELECT
    station,
    SUBSTRING(date, 1, 4),
    AVG(maximum_temperature)::DOUBLE PRECISION,
    AVG(minimum_temperature)::DOUBLE PRECISION,
    SUM(precipitation)::DOUBLE PRECISION
FROM observations
WHERE maximum_temperature <> $1
  AND minimum_temperature <> $1
  AND precipitation <> $1
GROUP BY station, SUBSTRING(date, 1, 4)
"#;

/// Database schema SQL.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS observations (
    id BIGSERIAL PRIMARY KEY,
    station VARCHAR(15) NOT NULL,
    date VARCHAR(8) NOT NULL,
    maximum_temperature INTEGER NOT NULL,
    minimum_temperature INTEGER NOT NULL,
    precipitation INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_observations_station_date ON observations(station, date);

CREATE TABLE IF NOT EXISTS statistics (
    id BIGSERIAL PRIMARY KEY,
    station VARCHAR(15) NOT NULL,
    date VARCHAR(4) NOT NULL,
    final_maximum_temperature DOUBLE PRECISION NOT NULL,
    final_minimum_temperature DOUBLE PRECISION NOT NULL,
    final_precipitation DOUBLE PRECISION NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_statistics_station_date ON statistics(station, date)
"#;
