//! Database reachability probe backing `GET /api/health/db`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::sql_query;
use diesel::sql_types::Timestamptz;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DatabaseHealth, PersistenceError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;

#[derive(diesel::QueryableByName)]
struct NowRow {
    #[diesel(sql_type = Timestamptz)]
    now: DateTime<Utc>,
}

/// Diesel-backed implementation of the `DatabaseHealth` port.
#[derive(Clone)]
pub struct DieselDatabaseHealth {
    pool: DbPool,
}

impl DieselDatabaseHealth {
    /// Create a new probe with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealth for DieselDatabaseHealth {
    async fn ping(&self) -> Result<DateTime<Utc>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = sql_query("SELECT now() AS now")
            .get_result::<NowRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.now)
    }
}
