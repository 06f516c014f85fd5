//! PostgreSQL-backed `IncidentRepository` implementation using Diesel.
//!
//! The public listing composes its optional filters onto a boxed query so
//! every predicate stays typed and parameterized; user input is never
//! concatenated into SQL text.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Bool, Text};
use diesel_async::RunQueryDsl;

use crate::domain::incident::LISTING_CAP;
use crate::domain::ports::{IncidentRepository, PersistenceError};
use crate::domain::{Incident, IncidentFilter, NewIncidentRecord, StatusCount};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{IncidentRow, NewIncidentRow};
use super::pool::DbPool;
use super::schema::incidents;

/// Listing order shared by every incident query. The creation timestamp is
/// nullable in legacy rows, so the fragment pins NULLS LAST explicitly.
const NEWEST_FIRST: &str = "created_at DESC NULLS LAST";

const STATUS_COUNTS_SQL: &str =
    "SELECT LOWER(COALESCE(status, 'pendiente')) AS status, COUNT(*) AS count \
     FROM incidents GROUP BY 1";

#[derive(QueryableByName)]
struct StatusCountRow {
    #[diesel(sql_type = Text)]
    status: String,
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Diesel-backed implementation of the `IncidentRepository` port.
#[derive(Clone)]
pub struct DieselIncidentRepository {
    pool: DbPool,
}

impl DieselIncidentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IncidentRepository for DieselIncidentRepository {
    async fn create(&self, record: NewIncidentRecord) -> Result<Incident, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(incidents::table)
            .values(NewIncidentRow::from_record(record, Utc::now()))
            .returning(IncidentRow::as_returning())
            .get_result::<IncidentRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn list(&self, filter: IncidentFilter) -> Result<Vec<Incident>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = incidents::table
            .select(IncidentRow::as_select())
            .into_boxed();

        if let Some(category) = filter.category {
            query = query.filter(incidents::category.eq(category));
        }
        if let Some(status) = filter.status {
            query = query.filter(incidents::status.eq(status));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(incidents::priority.eq(priority));
        }
        if let Some(location) = filter.location {
            query = query.filter(incidents::location.eq(location));
        }

        let rows = query
            .order(sql::<Bool>(NEWEST_FIRST))
            .limit(LISTING_CAP)
            .load::<IncidentRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Incident::from).collect())
    }

    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Incident>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = incidents::table
            .filter(incidents::user_id.eq(owner_id))
            .select(IncidentRow::as_select())
            .order(sql::<Bool>(NEWEST_FIRST))
            .limit(LISTING_CAP)
            .load::<IncidentRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Incident::from).collect())
    }

    async fn count(&self) -> Result<i64, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        incidents::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn status_counts(&self) -> Result<Vec<StatusCount>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = sql_query(STATUS_COUNTS_SQL)
            .load::<StatusCountRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|row| StatusCount {
                status: row.status,
                count: row.count,
            })
            .collect())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Incident>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = incidents::table
            .select(IncidentRow::as_select())
            .order(sql::<Bool>(NEWEST_FIRST))
            .limit(limit)
            .load::<IncidentRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Incident::from).collect())
    }
}
