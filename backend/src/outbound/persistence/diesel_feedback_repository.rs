//! PostgreSQL-backed `FeedbackRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FeedbackRepository, PersistenceError};
use crate::domain::{Feedback, NewFeedback};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FeedbackRow, NewFeedbackRow};
use super::pool::DbPool;
use super::schema::feedback;

/// Diesel-backed implementation of the `FeedbackRepository` port.
#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn create(&self, entry: NewFeedback) -> Result<Feedback, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(feedback::table)
            .values(NewFeedbackRow::from(entry))
            .returning(FeedbackRow::as_returning())
            .get_result::<FeedbackRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }
}
