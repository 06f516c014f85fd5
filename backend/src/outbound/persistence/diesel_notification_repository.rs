//! PostgreSQL-backed `NotificationRepository` implementation using Diesel.
//!
//! Ownership is enforced inside the UPDATE predicate itself: a mark-read on
//! a row the caller does not own matches nothing and returns `None` instead
//! of touching the row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Notification;
use crate::domain::incident::LISTING_CAP;
use crate::domain::ports::{NotificationRepository, PersistenceError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::NotificationRow;
use super::pool::DbPool;
use super::schema::notifications;

/// Diesel-backed implementation of the `NotificationRepository` port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn list_for_owner(&self, owner_id: i32) -> Result<Vec<Notification>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = notifications::table
            .filter(notifications::user_id.eq(owner_id))
            .select(NotificationRow::as_select())
            .order(notifications::id.desc())
            .limit(LISTING_CAP)
            .load::<NotificationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn set_read(
        &self,
        id: i32,
        owner_id: i32,
        read: bool,
    ) -> Result<Option<Notification>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            notifications::table
                .filter(notifications::id.eq(id))
                .filter(notifications::user_id.eq(owner_id)),
        )
        .set(notifications::read.eq(read))
        .returning(NotificationRow::as_returning())
        .get_result::<NotificationRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        Ok(row.map(Notification::from))
    }
}
