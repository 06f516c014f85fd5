//! Shared Diesel error mapping for the repositories.

use tracing::debug;

use crate::domain::ports::PersistenceError;

use super::pool::PoolError;

/// Map pool errors into [`PersistenceError::Connection`].
pub(super) fn map_pool_error(error: PoolError) -> PersistenceError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    PersistenceError::connection(message)
}

/// Map Diesel errors into [`PersistenceError`] variants.
///
/// Unique-constraint violations are surfaced distinctly so the registration
/// and profile flows can answer 409; connection loss maps to a connection
/// error; everything else is a query error carrying the driver message.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> PersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            PersistenceError::unique_violation(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            PersistenceError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => PersistenceError::query(info.message().to_owned()),
        other => PersistenceError::query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, PersistenceError::connection("timed out"));
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(mapped, PersistenceError::Query { .. }));
    }
}
