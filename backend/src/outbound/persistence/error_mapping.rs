//! Shared Diesel error mapping for the repository adapters.

use tracing::{debug, warn};

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors, keeping constraint names for
/// unique and foreign key violations.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => {
                RepositoryError::duplicate(constraint_or_unknown(info.constraint_name()))
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                RepositoryError::missing_reference(constraint_or_unknown(info.constraint_name()))
            }
            DatabaseErrorKind::ClosedConnection => {
                RepositoryError::connection("database connection error")
            }
            _ => RepositoryError::query("database error"),
        },
        _ => RepositoryError::query("database error"),
    }
}

fn constraint_or_unknown(name: Option<&str>) -> String {
    match name {
        Some(name) => name.to_owned(),
        None => {
            warn!("constraint violation reported without a constraint name");
            "unknown".to_owned()
        }
    }
}

/// Map a row that failed domain revalidation to a query error.
pub(crate) fn map_row_error(message: String) -> RepositoryError {
    warn!(%message, "stored row failed validation");
    RepositoryError::query(format!("invalid stored row: {message}"))
}
