//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use routinelog_domain::RoutineLogError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RoutineLogError);

impl From<InfraError> for RoutineLogError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RoutineLogError> for InfraError {
    fn from(value: RoutineLogError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoRoutineLogError {
    fn into_routinelog(self) -> RoutineLogError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → RoutineLogError */
/* -------------------------------------------------------------------------- */

impl IntoRoutineLogError for SqlError {
    fn into_routinelog(self) -> RoutineLogError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        RoutineLogError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        RoutineLogError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 1555 | 2067) => {
                        RoutineLogError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        RoutineLogError::Database("foreign key constraint violation".into())
                    }
                    _ => RoutineLogError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                RoutineLogError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                RoutineLogError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                RoutineLogError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                RoutineLogError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidParameterName(parameter_name) => {
                RoutineLogError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => RoutineLogError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => RoutineLogError::Database("invalid SQL query".into()),
            other => RoutineLogError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_routinelog())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → RoutineLogError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(RoutineLogError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RoutineLogError */
/* -------------------------------------------------------------------------- */

impl IntoRoutineLogError for HttpError {
    fn into_routinelog(self) -> RoutineLogError {
        if self.is_timeout() {
            return RoutineLogError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return RoutineLogError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => RoutineLogError::Auth(message),
                404 => RoutineLogError::NotFound(message),
                400..=499 => RoutineLogError::InvalidInput(message),
                _ => RoutineLogError::Network(message),
            };
        }

        RoutineLogError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_routinelog())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
