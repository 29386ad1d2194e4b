//! SeaORM -> DomainError translation helpers.
//!
//! Adapters should convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here, and higher layers can then map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::trace_ctx;

/// Prefix used by adapters to signal a stale aggregate version.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_username_violation(msg: &str) -> bool {
    msg.contains("users.username") || msg.contains("users_username_key") || msg.contains("ux_users_username")
}

fn is_email_violation(msg: &str) -> bool {
    msg.contains("users.email") || msg.contains("users_email_key") || msg.contains("ux_users_email")
}

/// Build the custom error an adapter returns when a versioned update matched no row.
pub fn optimistic_lock_err(expected: i32, actual: Option<i32>) -> sea_orm::DbErr {
    let payload = serde_json::json!({ "expected": expected, "actual": actual });
    sea_orm::DbErr::Custom(format!("{OPTIMISTIC_LOCK_PREFIX}{payload}"))
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            #[derive(serde::Deserialize)]
            struct LockInfo {
                expected: i32,
                actual: Option<i32>,
            }

            let json_str = &msg[OPTIMISTIC_LOCK_PREFIX.len()..];
            if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                warn!(
                    trace_id = %trace_id,
                    expected = info.expected,
                    actual = ?info.actual,
                    "Optimistic lock conflict detected"
                );
                return DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "Game was modified concurrently (expected version {}, actual version {:?})",
                        info.expected, info.actual
                    ),
                );
            }

            warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Game was modified by another transaction; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::Json(_) | sea_orm::DbErr::Type(_) => {
            error!(trace_id = %trace_id, raw_error = %error_msg, "Stored row failed to decode");
            return DomainError::corrupted("Stored game data could not be decoded");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        if is_username_violation(&error_msg) {
            return DomainError::validation(ValidationKind::UsernameTaken, "Username already taken");
        }
        if is_email_violation(&error_msg) {
            return DomainError::validation(ValidationKind::EmailTaken, "Email address already registered");
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimistic_lock_round_trips_through_custom_error() {
        let err = map_db_err(optimistic_lock_err(3, Some(4)));
        assert!(err.is_optimistic_lock(), "{err:?}");
    }

    #[test]
    fn unique_username_maps_to_validation() {
        let err = map_db_err(sea_orm::DbErr::Custom(
            "UNIQUE constraint failed: users.username".into(),
        ));
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::UsernameTaken, _)
        ));
    }

    #[test]
    fn unique_email_maps_to_validation() {
        let err = map_db_err(sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"ux_users_email\"".into(),
        ));
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::EmailTaken, _)
        ));
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = map_db_err(sea_orm::DbErr::RecordNotFound("games".into()));
        assert!(matches!(err, DomainError::NotFound(_, _)));
    }
}
