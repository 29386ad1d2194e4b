//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the `From<DomainError> for AppError` implementation.

use thiserror::Error;

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Notifier,
    PasswordHash,
    Other(String),
}

/// Entities that can fail to resolve by id
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Game,
    Team,
    Round,
    Turn,
    Other(String),
}

/// Structurally valid input that breaks a game rule
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    UnevenTeams,
    EmptyTeams,
    InvalidCoordinates,
    InvalidClue,
    InvalidTeamName,
    InvalidUsername,
    UsernameTaken,
    InvalidEmail,
    EmailTaken,
    InvalidPassword,
    NotSpymaster,
    EvidenceAlreadyGiven,
    TurnFinished,
    TurnNotInProgress,
    GameAlreadyStarted,
    GameNotInProgress,
    Other(String),
}

/// Caller lacks the relationship required to act
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ForbiddenKind {
    SpymasterCannotAct,
    NotOnClueTeam,
    NotTeamMember,
    Other(String),
}

/// Valid request that collides with prior or concurrent state
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    CellAlreadyGuessed,
    GuessQuotaReached,
    OptimisticLock,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Caller is not allowed to perform the operation
    #[error("forbidden {0:?}: {1}")]
    Forbidden(ForbiddenKind, String),
    /// Semantic conflict
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Reference data cannot satisfy a generation invariant
    #[error("insufficient data: {0}")]
    InsufficientData(String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn forbidden(kind: ForbiddenKind, detail: impl Into<String>) -> Self {
        Self::Forbidden(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn insufficient_data(detail: impl Into<String>) -> Self {
        Self::InsufficientData(detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Board or aggregate state that breaks a structural invariant.
    pub fn corrupted(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::DataCorruption, detail.into())
    }

    pub fn is_optimistic_lock(&self) -> bool {
        matches!(self, Self::Conflict(ConflictKind::OptimisticLock, _))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let err = DomainError::conflict(ConflictKind::CellAlreadyGuessed, "cell 1,2");
        assert_eq!(err.to_string(), "conflict CellAlreadyGuessed: cell 1,2");
    }

    #[test]
    fn optimistic_lock_is_detected() {
        assert!(DomainError::conflict(ConflictKind::OptimisticLock, "stale").is_optimistic_lock());
        assert!(!DomainError::conflict(ConflictKind::GuessQuotaReached, "done").is_optimistic_lock());
    }
}
