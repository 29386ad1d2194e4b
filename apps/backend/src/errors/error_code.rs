//! Error codes for the Codenames backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

use super::domain::{ConflictKind, ForbiddenKind, InfraErrorKind, NotFoundKind, ValidationKind};

/// Centralized error codes for the Codenames backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Unknown username or wrong password
    InvalidCredentials,
    /// Access denied
    Forbidden,
    /// Token subject does not resolve to a user
    ForbiddenUserNotFound,
    /// Spymaster tried to guess or end a turn
    SpymasterCannotAct,
    /// Caller is not on the clue-giver's team
    NotOnClueTeam,
    /// Caller is not a member of the team
    NotTeamMember,

    // Request Validation
    /// Teams have different roster sizes
    UnevenTeams,
    /// Teams have no players
    EmptyTeams,
    /// Board coordinates out of range or malformed
    InvalidCoordinates,
    /// Clue word or number rejected
    InvalidClue,
    /// Team name rejected
    InvalidTeamName,
    /// Username rejected
    InvalidUsername,
    /// Username already registered
    UsernameTaken,
    /// Email address rejected
    InvalidEmail,
    /// Email address already registered
    EmailTaken,
    /// Password too short or too long
    InvalidPassword,
    /// Caller is not this turn's spymaster
    NotSpymaster,
    /// Clue already submitted for the turn
    EvidenceAlreadyGiven,
    /// Turn already finished
    TurnFinished,
    /// Turn is not accepting guesses
    TurnNotInProgress,
    /// Game already left the lobby
    GameAlreadyStarted,
    /// Game is not being played
    GameNotInProgress,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Team not found
    TeamNotFound,
    /// Round not found
    RoundNotFound,
    /// Turn not found
    TurnNotFound,
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Cell already guessed during the turn
    CellAlreadyGuessed,
    /// Turn has used all of its guesses
    GuessQuotaReached,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict
    Conflict,

    // Data availability
    /// Word catalog too small to build a board
    InsufficientWords,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Notification transport failure
    NotifierError,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::SpymasterCannotAct => "SPYMASTER_CANNOT_ACT",
            Self::NotOnClueTeam => "NOT_ON_CLUE_TEAM",
            Self::NotTeamMember => "NOT_TEAM_MEMBER",

            Self::UnevenTeams => "UNEVEN_TEAMS",
            Self::EmptyTeams => "EMPTY_TEAMS",
            Self::InvalidCoordinates => "INVALID_COORDINATES",
            Self::InvalidClue => "INVALID_CLUE",
            Self::InvalidTeamName => "INVALID_TEAM_NAME",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::NotSpymaster => "NOT_SPYMASTER",
            Self::EvidenceAlreadyGiven => "EVIDENCE_ALREADY_GIVEN",
            Self::TurnFinished => "TURN_FINISHED",
            Self::TurnNotInProgress => "TURN_NOT_IN_PROGRESS",
            Self::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            Self::GameNotInProgress => "GAME_NOT_IN_PROGRESS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::TurnNotFound => "TURN_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::CellAlreadyGuessed => "CELL_ALREADY_GUESSED",
            Self::GuessQuotaReached => "GUESS_QUOTA_REACHED",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::InsufficientWords => "INSUFFICIENT_WORDS",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::NotifierError => "NOTIFIER_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&ValidationKind> for ErrorCode {
    fn from(kind: &ValidationKind) -> Self {
        match kind {
            ValidationKind::UnevenTeams => Self::UnevenTeams,
            ValidationKind::EmptyTeams => Self::EmptyTeams,
            ValidationKind::InvalidCoordinates => Self::InvalidCoordinates,
            ValidationKind::InvalidClue => Self::InvalidClue,
            ValidationKind::InvalidTeamName => Self::InvalidTeamName,
            ValidationKind::InvalidUsername => Self::InvalidUsername,
            ValidationKind::UsernameTaken => Self::UsernameTaken,
            ValidationKind::InvalidEmail => Self::InvalidEmail,
            ValidationKind::EmailTaken => Self::EmailTaken,
            ValidationKind::InvalidPassword => Self::InvalidPassword,
            ValidationKind::NotSpymaster => Self::NotSpymaster,
            ValidationKind::EvidenceAlreadyGiven => Self::EvidenceAlreadyGiven,
            ValidationKind::TurnFinished => Self::TurnFinished,
            ValidationKind::TurnNotInProgress => Self::TurnNotInProgress,
            ValidationKind::GameAlreadyStarted => Self::GameAlreadyStarted,
            ValidationKind::GameNotInProgress => Self::GameNotInProgress,
            ValidationKind::Other(_) => Self::ValidationError,
        }
    }
}

impl From<&ForbiddenKind> for ErrorCode {
    fn from(kind: &ForbiddenKind) -> Self {
        match kind {
            ForbiddenKind::SpymasterCannotAct => Self::SpymasterCannotAct,
            ForbiddenKind::NotOnClueTeam => Self::NotOnClueTeam,
            ForbiddenKind::NotTeamMember => Self::NotTeamMember,
            ForbiddenKind::Other(_) => Self::Forbidden,
        }
    }
}

impl From<&ConflictKind> for ErrorCode {
    fn from(kind: &ConflictKind) -> Self {
        match kind {
            ConflictKind::CellAlreadyGuessed => Self::CellAlreadyGuessed,
            ConflictKind::GuessQuotaReached => Self::GuessQuotaReached,
            ConflictKind::OptimisticLock => Self::OptimisticLock,
            ConflictKind::Other(_) => Self::Conflict,
        }
    }
}

impl From<&NotFoundKind> for ErrorCode {
    fn from(kind: &NotFoundKind) -> Self {
        match kind {
            NotFoundKind::User => Self::UserNotFound,
            NotFoundKind::Game => Self::GameNotFound,
            NotFoundKind::Team => Self::TeamNotFound,
            NotFoundKind::Round => Self::RoundNotFound,
            NotFoundKind::Turn => Self::TurnNotFound,
            NotFoundKind::Other(_) => Self::NotFound,
        }
    }
}

impl From<&InfraErrorKind> for ErrorCode {
    fn from(kind: &InfraErrorKind) -> Self {
        match kind {
            InfraErrorKind::Timeout => Self::DbTimeout,
            InfraErrorKind::DbUnavailable => Self::DbUnavailable,
            InfraErrorKind::DataCorruption => Self::DataCorruption,
            InfraErrorKind::Notifier => Self::NotifierError,
            InfraErrorKind::PasswordHash => Self::Internal,
            InfraErrorKind::Other(_) => Self::DbError,
        }
    }
}
