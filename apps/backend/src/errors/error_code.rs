//! Error codes for the pickup backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the pickup backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in the `code` member of problem-details responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Token subject has no stored user
    ForbiddenUserNotFound,
    /// Action reserved for the game's creator
    NotCreator,
    /// Creator tried to join or leave their own game
    CreatorCannotJoin,
    /// Caller is neither creator nor participant
    NotParticipant,

    // Request Validation
    /// Invalid game ID provided
    InvalidGameId,
    /// Invalid user ID provided
    InvalidUserId,
    /// Invalid email address
    InvalidEmail,
    /// Invalid SSO subject
    InvalidSub,
    /// end_time is not after start_time
    InvalidTimeWindow,
    /// Capacity below 1
    InvalidCapacity,
    /// Capacity lower than the current roster size
    CapacityBelowRoster,
    /// Referenced sport does not exist
    UnknownSport,
    /// Comment text empty or too long
    InvalidComment,
    /// Malformed query string
    InvalidQuery,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Roster
    /// Caller already on the roster
    AlreadyJoined,
    /// Caller not on the roster
    NotJoined,
    /// Roster at capacity
    GameFull,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// User not found
    UserNotFound,
    /// Sport not found
    SportNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// SSO subject does not match the stored one for this email
    SubMismatch,
    /// Unique email constraint
    UniqueEmail,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        Self::UnauthorizedMissingBearer,
        Self::UnauthorizedInvalidJwt,
        Self::UnauthorizedExpiredJwt,
        Self::ForbiddenUserNotFound,
        Self::NotCreator,
        Self::CreatorCannotJoin,
        Self::NotParticipant,
        Self::InvalidGameId,
        Self::InvalidUserId,
        Self::InvalidEmail,
        Self::InvalidSub,
        Self::InvalidTimeWindow,
        Self::InvalidCapacity,
        Self::CapacityBelowRoster,
        Self::UnknownSport,
        Self::InvalidComment,
        Self::InvalidQuery,
        Self::ValidationError,
        Self::BadRequest,
        Self::AlreadyJoined,
        Self::NotJoined,
        Self::GameFull,
        Self::GameNotFound,
        Self::UserNotFound,
        Self::SportNotFound,
        Self::NotFound,
        Self::SubMismatch,
        Self::UniqueEmail,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::Internal,
        Self::ConfigError,
        Self::DataCorruption,
    ];

    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Authentication & Authorization
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::NotCreator => "NOT_CREATOR",
            Self::CreatorCannotJoin => "CREATOR_CANNOT_JOIN",
            Self::NotParticipant => "NOT_PARTICIPANT",

            // Request Validation
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidSub => "INVALID_SUB",
            Self::InvalidTimeWindow => "INVALID_TIME_WINDOW",
            Self::InvalidCapacity => "INVALID_CAPACITY",
            Self::CapacityBelowRoster => "CAPACITY_BELOW_ROSTER",
            Self::UnknownSport => "UNKNOWN_SPORT",
            Self::InvalidComment => "INVALID_COMMENT",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Roster
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::NotJoined => "NOT_JOINED",
            Self::GameFull => "GAME_FULL",

            // Resource Not Found
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SportNotFound => "SPORT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::SubMismatch => "SUB_MISMATCH",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",

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
