// Unit tests for DomainError -> AppError mapping, no HTTP or database involved
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn validation_kinds_keep_their_codes() {
    let cases = [
        (ValidationKind::InvalidTimeWindow, ErrorCode::InvalidTimeWindow),
        (ValidationKind::InvalidCapacity, ErrorCode::InvalidCapacity),
        (ValidationKind::CapacityBelowRoster, ErrorCode::CapacityBelowRoster),
        (ValidationKind::UnknownSport, ErrorCode::UnknownSport),
        (ValidationKind::InvalidComment, ErrorCode::InvalidComment),
        (ValidationKind::InvalidEmail, ErrorCode::InvalidEmail),
        (ValidationKind::InvalidField, ErrorCode::ValidationError),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "bad").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 400);
    }
}

#[test]
fn forbidden_kinds_are_403() {
    let app: AppError = DomainError::forbidden(ForbiddenKind::NotCreator, "no").into();
    assert_eq!(app.code(), ErrorCode::NotCreator);
    assert_eq!(app.status().as_u16(), 403);

    let app: AppError = DomainError::forbidden(ForbiddenKind::CreatorOnRoster, "no").into();
    assert_eq!(app.code(), ErrorCode::CreatorCannotJoin);

    let app: AppError = DomainError::forbidden(ForbiddenKind::NotParticipant, "no").into();
    assert_eq!(app.code(), ErrorCode::NotParticipant);
}

#[test]
fn full_game_is_bad_request_with_game_full_code() {
    let app: AppError = DomainError::conflict(ConflictKind::CapacityExceeded, "full").into();
    assert_eq!(app.code().as_str(), "GAME_FULL");
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn identity_conflicts_stay_409() {
    for kind in [
        ConflictKind::UniqueEmail,
        ConflictKind::SubMismatch,
        ConflictKind::Other("x".into()),
    ] {
        let app: AppError = DomainError::conflict(kind, "taken").into();
        assert_eq!(app.status().as_u16(), 409);
    }
}

#[test]
fn not_found_kinds() {
    let app: AppError = DomainError::not_found(NotFoundKind::Game, "gone").into();
    assert_eq!(app.code(), ErrorCode::GameNotFound);
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::not_found(NotFoundKind::User, "gone").into();
    assert_eq!(app.code(), ErrorCode::UserNotFound);

    let app: AppError = DomainError::not_found(NotFoundKind::Other("Thing".into()), "gone").into();
    assert_eq!(app.code(), ErrorCode::NotFound);
}

#[test]
fn infra_kinds_map_to_operational_statuses() {
    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "slow").into();
    assert_eq!(app.status().as_u16(), 504);

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "dangling").into();
    assert_eq!(app.status().as_u16(), 500);
    assert!(app.to_string().contains("DATA_CORRUPTION"));
}
