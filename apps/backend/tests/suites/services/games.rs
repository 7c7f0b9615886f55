use backend::domain::DisplayState;
use backend::entities::games::{GameStatus, SkillLevel};
use backend::errors::domain::{DomainError, ForbiddenKind, NotFoundKind, ValidationKind};
use backend::repos::{games, participants};
use backend::services::comments::CommentService;
use backend::services::games::{GamePatch, GameService};
use backend::services::roster::RosterService;
use backend::utils::time::now;
use time::Duration;

use crate::support::build_test_state;
use crate::support::factory::{any_sport, create_user, new_game, upcoming_game};

fn validation_kind(err: DomainError) -> ValidationKind {
    match err {
        DomainError::Validation(kind, _) => kind,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_starts_open_with_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let sport = any_sport(db).await;

    let game = GameService
        .create_game(db, creator.id, new_game(sport.id, Duration::days(2)))
        .await?;
    assert_eq!(game.created_by, creator.id);
    assert_eq!(game.status, GameStatus::Open);
    assert_eq!(game.skill_level, SkillLevel::All);
    assert_eq!(game.capacity, None);
    assert_eq!(game.display_state(now()), DisplayState::Open);
    assert_eq!(game.start_time.nanosecond(), 0);
    Ok(())
}

#[tokio::test]
async fn create_rejects_bad_input() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let sport = any_sport(db).await;

    let mut input = new_game(sport.id, Duration::days(1));
    input.end_time = input.start_time;
    let err = GameService.create_game(db, creator.id, input).await.unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::InvalidTimeWindow);

    let mut input = new_game(sport.id, Duration::days(1));
    input.capacity = Some(0);
    let err = GameService.create_game(db, creator.id, input).await.unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::InvalidCapacity);

    let input = new_game(999_999, Duration::days(1));
    let err = GameService.create_game(db, creator.id, input).await.unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::UnknownSport);

    let mut input = new_game(sport.id, Duration::days(1));
    input.location = "   ".to_string();
    let err = GameService.create_game(db, creator.id, input).await.unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::InvalidField);

    let mut input = new_game(sport.id, Duration::days(1));
    input.location = "x".repeat(101);
    let err = GameService.create_game(db, creator.id, input).await.unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::InvalidField);
    Ok(())
}

#[tokio::test]
async fn update_is_partial_and_can_clear_nullables() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let game = upcoming_game(db, &creator, Some(8)).await;

    let patch = GamePatch {
        location: Some("  North Field  ".to_string()),
        skill_level: Some(SkillLevel::Advanced),
        name: Some(None),
        capacity: Some(None),
        ..GamePatch::default()
    };
    let updated = GameService.update_game(db, game.id, creator.id, patch).await?;
    assert_eq!(updated.location, "North Field");
    assert_eq!(updated.skill_level, SkillLevel::Advanced);
    assert_eq!(updated.name, None);
    assert_eq!(updated.capacity, None);
    assert_eq!(updated.start_time, game.start_time);
    assert_eq!(updated.end_time, game.end_time);
    assert_eq!(updated.status, GameStatus::Open);
    Ok(())
}

#[tokio::test]
async fn update_checks_the_merged_window() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let game = upcoming_game(db, &creator, None).await;

    // Only the end moves, to before the stored start
    let patch = GamePatch {
        end_time: Some(game.start_time - Duration::minutes(30)),
        ..GamePatch::default()
    };
    let err = GameService
        .update_game(db, game.id, creator.id, patch)
        .await
        .unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::InvalidTimeWindow);

    let patch = GamePatch {
        start_time: Some(game.start_time + Duration::hours(1)),
        end_time: Some(game.end_time + Duration::hours(1)),
        ..GamePatch::default()
    };
    let moved = GameService.update_game(db, game.id, creator.id, patch).await?;
    assert_eq!(moved.start_time, game.start_time + Duration::hours(1));
    Ok(())
}

#[tokio::test]
async fn capacity_cannot_drop_below_roster() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let a = create_user(db, "Alpha").await;
    let b = create_user(db, "Bravo").await;
    let game = upcoming_game(db, &creator, Some(4)).await;
    RosterService.join(db, game.id, a.id).await?;
    RosterService.join(db, game.id, b.id).await?;

    let patch = GamePatch {
        capacity: Some(Some(1)),
        ..GamePatch::default()
    };
    let err = GameService
        .update_game(db, game.id, creator.id, patch)
        .await
        .unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::CapacityBelowRoster);

    let patch = GamePatch {
        capacity: Some(Some(2)),
        ..GamePatch::default()
    };
    let updated = GameService.update_game(db, game.id, creator.id, patch).await?;
    assert_eq!(updated.capacity, Some(2));
    Ok(())
}

#[tokio::test]
async fn only_the_creator_manages_a_game() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let other = create_user(db, "Other").await;
    let game = upcoming_game(db, &creator, None).await;

    let err = GameService
        .update_game(db, game.id, other.id, GamePatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(ForbiddenKind::NotCreator, _)));

    let err = GameService.cancel_game(db, game.id, other.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(ForbiddenKind::NotCreator, _)));

    let err = GameService.delete_game(db, game.id, other.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(ForbiddenKind::NotCreator, _)));

    let stored = games::require_game(db, game.id).await?;
    assert_eq!(stored.status, GameStatus::Open);
    assert_eq!(stored.location, game.location);
    Ok(())
}

#[tokio::test]
async fn cancel_is_idempotent_and_absorbing() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let game = upcoming_game(db, &creator, None).await;

    let cancelled = GameService.cancel_game(db, game.id, creator.id).await?;
    assert_eq!(cancelled.status, GameStatus::Cancelled);
    assert_eq!(cancelled.display_state(now()), DisplayState::Cancelled);

    let again = GameService.cancel_game(db, game.id, creator.id).await?;
    assert_eq!(again.status, GameStatus::Cancelled);

    // Updates never touch status
    let patch = GamePatch {
        location: Some("Gym".to_string()),
        ..GamePatch::default()
    };
    let updated = GameService.update_game(db, game.id, creator.id, patch).await?;
    assert_eq!(updated.status, GameStatus::Cancelled);
    assert_eq!(
        updated.display_state(game.end_time + Duration::days(1)),
        DisplayState::Cancelled
    );
    Ok(())
}

#[tokio::test]
async fn delete_removes_roster_and_comments() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let player = create_user(db, "Player").await;
    let game = upcoming_game(db, &creator, None).await;
    RosterService.join(db, game.id, player.id).await?;
    CommentService.post_comment(db, game.id, player.id, "see you there").await?;

    GameService.delete_game(db, game.id, creator.id).await?;

    assert!(games::find_by_id(db, game.id).await?.is_none());
    assert_eq!(participants::count_for_game(db, game.id).await?, 0);
    assert!(backend::repos::comments::list_for_game(db, game.id).await?.is_empty());

    let err = GameService.delete_game(db, game.id, creator.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    Ok(())
}
