use backend::domain::DisplayState;
use backend::errors::domain::{DomainError, NotFoundKind};
use backend::repos::games::UpcomingFilter;
use backend::repos::sports;
use backend::services::queries::GameQueries;
use backend::services::roster::RosterService;
use backend::utils::time::now;
use time::Duration;

use crate::support::build_test_state;
use crate::support::factory::{any_sport, create_game, create_user, new_game};

#[tokio::test]
async fn upcoming_excludes_ended_games_and_sorts_by_start() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let sport = any_sport(db).await;

    let later = create_game(db, &creator, new_game(sport.id, Duration::days(3))).await;
    let ended = create_game(db, &creator, new_game(sport.id, Duration::days(-2))).await;
    let sooner = create_game(db, &creator, new_game(sport.id, Duration::days(1))).await;
    // Started an hour ago, ends in an hour
    let live = create_game(db, &creator, new_game(sport.id, Duration::hours(-1))).await;

    let listed = GameQueries
        .list_upcoming(db, UpcomingFilter::default(), now())
        .await?;
    let ours: Vec<i64> = listed
        .iter()
        .map(|r| r.id)
        .filter(|id| [later.id, ended.id, sooner.id, live.id].contains(id))
        .collect();
    assert_eq!(ours, [live.id, sooner.id, later.id]);

    let live_record = listed.iter().find(|r| r.id == live.id).unwrap();
    assert_eq!(live_record.current_state, DisplayState::InProgress);
    assert_eq!(live_record.creator.id, creator.id);
    assert_eq!(live_record.sport.id, sport.id);
    Ok(())
}

#[tokio::test]
async fn upcoming_filters_by_sport_and_start() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let all_sports = sports::list_sports(db).await?;
    let (first, second) = (&all_sports[0], &all_sports[1]);

    let a = create_game(db, &creator, new_game(first.id, Duration::days(1))).await;
    let b = create_game(db, &creator, new_game(second.id, Duration::days(5))).await;

    let by_sport = GameQueries
        .list_upcoming(
            db,
            UpcomingFilter {
                sport_id: Some(second.id),
                start_from: None,
            },
            now(),
        )
        .await?;
    assert!(by_sport.iter().all(|r| r.sport.id == second.id));
    assert!(by_sport.iter().any(|r| r.id == b.id));
    assert!(!by_sport.iter().any(|r| r.id == a.id));

    let by_start = GameQueries
        .list_upcoming(
            db,
            UpcomingFilter {
                sport_id: None,
                start_from: Some(now() + Duration::days(3)),
            },
            now(),
        )
        .await?;
    assert!(by_start.iter().any(|r| r.id == b.id));
    assert!(!by_start.iter().any(|r| r.id == a.id));
    Ok(())
}

#[tokio::test]
async fn archived_lists_own_ended_games_latest_first() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let other = create_user(db, "Other").await;
    let sport = any_sport(db).await;

    let older = create_game(db, &creator, new_game(sport.id, Duration::days(-6))).await;
    let recent = create_game(db, &creator, new_game(sport.id, Duration::days(-1))).await;
    create_game(db, &creator, new_game(sport.id, Duration::days(2))).await;
    create_game(db, &other, new_game(sport.id, Duration::days(-3))).await;

    let archived = GameQueries.list_archived(db, creator.id, now()).await?;
    let ids: Vec<i64> = archived.iter().map(|r| r.id).collect();
    assert_eq!(ids, [recent.id, older.id]);
    assert!(archived
        .iter()
        .all(|r| r.current_state == DisplayState::Completed));
    Ok(())
}

#[tokio::test]
async fn by_user_lists_created_and_joined_once() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let alice = create_user(db, "Alice").await;
    let bob = create_user(db, "Bob").await;
    let sport = any_sport(db).await;

    let own = create_game(db, &alice, new_game(sport.id, Duration::days(2))).await;
    let joined = create_game(db, &bob, new_game(sport.id, Duration::days(1))).await;
    let past = create_game(db, &bob, new_game(sport.id, Duration::days(-4))).await;
    create_game(db, &bob, new_game(sport.id, Duration::days(3))).await;
    RosterService.join(db, joined.id, alice.id).await?;
    RosterService.join(db, past.id, alice.id).await?;

    let listed = GameQueries.list_for_user(db, alice.id, now()).await?;
    let ids: Vec<i64> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, [past.id, joined.id, own.id]);
    assert!(listed
        .iter()
        .find(|r| r.id == joined.id)
        .unwrap()
        .is_participant(alice.id));

    let err = GameQueries.list_for_user(db, 987_654, now()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));
    Ok(())
}

#[tokio::test]
async fn record_carries_roster_in_join_order() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let a = create_user(db, "Alpha").await;
    let b = create_user(db, "Bravo").await;
    let sport = any_sport(db).await;
    let game = create_game(db, &creator, new_game(sport.id, Duration::days(1))).await;
    RosterService.join(db, game.id, a.id).await?;
    RosterService.join(db, game.id, b.id).await?;

    let record = GameQueries.get_game(db, game.id, now()).await?;
    assert_eq!(record.participant_count, 2);
    let roster: Vec<i64> = record.participants.iter().map(|p| p.user.id).collect();
    assert_eq!(roster, [a.id, b.id]);
    assert!(!record.is_participant(creator.id));
    Ok(())
}
