use backend::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use backend::repos::sports;
use backend::services::users::{
    ensure_user, own_profile, public_profile, search_users, update_profile, ProfileChanges,
};
use backend_test_support::unique_helpers::{unique_email, unique_str};

use crate::support::build_test_state;
use crate::support::factory::create_user;

#[tokio::test]
async fn ensure_user_creates_then_reuses() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let email = unique_email("jordan");
    let sub = unique_str("sub");

    let created = ensure_user(db, &email.to_uppercase(), "Jordan Lee", &sub).await?;
    assert_eq!(created.email, email);
    assert_eq!(created.name, "Jordan Lee");
    assert!(created.username.is_some());

    let again = ensure_user(db, &email, "Ignored", &sub).await?;
    assert_eq!(again.id, created.id);
    assert_eq!(again.name, "Jordan Lee");
    Ok(())
}

#[tokio::test]
async fn ensure_user_rejects_mismatched_subject() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let email = unique_email("sam");
    ensure_user(db, &email, "Sam", &unique_str("sub")).await?;

    let err = ensure_user(db, &email, "Sam", &unique_str("sub"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::SubMismatch, _)));

    let err = ensure_user(db, "not-an-email", "Sam", "sub-x").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::InvalidEmail, _)));
    Ok(())
}

#[tokio::test]
async fn profiles_hide_email_from_others() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_user(db, "Casey").await;

    let public = public_profile(db, user.id).await?;
    assert_eq!(public.email, None);
    assert_eq!(public.name, "Casey");

    let own = own_profile(db, user.id).await?;
    assert_eq!(own.email.as_deref(), Some(user.email.as_str()));

    let err = public_profile(db, 777_777).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));
    Ok(())
}

#[tokio::test]
async fn update_profile_replaces_favorites() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_user(db, "Riley").await;
    let all_sports = sports::list_sports(db).await?;
    let ids: Vec<i64> = all_sports.iter().map(|s| s.id).collect();

    let changes = ProfileChanges {
        bio: Some("Weekend hooper".to_string()),
        favorite_sports: Some(vec![ids[0], ids[1], ids[0]]),
        ..ProfileChanges::default()
    };
    let profile = update_profile(db, user.id, changes).await?;
    assert_eq!(profile.bio, "Weekend hooper");
    assert_eq!(profile.favorite_sports.len(), 2);

    let changes = ProfileChanges {
        favorite_sports: Some(vec![ids[2]]),
        ..ProfileChanges::default()
    };
    let profile = update_profile(db, user.id, changes).await?;
    let favorites: Vec<i64> = profile.favorite_sports.iter().map(|s| s.id).collect();
    assert_eq!(favorites, [ids[2]]);
    assert_eq!(profile.bio, "Weekend hooper");
    Ok(())
}

#[tokio::test]
async fn update_profile_validates_input() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_user(db, "Taylor").await;
    let other = create_user(db, "Morgan").await;

    let changes = ProfileChanges {
        favorite_sports: Some(vec![123_456]),
        ..ProfileChanges::default()
    };
    let err = update_profile(db, user.id, changes).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::UnknownSport, _)));

    let changes = ProfileChanges {
        email: Some(other.email.clone()),
        ..ProfileChanges::default()
    };
    let err = update_profile(db, user.id, changes).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::UniqueEmail, _)));

    let changes = ProfileChanges {
        email: Some("nope".to_string()),
        ..ProfileChanges::default()
    };
    let err = update_profile(db, user.id, changes).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::InvalidEmail, _)));
    Ok(())
}

#[tokio::test]
async fn search_is_case_insensitive_and_blank_is_empty() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let db = state.db();
    let marker = unique_str("Zephyr");
    let user = create_user(db, &marker).await;
    create_user(db, "Unrelated").await;

    let found = search_users(db, &marker.to_uppercase()).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, user.id);

    assert!(search_users(db, "").await?.is_empty());
    assert!(search_users(db, "   ").await?.is_empty());

    // LIKE wildcards are matched literally
    assert!(search_users(db, "%").await?.iter().all(|u| u.name.contains('%')));

    // Folding covers non-ASCII letters on every backend
    let accented = unique_str("q");
    let elodie = create_user(db, &format!("ÉLODIE {accented}")).await;
    let found = search_users(db, &format!("élodie {accented}")).await?;
    assert_eq!(found.iter().map(|u| u.id).collect::<Vec<_>>(), vec![elodie.id]);

    // A renamed user is found under the new name only
    let renamed = unique_str("Øystein");
    update_profile(
        db,
        elodie.id,
        ProfileChanges {
            name: Some(renamed.clone()),
            ..Default::default()
        },
    )
    .await?;
    assert!(search_users(db, &format!("élodie {accented}")).await?.is_empty());
    let found = search_users(db, &renamed.to_lowercase()).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, elodie.id);
    Ok(())
}
