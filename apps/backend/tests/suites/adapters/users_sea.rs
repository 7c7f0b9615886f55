use backend::adapters::users_sea::{self, ProfileUpdate, UserCreate};
use backend::repos::sports;
use backend_test_support::unique_helpers::{unique_email, unique_str};

use crate::support::build_test_state;

#[tokio::test]
async fn create_and_look_up_by_identity() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let email = unique_email("lookup");
    let sub = unique_str("sub");

    let created = users_sea::create_user(
        db,
        UserCreate::new(sub.as_str(), email.as_str(), "Look Up").with_username("lookup"),
    )
    .await?;
    assert_eq!(created.bio, "");
    assert_eq!(created.username.as_deref(), Some("lookup"));

    let by_sub = users_sea::find_user_by_sub(db, &sub).await?.unwrap();
    let by_email = users_sea::find_user_by_email(db, &email).await?.unwrap();
    assert_eq!(by_sub.id, created.id);
    assert_eq!(by_email.id, created.id);

    // Same sub again violates the unique index
    let dup = users_sea::create_user(db, UserCreate::new(sub.as_str(), unique_email("x"), "Dup")).await;
    assert!(dup.is_err());
    Ok(())
}

#[tokio::test]
async fn profile_update_leaves_absent_fields() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let created = users_sea::create_user(
        db,
        UserCreate::new(unique_str("sub"), unique_email("p"), "Before"),
    )
    .await?;

    let updated = users_sea::update_profile(
        db,
        created.id,
        ProfileUpdate {
            bio: Some("after".to_string()),
            ..ProfileUpdate::default()
        },
    )
    .await?;
    assert_eq!(updated.bio, "after");
    assert_eq!(updated.name, "Before");
    assert_eq!(updated.email, created.email);
    Ok(())
}

#[tokio::test]
async fn favorites_are_replaced_wholesale() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = users_sea::create_user(
        db,
        UserCreate::new(unique_str("sub"), unique_email("fav"), "Fan"),
    )
    .await?;
    let ids: Vec<i64> = sports::list_sports(db).await?.iter().map(|s| s.id).collect();

    users_sea::replace_favorite_sports(db, user.id, &ids[..3]).await?;
    let mut expected = ids[..3].to_vec();
    expected.sort_unstable();
    assert_eq!(users_sea::favorite_sport_ids(db, user.id).await?, expected);

    users_sea::replace_favorite_sports(db, user.id, &[]).await?;
    assert!(users_sea::favorite_sport_ids(db, user.id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn search_escapes_like_wildcards() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let plain = users_sea::create_user(
        db,
        UserCreate::new(unique_str("sub"), unique_email("plain"), "Plain Name"),
    )
    .await?;
    let odd = users_sea::create_user(
        db,
        UserCreate::new(unique_str("sub"), unique_email("odd"), "100%_Hustle"),
    )
    .await?;

    let found = users_sea::search_users(db, "0%_h", 25).await?;
    let ids: Vec<i64> = found.iter().map(|u| u.id).collect();
    assert!(ids.contains(&odd.id));
    assert!(!ids.contains(&plain.id));

    let limited = users_sea::search_users(db, "example.test", 1).await?;
    assert_eq!(limited.len(), 1);
    Ok(())
}
