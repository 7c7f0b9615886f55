//! Fixture builders over the public repos and services.

use backend::repos::users::{self, User, UserCreate};
use backend::services::games::{GameService, NewGame};
use backend::repos::games::Game;
use backend::repos::sports::{self, Sport};
use backend_test_support::unique_helpers::{unique_email, unique_str};
use sea_orm::ConnectionTrait;
use time::{Duration, OffsetDateTime};

/// Insert a user with a unique sub and email.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(conn: &C, name: &str) -> User {
    let prefix = name.to_lowercase().replace(' ', "-");
    users::create_user(
        conn,
        UserCreate::new(unique_str("sub"), unique_email(&prefix), name),
    )
    .await
    .expect("create user")
}

/// The first seeded sport, alphabetically.
pub async fn any_sport<C: ConnectionTrait + Send + Sync>(conn: &C) -> Sport {
    sports::list_sports(conn)
        .await
        .expect("list sports")
        .into_iter()
        .next()
        .expect("sports are seeded")
}

/// A two hour game starting `starts_in` from now.
pub fn new_game(sport_id: i64, starts_in: Duration) -> NewGame {
    let start_time = OffsetDateTime::now_utc() + starts_in;
    NewGame {
        sport_id,
        name: Some("Pickup run".to_string()),
        location: "Riverside Courts".to_string(),
        start_time,
        end_time: start_time + Duration::hours(2),
        skill_level: None,
        capacity: None,
    }
}

/// Create a game through the service so validation applies.
pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    creator: &User,
    input: NewGame,
) -> Game {
    GameService
        .create_game(conn, creator.id, input)
        .await
        .expect("create game")
}

/// Upcoming game tomorrow with an optional capacity.
pub async fn upcoming_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    creator: &User,
    capacity: Option<i32>,
) -> Game {
    let sport = any_sport(conn).await;
    let mut input = new_game(sport.id, Duration::days(1));
    input.capacity = capacity;
    create_game(conn, creator, input).await
}
