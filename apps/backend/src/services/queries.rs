//! List views over games.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::errors::domain::DomainError;
use crate::repos::games::{self, UpcomingFilter};
use crate::repos::users;
use crate::services::game_records::{build_record, build_records, GameRecord};

#[derive(Debug, Default, Clone, Copy)]
pub struct GameQueries;

impl GameQueries {
    pub fn new() -> Self {
        Self
    }

    /// Games that have not ended, soonest first.
    pub async fn list_upcoming<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: UpcomingFilter,
        now: OffsetDateTime,
    ) -> Result<Vec<GameRecord>, DomainError> {
        let games = games::list_upcoming(conn, now, filter).await?;
        build_records(conn, games, now).await
    }

    /// The caller's own games that have ended, most recently ended first.
    pub async fn list_archived<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        creator_id: i64,
        now: OffsetDateTime,
    ) -> Result<Vec<GameRecord>, DomainError> {
        let games = games::list_archived_by_creator(conn, creator_id, now).await?;
        build_records(conn, games, now).await
    }

    /// Games the user created or joined, each once.
    pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        now: OffsetDateTime,
    ) -> Result<Vec<GameRecord>, DomainError> {
        users::require_user(conn, user_id).await?;
        let games = games::list_for_user(conn, user_id).await?;
        build_records(conn, games, now).await
    }

    pub async fn get_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        now: OffsetDateTime,
    ) -> Result<GameRecord, DomainError> {
        let game = games::require_game(conn, game_id).await?;
        build_record(conn, game, now).await
    }
}
