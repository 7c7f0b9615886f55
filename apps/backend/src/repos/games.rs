//! Game repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::games_sea as games_adapter;
use crate::domain::access::GameFacts;
use crate::domain::game_state::{resolve_state, DisplayState};
use crate::entities::games::{GameStatus, SkillLevel};
use crate::errors::domain::{DomainError, NotFoundKind};

pub use games_adapter::{GameCreate, GameUpdate, UpcomingFilter};

/// Game domain model
///
/// Carries the persisted columns only. The display state is derived on
/// demand with [`Game::display_state`] and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub created_by: i64,
    pub sport_id: i64,
    pub name: Option<String>,
    pub location: String,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub status: GameStatus,
    pub skill_level: SkillLevel,
    pub capacity: Option<i32>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Game {
    pub fn display_state(&self, now: OffsetDateTime) -> DisplayState {
        resolve_state(self.status, self.start_time, self.end_time, now)
    }

    pub fn facts(&self) -> GameFacts {
        GameFacts {
            creator_id: self.created_by,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == GameStatus::Cancelled
    }
}

fn game_not_found(game_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

/// Find game by ID or return `NotFound(Game)`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| game_not_found(game_id))
}

/// Like [`require_game`] but holds the row lock for the rest of the transaction.
pub async fn require_game_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    games_adapter::lock_for_update(conn, game_id)
        .await?
        .map(Game::from)
        .ok_or_else(|| game_not_found(game_id))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<Game, DomainError> {
    let game = games_adapter::create_game(conn, dto).await?;
    Ok(Game::from(game))
}

pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<Game, DomainError> {
    let game = games_adapter::update_game(conn, dto).await?;
    Ok(Game::from(game))
}

pub async fn set_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    status: GameStatus,
) -> Result<Game, DomainError> {
    let game = games_adapter::set_status(conn, game_id, status).await?;
    Ok(Game::from(game))
}

pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<(), DomainError> {
    if games_adapter::delete_game(conn, game_id).await? == 0 {
        return Err(game_not_found(game_id));
    }
    Ok(())
}

pub async fn list_upcoming<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    filter: UpcomingFilter,
) -> Result<Vec<Game>, DomainError> {
    let games = games_adapter::list_upcoming(conn, now, filter).await?;
    Ok(games.into_iter().map(Game::from).collect())
}

pub async fn list_archived_by_creator<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    creator_id: i64,
    now: OffsetDateTime,
) -> Result<Vec<Game>, DomainError> {
    let games = games_adapter::list_archived_by_creator(conn, creator_id, now).await?;
    Ok(games.into_iter().map(Game::from).collect())
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Game>, DomainError> {
    let games = games_adapter::list_for_user(conn, user_id).await?;
    Ok(games.into_iter().map(Game::from).collect())
}

impl From<crate::entities::games::Model> for Game {
    fn from(model: crate::entities::games::Model) -> Self {
        Self {
            id: model.id,
            created_by: model.created_by,
            sport_id: model.sport_id,
            name: model.name,
            location: model.location,
            start_time: model.start_time,
            end_time: model.end_time,
            status: model.status,
            skill_level: model.skill_level,
            capacity: model.capacity,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
