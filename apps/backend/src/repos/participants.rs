//! Roster repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::participants_sea as participants_adapter;
use crate::errors::domain::DomainError;
use crate::repos::users::User;

#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: i64,
    pub game_id: i64,
    pub user_id: i64,
    pub joined_at: time::OffsetDateTime,
}

pub async fn is_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
) -> Result<bool, DomainError> {
    Ok(participants_adapter::find_participant(conn, game_id, user_id)
        .await?
        .is_some())
}

pub async fn count_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    Ok(participants_adapter::count_for_game(conn, game_id).await?)
}

pub async fn add_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
) -> Result<Participant, DomainError> {
    let row = participants_adapter::insert_participant(conn, game_id, user_id).await?;
    Ok(Participant::from(row))
}

/// Returns whether a row was removed.
pub async fn remove_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
) -> Result<bool, DomainError> {
    Ok(participants_adapter::delete_participant(conn, game_id, user_id).await? > 0)
}

pub async fn remove_all_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    Ok(participants_adapter::delete_for_game(conn, game_id).await?)
}

pub async fn list_with_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: &[i64],
) -> Result<Vec<(Participant, User)>, DomainError> {
    let rows = participants_adapter::list_with_users(conn, game_ids).await?;
    Ok(rows
        .into_iter()
        .map(|(p, u)| (Participant::from(p), User::from(u)))
        .collect())
}

impl From<crate::entities::participants::Model> for Participant {
    fn from(model: crate::entities::participants::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            user_id: model.user_id,
            joined_at: model.joined_at,
        }
    }
}
