//! SeaORM adapter for roster rows.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{participants, users};
use crate::utils::time::now;

pub async fn find_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
) -> Result<Option<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find()
        .filter(participants::Column::GameId.eq(game_id))
        .filter(participants::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn count_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    participants::Entity::find()
        .filter(participants::Column::GameId.eq(game_id))
        .count(conn)
        .await
}

/// Insert a roster row. A duplicate trips `ux_participants_user_game`.
pub async fn insert_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
) -> Result<participants::Model, sea_orm::DbErr> {
    participants::ActiveModel {
        id: NotSet,
        game_id: Set(game_id),
        user_id: Set(user_id),
        joined_at: Set(now()),
    }
    .insert(conn)
    .await
}

pub async fn delete_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = participants::Entity::delete_many()
        .filter(participants::Column::GameId.eq(game_id))
        .filter(participants::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = participants::Entity::delete_many()
        .filter(participants::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Roster rows for a set of games joined with their users, in join order.
pub async fn list_with_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: &[i64],
) -> Result<Vec<(participants::Model, users::Model)>, sea_orm::DbErr> {
    if game_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = participants::Entity::find()
        .filter(participants::Column::GameId.is_in(game_ids.iter().copied()))
        .find_also_related(users::Entity)
        .order_by_asc(participants::Column::JoinedAt)
        .order_by_asc(participants::Column::Id)
        .all(conn)
        .await?;

    rows.into_iter()
        .map(|(p, u)| {
            u.map(|u| (p, u)).ok_or_else(|| {
                sea_orm::DbErr::RecordNotFound("participant user not found".to_string())
            })
        })
        .collect()
}
