//! SeaORM adapter for game comments.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{comments, users};
use crate::utils::time::now;

pub async fn create_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    author_id: i64,
    body: String,
) -> Result<comments::Model, sea_orm::DbErr> {
    comments::ActiveModel {
        id: NotSet,
        game_id: Set(game_id),
        author_id: Set(author_id),
        body: Set(body),
        created_at: Set(now()),
    }
    .insert(conn)
    .await
}

/// Comments for a game with their authors, oldest first.
pub async fn list_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<(comments::Model, users::Model)>, sea_orm::DbErr> {
    let rows = comments::Entity::find()
        .filter(comments::Column::GameId.eq(game_id))
        .find_also_related(users::Entity)
        .order_by_asc(comments::Column::CreatedAt)
        .order_by_asc(comments::Column::Id)
        .all(conn)
        .await?;

    rows.into_iter()
        .map(|(c, u)| {
            u.map(|u| (c, u))
                .ok_or_else(|| sea_orm::DbErr::RecordNotFound("comment author not found".to_string()))
        })
        .collect()
}

pub async fn delete_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = comments::Entity::delete_many()
        .filter(comments::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
