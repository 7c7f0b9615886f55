//! Comment repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::comments_sea as comments_adapter;
use crate::errors::domain::DomainError;
use crate::repos::users::User;

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub game_id: i64,
    pub author_id: i64,
    pub body: String,
    pub created_at: time::OffsetDateTime,
}

pub async fn create_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    author_id: i64,
    body: String,
) -> Result<Comment, DomainError> {
    let row = comments_adapter::create_comment(conn, game_id, author_id, body).await?;
    Ok(Comment::from(row))
}

pub async fn list_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<(Comment, User)>, DomainError> {
    let rows = comments_adapter::list_for_game(conn, game_id).await?;
    Ok(rows
        .into_iter()
        .map(|(c, u)| (Comment::from(c), User::from(u)))
        .collect())
}

pub async fn remove_all_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    Ok(comments_adapter::delete_for_game(conn, game_id).await?)
}

impl From<crate::entities::comments::Model> for Comment {
    fn from(model: crate::entities::comments::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            author_id: model.author_id,
            body: model.body,
            created_at: model.created_at,
        }
    }
}
