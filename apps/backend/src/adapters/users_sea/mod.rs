//! SeaORM adapter for users and their favorite sports.

use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{user_favorite_sports, users};
use crate::utils::time::now;

pub mod dto;

pub use dto::{ProfileUpdate, UserCreate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_users_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }
    users::Entity::find()
        .filter(users::Column::Id.is_in(user_ids.iter().copied()))
        .all(conn)
        .await
}

pub async fn find_user_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Sub.eq(sub))
        .one(conn)
        .await
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = now();
    let search_key = search_key(dto.username.as_deref(), &dto.email, &dto.name);
    let user_active = users::ActiveModel {
        id: NotSet,
        sub: Set(dto.sub),
        email: Set(dto.email),
        username: Set(dto.username),
        name: Set(dto.name),
        bio: Set(String::new()),
        search_key: Set(search_key),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    dto: ProfileUpdate,
) -> Result<users::Model, sea_orm::DbErr> {
    let mut user_active = users::ActiveModel {
        id: Set(user_id),
        updated_at: Set(now()),
        ..Default::default()
    };
    if dto.name.is_some() || dto.email.is_some() {
        let current = find_user_by_id(conn, user_id)
            .await?
            .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("users.id={user_id}")))?;
        user_active.search_key = Set(search_key(
            current.username.as_deref(),
            dto.email.as_deref().unwrap_or(&current.email),
            dto.name.as_deref().unwrap_or(&current.name),
        ));
    }
    if let Some(name) = dto.name {
        user_active.name = Set(name);
    }
    if let Some(email) = dto.email {
        user_active.email = Set(email);
    }
    if let Some(bio) = dto.bio {
        user_active.bio = Set(bio);
    }
    user_active.update(conn).await
}

/// Fields are folded here rather than with SQL `lower()`, which only folds
/// ASCII on SQLite. The unit separator keeps a needle from spanning fields.
fn search_key(username: Option<&str>, email: &str, name: &str) -> String {
    [username.unwrap_or(""), email, name]
        .join("\u{1f}")
        .to_lowercase()
}

/// Escape `%`, `_` and the escape character itself for a LIKE pattern.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Case-insensitive substring search over username, email and display name.
pub async fn search_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    needle: &str,
    limit: u64,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));

    users::Entity::find()
        .filter(Expr::col(users::Column::SearchKey).like(LikeExpr::new(pattern).escape('\\')))
        .order_by_asc(users::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn favorite_sport_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    let rows = user_favorite_sports::Entity::find()
        .filter(user_favorite_sports::Column::UserId.eq(user_id))
        .order_by_asc(user_favorite_sports::Column::SportId)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|r| r.sport_id).collect())
}

/// Replace the whole favorite set for a user.
pub async fn replace_favorite_sports<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    sport_ids: &[i64],
) -> Result<(), sea_orm::DbErr> {
    user_favorite_sports::Entity::delete_many()
        .filter(user_favorite_sports::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;

    if sport_ids.is_empty() {
        return Ok(());
    }

    let rows = sport_ids
        .iter()
        .map(|&sport_id| user_favorite_sports::ActiveModel {
            user_id: Set(user_id),
            sport_id: Set(sport_id),
        });
    user_favorite_sports::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
