//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use users_adapter::{ProfileUpdate, UserCreate};

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub sub: String,
    pub email: String,
    pub username: Option<String>,
    pub name: String,
    pub bio: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    find_user_by_id(conn, user_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found")))
}

pub async fn find_users_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::find_users_by_ids(conn, user_ids).await?;
    Ok(users.into_iter().map(User::from).collect())
}

pub async fn find_user_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_sub(conn, sub).await?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_email(conn, email).await?;
    Ok(user.map(User::from))
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, dto).await?;
    Ok(User::from(user))
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    dto: ProfileUpdate,
) -> Result<User, DomainError> {
    let user = users_adapter::update_profile(conn, user_id, dto).await?;
    Ok(User::from(user))
}

pub async fn search_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    needle: &str,
    limit: u64,
) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::search_users(conn, needle, limit).await?;
    Ok(users.into_iter().map(User::from).collect())
}

pub async fn favorite_sport_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(users_adapter::favorite_sport_ids(conn, user_id).await?)
}

pub async fn replace_favorite_sports<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    sport_ids: &[i64],
) -> Result<(), DomainError> {
    users_adapter::replace_favorite_sports(conn, user_id, sport_ids).await?;
    Ok(())
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            sub: model.sub,
            email: model.email,
            username: model.username,
            name: model.name,
            bio: model.bio,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
