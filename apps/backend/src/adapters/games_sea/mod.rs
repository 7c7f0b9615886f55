//! SeaORM adapter for games - generic over ConnectionTrait.

use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbBackend, EntityTrait, NotSet,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::games::{self, GameStatus};
use crate::entities::participants;
use crate::utils::time::now;

pub mod dto;

pub use dto::{GameCreate, GameUpdate, UpcomingFilter};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Load a game and hold its row lock until the surrounding transaction ends.
///
/// PostgreSQL issues `SELECT ... FOR UPDATE`; SQLite has no row locks and
/// already serializes writers, so the plain select is used there.
pub async fn lock_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    let query = games::Entity::find_by_id(game_id);
    if conn.get_database_backend() == DbBackend::Sqlite {
        query.one(conn).await
    } else {
        query.lock_exclusive().one(conn).await
    }
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = now();
    let game_active = games::ActiveModel {
        id: NotSet,
        created_by: Set(dto.created_by),
        sport_id: Set(dto.sport_id),
        name: Set(dto.name),
        location: Set(dto.location),
        start_time: Set(dto.start_time),
        end_time: Set(dto.end_time),
        status: Set(GameStatus::Open),
        skill_level: Set(dto.skill_level),
        capacity: Set(dto.capacity),
        created_at: Set(now),
        updated_at: Set(now),
    };

    game_active.insert(conn).await
}

pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    let mut game_active = games::ActiveModel {
        id: Set(dto.id),
        updated_at: Set(now()),
        ..Default::default()
    };
    if let Some(name) = dto.name {
        game_active.name = Set(name);
    }
    if let Some(location) = dto.location {
        game_active.location = Set(location);
    }
    if let Some(sport_id) = dto.sport_id {
        game_active.sport_id = Set(sport_id);
    }
    if let Some(start_time) = dto.start_time {
        game_active.start_time = Set(start_time);
    }
    if let Some(end_time) = dto.end_time {
        game_active.end_time = Set(end_time);
    }
    if let Some(skill_level) = dto.skill_level {
        game_active.skill_level = Set(skill_level);
    }
    if let Some(capacity) = dto.capacity {
        game_active.capacity = Set(capacity);
    }
    game_active.update(conn).await
}

pub async fn set_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    status: GameStatus,
) -> Result<games::Model, sea_orm::DbErr> {
    games::ActiveModel {
        id: Set(game_id),
        status: Set(status),
        updated_at: Set(now()),
        ..Default::default()
    }
    .update(conn)
    .await
}

pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = games::Entity::delete_by_id(game_id).exec(conn).await?;
    Ok(res.rows_affected)
}

/// Games that have not ended yet, soonest first.
pub async fn list_upcoming<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    filter: UpcomingFilter,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    let mut query = games::Entity::find().filter(games::Column::EndTime.gte(now));
    if let Some(sport_id) = filter.sport_id {
        query = query.filter(games::Column::SportId.eq(sport_id));
    }
    if let Some(start_from) = filter.start_from {
        query = query.filter(games::Column::StartTime.gte(start_from));
    }
    query
        .order_by_asc(games::Column::StartTime)
        .order_by_asc(games::Column::Id)
        .all(conn)
        .await
}

/// A creator's games that have already ended, most recently ended first.
pub async fn list_archived_by_creator<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    creator_id: i64,
    now: OffsetDateTime,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::CreatedBy.eq(creator_id))
        .filter(games::Column::EndTime.lte(now))
        .order_by_desc(games::Column::EndTime)
        .order_by_desc(games::Column::Id)
        .all(conn)
        .await
}

/// Games a user created or is on the roster of. Each game appears once.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    let joined = Query::select()
        .column(participants::Column::GameId)
        .from(participants::Entity)
        .and_where(participants::Column::UserId.eq(user_id))
        .to_owned();

    games::Entity::find()
        .filter(
            Condition::any()
                .add(games::Column::CreatedBy.eq(user_id))
                .add(games::Column::Id.in_subquery(joined)),
        )
        .order_by_asc(games::Column::StartTime)
        .order_by_asc(games::Column::Id)
        .all(conn)
        .await
}
