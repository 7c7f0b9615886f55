//! SeaORM adapter for sports reference data.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::sports;

pub async fn list_sports<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<sports::Model>, sea_orm::DbErr> {
    sports::Entity::find()
        .order_by_asc(sports::Column::Name)
        .order_by_asc(sports::Column::Id)
        .all(conn)
        .await
}

pub async fn find_sport_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sport_id: i64,
) -> Result<Option<sports::Model>, sea_orm::DbErr> {
    sports::Entity::find_by_id(sport_id).one(conn).await
}

pub async fn find_sports_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sport_ids: &[i64],
) -> Result<Vec<sports::Model>, sea_orm::DbErr> {
    if sport_ids.is_empty() {
        return Ok(Vec::new());
    }
    sports::Entity::find()
        .filter(sports::Column::Id.is_in(sport_ids.iter().copied()))
        .order_by_asc(sports::Column::Name)
        .all(conn)
        .await
}
