//! Sport repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::sports_sea as sports_adapter;
use crate::errors::domain::DomainError;

/// Sport reference record; also the wire shape `{id, name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sport {
    pub id: i64,
    pub name: String,
}

pub async fn list_sports<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Sport>, DomainError> {
    let sports = sports_adapter::list_sports(conn).await?;
    Ok(sports.into_iter().map(Sport::from).collect())
}

pub async fn find_sport_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sport_id: i64,
) -> Result<Option<Sport>, DomainError> {
    let sport = sports_adapter::find_sport_by_id(conn, sport_id).await?;
    Ok(sport.map(Sport::from))
}

/// Sports for the given ids, ordered by name. Unknown ids are skipped.
pub async fn find_sports_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sport_ids: &[i64],
) -> Result<Vec<Sport>, DomainError> {
    let sports = sports_adapter::find_sports_by_ids(conn, sport_ids).await?;
    Ok(sports.into_iter().map(Sport::from).collect())
}

impl From<crate::entities::sports::Model> for Sport {
    fn from(model: crate::entities::sports::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
