//! Read models returned to clients for games, rosters and comments.
//!
//! Records are assembled in a fixed number of queries per batch: the games,
//! then their creators, sports and rosters keyed by id.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::game_state::DisplayState;
use crate::entities::games::{GameStatus, SkillLevel};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::games::Game;
use crate::repos::participants::{self, Participant};
use crate::repos::sports::{self, Sport};
use crate::repos::users::{self, User};

/// Public identity of a user. Email stays private to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: Option<String>,
    pub name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantRecord {
    pub id: i64,
    pub user: UserSummary,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub id: i64,
    pub name: Option<String>,
    pub creator: UserSummary,
    pub sport: Sport,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    pub status: GameStatus,
    pub current_state: DisplayState,
    pub skill_level: SkillLevel,
    pub capacity: Option<i32>,
    pub participant_count: usize,
    pub participants: Vec<ParticipantRecord>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl GameRecord {
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.participants.iter().any(|p| p.user.id == user_id)
    }
}

fn dangling(what: &str, id: i64) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("{what} {id} referenced by a game is missing"),
    )
}

/// Build records for `games`, preserving their order.
pub async fn build_records<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    games: Vec<Game>,
    now: OffsetDateTime,
) -> Result<Vec<GameRecord>, DomainError> {
    if games.is_empty() {
        return Ok(Vec::new());
    }

    let game_ids: Vec<i64> = games.iter().map(|g| g.id).collect();
    let mut creator_ids: Vec<i64> = games.iter().map(|g| g.created_by).collect();
    creator_ids.sort_unstable();
    creator_ids.dedup();
    let mut sport_ids: Vec<i64> = games.iter().map(|g| g.sport_id).collect();
    sport_ids.sort_unstable();
    sport_ids.dedup();

    let creators: HashMap<i64, User> = users::find_users_by_ids(conn, &creator_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let sports: HashMap<i64, Sport> = sports::find_sports_by_ids(conn, &sport_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let mut rosters: HashMap<i64, Vec<ParticipantRecord>> = HashMap::new();
    for (participant, user) in participants::list_with_users(conn, &game_ids).await? {
        rosters
            .entry(participant.game_id)
            .or_default()
            .push(participant_record(participant, &user));
    }

    games
        .into_iter()
        .map(|game| {
            let creator = creators
                .get(&game.created_by)
                .ok_or_else(|| dangling("User", game.created_by))?;
            let sport = sports
                .get(&game.sport_id)
                .cloned()
                .ok_or_else(|| dangling("Sport", game.sport_id))?;
            let participants = rosters.remove(&game.id).unwrap_or_default();

            Ok(GameRecord {
                id: game.id,
                current_state: game.display_state(now),
                creator: UserSummary::from(creator),
                sport,
                participant_count: participants.len(),
                participants,
                name: game.name,
                location: game.location,
                start_time: game.start_time,
                end_time: game.end_time,
                status: game.status,
                skill_level: game.skill_level,
                capacity: game.capacity,
                created_at: game.created_at,
                updated_at: game.updated_at,
            })
        })
        .collect()
}

pub async fn build_record<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: Game,
    now: OffsetDateTime,
) -> Result<GameRecord, DomainError> {
    build_records(conn, vec![game], now)
        .await?
        .pop()
        .ok_or_else(|| DomainError::infra(InfraErrorKind::Other("record".into()), "Game record missing"))
}

fn participant_record(participant: Participant, user: &User) -> ParticipantRecord {
    ParticipantRecord {
        id: participant.id,
        user: UserSummary::from(user),
        joined_at: participant.joined_at,
    }
}
