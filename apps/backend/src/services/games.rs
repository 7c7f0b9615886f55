//! Game lifecycle: create, update, cancel and delete.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::access::{Action, Caller};
use crate::entities::games::{GameStatus, SkillLevel};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::{self, Game, GameCreate, GameUpdate};
use crate::repos::{comments, participants, sports};
use crate::services::guard;
use crate::utils::time::utc_seconds;

pub const MAX_LOCATION_LEN: usize = 100;
pub const MAX_NAME_LEN: usize = 100;

/// Fields supplied when creating a game.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub sport_id: i64,
    pub name: Option<String>,
    pub location: String,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub skill_level: Option<SkillLevel>,
    pub capacity: Option<i32>,
}

/// Partial update. `None` keeps the stored value; for `name` and
/// `capacity`, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    pub name: Option<Option<String>>,
    pub location: Option<String>,
    pub sport_id: Option<i64>,
    pub start_time: Option<OffsetDateTime>,
    pub end_time: Option<OffsetDateTime>,
    pub skill_level: Option<SkillLevel>,
    pub capacity: Option<Option<i32>>,
}

fn invalid(kind: ValidationKind, detail: impl Into<String>) -> DomainError {
    DomainError::validation(kind, detail)
}

fn check_window(start: OffsetDateTime, end: OffsetDateTime) -> Result<(), DomainError> {
    if end <= start {
        return Err(invalid(
            ValidationKind::InvalidTimeWindow,
            "end_time must be after start_time",
        ));
    }
    Ok(())
}

fn check_capacity(capacity: Option<i32>) -> Result<(), DomainError> {
    match capacity {
        Some(c) if c < 1 => Err(invalid(
            ValidationKind::InvalidCapacity,
            format!("capacity must be at least 1, got {c}"),
        )),
        _ => Ok(()),
    }
}

fn clean_location(raw: &str) -> Result<String, DomainError> {
    let location = raw.trim();
    if location.is_empty() {
        return Err(invalid(ValidationKind::InvalidField, "location is required"));
    }
    if location.chars().count() > MAX_LOCATION_LEN {
        return Err(invalid(
            ValidationKind::InvalidField,
            format!("location must be at most {MAX_LOCATION_LEN} characters"),
        ));
    }
    Ok(location.to_string())
}

/// Blank names are stored as absent.
fn clean_name(raw: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(name) = raw else {
        return Ok(None);
    };
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(invalid(
            ValidationKind::InvalidField,
            format!("name must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(Some(name.to_string()))
}

async fn require_sport<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sport_id: i64,
) -> Result<(), DomainError> {
    if sports::find_sport_by_id(conn, sport_id).await?.is_none() {
        return Err(invalid(
            ValidationKind::UnknownSport,
            format!("Sport {sport_id} does not exist"),
        ));
    }
    Ok(())
}

/// Game lifecycle service.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    /// Create a game owned by `creator_id`. Status starts as `open`.
    pub async fn create_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        creator_id: i64,
        input: NewGame,
    ) -> Result<Game, DomainError> {
        let start_time = utc_seconds(input.start_time)?;
        let end_time = utc_seconds(input.end_time)?;
        check_window(start_time, end_time)?;
        check_capacity(input.capacity)?;
        let location = clean_location(&input.location)?;
        let name = clean_name(input.name)?;
        require_sport(conn, input.sport_id).await?;

        let game = games::create_game(
            conn,
            GameCreate {
                created_by: creator_id,
                sport_id: input.sport_id,
                name,
                location,
                start_time,
                end_time,
                skill_level: input.skill_level.unwrap_or_default(),
                capacity: input.capacity,
            },
        )
        .await?;

        info!(game_id = game.id, creator_id, sport_id = game.sport_id, "game.created");
        Ok(game)
    }

    /// Apply a partial update. Status is never touched here.
    pub async fn update_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        caller_id: i64,
        patch: GamePatch,
    ) -> Result<Game, DomainError> {
        let game = games::require_game_for_update(conn, game_id).await?;
        guard(&game, Caller::new(caller_id), Action::Update)?;

        let start_time = patch
            .start_time
            .map(utc_seconds)
            .transpose()?
            .unwrap_or(game.start_time);
        let end_time = patch
            .end_time
            .map(utc_seconds)
            .transpose()?
            .unwrap_or(game.end_time);
        check_window(start_time, end_time)?;

        let mut dto = GameUpdate::new(game_id);
        if patch.start_time.is_some() || patch.end_time.is_some() {
            dto = dto.with_window(start_time, end_time);
        }
        if let Some(name) = patch.name {
            dto = dto.with_name(clean_name(name)?);
        }
        if let Some(location) = patch.location {
            dto = dto.with_location(clean_location(&location)?);
        }
        if let Some(sport_id) = patch.sport_id {
            require_sport(conn, sport_id).await?;
            dto = dto.with_sport_id(sport_id);
        }
        if let Some(skill_level) = patch.skill_level {
            dto = dto.with_skill_level(skill_level);
        }
        if let Some(capacity) = patch.capacity {
            check_capacity(capacity)?;
            if let Some(limit) = capacity {
                let roster = participants::count_for_game(conn, game_id).await?;
                if roster > u64::try_from(limit).unwrap_or(0) {
                    return Err(invalid(
                        ValidationKind::CapacityBelowRoster,
                        format!("capacity {limit} is below the current roster of {roster}"),
                    ));
                }
            }
            dto = dto.with_capacity(capacity);
        }

        let updated = games::update_game(conn, dto).await?;
        info!(game_id, caller_id, "game.updated");
        Ok(updated)
    }

    /// Mark a game cancelled. Cancelling twice is a no-op success.
    pub async fn cancel_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        caller_id: i64,
    ) -> Result<Game, DomainError> {
        let game = games::require_game_for_update(conn, game_id).await?;
        guard(&game, Caller::new(caller_id), Action::Cancel)?;

        if game.is_cancelled() {
            debug!(game_id, "game already cancelled");
            return Ok(game);
        }

        let cancelled = games::set_status(conn, game_id, GameStatus::Cancelled).await?;
        info!(game_id, caller_id, "game.cancelled");
        Ok(cancelled)
    }

    /// Delete a game together with its roster and comments.
    pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        caller_id: i64,
    ) -> Result<(), DomainError> {
        let game = games::require_game_for_update(conn, game_id).await?;
        guard(&game, Caller::new(caller_id), Action::Delete)?;

        let removed_participants = participants::remove_all_for_game(conn, game_id).await?;
        let removed_comments = comments::remove_all_for_game(conn, game_id).await?;
        games::delete_game(conn, game_id).await?;

        info!(
            game_id,
            caller_id,
            removed_participants,
            removed_comments,
            "game.deleted"
        );
        Ok(())
    }
}
