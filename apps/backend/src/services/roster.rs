//! Roster management: join, leave and membership checks.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::access::{Action, Caller};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::games::{self, Game};
use crate::repos::participants;
use crate::services::guard;

/// Confirmation returned after a roster change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterChange {
    pub game_id: i64,
    pub user_id: i64,
    pub participant_count: u64,
}

fn at_capacity(game_id: i64, capacity: i32) -> DomainError {
    DomainError::conflict(
        ConflictKind::CapacityExceeded,
        format!("Game {game_id} is full ({capacity} players)"),
    )
}

fn exceeds(count: u64, capacity: i32) -> bool {
    u64::try_from(capacity).map_or(true, |cap| count > cap)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RosterService;

impl RosterService {
    pub fn new() -> Self {
        Self
    }

    /// Add `user_id` to the roster.
    ///
    /// Must run inside a transaction: the game row is locked, and the roster
    /// is re-counted after the insert so an over-admission fails and is
    /// rolled back with the caller's transaction.
    pub async fn join<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        user_id: i64,
    ) -> Result<RosterChange, DomainError> {
        let game = games::require_game_for_update(conn, game_id).await?;
        guard(&game, Caller::new(user_id), Action::Join)?;

        if participants::is_participant(conn, game_id, user_id).await? {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyJoined,
                "Already joined this game",
            ));
        }

        if let Some(capacity) = game.capacity {
            let count = participants::count_for_game(conn, game_id).await?;
            if exceeds(count + 1, capacity) {
                return Err(at_capacity(game_id, capacity));
            }
        }

        // A concurrent duplicate surfaces here as Conflict(AlreadyJoined).
        participants::add_participant(conn, game_id, user_id).await?;

        let participant_count = participants::count_for_game(conn, game_id).await?;
        if let Some(capacity) = game.capacity {
            if exceeds(participant_count, capacity) {
                warn!(
                    game_id,
                    user_id,
                    participant_count,
                    capacity,
                    "roster over capacity after insert"
                );
                return Err(at_capacity(game_id, capacity));
            }
        }

        info!(game_id, user_id, participant_count, "roster.joined");
        Ok(RosterChange {
            game_id,
            user_id,
            participant_count,
        })
    }

    pub async fn leave<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        user_id: i64,
    ) -> Result<RosterChange, DomainError> {
        let game = games::require_game_for_update(conn, game_id).await?;
        guard(&game, Caller::new(user_id), Action::Leave)?;

        if !participants::remove_participant(conn, game_id, user_id).await? {
            return Err(DomainError::conflict(
                ConflictKind::NotJoined,
                "Not a participant of this game",
            ));
        }

        let participant_count = participants::count_for_game(conn, game_id).await?;
        info!(game_id, user_id, participant_count, "roster.left");
        Ok(RosterChange {
            game_id,
            user_id,
            participant_count,
        })
    }

    pub async fn is_participant<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        user_id: i64,
    ) -> Result<bool, DomainError> {
        participants::is_participant(conn, game_id, user_id).await
    }

    pub async fn is_creator_or_participant<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game: &Game,
        user_id: i64,
    ) -> Result<bool, DomainError> {
        if game.created_by == user_id {
            return Ok(true);
        }
        self.is_participant(conn, game.id, user_id).await
    }
}
