//! Display state of a game, derived from its stored status and the clock.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entities::games::GameStatus;

/// What a reader sees. Never persisted; recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayState {
    #[serde(rename = "Open")]
    Open,
    #[serde(rename = "In_progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

/// Cancellation wins over timing. Both window bounds are inclusive for
/// `InProgress`.
pub fn resolve_state(
    status: GameStatus,
    start_time: OffsetDateTime,
    end_time: OffsetDateTime,
    now: OffsetDateTime,
) -> DisplayState {
    if status == GameStatus::Cancelled {
        return DisplayState::Cancelled;
    }
    if now < start_time {
        DisplayState::Open
    } else if now <= end_time {
        DisplayState::InProgress
    } else {
        DisplayState::Completed
    }
}
