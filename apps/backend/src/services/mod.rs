//! Domain services. Each operation takes a connection (normally the
//! request's transaction) and returns `DomainError` on failure.

pub mod comments;
pub mod game_records;
pub mod games;
pub mod queries;
pub mod roster;
pub mod users;

use crate::domain::access::{authorize, Action, Caller};
use crate::errors::domain::DomainError;
use crate::logging::security::access_denied;
use crate::repos::games::Game;

/// Capability check that also records refusals in the security log.
pub(crate) fn guard(game: &Game, caller: Caller, action: Action) -> Result<(), DomainError> {
    authorize(game.facts(), caller, action)
        .inspect_err(|_| access_denied(caller.user_id, game.id, action.as_str()))
}
