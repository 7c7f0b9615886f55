//! Capability checks for game actions.
//!
//! `authorize` is pure: callers load the facts (creator id, roster
//! membership) and ask whether an action is allowed. Roster conflicts such
//! as "already joined" are not decided here; they depend on row state and
//! are reported by the roster service.

use crate::errors::domain::{DomainError, ForbiddenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Update,
    Cancel,
    Delete,
    Join,
    Leave,
    Comment,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Update => "update",
            Action::Cancel => "cancel",
            Action::Delete => "delete",
            Action::Join => "join",
            Action::Leave => "leave",
            Action::Comment => "comment",
        }
    }
}

/// The game attributes that authorization depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameFacts {
    pub creator_id: i64,
}

/// An authenticated caller and their relation to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
    pub on_roster: bool,
}

impl Caller {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            on_roster: false,
        }
    }

    pub fn on_roster(mut self, on_roster: bool) -> Self {
        self.on_roster = on_roster;
        self
    }
}

pub fn authorize(facts: GameFacts, caller: Caller, action: Action) -> Result<(), DomainError> {
    let is_creator = caller.user_id == facts.creator_id;
    match action {
        Action::Update | Action::Cancel | Action::Delete if !is_creator => {
            Err(DomainError::forbidden(
                ForbiddenKind::NotCreator,
                format!("Only the creator may {} this game", action.as_str()),
            ))
        }
        Action::Join | Action::Leave if is_creator => Err(DomainError::forbidden(
            ForbiddenKind::CreatorOnRoster,
            format!("The creator cannot {} their own game", action.as_str()),
        )),
        Action::Comment if !is_creator && !caller.on_roster => Err(DomainError::forbidden(
            ForbiddenKind::NotParticipant,
            "Only the creator or a participant may comment",
        )),
        _ => Ok(()),
    }
}
