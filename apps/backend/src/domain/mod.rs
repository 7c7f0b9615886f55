//! Domain layer: pure game lifecycle rules, no I/O.

pub mod access;
pub mod game_state;

#[cfg(test)]
mod test_prelude;

pub use access::{authorize, Action, Caller, GameFacts};
pub use game_state::{resolve_state, DisplayState};
