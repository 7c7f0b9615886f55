//! Repository functions for the domain layer.

pub mod comments;
pub mod games;
pub mod participants;
pub mod sports;
pub mod users;
