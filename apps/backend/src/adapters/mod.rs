//! SeaORM adapters: raw queries returning `sea_orm::DbErr`.

pub mod comments_sea;
pub mod games_sea;
pub mod participants_sea;
pub mod sports_sea;
pub mod users_sea;
