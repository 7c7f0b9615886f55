use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::Query;

use crate::m20250901_000001_init::Sports;

#[derive(DeriveMigrationName)]
pub struct Migration;

pub const SEEDED_SPORTS: [&str; 6] = [
    "Basketball",
    "Soccer",
    "Volleyball",
    "Tennis",
    "Ultimate Frisbee",
    "Pickleball",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(Sports::Table).columns([Sports::Name]);
        for name in SEEDED_SPORTS {
            insert.values_panic([name.into()]);
        }
        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Sports::Table)
            .and_where(Expr::col(Sports::Name).is_in(SEEDED_SPORTS))
            .to_owned();
        manager.exec_stmt(delete).await
    }
}
