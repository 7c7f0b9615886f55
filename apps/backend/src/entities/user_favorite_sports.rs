use sea_orm::entity::prelude::*;

/// Join table between users and their favorite sports.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_favorite_sports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "user_id")]
    pub user_id: i64,
    #[sea_orm(primary_key, auto_increment = false, column_name = "sport_id")]
    pub sport_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::sports::Entity",
        from = "Column::SportId",
        to = "super::sports::Column::Id",
        on_delete = "Cascade"
    )]
    Sport,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::sports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sport.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
