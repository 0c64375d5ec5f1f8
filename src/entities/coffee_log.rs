//! Coffee log entity - One cup consumed by one user from one box.
//!
//! Logs are immutable once written; an accidental log is soft-deleted.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Coffee log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coffee_logs")]
pub struct Model {
    /// Unique identifier for the log entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Internal ID of the consuming user
    pub user_id: i64,
    /// ID of the box the cup came from
    pub box_id: i64,
    /// When the cup was consumed
    pub logged_at: DateTimeUtc,
    /// Soft delete flag - deleted logs no longer count as used cups
    pub is_deleted: bool,
}

/// Defines relationships between CoffeeLog and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each log belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each log belongs to one box
    #[sea_orm(
        belongs_to = "super::coffee_box::Entity",
        from = "Column::BoxId",
        to = "super::coffee_box::Column::Id"
    )]
    CoffeeBox,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::coffee_box::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoffeeBox.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
