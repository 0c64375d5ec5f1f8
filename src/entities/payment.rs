//! Payment entity - An assessed debt of one user for one box.
//!
//! The amount is fixed at creation. The record is mutated only when it is
//! marked as paid.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Internal ID of the owing user
    pub user_id: i64,
    /// ID of the box the debt was assessed for
    pub box_id: i64,
    /// Amount owed
    pub amount: f64,
    /// Whether the debt has been settled
    pub is_paid: bool,
    /// When the debt was settled, None until then
    pub paid_at: Option<DateTimeUtc>,
    /// Soft delete flag
    pub is_deleted: bool,
    /// When the debt was assessed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each payment belongs to one box
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
