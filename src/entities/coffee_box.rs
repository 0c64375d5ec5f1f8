//! Box entity - A purchased batch of coffee capsules.
//!
//! A box has a fixed cup capacity and a price for the whole box. The number of
//! used cups is never stored; it is derived from the coffee logs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Box database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "boxes")]
pub struct Model {
    /// Unique identifier for the box
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g. "Lungo Forte 50")
    pub name: String,
    /// Total cup capacity, always positive
    pub total_cups: i32,
    /// Price paid for the whole box
    pub price: f64,
    /// Whether cups can still be logged against this box
    pub is_active: bool,
    /// Internal ID of the user who registered the box
    pub created_by: i64,
    /// Soft delete flag
    pub is_deleted: bool,
    /// When the box was registered
    pub created_at: DateTimeUtc,
    /// When the box was last modified (deactivation)
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Box and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each box is registered by one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,
    /// One box has many coffee logs
    #[sea_orm(has_many = "super::coffee_log::Entity")]
    CoffeeLogs,
    /// One box has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::coffee_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoffeeLogs.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
