//! TypePerson entity: read-only catalog of person roles

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role descriptions seeded into the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Cashier,
    Client,
    Admin,
}

impl RoleKind {
    pub const ALL: [RoleKind; 3] = [RoleKind::Cashier, RoleKind::Client, RoleKind::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Cashier => "CASHIER",
            RoleKind::Client => "CLIENT",
            RoleKind::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "type_persons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Human-readable role name, e.g. `CASHIER`
    #[sea_orm(unique)]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::person_type_person::Entity")]
    RoleGrants,
}

impl Related<super::person_type_person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleGrants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
