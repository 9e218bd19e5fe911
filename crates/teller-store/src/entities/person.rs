//! Person entity: the identity behind a user account

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "persons")]
pub struct Model {
    /// Person UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Identity document number (unique)
    #[sea_orm(unique)]
    pub document: String,

    pub fullname: String,

    pub address: String,

    pub email: String,

    pub phone_number: String,

    /// Reference to the document type, stored as supplied at registration
    pub type_document: String,

    pub created_at: ChronoDateTimeUtc,

    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Role grants held by this person
    #[sea_orm(has_many = "super::person_type_person::Entity")]
    RoleGrants,

    /// Login account for this person
    #[sea_orm(has_one = "super::user::Entity")]
    User,
}

impl Related<super::person_type_person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleGrants.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
