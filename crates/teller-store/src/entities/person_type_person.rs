//! PersonTypePerson entity: ordered role grants per person

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person_type_persons")]
pub struct Model {
    /// Person UUID (composite primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub person_id: Uuid,

    /// Role type UUID (composite primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub type_person_id: Uuid,

    /// Order in which the role was granted, starting at 0
    pub position: i32,

    pub granted_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Person,

    #[sea_orm(
        belongs_to = "super::type_person::Entity",
        from = "Column::TypePersonId",
        to = "super::type_person::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    TypePerson,
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl Related<super::type_person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TypePerson.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
