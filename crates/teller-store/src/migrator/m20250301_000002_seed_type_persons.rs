//! Seed the role catalog

use sea_orm_migration::prelude::*;
use uuid::Uuid;

use crate::entities::type_person::RoleKind;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(TypePerson::Table)
            .columns([TypePerson::Id, TypePerson::Description]);

        for role in RoleKind::ALL {
            insert.values_panic([Uuid::new_v4().into(), role.as_str().into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let descriptions = RoleKind::ALL.iter().map(|role| role.as_str());

        let delete = Query::delete()
            .from_table(TypePerson::Table)
            .and_where(Expr::col(TypePerson::Description).is_in(descriptions))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}

#[derive(DeriveIden)]
enum TypePerson {
    #[sea_orm(iden = "type_persons")]
    Table,
    Id,
    Description,
}
