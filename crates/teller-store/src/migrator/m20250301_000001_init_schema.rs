//! Initial schema: persons, role catalog, role grants, users

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // 1. Create type_persons table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(TypePerson::Table)
                    .if_not_exists()
                    .col(uuid(TypePerson::Id).primary_key())
                    .col(
                        string_len(TypePerson::Description, 64)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 2. Create persons table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(uuid(Person::Id).primary_key())
                    .col(string_len(Person::Document, 64).not_null().unique_key())
                    .col(string_len(Person::Fullname, 255).not_null())
                    .col(text(Person::Address).not_null())
                    .col(string_len(Person::Email, 255).not_null())
                    .col(string_len(Person::PhoneNumber, 64).not_null())
                    .col(string_len(Person::TypeDocument, 64).not_null())
                    .col(
                        timestamp_with_time_zone(Person::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Person::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 3. Create person_type_persons junction table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(PersonTypePerson::Table)
                    .if_not_exists()
                    .col(uuid(PersonTypePerson::PersonId).not_null())
                    .col(uuid(PersonTypePerson::TypePersonId).not_null())
                    .col(integer(PersonTypePerson::Position).not_null())
                    .col(
                        timestamp_with_time_zone(PersonTypePerson::GrantedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(PersonTypePerson::PersonId)
                            .col(PersonTypePerson::TypePersonId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_person_type_persons_person_id")
                            .from(PersonTypePerson::Table, PersonTypePerson::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_person_type_persons_type_person_id")
                            .from(PersonTypePerson::Table, PersonTypePerson::TypePersonId)
                            .to(TypePerson::Table, TypePerson::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 4. Create users table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_len(User::Email, 255).not_null().unique_key())
                    .col(string_len(User::Password, 255).not_null())
                    .col(uuid(User::PersonId).not_null().unique_key())
                    .col(boolean(User::Status).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_person_id")
                            .from(User::Table, User::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PersonTypePerson::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Person::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TypePerson::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Person {
    #[sea_orm(iden = "persons")]
    Table,
    Id,
    Document,
    Fullname,
    Address,
    Email,
    PhoneNumber,
    TypeDocument,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TypePerson {
    #[sea_orm(iden = "type_persons")]
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum PersonTypePerson {
    #[sea_orm(iden = "person_type_persons")]
    Table,
    PersonId,
    TypePersonId,
    Position,
    GrantedAt,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    Password,
    PersonId,
    Status,
    CreatedAt,
    UpdatedAt,
}
