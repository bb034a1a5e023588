//! Create `character` table.
//!
//! `character_value` is stored but always written by the service layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Character::Table)
                    .if_not_exists()
                    .col(string_len(Character::Id, 64).primary_key())
                    .col(string_len(Character::Name, 128).not_null())
                    .col(big_integer(Character::CharacterCode).not_null())
                    .col(big_integer(Character::CharacterPower).not_null())
                    .col(big_integer(Character::CharacterValue).not_null())
                    .col(timestamp_with_time_zone(Character::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Character::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Character::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Character {
    Table,
    Id,
    Name,
    CharacterCode,
    CharacterPower,
    CharacterValue,
    CreatedAt,
    UpdatedAt,
}
