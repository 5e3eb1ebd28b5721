//! Initial schema migration - creates all tables from scratch.
//!
//! Five independent document-style tables:
//!
//! - `shops`: merchant accounts, carrying the JSON ownership lists for their
//!   change and credit records
//! - `admins`: operator accounts with a power level
//! - `credits`: one debtor's ledger (products and payments as JSON history)
//! - `changes`: loose change held for a customer
//! - `homes`: home-page content documents
//!
//! Child rows are deliberately not FK-constrained to their shop: ownership
//! lives in the shop's reference lists and is checked by the engine.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Shops {
    Table,
    Id,
    Name,
    Email,
    ShopType,
    Description,
    CreatedAt,
    PhoneNumber,
    City,
    Password,
    ChangeRefs,
    CreditRefs,
}

#[derive(Iden)]
enum Admins {
    Table,
    Id,
    Username,
    Email,
    Password,
    Power,
}

#[derive(Iden)]
enum Credits {
    Table,
    Id,
    NameOfCollector,
    GenderOfCollector,
    Products,
    AmountPaid,
    InitialPay,
    CreatedAt,
    Completed,
}

#[derive(Iden)]
enum Changes {
    Table,
    Id,
    NameOfCollector,
    GenderOfCollector,
    Amount,
    DateIn,
    DateOut,
    Collected,
}

#[derive(Iden)]
enum Homes {
    Table,
    Id,
    Title,
    Description1,
    Description2,
    ImageLink,
    IsPublished,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Shops
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Shops::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Shops::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Shops::Name).string().not_null())
                    .col(ColumnDef::new(Shops::Email).string().not_null())
                    .col(ColumnDef::new(Shops::ShopType).string().not_null())
                    .col(ColumnDef::new(Shops::Description).string().not_null())
                    .col(ColumnDef::new(Shops::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Shops::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Shops::City).string().not_null())
                    .col(ColumnDef::new(Shops::Password).string().not_null())
                    .col(ColumnDef::new(Shops::ChangeRefs).json().not_null())
                    .col(ColumnDef::new(Shops::CreditRefs).json().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-shops-email-unique")
                    .table(Shops::Table)
                    .col(Shops::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Admins
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Admins::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Admins::Username).string().not_null())
                    .col(ColumnDef::new(Admins::Email).string().not_null())
                    .col(ColumnDef::new(Admins::Password).string().not_null())
                    .col(ColumnDef::new(Admins::Power).small_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-admins-email-unique")
                    .table(Admins::Table)
                    .col(Admins::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Credits
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Credits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Credits::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Credits::NameOfCollector).string().not_null())
                    .col(
                        ColumnDef::new(Credits::GenderOfCollector)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Credits::Products).json().not_null())
                    .col(ColumnDef::new(Credits::AmountPaid).json().not_null())
                    .col(ColumnDef::new(Credits::InitialPay).big_integer().not_null())
                    .col(ColumnDef::new(Credits::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Credits::Completed).boolean().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Changes
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Changes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Changes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Changes::NameOfCollector).string().not_null())
                    .col(
                        ColumnDef::new(Changes::GenderOfCollector)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Changes::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Changes::DateIn).timestamp().not_null())
                    .col(ColumnDef::new(Changes::DateOut).timestamp())
                    .col(ColumnDef::new(Changes::Collected).boolean().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Homes
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Homes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Homes::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Homes::Title).string().not_null())
                    .col(ColumnDef::new(Homes::Description1).string().not_null())
                    .col(ColumnDef::new(Homes::Description2).string())
                    .col(ColumnDef::new(Homes::ImageLink).string().not_null())
                    .col(ColumnDef::new(Homes::IsPublished).boolean().not_null())
                    .col(ColumnDef::new(Homes::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-homes-is_published-created_at")
                    .table(Homes::Table)
                    .col(Homes::IsPublished)
                    .col(Homes::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Homes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Changes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Credits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Shops::Table).to_owned())
            .await?;
        Ok(())
    }
}
