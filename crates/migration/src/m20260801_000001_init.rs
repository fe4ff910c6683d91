//! Initial schema migration - creates all tables from scratch.
//!
//! Complete schema for Resibo:
//!
//! - `business_profile`: singleton row describing the operating business
//! - `receipts`: one row per sale, business fields denormalized at creation
//! - `receipt_items`: line items, cascade-deleted with their receipt
//! - `admins`: admin accounts with argon2 password hashes
//! - `admin_sessions`: live session tokens

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum BusinessProfile {
    Table,
    Id,
    Name,
    Email,
    ContactNumber,
    Location,
    Attendant,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Receipts {
    Table,
    Id,
    ReceiptNumber,
    CreatedAt,
    BusinessName,
    BusinessEmail,
    ContactNumber,
    Location,
    Attendant,
    CustomerName,
    CustomerAddress,
    TotalAmountCents,
    MoneyReceivedCents,
    ChangeAmountCents,
}

#[derive(Iden)]
enum ReceiptItems {
    Table,
    Id,
    ReceiptId,
    Description,
    Quantity,
    PriceCents,
    SubtotalCents,
}

#[derive(Iden)]
enum Admins {
    Table,
    Username,
    PasswordHash,
}

#[derive(Iden)]
enum AdminSessions {
    Table,
    Token,
    Username,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BusinessProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BusinessProfile::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BusinessProfile::Name).string().not_null())
                    .col(ColumnDef::new(BusinessProfile::Email).string())
                    .col(
                        ColumnDef::new(BusinessProfile::ContactNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BusinessProfile::Location)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BusinessProfile::Attendant)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BusinessProfile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BusinessProfile::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Receipts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Receipts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Receipts::ReceiptNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Receipts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Receipts::BusinessName).string().not_null())
                    .col(ColumnDef::new(Receipts::BusinessEmail).string())
                    .col(ColumnDef::new(Receipts::ContactNumber).string().not_null())
                    .col(ColumnDef::new(Receipts::Location).string().not_null())
                    .col(ColumnDef::new(Receipts::Attendant).string().not_null())
                    .col(ColumnDef::new(Receipts::CustomerName).string())
                    .col(ColumnDef::new(Receipts::CustomerAddress).text())
                    .col(
                        ColumnDef::new(Receipts::TotalAmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::MoneyReceivedCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::ChangeAmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_receipts_created_at")
                    .table(Receipts::Table)
                    .col(Receipts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReceiptItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReceiptItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReceiptItems::ReceiptId).string().not_null())
                    .col(
                        ColumnDef::new(ReceiptItems::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReceiptItems::Quantity)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReceiptItems::PriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReceiptItems::SubtotalCents)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receipt_items_receipt")
                            .from(ReceiptItems::Table, ReceiptItems::ReceiptId)
                            .to(Receipts::Table, Receipts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_receipt_items_receipt_id")
                    .table(ReceiptItems::Table)
                    .col(ReceiptItems::ReceiptId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Admins::PasswordHash).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminSessions::Token)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminSessions::Username)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_sessions_admin")
                            .from(AdminSessions::Table, AdminSessions::Username)
                            .to(Admins::Table, Admins::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReceiptItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Receipts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BusinessProfile::Table).to_owned())
            .await?;
        Ok(())
    }
}
