use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pages::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Pages::Imagefile).string_len(80).null())
                    .col(ColumnDef::new(Pages::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Pages::Description).string_len(255).not_null())
                    .col(ColumnDef::new(Pages::Status).string_len(16).null())
                    .col(ColumnDef::new(Pages::IsFocus).boolean().not_null().default(false))
                    .col(ColumnDef::new(Pages::IsPinned).boolean().not_null().default(false))
                    .col(ColumnDef::new(Pages::RankFocus).integer().null())
                    .col(ColumnDef::new(Pages::RankPinned).integer().null())
                    .col(
                        ColumnDef::new(Pages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Name).string_len(50).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PageTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PageTags::PageId).integer().not_null())
                    .col(ColumnDef::new(PageTags::TagId).integer().not_null())
                    .primary_key(Index::create().col(PageTags::PageId).col(PageTags::TagId))
                    .foreign_key(
                        ForeignKey::create()
                            .from(PageTags::Table, PageTags::PageId)
                            .to(Pages::Table, Pages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PageTags::Table, PageTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PageTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pages {
    Table,
    Id,
    Name,
    Imagefile,
    Title,
    Description,
    Status,
    IsFocus,
    IsPinned,
    RankFocus,
    RankPinned,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum PageTags {
    Table,
    PageId,
    TagId,
}
