//! Database migrations for historylink

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_record::Migration),
            Box::new(m20250301_000002_create_impact::Migration),
            Box::new(m20250301_000003_create_link::Migration),
            Box::new(m20250301_000004_create_impact_history::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Record {
    Table,
    Id,
    Title,
    Description,
    Location,
    Significance,
    Url,
    StartDate,
    EndDate,
    Type,
    Status,
}

mod m20250301_000001_create_record {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_record"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Record::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Record::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Record::Title).string_len(255).not_null())
                        .col(ColumnDef::new(Record::Description).string_len(255).not_null())
                        .col(ColumnDef::new(Record::Location).string_len(255))
                        .col(ColumnDef::new(Record::Significance).string_len(255))
                        .col(ColumnDef::new(Record::Url).string_len(255).not_null())
                        .col(ColumnDef::new(Record::StartDate).date_time())
                        .col(ColumnDef::new(Record::EndDate).date_time())
                        .col(ColumnDef::new(Record::Type).small_integer().not_null())
                        .col(ColumnDef::new(Record::Status).small_integer().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_record_start_date")
                        .table(Record::Table)
                        .col(Record::StartDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Record::Table).to_owned())
                .await
        }
    }
}

mod m20250301_000002_create_impact {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_impact"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Impact::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Impact::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Impact::RecordId).uuid().not_null())
                        .col(ColumnDef::new(Impact::Description).string_len(255).not_null())
                        .col(ColumnDef::new(Impact::Value).small_integer().not_null())
                        .col(ColumnDef::new(Impact::Category).small_integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_impact_record")
                                .from(Impact::Table, Impact::RecordId)
                                .to(Record::Table, Record::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_impact_record_id")
                        .table(Impact::Table)
                        .col(Impact::RecordId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Impact::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Impact {
        Table,
        Id,
        RecordId,
        Description,
        Value,
        Category,
    }
}

mod m20250301_000003_create_link {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_link"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Link::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Link::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Link::RecordId).uuid().not_null())
                        .col(ColumnDef::new(Link::RecordId2).uuid().not_null())
                        .col(ColumnDef::new(Link::Strength).small_integer().not_null())
                        .col(ColumnDef::new(Link::PairLow).uuid().not_null())
                        .col(ColumnDef::new(Link::PairHigh).uuid().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_link_record")
                                .from(Link::Table, Link::RecordId)
                                .to(Record::Table, Record::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_link_record2")
                                .from(Link::Table, Link::RecordId2)
                                .to(Record::Table, Record::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // One row per unordered pair, whichever record the link was created from
            manager
                .create_index(
                    Index::create()
                        .name("uq_link_record_pair")
                        .table(Link::Table)
                        .col(Link::PairLow)
                        .col(Link::PairHigh)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_link_record_id")
                        .table(Link::Table)
                        .col(Link::RecordId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_link_record_id2")
                        .table(Link::Table)
                        .col(Link::RecordId2)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Link::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Link {
        Table,
        Id,
        RecordId,
        #[sea_orm(iden = "record_id2")]
        RecordId2,
        Strength,
        PairLow,
        PairHigh,
    }
}

mod m20250301_000004_create_impact_history {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_impact_history"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ImpactHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ImpactHistory::Seq)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ImpactHistory::Id)
                                .uuid()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ImpactHistory::ImpactId).uuid())
                        .col(ColumnDef::new(ImpactHistory::RecordId).uuid())
                        .col(
                            ColumnDef::new(ImpactHistory::Description)
                                .string_len(255)
                                .not_null(),
                        )
                        .col(ColumnDef::new(ImpactHistory::Value).small_integer().not_null())
                        .col(
                            ColumnDef::new(ImpactHistory::Category)
                                .small_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ImpactHistory::Change).string_len(16).not_null())
                        .col(
                            ColumnDef::new(ImpactHistory::ChangedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_impact_history_record_changed")
                        .table(ImpactHistory::Table)
                        .col(ImpactHistory::RecordId)
                        .col(ImpactHistory::ChangedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ImpactHistory::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ImpactHistory {
        Table,
        Seq,
        Id,
        ImpactId,
        RecordId,
        Description,
        Value,
        Category,
        Change,
        ChangedAt,
    }
}
