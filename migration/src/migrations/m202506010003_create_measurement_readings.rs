use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202506010003_create_measurement_readings"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("measurement_readings"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("measurement_id"))
                            .big_integer()
                            .not_null(),
                    )
                    // Preserves the order readings were submitted in.
                    .col(ColumnDef::new(Alias::new("position")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("pollutant")).text().not_null())
                    .col(ColumnDef::new(Alias::new("value")).double().not_null())
                    .col(ColumnDef::new(Alias::new("unit")).text().not_null())
                    .col(
                        ColumnDef::new(Alias::new("averaging_period"))
                            .text()
                            .not_null()
                            .default("2 minutes"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("quality_flag"))
                            .text()
                            .not_null()
                            .default("preliminary"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_readings_measurement")
                            .from(
                                Alias::new("measurement_readings"),
                                Alias::new("measurement_id"),
                            )
                            .to(Alias::new("measurements"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_readings_measurement_id")
                    .table(Alias::new("measurement_readings"))
                    .col(Alias::new("measurement_id"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_readings_pollutant")
                    .table(Alias::new("measurement_readings"))
                    .col(Alias::new("pollutant"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("measurement_readings"))
                    .to_owned(),
            )
            .await
    }
}
