use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Workspaces::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Workspaces::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Workspaces::Name).string().not_null())
                    .col(ColumnDef::new(Workspaces::Slug).string())
                    .col(ColumnDef::new(Workspaces::UserRoles).text().not_null().default("[]"))
                    .col(ColumnDef::new(Workspaces::Policies).text().not_null().default("[]"))
                    .col(ColumnDef::new(Workspaces::Deleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Workspaces::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Workspaces::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Applications::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Applications::WorkspaceId).string().not_null())
                    .col(ColumnDef::new(Applications::Name).string().not_null())
                    .col(ColumnDef::new(Applications::IsPublic).boolean().not_null().default(false))
                    .col(ColumnDef::new(Applications::Deleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Applications::Pages).text().not_null().default("[]"))
                    .col(ColumnDef::new(Applications::Policies).text().not_null().default("[]"))
                    .col(ColumnDef::new(Applications::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Applications::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_workspace_id")
                    .table(Applications::Table)
                    .col(Applications::WorkspaceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pages::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Pages::ApplicationId).string().not_null())
                    .col(ColumnDef::new(Pages::Name).string().not_null())
                    .col(ColumnDef::new(Pages::Layouts).text().not_null().default("[]"))
                    .col(ColumnDef::new(Pages::Policies).text().not_null().default("[]"))
                    .col(ColumnDef::new(Pages::Deleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Pages::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Pages::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pages_application_id")
                    .table(Pages::Table)
                    .col(Pages::ApplicationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Actions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Actions::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Actions::PageId).string().not_null())
                    .col(ColumnDef::new(Actions::WorkspaceId).string().not_null())
                    .col(ColumnDef::new(Actions::Name).string().not_null())
                    .col(ColumnDef::new(Actions::CollectionId).string())
                    .col(ColumnDef::new(Actions::Datasource).text())
                    .col(ColumnDef::new(Actions::ActionConfiguration).text())
                    .col(ColumnDef::new(Actions::Policies).text().not_null().default("[]"))
                    .col(ColumnDef::new(Actions::Deleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Actions::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Actions::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actions_page_id")
                    .table(Actions::Table)
                    .col(Actions::PageId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Datasources::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Datasources::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Datasources::WorkspaceId).string().not_null())
                    .col(ColumnDef::new(Datasources::Name).string().not_null())
                    .col(ColumnDef::new(Datasources::PluginId).string())
                    .col(ColumnDef::new(Datasources::Configuration).text())
                    .col(ColumnDef::new(Datasources::Policies).text().not_null().default("[]"))
                    .col(ColumnDef::new(Datasources::Deleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Datasources::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Datasources::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_datasources_workspace_id")
                    .table(Datasources::Table)
                    .col(Datasources::WorkspaceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::ExamplesWorkspaceId).string())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SystemSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemSettings::Key).string().not_null().unique_key())
                    .col(ColumnDef::new(SystemSettings::Value).text().not_null())
                    .col(ColumnDef::new(SystemSettings::Description).string())
                    .col(ColumnDef::new(SystemSettings::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(SystemSettings::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Datasources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Actions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Workspaces::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Workspaces {
    Table,
    Id,
    Name,
    Slug,
    UserRoles,
    Policies,
    Deleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
    WorkspaceId,
    Name,
    IsPublic,
    Deleted,
    Pages,
    Policies,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Pages {
    Table,
    Id,
    ApplicationId,
    Name,
    Layouts,
    Policies,
    Deleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Actions {
    Table,
    Id,
    PageId,
    WorkspaceId,
    Name,
    CollectionId,
    Datasource,
    ActionConfiguration,
    Policies,
    Deleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Datasources {
    Table,
    Id,
    WorkspaceId,
    Name,
    PluginId,
    Configuration,
    Policies,
    Deleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    ExamplesWorkspaceId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SystemSettings {
    Table,
    Id,
    Key,
    Value,
    Description,
    CreatedAt,
    UpdatedAt,
}
