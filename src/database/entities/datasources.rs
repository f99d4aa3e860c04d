use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::Datasource;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "datasources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub plugin_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub configuration: Option<String>, // JSON, authentication secrets stored encrypted
    #[sea_orm(column_type = "Text")]
    pub policies: String,
    pub deleted: bool,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workspaces::Entity",
        from = "Column::WorkspaceId",
        to = "super::workspaces::Column::Id"
    )]
    Workspaces,
}

impl Related<super::workspaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workspaces.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_datasource(self) -> Result<Datasource, serde_json::Error> {
        let configuration = self
            .configuration
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Datasource {
            id: Some(self.id),
            name: self.name,
            workspace_id: Some(self.workspace_id),
            plugin_id: self.plugin_id,
            configuration,
            policies: serde_json::from_str(&self.policies)?,
            deleted: self.deleted,
        })
    }
}

impl ActiveModel {
    /// `workspace_id` is required for rows; inline datasources never reach this table.
    pub fn from_datasource(
        id: &str,
        workspace_id: &str,
        datasource: &Datasource,
    ) -> Result<Self, serde_json::Error> {
        let configuration = datasource
            .configuration
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        Ok(Self {
            id: Set(id.to_string()),
            workspace_id: Set(workspace_id.to_string()),
            name: Set(datasource.name.clone()),
            plugin_id: Set(datasource.plugin_id.clone()),
            configuration: Set(configuration),
            policies: Set(serde_json::to_string(&datasource.policies)?),
            deleted: Set(datasource.deleted),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        })
    }
}
