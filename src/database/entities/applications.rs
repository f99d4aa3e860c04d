use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::Application;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub is_public: bool,
    pub deleted: bool,
    #[sea_orm(column_type = "Text")]
    pub pages: String, // JSON array of {id, is_default}
    #[sea_orm(column_type = "Text")]
    pub policies: String,
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
    #[sea_orm(has_many = "super::pages::Entity")]
    Pages,
}

impl Related<super::workspaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workspaces.def()
    }
}

impl Related<super::pages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_application(self) -> Result<Application, serde_json::Error> {
        Ok(Application {
            id: Some(self.id),
            name: self.name,
            workspace_id: self.workspace_id,
            is_public: self.is_public,
            deleted: self.deleted,
            pages: serde_json::from_str(&self.pages)?,
            policies: serde_json::from_str(&self.policies)?,
        })
    }
}

impl ActiveModel {
    pub fn from_application(id: &str, application: &Application) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: Set(id.to_string()),
            workspace_id: Set(application.workspace_id.clone()),
            name: Set(application.name.clone()),
            is_public: Set(application.is_public),
            deleted: Set(application.deleted),
            pages: Set(serde_json::to_string(&application.pages)?),
            policies: Set(serde_json::to_string(&application.policies)?),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        })
    }
}
