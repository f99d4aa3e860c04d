use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::Workspace;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workspaces")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub user_roles: String, // JSON array
    #[sea_orm(column_type = "Text")]
    pub policies: String, // JSON array
    pub deleted: bool,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
    #[sea_orm(has_many = "super::datasources::Entity")]
    Datasources,
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::datasources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Datasources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_workspace(self) -> Result<Workspace, serde_json::Error> {
        Ok(Workspace {
            id: Some(self.id),
            name: self.name,
            slug: self.slug,
            user_roles: serde_json::from_str(&self.user_roles)?,
            policies: serde_json::from_str(&self.policies)?,
            deleted: self.deleted,
        })
    }
}

impl ActiveModel {
    /// Every column except `created_at`, which only inserts set.
    pub fn from_workspace(id: &str, workspace: &Workspace) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: Set(id.to_string()),
            name: Set(workspace.name.clone()),
            slug: Set(workspace.slug.clone()),
            user_roles: Set(serde_json::to_string(&workspace.user_roles)?),
            policies: Set(serde_json::to_string(&workspace.policies)?),
            deleted: Set(workspace.deleted),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        })
    }
}
