use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::Action;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "actions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub page_id: String,
    pub workspace_id: String,
    pub name: String,
    pub collection_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub datasource: Option<String>, // JSON, tagged shared/inline
    #[sea_orm(column_type = "Text")]
    pub action_configuration: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub policies: String,
    pub deleted: bool,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pages::Entity",
        from = "Column::PageId",
        to = "super::pages::Column::Id"
    )]
    Pages,
}

impl Related<super::pages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_action(self) -> Result<Action, serde_json::Error> {
        let datasource = self
            .datasource
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        let action_configuration = self
            .action_configuration
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Action {
            id: Some(self.id),
            name: self.name,
            page_id: self.page_id,
            workspace_id: self.workspace_id,
            collection_id: self.collection_id,
            datasource,
            action_configuration,
            policies: serde_json::from_str(&self.policies)?,
            deleted: self.deleted,
        })
    }
}

impl ActiveModel {
    pub fn from_action(id: &str, action: &Action) -> Result<Self, serde_json::Error> {
        let datasource = action
            .datasource
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let action_configuration = action
            .action_configuration
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        Ok(Self {
            id: Set(id.to_string()),
            page_id: Set(action.page_id.clone()),
            workspace_id: Set(action.workspace_id.clone()),
            name: Set(action.name.clone()),
            collection_id: Set(action.collection_id.clone()),
            datasource: Set(datasource),
            action_configuration: Set(action_configuration),
            policies: Set(serde_json::to_string(&action.policies)?),
            deleted: Set(action.deleted),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        })
    }
}
