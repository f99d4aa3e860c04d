use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::Page;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub application_id: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub layouts: String, // JSON array of layouts, including on-load action groups
    #[sea_orm(column_type = "Text")]
    pub policies: String,
    pub deleted: bool,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::applications::Entity",
        from = "Column::ApplicationId",
        to = "super::applications::Column::Id"
    )]
    Applications,
    #[sea_orm(has_many = "super::actions::Entity")]
    Actions,
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::actions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_page(self) -> Result<Page, serde_json::Error> {
        Ok(Page {
            id: Some(self.id),
            name: self.name,
            application_id: self.application_id,
            layouts: serde_json::from_str(&self.layouts)?,
            policies: serde_json::from_str(&self.policies)?,
            deleted: self.deleted,
        })
    }
}

impl ActiveModel {
    pub fn from_page(id: &str, page: &Page) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: Set(id.to_string()),
            application_id: Set(page.application_id.clone()),
            name: Set(page.name.clone()),
            layouts: Set(serde_json::to_string(&page.layouts)?),
            policies: Set(serde_json::to_string(&page.policies)?),
            deleted: Set(page.deleted),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        })
    }
}
