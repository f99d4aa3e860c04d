use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::domain::User;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub examples_workspace_id: Option<String>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: Some(model.id),
            email: model.email,
            examples_workspace_id: model.examples_workspace_id,
        }
    }
}

impl ActiveModel {
    pub fn from_user(id: &str, user: &User) -> Self {
        Self {
            id: Set(id.to_string()),
            email: Set(user.email.clone()),
            examples_workspace_id: Set(user.examples_workspace_id.clone()),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
    }
}
