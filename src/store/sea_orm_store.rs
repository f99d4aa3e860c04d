use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::CloneStore;
use crate::database::entities::{
    actions, applications, datasources, pages, system_settings, users, workspaces,
};
use crate::domain::{Action, Application, Datasource, Page, User, Workspace};
use crate::errors::{StoreError, StoreResult};
use crate::identity::fresh_id;

/// [`CloneStore`] backed by a sea-orm connection.
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl CloneStore for SeaOrmStore {
    async fn find_workspace(&self, id: &str) -> StoreResult<Option<Workspace>> {
        let model = workspaces::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(|m| m.into_workspace()).transpose()?)
    }

    async fn save_workspace(&self, mut workspace: Workspace) -> StoreResult<Workspace> {
        match workspace.id.clone() {
            Some(id) => {
                workspaces::ActiveModel::from_workspace(&id, &workspace)?
                    .update(&self.db)
                    .await?;
            }
            None => {
                let id = fresh_id();
                let mut model = workspaces::ActiveModel::from_workspace(&id, &workspace)?;
                model.created_at = Set(Utc::now());
                model.insert(&self.db).await?;
                debug!("Created workspace {} ({})", id, workspace.name);
                workspace.id = Some(id);
            }
        }

        Ok(workspace)
    }

    async fn find_public_applications(
        &self,
        workspace_id: &str,
    ) -> StoreResult<Vec<Application>> {
        let models = applications::Entity::find()
            .filter(applications::Column::WorkspaceId.eq(workspace_id))
            .filter(applications::Column::IsPublic.eq(true))
            .filter(applications::Column::Deleted.eq(false))
            .order_by_asc(applications::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|m| m.into_application().map_err(StoreError::from))
            .collect()
    }

    async fn find_application(&self, id: &str) -> StoreResult<Option<Application>> {
        let model = applications::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(|m| m.into_application()).transpose()?)
    }

    async fn save_application(&self, mut application: Application) -> StoreResult<Application> {
        match application.id.clone() {
            Some(id) => {
                applications::ActiveModel::from_application(&id, &application)?
                    .update(&self.db)
                    .await?;
            }
            None => {
                let id = fresh_id();
                let mut model = applications::ActiveModel::from_application(&id, &application)?;
                model.created_at = Set(Utc::now());
                model.insert(&self.db).await?;
                debug!("Created application {} ({})", id, application.name);
                application.id = Some(id);
            }
        }

        Ok(application)
    }

    async fn find_pages_by_application(&self, application_id: &str) -> StoreResult<Vec<Page>> {
        let models = pages::Entity::find()
            .filter(pages::Column::ApplicationId.eq(application_id))
            .filter(pages::Column::Deleted.eq(false))
            .order_by_asc(pages::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|m| m.into_page().map_err(StoreError::from))
            .collect()
    }

    async fn save_page(&self, mut page: Page) -> StoreResult<Page> {
        match page.id.clone() {
            Some(id) => {
                pages::ActiveModel::from_page(&id, &page)?
                    .update(&self.db)
                    .await?;
            }
            None => {
                let id = fresh_id();
                let mut model = pages::ActiveModel::from_page(&id, &page)?;
                model.created_at = Set(Utc::now());
                model.insert(&self.db).await?;
                debug!("Created page {} ({})", id, page.name);
                page.id = Some(id);
            }
        }

        Ok(page)
    }

    async fn find_actions_by_page(&self, page_id: &str) -> StoreResult<Vec<Action>> {
        let models = actions::Entity::find()
            .filter(actions::Column::PageId.eq(page_id))
            .filter(actions::Column::Deleted.eq(false))
            .order_by_asc(actions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|m| m.into_action().map_err(StoreError::from))
            .collect()
    }

    async fn save_action(&self, mut action: Action) -> StoreResult<Action> {
        match action.id.clone() {
            Some(id) => {
                actions::ActiveModel::from_action(&id, &action)?
                    .update(&self.db)
                    .await?;
            }
            None => {
                let id = fresh_id();
                let mut model = actions::ActiveModel::from_action(&id, &action)?;
                model.created_at = Set(Utc::now());
                model.insert(&self.db).await?;
                debug!("Created action {} ({})", id, action.name);
                action.id = Some(id);
            }
        }

        Ok(action)
    }

    async fn find_datasources_by_workspace(
        &self,
        workspace_id: &str,
    ) -> StoreResult<Vec<Datasource>> {
        let models = datasources::Entity::find()
            .filter(datasources::Column::WorkspaceId.eq(workspace_id))
            .filter(datasources::Column::Deleted.eq(false))
            .order_by_asc(datasources::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|m| m.into_datasource().map_err(StoreError::from))
            .collect()
    }

    async fn save_datasource(&self, mut datasource: Datasource) -> StoreResult<Datasource> {
        let workspace_id = datasource
            .workspace_id
            .clone()
            .ok_or(StoreError::MissingField {
                entity: "datasource",
                field: "workspace_id",
            })?;

        match datasource.id.clone() {
            Some(id) => {
                datasources::ActiveModel::from_datasource(&id, &workspace_id, &datasource)?
                    .update(&self.db)
                    .await?;
            }
            None => {
                let id = fresh_id();
                let mut model =
                    datasources::ActiveModel::from_datasource(&id, &workspace_id, &datasource)?;
                model.created_at = Set(Utc::now());
                model.insert(&self.db).await?;
                debug!("Created datasource {} ({})", id, datasource.name);
                datasource.id = Some(id);
            }
        }

        Ok(datasource)
    }

    async fn find_user(&self, id: &str) -> StoreResult<Option<User>> {
        let model = users::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(User::from))
    }

    async fn save_user(&self, mut user: User) -> StoreResult<User> {
        match user.id.clone() {
            Some(id) => {
                users::ActiveModel::from_user(&id, &user)
                    .update(&self.db)
                    .await?;
            }
            None => {
                let id = fresh_id();
                let mut model = users::ActiveModel::from_user(&id, &user);
                model.created_at = Set(Utc::now());
                model.insert(&self.db).await?;
                user.id = Some(id);
            }
        }

        Ok(user)
    }

    async fn find_setting(&self, key: &str) -> StoreResult<Option<String>> {
        let setting = system_settings::Entity::find()
            .filter(system_settings::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        Ok(setting.map(|s| s.value))
    }

    async fn save_setting(&self, key: &str, value: &str) -> StoreResult<()> {
        let now = Utc::now();
        let existing = system_settings::Entity::find()
            .filter(system_settings::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        match existing {
            Some(setting) => {
                let mut active: system_settings::ActiveModel = setting.into();
                active.value = Set(value.to_string());
                active.updated_at = Set(now);
                active.update(&self.db).await?;
            }
            None => {
                system_settings::ActiveModel {
                    key: Set(key.to_string()),
                    value: Set(value.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?;
            }
        }

        Ok(())
    }
}
