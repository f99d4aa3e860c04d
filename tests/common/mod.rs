//! Shared fixtures for the cloning integration tests

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde_json::json;

use workspace_cloner::cloner::ExamplesWorkspaceCloner;
use workspace_cloner::database::{establish_connection, migrate_database, MigrateDirection};
use workspace_cloner::domain::{
    Action, ActionDatasource, ActionReference, Application, ApplicationPage, Authentication,
    Datasource, DatasourceConfiguration, DatasourceRef, Layout, Page, Policy, ReferenceGroup,
    User, Workspace,
};
use workspace_cloner::errors::StoreResult;
use workspace_cloner::identity::fresh_id;
use workspace_cloner::services::{Base64SecretCodec, ConfigService, UserService};
use workspace_cloner::store::{CloneStore, SeaOrmStore};

pub const SECRET: &str = "hunter2";

/// Create an in-memory database with migrations applied
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = establish_connection("sqlite::memory:").await?;
    migrate_database(&db, MigrateDirection::Up).await?;
    Ok(db)
}

pub struct TestEnv {
    pub db: DatabaseConnection,
    pub store: Arc<dyn CloneStore>,
}

impl TestEnv {
    pub async fn new() -> Result<Self> {
        let db = setup_test_db().await?;
        let store: Arc<dyn CloneStore> = Arc::new(SeaOrmStore::new(db.clone()));
        Ok(Self { db, store })
    }

    pub fn cloner(&self) -> ExamplesWorkspaceCloner {
        cloner_for(self.store.clone())
    }

    pub fn config(&self) -> ConfigService {
        ConfigService::new(self.store.clone())
    }

    pub async fn create_user(&self, email: &str) -> Result<User> {
        Ok(UserService::new(self.store.clone()).create_user(email).await?)
    }
}

pub fn cloner_for(store: Arc<dyn CloneStore>) -> ExamplesWorkspaceCloner {
    ExamplesWorkspaceCloner::new(
        store.clone(),
        Arc::new(Base64SecretCodec),
        ConfigService::new(store),
    )
}

/// Store wrapper that alters what the cloner reads from the template.
pub struct TamperedStore {
    inner: Arc<dyn CloneStore>,
    strip_datasource_ids: bool,
    leaked_applications: Vec<String>,
}

impl TamperedStore {
    pub fn new(inner: Arc<dyn CloneStore>) -> Self {
        Self {
            inner,
            strip_datasource_ids: false,
            leaked_applications: Vec::new(),
        }
    }

    /// Loses the ids of every datasource read
    pub fn strip_datasource_ids(mut self) -> Self {
        self.strip_datasource_ids = true;
        self
    }

    /// Returns application `id` from `find_public_applications` whatever its flags
    pub fn leak_application(mut self, id: &str) -> Self {
        self.leaked_applications.push(id.to_string());
        self
    }
}

#[async_trait]
impl CloneStore for TamperedStore {
    async fn find_workspace(&self, id: &str) -> StoreResult<Option<Workspace>> {
        self.inner.find_workspace(id).await
    }

    async fn save_workspace(&self, workspace: Workspace) -> StoreResult<Workspace> {
        self.inner.save_workspace(workspace).await
    }

    async fn find_public_applications(&self, workspace_id: &str) -> StoreResult<Vec<Application>> {
        let mut applications = self.inner.find_public_applications(workspace_id).await?;
        for id in &self.leaked_applications {
            if let Some(application) = self.inner.find_application(id).await? {
                applications.push(application);
            }
        }
        Ok(applications)
    }

    async fn find_application(&self, id: &str) -> StoreResult<Option<Application>> {
        self.inner.find_application(id).await
    }

    async fn save_application(&self, application: Application) -> StoreResult<Application> {
        self.inner.save_application(application).await
    }

    async fn find_pages_by_application(&self, application_id: &str) -> StoreResult<Vec<Page>> {
        self.inner.find_pages_by_application(application_id).await
    }

    async fn save_page(&self, page: Page) -> StoreResult<Page> {
        self.inner.save_page(page).await
    }

    async fn find_actions_by_page(&self, page_id: &str) -> StoreResult<Vec<Action>> {
        self.inner.find_actions_by_page(page_id).await
    }

    async fn save_action(&self, action: Action) -> StoreResult<Action> {
        self.inner.save_action(action).await
    }

    async fn find_datasources_by_workspace(&self, workspace_id: &str) -> StoreResult<Vec<Datasource>> {
        let mut datasources = self.inner.find_datasources_by_workspace(workspace_id).await?;
        if self.strip_datasource_ids {
            for datasource in datasources.iter_mut() {
                datasource.id = None;
            }
        }
        Ok(datasources)
    }

    async fn save_datasource(&self, datasource: Datasource) -> StoreResult<Datasource> {
        self.inner.save_datasource(datasource).await
    }

    async fn find_user(&self, id: &str) -> StoreResult<Option<User>> {
        self.inner.find_user(id).await
    }

    async fn save_user(&self, user: User) -> StoreResult<User> {
        self.inner.save_user(user).await
    }

    async fn find_setting(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.find_setting(key).await
    }

    async fn save_setting(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.save_setting(key, value).await
    }
}

/// Builds a template graph through the store, keeping the persisted ids.
pub struct TemplateBuilder<'a> {
    store: &'a dyn CloneStore,
    pub workspace_id: String,
}

impl<'a> TemplateBuilder<'a> {
    pub async fn new(store: &'a dyn CloneStore) -> Result<Self> {
        let mut workspace = Workspace::new("Template");
        workspace.slug = Some("template".to_string());
        workspace.policies = vec![Policy::for_user("manage:workspace", "owner@example.com")];
        let workspace = store.save_workspace(workspace).await?;
        let workspace_id = workspace.id.context("workspace id")?;
        Ok(Self {
            store,
            workspace_id,
        })
    }

    pub async fn datasource(&self, name: &str, deleted: bool) -> Result<Datasource> {
        let mut authentication = Authentication {
            auth_type: "basic".to_string(),
            username: Some("app".to_string()),
            password: Some(SECRET.to_string()),
            is_encrypted: false,
        };
        Base64SecretCodec.encrypt_authentication(&mut authentication);

        Ok(self
            .store
            .save_datasource(Datasource {
                id: None,
                name: name.to_string(),
                workspace_id: Some(self.workspace_id.clone()),
                plugin_id: Some("postgres-plugin".to_string()),
                configuration: Some(DatasourceConfiguration {
                    url: Some("postgres://db.example.com/app".to_string()),
                    authentication: Some(authentication),
                    ..Default::default()
                }),
                policies: vec![Policy::for_user("execute:datasource", "owner@example.com")],
                deleted,
            })
            .await?)
    }

    pub async fn application(&self, name: &str, is_public: bool, deleted: bool) -> Result<Application> {
        Ok(self
            .store
            .save_application(Application {
                name: name.to_string(),
                workspace_id: self.workspace_id.clone(),
                is_public,
                deleted,
                policies: vec![Policy::for_user("read:application", "owner@example.com")],
                ..Default::default()
            })
            .await?)
    }

    pub async fn page(&self, application: &Application, name: &str) -> Result<Page> {
        Ok(self
            .store
            .save_page(Page {
                name: name.to_string(),
                application_id: application.id.clone().context("application id")?,
                layouts: vec![Layout {
                    id: fresh_id(),
                    dsl: Some(json!({"widgetName": "MainContainer"})),
                    ..Default::default()
                }],
                policies: vec![Policy::for_user("read:page", "owner@example.com")],
                ..Default::default()
            })
            .await?)
    }

    /// Records the page list of `application`, flagging `default_page` if given
    pub async fn set_pages(
        &self,
        mut application: Application,
        pages: &[&Page],
        default_page: Option<&Page>,
    ) -> Result<Application> {
        application.pages = pages
            .iter()
            .map(|page| ApplicationPage {
                id: page.id.clone().unwrap_or_default(),
                is_default: default_page.map(|d| d.id == page.id).unwrap_or(false),
            })
            .collect();
        Ok(self.store.save_application(application).await?)
    }

    pub async fn shared_action(&self, page: &Page, name: &str, datasource: &Datasource) -> Result<Action> {
        let reference = DatasourceRef::of(datasource).context("datasource id")?;
        self.action(page, name, Some(ActionDatasource::Shared(reference))).await
    }

    pub async fn shared_action_to(&self, page: &Page, name: &str, datasource_id: &str) -> Result<Action> {
        let reference = DatasourceRef {
            id: datasource_id.to_string(),
            name: "missing".to_string(),
        };
        self.action(page, name, Some(ActionDatasource::Shared(reference))).await
    }

    pub async fn action(
        &self,
        page: &Page,
        name: &str,
        datasource: Option<ActionDatasource>,
    ) -> Result<Action> {
        Ok(self
            .store
            .save_action(Action {
                id: None,
                name: name.to_string(),
                page_id: page.id.clone().context("page id")?,
                workspace_id: self.workspace_id.clone(),
                collection_id: Some("collection-1".to_string()),
                datasource,
                action_configuration: Some(json!({"body": format!("run {name}")})),
                policies: vec![Policy::for_user("execute:action", "owner@example.com")],
                deleted: false,
            })
            .await?)
    }

    pub async fn set_on_load(
        &self,
        mut page: Page,
        draft: Vec<ReferenceGroup>,
        published: Vec<ReferenceGroup>,
    ) -> Result<Page> {
        let layout = page.layouts.first_mut().context("page has a layout")?;
        layout.layout_on_load_actions = draft;
        layout.published_layout_on_load_actions = published;
        Ok(self.store.save_page(page).await?)
    }
}

pub fn refs(ids: &[&str]) -> ReferenceGroup {
    ids.iter().map(|id| ActionReference::new(*id, format!("ref-{id}"))).collect()
}

pub fn action_id(action: &Action) -> String {
    action.id.clone().unwrap_or_default()
}

pub fn group_ids(groups: &[ReferenceGroup]) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|group| group.iter().map(|r| r.id.clone()).collect())
        .collect()
}
