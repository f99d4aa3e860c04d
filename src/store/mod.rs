//! Point reads and writes against the durable store.
//!
//! The cloner only talks to persistence through [`CloneStore`]. Writes of an
//! entity without an id create a new row with a fresh id; writes of an entity
//! with an id update that row. Every `find_*` that scopes by owner skips
//! soft-deleted rows.

use async_trait::async_trait;

use crate::domain::{Action, Application, Datasource, Page, User, Workspace};
use crate::errors::StoreResult;

pub mod sea_orm_store;

pub use sea_orm_store::SeaOrmStore;

#[async_trait]
pub trait CloneStore: Send + Sync {
    async fn find_workspace(&self, id: &str) -> StoreResult<Option<Workspace>>;
    async fn save_workspace(&self, workspace: Workspace) -> StoreResult<Workspace>;

    /// Public, non-deleted applications of a workspace
    async fn find_public_applications(&self, workspace_id: &str)
        -> StoreResult<Vec<Application>>;
    async fn find_application(&self, id: &str) -> StoreResult<Option<Application>>;
    async fn save_application(&self, application: Application) -> StoreResult<Application>;

    async fn find_pages_by_application(&self, application_id: &str) -> StoreResult<Vec<Page>>;
    async fn save_page(&self, page: Page) -> StoreResult<Page>;

    async fn find_actions_by_page(&self, page_id: &str) -> StoreResult<Vec<Action>>;
    async fn save_action(&self, action: Action) -> StoreResult<Action>;

    async fn find_datasources_by_workspace(
        &self,
        workspace_id: &str,
    ) -> StoreResult<Vec<Datasource>>;
    async fn save_datasource(&self, datasource: Datasource) -> StoreResult<Datasource>;

    async fn find_user(&self, id: &str) -> StoreResult<Option<User>>;
    async fn save_user(&self, user: User) -> StoreResult<User>;

    async fn find_setting(&self, key: &str) -> StoreResult<Option<String>>;
    async fn save_setting(&self, key: &str, value: &str) -> StoreResult<()>;
}
