use std::sync::Arc;

use tracing::info;

use crate::domain::User;
use crate::errors::{StoreError, StoreResult};
use crate::store::CloneStore;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn CloneStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn CloneStore>) -> Self {
        Self { store }
    }

    pub async fn create_user(&self, email: &str) -> StoreResult<User> {
        let user = self.store.save_user(User::new(email.trim())).await?;
        info!("Created user {}", user.email);
        Ok(user)
    }

    pub async fn find_user(&self, id: &str) -> StoreResult<Option<User>> {
        self.store.find_user(id).await
    }

    /// Records the cloned workspace on the user, which also marks that no
    /// further clone is needed.
    pub async fn link_examples_workspace(
        &self,
        mut user: User,
        workspace_id: &str,
    ) -> StoreResult<User> {
        if user.id.is_none() {
            return Err(StoreError::MissingField {
                entity: "user",
                field: "id",
            });
        }

        user.examples_workspace_id = Some(workspace_id.to_string());
        self.store.save_user(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;
    use crate::store::SeaOrmStore;

    #[tokio::test]
    async fn test_link_examples_workspace() {
        let store = Arc::new(SeaOrmStore::new(setup_test_db().await));
        let service = UserService::new(store);

        let user = service.create_user("ada@example.com").await.unwrap();
        assert!(!user.has_examples_workspace());
        let id = user.id.clone().unwrap();

        service.link_examples_workspace(user, "ws-9").await.unwrap();

        let reloaded = service.find_user(&id).await.unwrap().unwrap();
        assert_eq!(reloaded.examples_workspace_id.as_deref(), Some("ws-9"));
    }

    #[tokio::test]
    async fn test_unsaved_user_cannot_be_linked() {
        let store = Arc::new(SeaOrmStore::new(setup_test_db().await));
        let service = UserService::new(store);

        let err = service
            .link_examples_workspace(User::new("nobody@example.com"), "ws-1")
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }
}
