use std::sync::Arc;

use tracing::debug;

use crate::domain::{Application, ApplicationPage, Page};
use crate::errors::{StoreError, StoreResult};
use crate::identity::make_pristine;
use crate::store::CloneStore;

/// Creates applications and pages and keeps the application's page list in sync.
#[derive(Clone)]
pub struct ApplicationPageService {
    store: Arc<dyn CloneStore>,
}

impl ApplicationPageService {
    pub fn new(store: Arc<dyn CloneStore>) -> Self {
        Self { store }
    }

    /// Creates an empty copy of `application` in `workspace_id`. Pages are
    /// added afterwards through [`create_page`](Self::create_page).
    pub async fn clone_example_application(
        &self,
        mut application: Application,
        workspace_id: &str,
    ) -> StoreResult<Application> {
        make_pristine(&mut application);
        application.workspace_id = workspace_id.to_string();
        application.pages.clear();

        self.store.save_application(application).await
    }

    /// Persists `page` and appends it, non-default, to its application's page list.
    pub async fn create_page(&self, page: Page) -> StoreResult<Page> {
        let mut application = self
            .store
            .find_application(&page.application_id)
            .await?
            .ok_or_else(|| StoreError::not_found("application", page.application_id.clone()))?;

        let page = self.store.save_page(page).await?;
        let page_id = page.id.clone().ok_or(StoreError::MissingField {
            entity: "page",
            field: "id",
        })?;

        application.pages.push(ApplicationPage {
            id: page_id,
            is_default: false,
        });
        self.store.save_application(application).await?;

        Ok(page)
    }

    /// Flags `page` as the default of its application and clears the flag elsewhere.
    pub async fn make_page_default(&self, page: &Page) -> StoreResult<Application> {
        let page_id = page.id.as_deref().ok_or(StoreError::MissingField {
            entity: "page",
            field: "id",
        })?;

        let mut application = self
            .store
            .find_application(&page.application_id)
            .await?
            .ok_or_else(|| StoreError::not_found("application", page.application_id.clone()))?;

        if !application.pages.iter().any(|p| p.id == page_id) {
            return Err(StoreError::not_found("application page", page_id));
        }

        for application_page in application.pages.iter_mut() {
            application_page.is_default = application_page.id == page_id;
        }
        debug!(
            "Page {} is now default of application {}",
            page_id, page.application_id
        );

        self.store.save_application(application).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;
    use crate::domain::Policy;
    use crate::store::SeaOrmStore;

    async fn service_with_app() -> (ApplicationPageService, Arc<SeaOrmStore>, Application) {
        let store = Arc::new(SeaOrmStore::new(setup_test_db().await));
        let service = ApplicationPageService::new(store.clone());
        let application = service
            .clone_example_application(
                Application {
                    id: Some("template-app".to_string()),
                    name: "CRM".to_string(),
                    workspace_id: "template-ws".to_string(),
                    is_public: true,
                    pages: vec![ApplicationPage {
                        id: "template-page".to_string(),
                        is_default: true,
                    }],
                    policies: vec![Policy::for_user("read:applications", "t@example.com")],
                    ..Default::default()
                },
                "target-ws",
            )
            .await
            .unwrap();
        (service, store, application)
    }

    #[tokio::test]
    async fn test_clone_example_application_is_an_empty_shell() {
        let (_, _, application) = service_with_app().await;

        assert_ne!(application.id.as_deref(), Some("template-app"));
        assert_eq!(application.workspace_id, "target-ws");
        assert!(application.pages.is_empty());
        assert!(application.policies.is_empty());
        assert_eq!(application.name, "CRM");
    }

    #[tokio::test]
    async fn test_create_page_and_make_default() {
        let (service, store, application) = service_with_app().await;
        let application_id = application.id.clone().unwrap();

        let first = service
            .create_page(Page {
                name: "One".to_string(),
                application_id: application_id.clone(),
                ..Default::default()
            })
            .await
            .unwrap();
        let second = service
            .create_page(Page {
                name: "Two".to_string(),
                application_id: application_id.clone(),
                ..Default::default()
            })
            .await
            .unwrap();

        let reloaded = store.find_application(&application_id).await.unwrap().unwrap();
        assert_eq!(reloaded.pages.len(), 2);
        assert_eq!(reloaded.default_page_id(), None);

        service.make_page_default(&second).await.unwrap();
        let reloaded = store.find_application(&application_id).await.unwrap().unwrap();
        assert_eq!(reloaded.default_page_id(), second.id.as_deref());
        assert_ne!(reloaded.default_page_id(), first.id.as_deref());
    }

    #[tokio::test]
    async fn test_create_page_for_unknown_application_fails() {
        let (service, _, _) = service_with_app().await;

        let err = service
            .create_page(Page {
                name: "Lost".to_string(),
                application_id: "missing".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
