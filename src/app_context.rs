use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::cloner::ExamplesWorkspaceCloner;
use crate::config::AppConfig;
use crate::services::{Base64SecretCodec, ConfigService, UserService};
use crate::store::{CloneStore, SeaOrmStore};

/// Shared application context wiring the store and services for the CLI.
#[derive(Clone)]
pub struct AppContext {
    db: DatabaseConnection,
    store: Arc<dyn CloneStore>,
    codec: Base64SecretCodec,
    config_service: ConfigService,
    user_service: UserService,
    cloner: ExamplesWorkspaceCloner,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        let store: Arc<dyn CloneStore> = Arc::new(SeaOrmStore::new(db.clone()));
        let codec = Base64SecretCodec;
        let config_service = ConfigService::new(store.clone())
            .with_fallback_template(config.clone.template_workspace_id.clone());
        let user_service = UserService::new(store.clone());
        let cloner =
            ExamplesWorkspaceCloner::new(store.clone(), Arc::new(codec), config_service.clone())
                .with_options(config.clone_options());

        Self {
            db,
            store,
            codec,
            config_service,
            user_service,
            cloner,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn store(&self) -> Arc<dyn CloneStore> {
        self.store.clone()
    }

    pub fn codec(&self) -> &Base64SecretCodec {
        &self.codec
    }

    pub fn config_service(&self) -> &ConfigService {
        &self.config_service
    }

    pub fn user_service(&self) -> &UserService {
        &self.user_service
    }

    pub fn cloner(&self) -> &ExamplesWorkspaceCloner {
        &self.cloner
    }
}
