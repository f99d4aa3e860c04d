use std::sync::Arc;

use tracing::debug;

use crate::errors::StoreResult;
use crate::store::CloneStore;

/// Settings key holding the id of the workspace new users get a copy of.
pub const TEMPLATE_WORKSPACE_ID_KEY: &str = "template_workspace_id";

#[derive(Clone)]
pub struct ConfigService {
    store: Arc<dyn CloneStore>,
    fallback_template_id: Option<String>,
}

impl ConfigService {
    pub fn new(store: Arc<dyn CloneStore>) -> Self {
        Self {
            store,
            fallback_template_id: None,
        }
    }

    /// Template id used when the settings table has none (usually from the config file).
    pub fn with_fallback_template(mut self, template_id: Option<String>) -> Self {
        self.fallback_template_id = template_id.filter(|id| !id.trim().is_empty());
        self
    }

    pub async fn template_workspace_id(&self) -> StoreResult<Option<String>> {
        let stored = self
            .store
            .find_setting(TEMPLATE_WORKSPACE_ID_KEY)
            .await?
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        if stored.is_none() && self.fallback_template_id.is_some() {
            debug!("No template workspace in settings, using configured fallback");
        }

        Ok(stored.or_else(|| self.fallback_template_id.clone()))
    }

    pub async fn set_template_workspace_id(&self, workspace_id: &str) -> StoreResult<()> {
        self.store
            .save_setting(TEMPLATE_WORKSPACE_ID_KEY, workspace_id)
            .await
    }
}
