//! Datasource cloning for a run.
//!
//! All shared datasources of the template workspace are cloned exactly once,
//! in a background task started as soon as the run begins. Actions that point
//! at a shared datasource wait on the same memoized result, so the set is
//! never cloned twice no matter how many actions ask for it.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::{BoxFuture, Shared};
use futures_util::{stream, FutureExt, StreamExt, TryStreamExt};
use tokio::task::AbortHandle;
use tracing::{debug, info};

use crate::domain::Datasource;
use crate::errors::{CloneError, CloneResult};
use crate::identity::make_pristine;
use crate::services::SecretDecryptor;
use crate::store::CloneStore;

/// Template datasource id to its clone in the target workspace.
pub type DatasourceRemap = HashMap<String, Datasource>;

type SharedRemap = Shared<BoxFuture<'static, Result<Arc<DatasourceRemap>, Arc<CloneError>>>>;

/// Handle to the in-flight datasource clone of one run.
///
/// Dropping the handle cancels the background task if it is still running.
pub struct DatasourceCloneSet {
    remap: SharedRemap,
    abort: AbortHandle,
}

impl DatasourceCloneSet {
    /// Starts cloning every datasource of `from_workspace_id` into
    /// `to_workspace_id`, at most `concurrency` at a time.
    pub fn start(
        store: Arc<dyn CloneStore>,
        secrets: Arc<dyn SecretDecryptor>,
        from_workspace_id: String,
        to_workspace_id: String,
        concurrency: usize,
    ) -> Self {
        let handle = tokio::spawn(clone_datasources(
            store,
            secrets,
            from_workspace_id,
            to_workspace_id,
            concurrency,
        ));
        let abort = handle.abort_handle();

        let remap = async move {
            match handle.await {
                Ok(Ok(remap)) => Ok(Arc::new(remap)),
                Ok(Err(err)) => Err(Arc::new(err)),
                Err(join_err) => Err(Arc::new(CloneError::BackgroundTask(join_err.to_string()))),
            }
        }
        .boxed()
        .shared();

        Self { remap, abort }
    }

    /// Waits for the whole set and returns the remap.
    pub async fn completed(&self) -> CloneResult<Arc<DatasourceRemap>> {
        self.remap.clone().await.map_err(CloneError::DatasourceSet)
    }

    /// Returns the clone of template datasource `datasource_id`, referenced by
    /// `action_id`.
    pub async fn resolve(&self, action_id: &str, datasource_id: &str) -> CloneResult<Datasource> {
        let remap = self.completed().await?;
        remap
            .get(datasource_id)
            .cloned()
            .ok_or_else(|| CloneError::UnresolvedDatasource {
                action_id: action_id.to_string(),
                datasource_id: datasource_id.to_string(),
            })
    }
}

impl Drop for DatasourceCloneSet {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

async fn clone_datasources(
    store: Arc<dyn CloneStore>,
    secrets: Arc<dyn SecretDecryptor>,
    from_workspace_id: String,
    to_workspace_id: String,
    concurrency: usize,
) -> CloneResult<DatasourceRemap> {
    let datasources = store.find_datasources_by_workspace(&from_workspace_id).await?;
    info!(
        "Cloning {} datasources from workspace {}",
        datasources.len(),
        from_workspace_id
    );

    stream::iter(datasources)
        .map(|datasource| {
            clone_datasource(
                store.clone(),
                secrets.clone(),
                datasource,
                to_workspace_id.clone(),
            )
        })
        .buffer_unordered(concurrency)
        .try_collect()
        .await
}

async fn clone_datasource(
    store: Arc<dyn CloneStore>,
    secrets: Arc<dyn SecretDecryptor>,
    mut datasource: Datasource,
    to_workspace_id: String,
) -> CloneResult<(String, Datasource)> {
    let template_id = datasource.id.clone().ok_or_else(|| {
        CloneError::InvalidTemplate(format!("datasource '{}' has no id", datasource.name))
    })?;

    make_pristine(&mut datasource);
    datasource.workspace_id = Some(to_workspace_id);
    if let Some(authentication) = datasource.authentication_mut() {
        secrets
            .decrypt_authentication(authentication)
            .map_err(|e| CloneError::Decryption {
                datasource: template_id.clone(),
                reason: e.to_string(),
            })?;
    }

    let cloned = store.save_datasource(datasource).await?;
    debug!(
        "Cloned datasource {} ({} -> {:?})",
        cloned.name, template_id, cloned.id
    );
    Ok((template_id, cloned))
}
