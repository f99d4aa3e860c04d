//! Examples workspace cloning.
//!
//! A new user gets a personal copy of a configured template workspace: its
//! public applications with their pages and actions, and every shared
//! datasource of the workspace. Every copied entity gets a fresh identity and
//! the copies are re-linked to each other:
//!
//! 1. The datasource set starts cloning in the background.
//! 2. Applications, pages and actions are cloned concurrently. Actions that
//!    use a shared datasource wait for the set and point at the clone.
//! 3. Once all actions exist, on-load references in the cloned layouts are
//!    rewritten to the cloned action ids.
//! 4. The run waits for the datasource set before it reports success, and the
//!    user is linked to the new workspace.
//!
//! There is no rollback. A failed run leaves what it already wrote and the
//! user stays unlinked.

mod datasources;
mod graph;
mod report;
mod rewrite;
mod stage;

use std::sync::Arc;

use futures_util::{stream, StreamExt, TryStreamExt};
use tracing::{debug, error, info, warn};

pub use datasources::{DatasourceCloneSet, DatasourceRemap};
pub use graph::ClonedPage;
pub use report::{
    CloneOutcome, CloneReport, ClonedWorkspace, OnLoadList, ReferenceInconsistency, SkipReason,
};
pub use rewrite::{rewrite_page_references, ActionMapping, ActionRemap, PageRewrite};
pub use stage::CloneStage;

use graph::RunContext;
use stage::StageTracker;

use crate::domain::User;
use crate::errors::{CloneError, CloneResult};
use crate::identity::make_pristine;
use crate::services::{
    ApplicationPageService, ConfigService, SecretDecryptor, UserService, WorkspaceService,
};
use crate::store::CloneStore;

pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloneOptions {
    /// Upper bound of concurrent writes per fan-out (datasources, applications, actions of a page)
    pub concurrency: usize,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

#[derive(Clone)]
pub struct ExamplesWorkspaceCloner {
    store: Arc<dyn CloneStore>,
    secrets: Arc<dyn SecretDecryptor>,
    config: ConfigService,
    users: UserService,
    workspaces: WorkspaceService,
    application_pages: ApplicationPageService,
    options: CloneOptions,
}

impl ExamplesWorkspaceCloner {
    pub fn new(
        store: Arc<dyn CloneStore>,
        secrets: Arc<dyn SecretDecryptor>,
        config: ConfigService,
    ) -> Self {
        Self {
            users: UserService::new(store.clone()),
            workspaces: WorkspaceService::new(store.clone()),
            application_pages: ApplicationPageService::new(store.clone()),
            store,
            secrets,
            config,
            options: CloneOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CloneOptions) -> Self {
        self.options = CloneOptions {
            concurrency: options.concurrency.max(1),
        };
        self
    }

    /// Gives `user_id` a copy of the configured template workspace unless the
    /// user already has one.
    pub async fn clone_examples_workspace(&self, user_id: &str) -> CloneResult<CloneOutcome> {
        let user = self
            .users
            .find_user(user_id)
            .await?
            .ok_or_else(|| CloneError::UserNotFound(user_id.to_string()))?;

        if user.has_examples_workspace() {
            debug!(
                "User {} already has examples workspace {:?}",
                user.email, user.examples_workspace_id
            );
            return Ok(CloneOutcome::skipped(SkipReason::AlreadyLinked));
        }

        let Some(template_workspace_id) = self.config.template_workspace_id().await? else {
            error!(
                "Template workspace ID not configured. Skipping examples workspace for user {}.",
                user.email
            );
            return Ok(CloneOutcome::skipped(SkipReason::TemplateNotConfigured));
        };

        self.clone_workspace_for_user(&template_workspace_id, user).await
    }

    /// Clones `template_workspace_id` as a new personal workspace of `user`
    /// and links it as the user's examples workspace.
    pub async fn clone_workspace_for_user(
        &self,
        template_workspace_id: &str,
        user: User,
    ) -> CloneResult<CloneOutcome> {
        let mut stages = StageTracker::new();
        info!("Cloning workspace {}", template_workspace_id);

        let template = self
            .store
            .find_workspace(template_workspace_id)
            .await?
            .filter(|workspace| !workspace.deleted);
        let Some(mut workspace) = template else {
            warn!(
                "Template workspace {} not found. Skipping examples workspace for user {}.",
                template_workspace_id, user.email
            );
            stages.advance(CloneStage::Skipped)?;
            return Ok(CloneOutcome::skipped(SkipReason::TemplateNotFound(
                template_workspace_id.to_string(),
            )));
        };
        stages.advance(CloneStage::TemplateResolved)?;

        make_pristine(&mut workspace);
        workspace.user_roles.clear();
        workspace.slug = None;
        let workspace = self.workspaces.create_personal(workspace, &user).await?;
        let workspace_id = workspace
            .id
            .clone()
            .ok_or(CloneError::MissingIdentity("workspace"))?;

        let mut report = CloneReport::new(template_workspace_id, &workspace_id);
        if let Err(err) = self
            .clone_workspace_graph(template_workspace_id, &workspace_id, &mut stages, &mut report)
            .await
        {
            error!(
                "Error cloning examples workspace {} into {} during {:?}: {}",
                template_workspace_id,
                workspace_id,
                stages.current(),
                err
            );
            return Err(err);
        }

        let user = self
            .users
            .link_examples_workspace(user, &workspace_id)
            .await?;
        stages.advance(CloneStage::Done)?;
        report.stages = stages.into_history();

        info!(
            "Cloned workspace {} into {} for {}: {} applications, {} pages, {} actions, {} datasources",
            template_workspace_id,
            workspace_id,
            user.email,
            report.applications,
            report.pages,
            report.actions,
            report.datasources
        );
        Ok(CloneOutcome::Cloned(Box::new(ClonedWorkspace {
            workspace,
            user,
            report,
        })))
    }

    async fn clone_workspace_graph(
        &self,
        from_workspace_id: &str,
        to_workspace_id: &str,
        stages: &mut StageTracker,
        report: &mut CloneReport,
    ) -> CloneResult<()> {
        let concurrency = self.options.concurrency;
        let run = RunContext {
            target_workspace_id: to_workspace_id.to_string(),
            datasources: DatasourceCloneSet::start(
                self.store.clone(),
                self.secrets.clone(),
                from_workspace_id.to_string(),
                to_workspace_id.to_string(),
                concurrency,
            ),
            concurrency,
        };
        stages.advance(CloneStage::DatasourcesInFlight)?;

        let applications: Vec<_> = self
            .store
            .find_public_applications(from_workspace_id)
            .await?
            .into_iter()
            .filter(|application| {
                let visible = application.is_visible();
                if !visible {
                    debug!(
                        "Skipping private or deleted application {:?} ({})",
                        application.id, application.name
                    );
                }
                visible
            })
            .collect();
        report.applications = applications.len();
        stages.advance(CloneStage::GraphStreaming)?;

        let run_ref = &run;
        let cloned_pages: Vec<ClonedPage> = stream::iter(applications)
            .map(move |application| self.clone_application_tree(application, run_ref))
            .buffer_unordered(concurrency)
            .try_collect::<Vec<Vec<ClonedPage>>>()
            .await?
            .into_iter()
            .flatten()
            .collect();

        let remap: ActionRemap = cloned_pages
            .iter()
            .flat_map(|cloned| cloned.actions.iter().cloned())
            .collect();
        report.pages = cloned_pages.len();
        report.actions = remap.len();
        stages.advance(CloneStage::RemapComplete)?;

        for cloned in &cloned_pages {
            let rewrite = rewrite_page_references(&cloned.page, &remap);
            for inconsistency in &rewrite.inconsistencies {
                error!(
                    "Couldn't find cloned action ID for {:?} on-load reference {} in layout {} of page {}",
                    inconsistency.list,
                    inconsistency.action_id,
                    inconsistency.layout_id,
                    inconsistency.page_id
                );
            }
            report.inconsistencies.extend(rewrite.inconsistencies);

            if rewrite.changed {
                self.store.save_page(rewrite.page).await?;
                report.pages_rewritten += 1;
            }
        }
        stages.advance(CloneStage::ReferencesRewritten)?;

        let datasources = run.datasources.completed().await?;
        report.datasources = datasources.len();
        stages.advance(CloneStage::DatasourcesComplete)?;

        Ok(())
    }
}
