//! Application, page and action cloning.
//!
//! Applications are cloned concurrently. Pages of one application are written
//! one after another because each write also updates the application's page
//! list; the actions of a written page are cloned while later pages are still
//! being written.

use futures_util::{stream, StreamExt, TryStreamExt};
use tracing::{debug, info};

use super::datasources::DatasourceCloneSet;
use super::rewrite::ActionMapping;
use super::ExamplesWorkspaceCloner;
use crate::domain::{Action, ActionDatasource, Application, DatasourceRef, Page};
use crate::errors::{CloneError, CloneResult};
use crate::identity::{fresh_id, make_pristine};

/// Shared state of one run's graph pipeline.
pub(crate) struct RunContext {
    pub target_workspace_id: String,
    pub datasources: DatasourceCloneSet,
    pub concurrency: usize,
}

/// A page written to the target workspace with the id it had in the template.
struct PersistedPage {
    template_page_id: String,
    page: Page,
}

/// A cloned page and the actions cloned onto it.
#[derive(Debug)]
pub struct ClonedPage {
    pub page: Page,
    pub actions: Vec<ActionMapping>,
}

impl ExamplesWorkspaceCloner {
    pub(crate) async fn clone_application_tree(
        &self,
        application: Application,
        run: &RunContext,
    ) -> CloneResult<Vec<ClonedPage>> {
        let template_application_id = application
            .id
            .clone()
            .ok_or(CloneError::MissingIdentity("application"))?;
        let default_page_id = application.default_page_id().map(str::to_string);

        let cloned_application = self
            .application_pages
            .clone_example_application(application, &run.target_workspace_id)
            .await?;
        let cloned_application_id = cloned_application
            .id
            .ok_or(CloneError::MissingIdentity("application"))?;

        let pages = self
            .store
            .find_pages_by_application(&template_application_id)
            .await?;
        info!(
            "Cloning {} pages of application '{}' ({} -> {})",
            pages.len(),
            cloned_application.name,
            template_application_id,
            cloned_application_id
        );

        let default_page_id = default_page_id.as_deref();
        let cloned_application_id = cloned_application_id.as_str();
        stream::iter(pages)
            .then(move |mut page| {
                let is_default =
                    default_page_id.is_some() && page.id.as_deref() == default_page_id;
                page.application_id = cloned_application_id.to_string();
                self.persist_page(page, is_default)
            })
            .map_ok(move |persisted| self.clone_page_actions(persisted, run))
            .try_buffer_unordered(run.concurrency)
            .try_collect()
            .await
    }

    async fn persist_page(&self, mut page: Page, is_default: bool) -> CloneResult<PersistedPage> {
        let template_page_id = page.id.clone().ok_or(CloneError::MissingIdentity("page"))?;

        make_pristine(&mut page);
        for layout in page.layouts.iter_mut() {
            layout.id = fresh_id();
        }

        let page = self.application_pages.create_page(page).await?;
        if is_default {
            self.application_pages.make_page_default(&page).await?;
        }
        debug!(
            "Cloned page '{}' ({} -> {:?})",
            page.name, template_page_id, page.id
        );

        Ok(PersistedPage {
            template_page_id,
            page,
        })
    }

    async fn clone_page_actions(
        &self,
        persisted: PersistedPage,
        run: &RunContext,
    ) -> CloneResult<ClonedPage> {
        let page_id = persisted
            .page
            .id
            .clone()
            .ok_or(CloneError::MissingIdentity("page"))?;
        let actions = self
            .store
            .find_actions_by_page(&persisted.template_page_id)
            .await?;

        let page_id_ref = page_id.as_str();
        let actions = stream::iter(actions)
            .map(move |action| self.clone_action(action, page_id_ref, run))
            .buffer_unordered(run.concurrency)
            .try_collect()
            .await?;

        Ok(ClonedPage {
            page: persisted.page,
            actions,
        })
    }

    async fn clone_action(
        &self,
        mut action: Action,
        page_id: &str,
        run: &RunContext,
    ) -> CloneResult<ActionMapping> {
        let template_action_id = action
            .id
            .clone()
            .ok_or(CloneError::MissingIdentity("action"))?;
        debug!(
            "Creating clone of action {} ({})",
            action.name, template_action_id
        );

        make_pristine(&mut action);
        action.page_id = page_id.to_string();
        action.workspace_id = run.target_workspace_id.clone();
        action.collection_id = None;
        action.datasource = match action.datasource.take() {
            Some(ActionDatasource::Shared(reference)) => {
                let cloned = run
                    .datasources
                    .resolve(&template_action_id, &reference.id)
                    .await?;
                let cloned_ref =
                    DatasourceRef::of(&cloned).ok_or(CloneError::MissingIdentity("datasource"))?;
                Some(ActionDatasource::Shared(cloned_ref))
            }
            Some(ActionDatasource::Inline(mut inline)) => {
                inline.workspace_id = Some(run.target_workspace_id.clone());
                Some(ActionDatasource::Inline(inline))
            }
            None => None,
        };

        let saved = self.store.save_action(action).await?;
        let cloned_action_id = saved.id.ok_or(CloneError::MissingIdentity("action"))?;
        Ok(ActionMapping {
            template_action_id,
            cloned_action_id,
        })
    }
}
