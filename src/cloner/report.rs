use serde::Serialize;

use super::CloneStage;
use crate::domain::{User, Workspace};

/// Which on-load list of a layout a reference was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnLoadList {
    Draft,
    Published,
}

/// A layout reference to an action that was not cloned in the same run.
///
/// The reference is left untouched in the cloned layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReferenceInconsistency {
    pub page_id: String,
    pub layout_id: String,
    pub list: OnLoadList,
    pub action_id: String,
}

/// Counts and findings of a completed run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CloneReport {
    pub template_workspace_id: String,
    pub workspace_id: String,
    pub applications: usize,
    pub pages: usize,
    pub actions: usize,
    pub datasources: usize,
    pub pages_rewritten: usize,
    pub inconsistencies: Vec<ReferenceInconsistency>,
    pub stages: Vec<CloneStage>,
}

impl CloneReport {
    pub(crate) fn new(template_workspace_id: &str, workspace_id: &str) -> Self {
        Self {
            template_workspace_id: template_workspace_id.to_string(),
            workspace_id: workspace_id.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The user already has an examples workspace
    AlreadyLinked,
    /// No template workspace id is configured
    TemplateNotConfigured,
    /// The configured template workspace does not exist
    TemplateNotFound(String),
}

#[derive(Clone, Debug, Serialize)]
pub struct ClonedWorkspace {
    pub workspace: Workspace,
    pub user: User,
    pub report: CloneReport,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CloneOutcome {
    Cloned(Box<ClonedWorkspace>),
    Skipped { reason: SkipReason },
}

impl CloneOutcome {
    pub fn skipped(reason: SkipReason) -> Self {
        CloneOutcome::Skipped { reason }
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        match self {
            CloneOutcome::Cloned(cloned) => Some(&cloned.workspace),
            CloneOutcome::Skipped { .. } => None,
        }
    }

    pub fn report(&self) -> Option<&CloneReport> {
        match self {
            CloneOutcome::Cloned(cloned) => Some(&cloned.report),
            CloneOutcome::Skipped { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            CloneOutcome::Cloned(_) => None,
            CloneOutcome::Skipped { reason } => Some(reason),
        }
    }
}
