use serde::Serialize;
use tracing::debug;

use crate::errors::{CloneError, CloneResult};

/// Lifecycle of a single clone run.
///
/// ```text
/// NotStarted -> TemplateResolved -> DatasourcesInFlight -> GraphStreaming
///            -> RemapComplete -> ReferencesRewritten -> DatasourcesComplete -> Done
/// NotStarted -> Skipped
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloneStage {
    NotStarted,
    TemplateResolved,
    DatasourcesInFlight,
    GraphStreaming,
    RemapComplete,
    ReferencesRewritten,
    DatasourcesComplete,
    Done,
    Skipped,
}

impl CloneStage {
    pub fn can_advance_to(self, next: CloneStage) -> bool {
        use CloneStage::*;
        matches!(
            (self, next),
            (NotStarted, TemplateResolved)
                | (NotStarted, Skipped)
                | (TemplateResolved, DatasourcesInFlight)
                | (DatasourcesInFlight, GraphStreaming)
                | (GraphStreaming, RemapComplete)
                | (RemapComplete, ReferencesRewritten)
                | (ReferencesRewritten, DatasourcesComplete)
                | (DatasourcesComplete, Done)
        )
    }
}

/// Records the stages a run passes through and rejects out-of-order moves.
#[derive(Debug)]
pub(crate) struct StageTracker {
    current: CloneStage,
    history: Vec<CloneStage>,
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            current: CloneStage::NotStarted,
            history: vec![CloneStage::NotStarted],
        }
    }

    pub fn current(&self) -> CloneStage {
        self.current
    }

    pub fn advance(&mut self, next: CloneStage) -> CloneResult<()> {
        if !self.current.can_advance_to(next) {
            return Err(CloneError::InvalidTransition {
                from: self.current,
                to: next,
            });
        }
        debug!("Clone stage {:?} -> {:?}", self.current, next);
        self.current = next;
        self.history.push(next);
        Ok(())
    }

    pub fn into_history(self) -> Vec<CloneStage> {
        self.history
    }
}
