use serde::{Deserialize, Serialize};

use super::{Datasource, Policy};

/// Pointer from an action to a workspace-level datasource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceRef {
    pub id: String,
    pub name: String,
}

impl DatasourceRef {
    /// Returns `None` when the datasource has not been persisted yet.
    pub fn of(datasource: &Datasource) -> Option<Self> {
        datasource.id.as_ref().map(|id| Self {
            id: id.clone(),
            name: datasource.name.clone(),
        })
    }
}

/// Where an action gets its datasource from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionDatasource {
    /// Shared datasource owned by the workspace
    Shared(DatasourceRef),
    /// Configuration embedded in the action itself
    Inline(Datasource),
}

impl ActionDatasource {
    pub fn shared_id(&self) -> Option<&str> {
        match self {
            ActionDatasource::Shared(reference) => Some(reference.id.as_str()),
            ActionDatasource::Inline(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: Option<String>,
    pub name: String,
    pub page_id: String,
    pub workspace_id: String,
    pub collection_id: Option<String>,
    pub datasource: Option<ActionDatasource>,
    pub action_configuration: Option<serde_json::Value>,
    #[serde(default)]
    pub policies: Vec<Policy>,
    #[serde(default)]
    pub deleted: bool,
}
