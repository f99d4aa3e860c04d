use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Policy;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authentication {
    pub auth_type: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// True while `password` holds the at-rest (encrypted) form
    #[serde(default)]
    pub is_encrypted: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceConfiguration {
    pub url: Option<String>,
    pub authentication: Option<Authentication>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Datasource {
    pub id: Option<String>,
    pub name: String,
    /// None for inline datasources that were never attached to a workspace
    pub workspace_id: Option<String>,
    pub plugin_id: Option<String>,
    pub configuration: Option<DatasourceConfiguration>,
    #[serde(default)]
    pub policies: Vec<Policy>,
    #[serde(default)]
    pub deleted: bool,
}

impl Datasource {
    pub fn authentication_mut(&mut self) -> Option<&mut Authentication> {
        self.configuration
            .as_mut()
            .and_then(|configuration| configuration.authentication.as_mut())
    }
}
