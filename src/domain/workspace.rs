use serde::{Deserialize, Serialize};

use super::Policy;

/// Binding of a user to a role inside a workspace
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: Option<String>,
    pub name: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub user_roles: Vec<UserRole>,
    #[serde(default)]
    pub policies: Vec<Policy>,
    #[serde(default)]
    pub deleted: bool,
}

impl Workspace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
