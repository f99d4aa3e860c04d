use serde::{Deserialize, Serialize};

/// The principal a workspace gets cloned for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<String>,
    pub email: String,
    /// Set once the examples workspace has been cloned for this user.
    pub examples_workspace_id: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            examples_workspace_id: None,
        }
    }

    pub fn has_examples_workspace(&self) -> bool {
        self.examples_workspace_id.is_some()
    }
}
