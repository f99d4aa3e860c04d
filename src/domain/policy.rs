use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Access policy attached to a persisted entity.
///
/// A policy grants `permission` to the listed users (by email) and groups.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub permission: String,
    #[serde(default)]
    pub users: BTreeSet<String>,
    #[serde(default)]
    pub groups: BTreeSet<String>,
}

impl Policy {
    pub fn for_user(permission: impl Into<String>, email: impl Into<String>) -> Self {
        let mut users = BTreeSet::new();
        users.insert(email.into());
        Self {
            permission: permission.into(),
            users,
            groups: BTreeSet::new(),
        }
    }
}
