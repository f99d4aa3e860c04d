use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{Policy, User, UserRole, Workspace};
use crate::errors::{StoreError, StoreResult};
use crate::store::CloneStore;

pub const OWNER_ROLE: &str = "Administrator";

const OWNER_PERMISSIONS: &[&str] = &[
    "manage:workspaces",
    "read:workspaces",
    "manage:workspaceApplications",
    "manage:workspaceDatasources",
];

#[derive(Clone)]
pub struct WorkspaceService {
    store: Arc<dyn CloneStore>,
}

impl WorkspaceService {
    pub fn new(store: Arc<dyn CloneStore>) -> Self {
        Self { store }
    }

    /// Creates `workspace` as a personal workspace of `user`: the user becomes
    /// its only member, gets owner policies, and a new slug is generated.
    pub async fn create_personal(
        &self,
        mut workspace: Workspace,
        user: &User,
    ) -> StoreResult<Workspace> {
        let user_id = user.id.clone().ok_or(StoreError::MissingField {
            entity: "user",
            field: "id",
        })?;

        workspace.slug = Some(Self::generate_slug(&workspace.name));
        workspace.user_roles = vec![UserRole {
            user_id,
            email: user.email.clone(),
            role: OWNER_ROLE.to_string(),
        }];
        workspace.policies = OWNER_PERMISSIONS
            .iter()
            .map(|permission| Policy::for_user(*permission, user.email.clone()))
            .collect();

        let workspace = self.store.save_workspace(workspace).await?;
        info!(
            "Created personal workspace '{}' for {}",
            workspace.name, user.email
        );
        Ok(workspace)
    }

    fn generate_slug(name: &str) -> String {
        let mut slug = String::with_capacity(name.len());
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let slug = slug.trim_matches('-');

        let uuid = Uuid::new_v4().simple().to_string();
        let suffix: String = uuid.chars().take(8).collect();
        if slug.is_empty() {
            format!("workspace-{}", suffix)
        } else {
            format!("{}-{}", slug, suffix)
        }
    }
}
