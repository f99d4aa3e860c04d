//! Identity reset for cloned entities.
//!
//! A store write of an entity without an id allocates a new row, so clearing
//! the id is all it takes to turn an update into a create.

use uuid::Uuid;

use crate::domain::{Action, Application, Datasource, Page, Policy, Workspace};

/// Entities that carry a store identity and access policies.
pub trait Identity {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: Option<String>);
    fn policies_mut(&mut self) -> &mut Vec<Policy>;
}

macro_rules! impl_identity {
    ($($entity:ty),* $(,)?) => {
        $(
            impl Identity for $entity {
                fn id(&self) -> Option<&str> {
                    self.id.as_deref()
                }

                fn set_id(&mut self, id: Option<String>) {
                    self.id = id;
                }

                fn policies_mut(&mut self) -> &mut Vec<Policy> {
                    &mut self.policies
                }
            }
        )*
    };
}

impl_identity!(Workspace, Application, Page, Action, Datasource);

/// Clears the id and policies so the next write creates a new entity.
pub fn make_pristine<T: Identity + ?Sized>(entity: &mut T) {
    entity.set_id(None);
    entity.policies_mut().clear();
}

/// Generates a new opaque identity.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_pristine_clears_id_and_policies() {
        let mut page = Page {
            id: Some("page-1".to_string()),
            name: "Home".to_string(),
            application_id: "app-1".to_string(),
            policies: vec![Policy::for_user("read:pages", "a@example.com")],
            ..Default::default()
        };

        make_pristine(&mut page);

        assert_eq!(page.id, None);
        assert!(page.policies.is_empty());
        assert_eq!(page.name, "Home");
        assert_eq!(page.application_id, "app-1");
    }

    #[test]
    fn make_pristine_works_through_trait_objects() {
        let mut datasource = Datasource {
            id: Some("ds-1".to_string()),
            ..Default::default()
        };
        let entity: &mut dyn Identity = &mut datasource;
        make_pristine(entity);
        assert_eq!(datasource.id, None);
    }

    #[test]
    fn fresh_ids_are_unique() {
        assert_ne!(fresh_id(), fresh_id());
    }
}
