use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Policy;

/// Entry in an application's ordered page list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPage {
    pub id: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: Option<String>,
    pub name: String,
    pub workspace_id: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub pages: Vec<ApplicationPage>,
    #[serde(default)]
    pub policies: Vec<Policy>,
}

impl Application {
    /// Id of the first page flagged as default, if any.
    pub fn default_page_id(&self) -> Option<&str> {
        self.pages
            .iter()
            .find(|page| page.is_default)
            .map(|page| page.id.as_str())
    }

    /// Whether the application takes part in example cloning.
    pub fn is_visible(&self) -> bool {
        self.is_public && !self.deleted
    }
}

/// Reference to an action from a layout, by bare identity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionReference {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl ActionReference {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: self.name.clone(),
        }
    }
}

/// Actions executed together when a page loads.
pub type ReferenceGroup = BTreeSet<ActionReference>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub id: String,
    #[serde(default)]
    pub dsl: Option<serde_json::Value>,
    /// Draft on-load actions, one group per execution step
    #[serde(default)]
    pub layout_on_load_actions: Vec<ReferenceGroup>,
    /// Published on-load actions
    #[serde(default)]
    pub published_layout_on_load_actions: Vec<ReferenceGroup>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: Option<String>,
    pub name: String,
    pub application_id: String,
    #[serde(default)]
    pub layouts: Vec<Layout>,
    #[serde(default)]
    pub policies: Vec<Policy>,
    #[serde(default)]
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_ref(id: &str, is_default: bool) -> ApplicationPage {
        ApplicationPage {
            id: id.to_string(),
            is_default,
        }
    }

    #[test]
    fn default_page_is_first_flagged_page() {
        let app = Application {
            pages: vec![page_ref("p1", false), page_ref("p2", true), page_ref("p3", true)],
            ..Default::default()
        };
        assert_eq!(app.default_page_id(), Some("p2"));
    }

    #[test]
    fn no_default_page_when_none_flagged() {
        let app = Application {
            pages: vec![page_ref("p1", false)],
            ..Default::default()
        };
        assert_eq!(app.default_page_id(), None);
    }

    #[test]
    fn deleted_or_private_applications_are_not_visible() {
        let mut app = Application {
            is_public: true,
            ..Default::default()
        };
        assert!(app.is_visible());
        app.deleted = true;
        assert!(!app.is_visible());
        app.deleted = false;
        app.is_public = false;
        assert!(!app.is_visible());
    }
}
