//! On-load action reference rewriting.
//!
//! Layouts list the actions to run when a page loads by their ids. Once every
//! action of a run has been cloned, the lists of the cloned pages still point
//! at template actions and are rewritten through the run's [`ActionRemap`].

use std::collections::HashMap;

use super::{OnLoadList, ReferenceInconsistency};
use crate::domain::{Layout, Page, ReferenceGroup};

/// A template action id and the id of its clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionMapping {
    pub template_action_id: String,
    pub cloned_action_id: String,
}

/// Template action id to cloned action id for one run.
#[derive(Clone, Debug, Default)]
pub struct ActionRemap(HashMap<String, String>);

impl ActionRemap {
    pub fn get(&self, template_action_id: &str) -> Option<&str> {
        self.0.get(template_action_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ActionMapping> for ActionRemap {
    fn from_iter<I: IntoIterator<Item = ActionMapping>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|m| (m.template_action_id, m.cloned_action_id))
                .collect(),
        )
    }
}

/// Result of rewriting one page.
#[derive(Debug)]
pub struct PageRewrite {
    pub page: Page,
    /// Whether at least one reference now points somewhere else
    pub changed: bool,
    pub inconsistencies: Vec<ReferenceInconsistency>,
}

/// Rewrites the draft and published on-load lists of every layout of `page`.
///
/// References missing from `remap` are kept as they are and reported.
pub fn rewrite_page_references(page: &Page, remap: &ActionRemap) -> PageRewrite {
    let mut rewriter = LayoutRewriter {
        remap,
        page_id: page.id.as_deref().unwrap_or_default(),
        changed: false,
        inconsistencies: Vec::new(),
    };

    let layouts = page
        .layouts
        .iter()
        .map(|layout| rewriter.rewrite_layout(layout))
        .collect();

    PageRewrite {
        page: Page {
            layouts,
            ..page.clone()
        },
        changed: rewriter.changed,
        inconsistencies: rewriter.inconsistencies,
    }
}

struct LayoutRewriter<'a> {
    remap: &'a ActionRemap,
    page_id: &'a str,
    changed: bool,
    inconsistencies: Vec<ReferenceInconsistency>,
}

impl LayoutRewriter<'_> {
    fn rewrite_layout(&mut self, layout: &Layout) -> Layout {
        Layout {
            id: layout.id.clone(),
            dsl: layout.dsl.clone(),
            layout_on_load_actions: self.rewrite_list(
                &layout.id,
                OnLoadList::Draft,
                &layout.layout_on_load_actions,
            ),
            published_layout_on_load_actions: self.rewrite_list(
                &layout.id,
                OnLoadList::Published,
                &layout.published_layout_on_load_actions,
            ),
        }
    }

    fn rewrite_list(
        &mut self,
        layout_id: &str,
        list: OnLoadList,
        groups: &[ReferenceGroup],
    ) -> Vec<ReferenceGroup> {
        let mut rewritten = Vec::with_capacity(groups.len());
        for group in groups {
            let mut new_group = ReferenceGroup::new();
            for reference in group {
                match self.remap.get(&reference.id) {
                    Some(cloned_id) => {
                        if cloned_id != reference.id {
                            self.changed = true;
                        }
                        new_group.insert(reference.with_id(cloned_id));
                    }
                    None => {
                        self.inconsistencies.push(ReferenceInconsistency {
                            page_id: self.page_id.to_string(),
                            layout_id: layout_id.to_string(),
                            list,
                            action_id: reference.id.clone(),
                        });
                        new_group.insert(reference.clone());
                    }
                }
            }
            rewritten.push(new_group);
        }
        rewritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActionReference;

    fn remap(pairs: &[(&str, &str)]) -> ActionRemap {
        pairs
            .iter()
            .map(|(from, to)| ActionMapping {
                template_action_id: from.to_string(),
                cloned_action_id: to.to_string(),
            })
            .collect()
    }

    fn group(ids: &[&str]) -> ReferenceGroup {
        ids.iter().map(|id| ActionReference::new(*id, format!("name-{id}"))).collect()
    }

    fn page_with(draft: Vec<ReferenceGroup>, published: Vec<ReferenceGroup>) -> Page {
        Page {
            id: Some("page-1".to_string()),
            name: "Home".to_string(),
            application_id: "app-1".to_string(),
            layouts: vec![Layout {
                id: "layout-1".to_string(),
                dsl: Some(serde_json::json!({"widgets": []})),
                layout_on_load_actions: draft,
                published_layout_on_load_actions: published,
            }],
            ..Default::default()
        }
    }

    fn ids(groups: &[ReferenceGroup]) -> Vec<Vec<String>> {
        groups
            .iter()
            .map(|g| g.iter().map(|r| r.id.clone()).collect())
            .collect()
    }

    #[test]
    fn test_rewrites_draft_and_published_lists() {
        let page = page_with(vec![group(&["a1"]), group(&["a2"])], vec![group(&["a1", "a2"])]);
        let result = rewrite_page_references(&page, &remap(&[("a1", "b1"), ("a2", "b2")]));

        assert!(result.changed);
        assert!(result.inconsistencies.is_empty());
        let layout = &result.page.layouts[0];
        assert_eq!(ids(&layout.layout_on_load_actions), vec![vec!["b1"], vec!["b2"]]);
        assert_eq!(ids(&layout.published_layout_on_load_actions), vec![vec!["b1", "b2"]]);
        assert_eq!(layout.dsl, page.layouts[0].dsl);
    }

    #[test]
    fn test_reference_names_are_kept() {
        let page = page_with(vec![group(&["a1"])], vec![]);
        let result = rewrite_page_references(&page, &remap(&[("a1", "b1")]));

        let reference = result.page.layouts[0].layout_on_load_actions[0]
            .iter()
            .next()
            .unwrap();
        assert_eq!(reference.name, "name-a1");
    }

    #[test]
    fn test_dangling_reference_is_kept_and_reported() {
        let page = page_with(vec![group(&["a1", "gone"])], vec![]);
        let result = rewrite_page_references(&page, &remap(&[("a1", "b1")]));

        assert!(result.changed);
        assert_eq!(
            result.inconsistencies,
            vec![ReferenceInconsistency {
                page_id: "page-1".to_string(),
                layout_id: "layout-1".to_string(),
                list: OnLoadList::Draft,
                action_id: "gone".to_string(),
            }]
        );
        assert_eq!(
            ids(&result.page.layouts[0].layout_on_load_actions),
            vec![vec!["b1", "gone"]]
        );
    }

    #[test]
    fn test_only_dangling_references_means_unchanged() {
        let page = page_with(vec![], vec![group(&["gone"])]);
        let result = rewrite_page_references(&page, &ActionRemap::default());

        assert!(!result.changed);
        assert_eq!(result.inconsistencies.len(), 1);
        assert_eq!(result.inconsistencies[0].list, OnLoadList::Published);
        assert_eq!(result.page, page);
    }

    #[test]
    fn test_page_without_references_is_unchanged() {
        let page = page_with(vec![], vec![]);
        let result = rewrite_page_references(&page, &remap(&[("a1", "b1")]));
        assert!(!result.changed);
        assert!(result.inconsistencies.is_empty());
    }
}
