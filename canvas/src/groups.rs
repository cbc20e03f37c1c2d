//! Group tracker — durable group membership, reconciled against the scene.
//!
//! DESIGN
//! ======
//! Group membership is bookkept twice: once on the elements themselves (the
//! host's `groupIds` tag array) and once here, in a durable map that
//! survives the host forgetting its transient grouping. The durable map is
//! authoritative, and sync is strictly one way: `merge_from_scene` pulls
//! live tags in, nothing ever flows back out implicitly. Removal is never
//! inferred from absence — an element missing from the scene stays in the
//! stored set until an explicit user action drops it — so every read-path
//! operation reconciles by filtering the stored set against elements that
//! are present, live, and still tagged.
//!
//! The tracker serializes to exactly the stored-mapping shape (group id to
//! array of element ids, keys in order); panel expansion state is session-
//! local and skipped.

#[cfg(test)]
#[path = "groups_test.rs"]
mod groups_test;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};
use crate::scene::Scene;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),
}

/// One row of the groups panel listing.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub id: String,
    /// Stored member ids, including ones that no longer resolve.
    pub element_ids: Vec<ElementId>,
    /// How many stored members currently resolve to live, still-tagged
    /// elements.
    pub live_count: usize,
}

/// Durable mapping from group id to member element ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupTracker {
    groups: BTreeMap<String, BTreeSet<ElementId>>,
    /// Panel rows currently expanded. UI session state, not persisted.
    #[serde(skip)]
    expanded: BTreeSet<String>,
}

// =============================================================================
// RECONCILIATION
// =============================================================================

impl GroupTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull live tags into the stored mapping: every live element tagged
    /// with a group id becomes a stored member of that group. Groups with no
    /// live members are preserved as-is (empty groups are legal), and no
    /// membership is removed.
    pub fn merge_from_scene(&mut self, scene: &Scene) {
        for element in scene.live() {
            for group_id in &element.group_ids {
                self.groups
                    .entry(group_id.clone())
                    .or_default()
                    .insert(element.id.clone());
            }
        }
    }

    /// Stored members filtered to elements that are present in the scene,
    /// live, and still tagged with the group id. This is the set every
    /// read-path operation acts on.
    #[must_use]
    pub fn resolve<'a>(&self, scene: &'a Scene, group_id: &str) -> Vec<&'a Element> {
        let Some(member_ids) = self.groups.get(group_id) else {
            return Vec::new();
        };
        member_ids
            .iter()
            .filter_map(|id| scene.get(id))
            .filter(|e| e.has_group(group_id))
            .collect()
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Tag a live element with a group and record the membership. Idempotent:
    /// adding an existing member changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if the id does not resolve to a live
    /// element.
    pub fn add_element(&mut self, scene: &mut Scene, group_id: &str, element_id: &str) -> Result<(), GroupError> {
        let Some(element) = scene.get_mut(element_id) else {
            return Err(GroupError::ElementNotFound(element_id.to_string()));
        };
        if !element.has_group(group_id) {
            element.group_ids.push(group_id.to_string());
            element.version += 1;
        }
        self.groups
            .entry(group_id.to_string())
            .or_default()
            .insert(element_id.to_string());
        Ok(())
    }

    /// Remove one member: drop the stored id, strip the live tag, and drop
    /// the element from the host selection. Idempotent; the group survives
    /// even when it becomes empty.
    pub fn remove_element(&mut self, scene: &mut Scene, group_id: &str, element_id: &str) {
        if let Some(members) = self.groups.get_mut(group_id) {
            members.remove(element_id);
        }
        if let Some(element) = scene.get_mut(element_id) {
            if element.has_group(group_id) {
                element.group_ids.retain(|g| g != group_id);
                element.version += 1;
            }
        }
        scene.deselect(element_id);
    }

    /// Delete a group outright: strip the tag from every live member, remove
    /// the stored entry, clear the panel expansion row, and clear the host
    /// selection.
    pub fn delete_group(&mut self, scene: &mut Scene, group_id: &str) {
        if let Some(members) = self.groups.remove(group_id) {
            for id in &members {
                if let Some(element) = scene.get_mut(id) {
                    if element.has_group(group_id) {
                        element.group_ids.retain(|g| g != group_id);
                        element.version += 1;
                    }
                }
            }
        }
        self.expanded.remove(group_id);
        scene.clear_selection();
    }

    /// Replace the host selection with the live elements currently tagged
    /// with the group id (the "click a group to select it" action). Selects
    /// by live tags, not the stored set, so it matches what the user sees.
    pub fn select_group(&self, scene: &mut Scene, group_id: &str) {
        let ids: Vec<ElementId> = scene.live_tagged(group_id).map(|e| e.id.clone()).collect();
        scene.set_selection(&ids);
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Stored member ids for a group, if the group exists.
    #[must_use]
    pub fn member_ids(&self, group_id: &str) -> Option<&BTreeSet<ElementId>> {
        self.groups.get(group_id)
    }

    /// True when the group has a stored entry (empty counts).
    #[must_use]
    pub fn contains(&self, group_id: &str) -> bool {
        self.groups.contains_key(group_id)
    }

    /// Panel listing: one summary per stored group, ordered by group id.
    #[must_use]
    pub fn summaries(&self, scene: &Scene) -> Vec<GroupSummary> {
        self.groups
            .iter()
            .map(|(id, member_ids)| GroupSummary {
                id: id.clone(),
                element_ids: member_ids.iter().cloned().collect(),
                live_count: self.resolve(scene, id).len(),
            })
            .collect()
    }

    // =========================================================================
    // PANEL EXPANSION
    // =========================================================================

    /// Flip a panel row between expanded and collapsed.
    pub fn toggle_expanded(&mut self, group_id: &str) {
        if !self.expanded.remove(group_id) {
            self.expanded.insert(group_id.to_string());
        }
    }

    #[must_use]
    pub fn is_expanded(&self, group_id: &str) -> bool {
        self.expanded.contains(group_id)
    }
}
