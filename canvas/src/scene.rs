//! The scene: every element on the canvas plus the host's view state.
//!
//! DESIGN
//! ======
//! The element array is the host's stacking order and is preserved as-is.
//! View state (camera, selection, theme) is host-owned JSON; the only part
//! this crate touches is `selectedElementIds`, which group selection reads
//! and writes through the helpers below.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::element::{Element, ElementId};

/// The full canvas scene, persisted wholesale on every debounced change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Elements in stacking order.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Host view state. Opaque except for `selectedElementIds`.
    #[serde(rename = "appState", default)]
    pub app_state: Value,
}

impl Scene {
    /// Scene containing the given elements and empty view state.
    #[must_use]
    pub fn with_elements(elements: Vec<Element>) -> Self {
        Self { elements, app_state: Value::Null }
    }

    /// Live (not soft-deleted) element by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id && !e.is_deleted)
    }

    /// Mutable live element by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id && !e.is_deleted)
    }

    /// All live elements in stacking order.
    pub fn live(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| !e.is_deleted)
    }

    /// Live elements currently carrying the given group tag.
    pub fn live_tagged<'a>(&'a self, group_id: &'a str) -> impl Iterator<Item = &'a Element> {
        self.live().filter(move |e| e.has_group(group_id))
    }

    /// Append an element at the top of the stacking order.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Replace the host selection with exactly these element ids.
    pub fn set_selection(&mut self, ids: &[ElementId]) {
        let mut selected = Map::new();
        for id in ids {
            selected.insert(id.clone(), Value::Bool(true));
        }
        self.normalize_app_state();
        if let Some(state) = self.app_state.as_object_mut() {
            state.insert("selectedElementIds".into(), Value::Object(selected));
        }
    }

    /// Clear the host selection entirely.
    pub fn clear_selection(&mut self) {
        self.set_selection(&[]);
    }

    /// Drop one element id from the host selection, leaving the rest.
    pub fn deselect(&mut self, id: &str) {
        if let Some(Value::Object(selected)) =
            self.app_state.as_object_mut().and_then(|s| s.get_mut("selectedElementIds"))
        {
            selected.remove(id);
        }
    }

    /// Currently selected element ids, in host map order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<ElementId> {
        match self.app_state.get("selectedElementIds") {
            Some(Value::Object(selected)) => selected
                .iter()
                .filter(|(_, v)| v.as_bool() == Some(true))
                .map(|(k, _)| k.clone())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Replace non-object view state with an empty object so selection
    /// writes always have somewhere to land.
    fn normalize_app_state(&mut self) {
        if !self.app_state.is_object() {
            self.app_state = Value::Object(Map::new());
        }
    }
}
