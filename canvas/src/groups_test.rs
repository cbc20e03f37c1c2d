use super::*;
use crate::element::Element;
use crate::scene::Scene;

fn tagged(id: &str, groups: &[&str]) -> Element {
    let mut el = Element::new(id, "rectangle");
    el.group_ids = groups.iter().map(|g| (*g).to_string()).collect();
    el
}

fn ids(elements: &[&Element]) -> Vec<String> {
    elements.iter().map(|e| e.id.clone()).collect()
}

// =============================================================================
// merge_from_scene
// =============================================================================

#[test]
fn merge_records_every_live_tag() {
    let scene = Scene::with_elements(vec![
        tagged("a", &["g1"]),
        tagged("b", &["g1", "g2"]),
        tagged("c", &[]),
    ]);
    let mut tracker = GroupTracker::new();
    tracker.merge_from_scene(&scene);

    assert_eq!(tracker.member_ids("g1").unwrap().len(), 2);
    assert!(tracker.member_ids("g2").unwrap().contains("b"));
    assert!(!tracker.contains("g3"));
}

#[test]
fn merge_preserves_storage_only_groups() {
    let mut seed_scene = scene_with("a", "orphaned");
    let mut tracker = GroupTracker::new();
    tracker.add_element(&mut seed_scene, "orphaned", "a").unwrap();

    // A later session whose scene never saw the element: the group survives.
    let empty_scene = Scene::default();
    tracker.merge_from_scene(&empty_scene);
    assert!(tracker.contains("orphaned"));
}

#[test]
fn merge_never_removes_membership() {
    let mut tracker = GroupTracker::new();
    let mut scene = Scene::with_elements(vec![tagged("a", &["g1"]), tagged("b", &["g1"])]);
    tracker.merge_from_scene(&scene);

    // Element deleted directly via the host: stored set keeps it.
    scene.elements.retain(|e| e.id != "b");
    tracker.merge_from_scene(&scene);
    assert!(tracker.member_ids("g1").unwrap().contains("b"));
}

fn scene_with(element_id: &str, group: &str) -> Scene {
    Scene::with_elements(vec![tagged(element_id, &[group])])
}

// =============================================================================
// add / remove
// =============================================================================

#[test]
fn add_tags_element_and_records_membership() {
    let mut scene = Scene::with_elements(vec![Element::new("a", "rectangle")]);
    let mut tracker = GroupTracker::new();
    tracker.add_element(&mut scene, "g1", "a").unwrap();

    assert!(scene.get("a").unwrap().has_group("g1"));
    assert!(tracker.member_ids("g1").unwrap().contains("a"));
}

#[test]
fn add_is_idempotent() {
    let mut scene = Scene::with_elements(vec![Element::new("a", "rectangle")]);
    let mut tracker = GroupTracker::new();
    tracker.add_element(&mut scene, "g1", "a").unwrap();
    let version_after_first = scene.get("a").unwrap().version;
    tracker.add_element(&mut scene, "g1", "a").unwrap();

    assert_eq!(scene.get("a").unwrap().version, version_after_first);
    assert_eq!(scene.get("a").unwrap().group_ids, vec!["g1"]);
    assert_eq!(tracker.member_ids("g1").unwrap().len(), 1);
}

#[test]
fn add_missing_element_errors() {
    let mut scene = Scene::default();
    let mut tracker = GroupTracker::new();
    let err = tracker.add_element(&mut scene, "g1", "ghost").unwrap_err();
    assert_eq!(err, GroupError::ElementNotFound("ghost".into()));
}

#[test]
fn add_soft_deleted_element_errors() {
    let mut el = Element::new("a", "rectangle");
    el.is_deleted = true;
    let mut scene = Scene::with_elements(vec![el]);
    let mut tracker = GroupTracker::new();
    assert!(tracker.add_element(&mut scene, "g1", "a").is_err());
}

#[test]
fn remove_strips_tag_and_membership_but_keeps_group() {
    let mut scene = Scene::with_elements(vec![tagged("a", &["g1"])]);
    scene.set_selection(&["a".into()]);
    let mut tracker = GroupTracker::new();
    tracker.merge_from_scene(&scene);

    tracker.remove_element(&mut scene, "g1", "a");

    assert!(!scene.get("a").unwrap().has_group("g1"));
    assert!(tracker.contains("g1"));
    assert!(tracker.member_ids("g1").unwrap().is_empty());
    assert!(scene.selected_ids().is_empty());
}

#[test]
fn remove_of_absent_member_is_noop() {
    let mut scene = Scene::with_elements(vec![Element::new("a", "rectangle")]);
    let mut tracker = GroupTracker::new();
    tracker.remove_element(&mut scene, "g1", "a");
    assert!(!tracker.contains("g1"));
    assert_eq!(scene.get("a").unwrap().version, 1);
}

#[test]
fn adds_minus_removes_equals_stored_set() {
    let mut scene = Scene::with_elements(vec![
        Element::new("a", "rectangle"),
        Element::new("b", "rectangle"),
        Element::new("c", "rectangle"),
    ]);
    let mut tracker = GroupTracker::new();
    for id in ["a", "b", "c", "a"] {
        tracker.add_element(&mut scene, "g1", id).unwrap();
    }
    tracker.remove_element(&mut scene, "g1", "b");
    tracker.remove_element(&mut scene, "g1", "b");

    let members: Vec<&str> = tracker.member_ids("g1").unwrap().iter().map(String::as_str).collect();
    assert_eq!(members, vec!["a", "c"]);
}

// =============================================================================
// delete_group
// =============================================================================

#[test]
fn delete_strips_tags_and_forgets_group() {
    let mut scene = Scene::with_elements(vec![tagged("a", &["g1", "g2"]), tagged("b", &["g1"])]);
    let mut tracker = GroupTracker::new();
    tracker.merge_from_scene(&scene);
    tracker.toggle_expanded("g1");

    tracker.delete_group(&mut scene, "g1");

    assert!(!tracker.contains("g1"));
    assert!(!tracker.is_expanded("g1"));
    assert!(!scene.get("a").unwrap().has_group("g1"));
    assert!(scene.get("a").unwrap().has_group("g2"));
    assert!(!scene.get("b").unwrap().has_group("g1"));
    assert!(tracker.member_ids("g1").is_none());
}

#[test]
fn delete_of_unknown_group_is_noop() {
    let mut scene = Scene::with_elements(vec![tagged("a", &["g1"])]);
    let mut tracker = GroupTracker::new();
    tracker.delete_group(&mut scene, "nope");
    assert!(scene.get("a").unwrap().has_group("g1"));
}

// =============================================================================
// resolve / summaries / select
// =============================================================================

#[test]
fn resolve_reconciles_against_live_tags() {
    let mut scene = Scene::with_elements(vec![
        tagged("a", &["g1"]),
        tagged("b", &["g1"]),
        tagged("c", &["g1"]),
    ]);
    let mut tracker = GroupTracker::new();
    tracker.merge_from_scene(&scene);

    // b deleted via the host, c untagged via the host: both drop out of the
    // resolved view while the stored set still holds all three.
    if let Some(el) = scene.get_mut("b") {
        el.is_deleted = true;
    }
    if let Some(el) = scene.get_mut("c") {
        el.group_ids.clear();
    }

    assert_eq!(ids(&tracker.resolve(&scene, "g1")), vec!["a"]);
    assert_eq!(tracker.member_ids("g1").unwrap().len(), 3);
}

#[test]
fn resolve_unknown_group_is_empty() {
    let scene = Scene::default();
    let tracker = GroupTracker::new();
    assert!(tracker.resolve(&scene, "missing").is_empty());
}

#[test]
fn summaries_are_ordered_and_count_live_members() {
    let mut scene = Scene::with_elements(vec![tagged("a", &["zeta"]), tagged("b", &["alpha"])]);
    let mut tracker = GroupTracker::new();
    tracker.merge_from_scene(&scene);
    if let Some(el) = scene.get_mut("a") {
        el.is_deleted = true;
    }

    let summaries = tracker.summaries(&scene);
    let names: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
    assert_eq!(summaries[0].live_count, 1);
    assert_eq!(summaries[1].live_count, 0);
    assert_eq!(summaries[1].element_ids, vec!["a"]);
}

#[test]
fn select_group_selects_live_tagged_elements() {
    let mut scene = Scene::with_elements(vec![
        tagged("a", &["g1"]),
        tagged("b", &[]),
        tagged("c", &["g1"]),
    ]);
    let tracker = GroupTracker::new();
    tracker.select_group(&mut scene, "g1");

    let mut selected = scene.selected_ids();
    selected.sort();
    assert_eq!(selected, vec!["a".to_string(), "c".to_string()]);
}

// =============================================================================
// serialization
// =============================================================================

#[test]
fn serializes_to_plain_mapping_with_ordered_keys() {
    let scene = Scene::with_elements(vec![tagged("x", &["beta", "alpha"])]);
    let mut tracker = GroupTracker::new();
    tracker.merge_from_scene(&scene);
    tracker.toggle_expanded("beta");

    let json = serde_json::to_string(&tracker).unwrap();
    assert_eq!(json, r#"{"alpha":["x"],"beta":["x"]}"#);

    let restored: GroupTracker = serde_json::from_str(&json).unwrap();
    assert!(restored.contains("alpha"));
    // Expansion state is session-local and never persisted.
    assert!(!restored.is_expanded("beta"));
}
