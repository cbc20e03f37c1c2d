//! Canvas element records.
//!
//! Elements are owned by the canvas host; this model pins down only the
//! fields the group tracker and export pipeline read or write. Everything
//! else the host puts on an element round-trips untouched through the
//! flattened `extra` map, so loading and re-saving a scene never drops host
//! data this crate has no opinion about.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unique identifier for a canvas element. Opaque; assigned by the host.
pub type ElementId = String;

/// A canvas element as stored in the scene and on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Host element type (`rectangle`, `ellipse`, `image`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Left edge of the bounding box in scene coordinates.
    pub x: f64,
    /// Top edge of the bounding box in scene coordinates.
    pub y: f64,
    /// Width of the bounding box. Absent for point-like elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height of the bounding box. Absent for point-like elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Group tags assigned by the user. An element may belong to several
    /// groups at once.
    #[serde(rename = "groupIds", default)]
    pub group_ids: Vec<String>,
    /// Host soft-delete flag. Deleted elements stay in the scene array but
    /// are invisible to every operation here.
    #[serde(rename = "isDeleted", default)]
    pub is_deleted: bool,
    /// Monotonically increasing edit counter.
    #[serde(default = "default_version")]
    pub version: i64,
    /// Host fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_version() -> i64 {
    1
}

impl Element {
    /// Minimal element with the given id and kind at the origin.
    #[must_use]
    pub fn new(id: impl Into<ElementId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            x: 0.0,
            y: 0.0,
            width: None,
            height: None,
            group_ids: Vec::new(),
            is_deleted: false,
            version: 1,
            extra: serde_json::Map::new(),
        }
    }

    /// True when the element carries the given group tag.
    #[must_use]
    pub fn has_group(&self, group_id: &str) -> bool {
        self.group_ids.iter().any(|g| g == group_id)
    }

    /// New image element pointing at an uploaded object. Carries a fresh
    /// random seed and version nonce so the host treats it as brand new.
    #[must_use]
    pub fn image(id: impl Into<ElementId>, x: f64, y: f64, width: f64, height: f64, src: &str) -> Self {
        let mut rng = rand::rng();
        let mut extra = serde_json::Map::new();
        extra.insert("angle".into(), 0.into());
        extra.insert("backgroundColor".into(), "transparent".into());
        extra.insert("strokeColor".into(), "#000000".into());
        extra.insert("strokeWidth".into(), 1.into());
        extra.insert("seed".into(), rng.random_range(0..100_000_i64).into());
        extra.insert("versionNonce".into(), rng.random_range(0..1_000_000_i64).into());
        extra.insert("opacity".into(), 100.into());
        extra.insert("status".into(), "stored".into());
        extra.insert("mimeType".into(), "image/png".into());
        extra.insert("src".into(), src.into());

        Self {
            id: id.into(),
            kind: "image".into(),
            x,
            y,
            width: Some(width),
            height: Some(height),
            group_ids: Vec::new(),
            is_deleted: false,
            version: 1,
            extra,
        }
    }
}
