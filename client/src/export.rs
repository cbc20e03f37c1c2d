//! Export pipeline: rasterize a group, upload it, drop the result back in.
//!
//! DESIGN
//! ======
//! Best effort end to end. Every failure edge — empty group, no raster
//! output, presign refusal, upload failure — is logged at warn level and
//! leaves the scene untouched; nothing retries and nothing surfaces to the
//! user. A successful upload whose response carries no public URL is still
//! a success, it just inserts nothing. Only the full path mutates the
//! scene, by appending one new image element placed near the group's first
//! member.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use canvas::{Element, ElementId, GroupTracker, Scene};
use tracing::{info, warn};

use crate::api::PresignApi;
use crate::raster::Rasterizer;

pub const DEFAULT_USER_ID: &str = "anonymous";
const INSERT_OFFSET: f64 = 20.0;
const FALLBACK_EXTENT: f64 = 100.0;
const FALLBACK_SIZE: f64 = 200.0;
const EXPORT_CONTENT_TYPE: &str = "image/png";

/// Runs the export-group sequence against a presign API and a rasterizer.
pub struct ExportPipeline {
    api: Arc<dyn PresignApi>,
    rasterizer: Arc<dyn Rasterizer>,
}

impl ExportPipeline {
    #[must_use]
    pub fn new(api: Arc<dyn PresignApi>, rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self { api, rasterizer }
    }

    /// Export one group as a PNG, upload it, and insert the uploaded image
    /// into the scene. Returns the inserted element's id, or `None` when any
    /// step fell over (or the upload succeeded without a public URL).
    pub async fn export_group(
        &self,
        scene: &mut Scene,
        tracker: &GroupTracker,
        group_id: &str,
        user_id: &str,
    ) -> Option<ElementId> {
        let members = tracker.resolve(scene, group_id);
        if members.is_empty() {
            warn!(group_id, "no elements in group");
            return None;
        }

        // Placement derives from the members; capture it before the borrow
        // on the scene ends.
        let (origin_x, origin_y) = (members[0].x, members[0].y);
        let (width, height) = average_size(&members);

        let image = match self.rasterizer.rasterize(&members) {
            Ok(Some(image)) => image,
            Ok(None) => {
                warn!(group_id, "rasterizer produced no output for group");
                return None;
            }
            Err(e) => {
                warn!(group_id, error = %e, "rasterization failed");
                return None;
            }
        };
        drop(members);

        let file_name = format!("group-{group_id}.png");
        let presigned = match self
            .api
            .create_presigned(&file_name, EXPORT_CONTENT_TYPE, group_id, user_id)
            .await
        {
            Ok(presigned) => presigned,
            Err(e) => {
                warn!(group_id, error = %e, "could not get presigned URL");
                return None;
            }
        };

        if let Err(e) = self.api.upload(&presigned.upload_url, image.png, EXPORT_CONTENT_TYPE).await {
            warn!(group_id, error = %e, "upload failed");
            return None;
        }

        let Some(public_url) = presigned.public_url else {
            info!(group_id, "uploaded group, no public URL returned");
            return None;
        };

        let id = format!("img-{}", epoch_millis());
        let element = Element::image(
            id.clone(),
            origin_x + INSERT_OFFSET,
            origin_y + INSERT_OFFSET,
            width,
            height,
            &public_url,
        );
        scene.push(element);
        info!(group_id, element = %id, "inserted exported group image");
        Some(id)
    }
}

/// Mean member width/height, falling back per member and then overall, the
/// same way the groups panel always has.
fn average_size(members: &[&Element]) -> (f64, f64) {
    #[allow(clippy::cast_precision_loss)]
    let n = members.len() as f64;
    let width: f64 = members.iter().map(|e| e.width.unwrap_or(FALLBACK_EXTENT)).sum::<f64>() / n;
    let height: f64 = members.iter().map(|e| e.height.unwrap_or(FALLBACK_EXTENT)).sum::<f64>() / n;
    (
        if width > 0.0 { width } else { FALLBACK_SIZE },
        if height > 0.0 { height } else { FALLBACK_SIZE },
    )
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
