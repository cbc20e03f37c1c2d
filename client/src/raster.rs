//! Rasterizer seam and the built-in block renderer.
//!
//! DESIGN
//! ======
//! Export-to-image is a capability of the canvas host; headless builds get
//! [`BlockRasterizer`], which draws each element's bounding box as a flat
//! block on a white background. `Ok(None)` models "the renderer produced no
//! output" — an empty or degenerate selection — and the export pipeline
//! treats it as a silent failure, the same as the host returning no blob.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use canvas::Element;

const DEFAULT_EXTENT: f64 = 100.0;
const MAX_DIMENSION: u32 = 4096;
const BACKGROUND: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const OUTLINE: [u8; 4] = [0x00, 0x00, 0x00, 0xff];
const DEFAULT_FILL: [u8; 4] = [0xd9, 0x4b, 0x4b, 0xff];

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("png encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// An encoded PNG plus its pixel dimensions.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Renders a set of elements to a PNG. `Ok(None)` means no output.
pub trait Rasterizer: Send + Sync {
    /// # Errors
    ///
    /// Returns `RasterError` if encoding fails.
    fn rasterize(&self, elements: &[&Element]) -> Result<Option<RasterImage>, RasterError>;
}

// =============================================================================
// BLOCK RENDERER
// =============================================================================

/// Flat-block renderer: one filled, outlined rectangle per element, scene
/// units mapped 1:1 to pixels, fixed padding around the joint bounds.
pub struct BlockRasterizer {
    pub padding: u32,
}

impl Default for BlockRasterizer {
    fn default() -> Self {
        Self { padding: 10 }
    }
}

impl Rasterizer for BlockRasterizer {
    fn rasterize(&self, elements: &[&Element]) -> Result<Option<RasterImage>, RasterError> {
        let Some(bounds) = joint_bounds(elements) else {
            return Ok(None);
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let content_w = (bounds.max_x - bounds.min_x).ceil() as u32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let content_h = (bounds.max_y - bounds.min_y).ceil() as u32;
        if content_w == 0 || content_h == 0 {
            return Ok(None);
        }

        let width = (content_w + 2 * self.padding).min(MAX_DIMENSION);
        let height = (content_h + 2 * self.padding).min(MAX_DIMENSION);
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        for px in pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&BACKGROUND);
        }

        for element in elements {
            let (x, y, w, h) = extent(element);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let left = ((x - bounds.min_x).max(0.0) as u32).saturating_add(self.padding);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let top = ((y - bounds.min_y).max(0.0) as u32).saturating_add(self.padding);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let right = (left + w.ceil() as u32).min(width);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let bottom = (top + h.ceil() as u32).min(height);

            let fill = fill_color(element);
            for py in top.min(height)..bottom {
                for px in left.min(width)..right {
                    let on_edge = py == top || py + 1 == bottom || px == left || px + 1 == right;
                    let color = if on_edge { OUTLINE } else { fill };
                    let idx = (py as usize * width as usize + px as usize) * 4;
                    pixels[idx..idx + 4].copy_from_slice(&color);
                }
            }
        }

        let png = encode_png(width, height, &pixels)?;
        Ok(Some(RasterImage { width, height, png }))
    }
}

struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

fn extent(element: &Element) -> (f64, f64, f64, f64) {
    (
        element.x,
        element.y,
        element.width.filter(|w| *w > 0.0).unwrap_or(DEFAULT_EXTENT),
        element.height.filter(|h| *h > 0.0).unwrap_or(DEFAULT_EXTENT),
    )
}

fn joint_bounds(elements: &[&Element]) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for element in elements {
        let (x, y, w, h) = extent(element);
        let b = bounds.get_or_insert(Bounds { min_x: x, min_y: y, max_x: x + w, max_y: y + h });
        b.min_x = b.min_x.min(x);
        b.min_y = b.min_y.min(y);
        b.max_x = b.max_x.max(x + w);
        b.max_y = b.max_y.max(y + h);
    }
    bounds
}

fn fill_color(element: &Element) -> [u8; 4] {
    element
        .extra
        .get("backgroundColor")
        .and_then(|v| v.as_str())
        .and_then(parse_hex_color)
        .unwrap_or(DEFAULT_FILL)
}

/// `#rrggbb` only; anything else falls back to the default fill.
fn parse_hex_color(raw: &str) -> Option<[u8; 4]> {
    let hex = raw.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b, 0xff])
}

fn encode_png(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>, RasterError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixels)?;
    }
    Ok(out)
}
