use canvas::Element;

use super::*;

fn sized(id: &str, x: f64, y: f64, w: f64, h: f64) -> Element {
    let mut el = Element::new(id, "rectangle");
    el.x = x;
    el.y = y;
    el.width = Some(w);
    el.height = Some(h);
    el
}

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

#[test]
fn empty_input_produces_no_output() {
    let raster = BlockRasterizer::default();
    assert!(raster.rasterize(&[]).unwrap().is_none());
}

#[test]
fn single_element_renders_padded_png() {
    let raster = BlockRasterizer { padding: 10 };
    let el = sized("a", 50.0, 80.0, 120.0, 40.0);
    let image = raster.rasterize(&[&el]).unwrap().unwrap();
    assert_eq!(image.width, 140);
    assert_eq!(image.height, 60);
    assert_eq!(&image.png[..8], &PNG_MAGIC);
}

#[test]
fn bounds_span_all_elements() {
    let raster = BlockRasterizer { padding: 0 };
    let a = sized("a", 0.0, 0.0, 10.0, 10.0);
    let b = sized("b", 90.0, 40.0, 10.0, 10.0);
    let image = raster.rasterize(&[&a, &b]).unwrap().unwrap();
    assert_eq!(image.width, 100);
    assert_eq!(image.height, 50);
}

#[test]
fn missing_dimensions_use_default_extent() {
    let raster = BlockRasterizer { padding: 0 };
    let mut el = Element::new("a", "freedraw");
    el.x = 0.0;
    el.y = 0.0;
    let image = raster.rasterize(&[&el]).unwrap().unwrap();
    assert_eq!(image.width, 100);
    assert_eq!(image.height, 100);
}

#[test]
fn hex_fill_parses_and_bad_values_fall_back() {
    assert_eq!(parse_hex_color("#ff8000"), Some([0xff, 0x80, 0x00, 0xff]));
    assert_eq!(parse_hex_color("transparent"), None);
    assert_eq!(parse_hex_color("#fff"), None);
}

#[test]
fn oversized_scenes_clamp_to_max_dimension() {
    let raster = BlockRasterizer { padding: 0 };
    let el = sized("a", 0.0, 0.0, 10_000.0, 10.0);
    let image = raster.rasterize(&[&el]).unwrap().unwrap();
    assert_eq!(image.width, 4096);
}
