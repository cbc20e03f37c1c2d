use super::*;

#[test]
fn unknown_host_fields_round_trip() {
    let json = serde_json::json!({
        "id": "el-1",
        "type": "rectangle",
        "x": 10.0,
        "y": 20.0,
        "width": 100.0,
        "height": 50.0,
        "groupIds": ["g1"],
        "isDeleted": false,
        "version": 3,
        "strokeColor": "#ff0000",
        "roundness": {"type": 3}
    });

    let el: Element = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(el.kind, "rectangle");
    assert_eq!(el.extra["strokeColor"], "#ff0000");

    let back = serde_json::to_value(&el).unwrap();
    assert_eq!(back["roundness"], json["roundness"]);
    assert_eq!(back["type"], "rectangle");
}

#[test]
fn defaults_fill_sparse_host_records() {
    let el: Element = serde_json::from_value(serde_json::json!({
        "id": "el-2", "type": "freedraw", "x": 0.0, "y": 0.0
    }))
    .unwrap();
    assert!(el.group_ids.is_empty());
    assert!(!el.is_deleted);
    assert_eq!(el.version, 1);
    assert_eq!(el.width, None);
}

#[test]
fn has_group_matches_exact_tag() {
    let mut el = Element::new("el-3", "ellipse");
    el.group_ids.push("team-a".into());
    assert!(el.has_group("team-a"));
    assert!(!el.has_group("team"));
}

#[test]
fn image_element_carries_src_and_store_status() {
    let el = Element::image("img-1", 30.0, 40.0, 200.0, 120.0, "https://cdn.test/g.png");
    assert_eq!(el.kind, "image");
    assert_eq!(el.width, Some(200.0));
    assert_eq!(el.extra["src"], "https://cdn.test/g.png");
    assert_eq!(el.extra["status"], "stored");
    assert_eq!(el.extra["mimeType"], "image/png");
    assert!(el.extra["seed"].is_i64());
}
