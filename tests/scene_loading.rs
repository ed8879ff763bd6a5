use std::fs;
use std::path::PathBuf;

use cage_frame::json_parser::parse_scene_json;
use cage_frame::numeric::{approx_eq_vec, approx_zero, Vector3};
use cage_frame::{CageError, Winding};

fn write_scene(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("cage_frame_tests");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn load_and_cage_scene_file() {
    let path = write_scene("two_objects.json", r#"{
        "CageConfig": { "MarkerRadius": "0.02", "LineColor": "0 0 1" },
        "Objects": [
            { "ModelName": "chair", "BoundingBox": "-0.25 0 -0.25 0.25 0.9 0.25", "Position": "1 0 -1" },
            { "ModelName": "sofa", "BoundsSource": "root",
              "BoundingBox": { "Min": "0 0 0", "Max": "2 0.8 1" }, "Rotation": 90 }
        ]
    }"#);

    let scene_json = parse_scene_json(&path).unwrap();
    let loaded = scene_json.setup();
    assert!(loaded.failed.is_empty());
    assert_eq!(loaded.objects.len(), 2);

    let chair = &loaded.objects[0];
    let cage = chair.cage().unwrap();
    assert_eq!(cage.config().marker_radius, 0.02);
    assert_eq!(cage.config().line_color, Vector3::new(0., 0., 1.));

    let poly = cage.polygon(&loaded.scene).unwrap();
    assert!(approx_eq_vec(&poly.lines()[0].start, &Vector3::new(0.75, 0., -1.25)));
    assert!(approx_eq_vec(&poly.lines()[0].end, &Vector3::new(1.25, 0., -1.25)));
    assert_eq!(poly.winding(), Winding::CounterClockwise);

    // Quarter turn about y: the 2 x 1 footprint becomes 1 x 2, same area and winding
    let sofa_poly = loaded.objects[1].cage().unwrap().polygon(&loaded.scene).unwrap();
    assert!(approx_zero(sofa_poly.signed_area_xz() - 2.));
    assert!(approx_eq_vec(&sofa_poly.lines()[0].end, &Vector3::new(0., 0., -2.)));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("cage_frame_tests").join("does_not_exist.json");
    assert!(matches!(parse_scene_json(&path), Err(CageError::Io { .. })));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let path = write_scene("broken.json", r#"{ "Objects": [ { "ModelName": 3 } ] "#);
    assert!(matches!(parse_scene_json(&path), Err(CageError::Json(_))));
}

#[test]
fn inverted_bounding_box_fails_the_file() {
    let path = write_scene("inverted.json", r#"{
        "Objects": { "ModelName": "table", "BoundingBox": { "Min": "0 1 0", "Max": "1 0 1" } }
    }"#);
    match parse_scene_json(&path) {
        Err(CageError::Json(e)) => assert!(e.to_string().contains("max < min"), "{e}"),
        other => panic!("expected a parse error, got {other:?}"),
    }
}
