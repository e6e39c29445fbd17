mod support;

use brushbsp::errors::Error;
use brushbsp::io::map;
use nalgebra::Vector3;
use support::{approx_eq, UNIT_CUBE_MAP};

#[test]
fn parses_the_cube_map() {
    let entities = map::parse(UNIT_CUBE_MAP).expect("parse");
    assert_eq!(entities.len(), 1);

    let entity = &entities[0];
    assert_eq!(
        entity.properties.get("classname").map(String::as_str),
        Some("worldspawn")
    );
    assert_eq!(
        entity.properties.get("message").map(String::as_str),
        Some("cube room")
    );
    assert_eq!(entity.brushes.len(), 1);
    assert_eq!(entity.brushes[0].len(), 6);

    // first plane is the floor: normal +z through the origin
    let floor = &entity.brushes[0][0];
    assert!((floor.normal() - Vector3::z()).norm() < 1e-9);
    assert!(approx_eq(floor.d(), 0.0, 1e-9));
    // tangent frame carried through, fourth components discarded
    assert_eq!(floor.tangent, Vector3::x());
    assert_eq!(floor.bitangent, Vector3::y());
}

#[test]
fn load_reads_a_map_file() {
    let path = std::env::temp_dir().join("brushbsp_test_cube.map");
    std::fs::write(&path, UNIT_CUBE_MAP).expect("write");
    let entities = map::load(&path).expect("load");
    assert_eq!(entities.len(), 1);
    let _ = std::fs::remove_file(&path);
    assert!(matches!(map::load(&path), Err(Error::Io(_))));
}

#[test]
fn multiple_entities_and_comments() {
    let text = "// header comment\n{\n\"classname\" \"worldspawn\"\n}\n{\n\"classname\" \"info_player_start\"\n\"origin\" \"8 8 8\"\n}\n";
    let entities = map::parse(text).expect("parse");
    assert_eq!(entities.len(), 2);
    assert!(entities[0].brushes.is_empty());
    assert_eq!(
        entities[1].properties.get("origin").map(String::as_str),
        Some("8 8 8")
    );
}

#[test]
fn bad_number_reports_its_line() {
    let text = "{\n{\n( 0 0 oops ) ( 1 0 0 ) ( 1 1 0 ) tex [ 1 0 0 0 ] [ 0 1 0 0 ] 0 0 0\n}\n}\n";
    match map::parse(text) {
        Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn truncated_plane_line_is_rejected() {
    let text = "{\n{\n( 0 0 0 ) ( 1 0 0 ) tex\n}\n}\n";
    assert!(matches!(
        map::parse(text),
        Err(Error::Parse { line: 3, .. })
    ));
}

#[test]
fn colinear_plane_points_are_rejected() {
    let text = "{\n{\n( 0 0 0 ) ( 1 0 0 ) ( 2 0 0 ) tex [ 1 0 0 0 ] [ 0 1 0 0 ] 0 0 0\n}\n}\n";
    assert!(matches!(map::parse(text), Err(Error::Parse { .. })));
}

#[test]
fn unclosed_block_is_rejected() {
    let text = "{\n\"classname\" \"worldspawn\"\n{\n";
    assert!(matches!(map::parse(text), Err(Error::Parse { .. })));
}

#[test]
fn stray_text_at_top_level_is_rejected() {
    assert!(matches!(
        map::parse("worldspawn\n"),
        Err(Error::Parse { line: 1, .. })
    ));
}
