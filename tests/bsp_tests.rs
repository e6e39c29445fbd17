mod support;

use brushbsp::bsp::{self, Node};
use brushbsp::float_types::Real;
use nalgebra::Point3;
use support::cube_brush;

fn cube_polygons() -> Vec<brushbsp::geom::Polygon> {
    cube_brush([0.0, 0.0, 0.0], 0.5)
        .polygons()
        .expect("polygons")
}

#[test]
fn cube_tree_structure() {
    let tree = bsp::build(cube_polygons()).expect("build");

    // one internal node per face plane; a binary tree with 6 internal
    // nodes has 7 leaves: the cube interior plus six exterior regions
    assert_eq!(tree.split_planes().len(), 6);
    let leaves = tree.leaves();
    assert_eq!(leaves.len(), 7);
    let solid: Vec<_> = leaves.iter().filter(|l| l.is_solid()).collect();
    assert_eq!(solid.len(), 1);
    // the solid leaf holds the entire surviving boundary
    assert_eq!(solid[0].polygons.len(), 6);
    assert_eq!(tree.polygon_count(), 6);
    assert_eq!(tree.depth(), 6);
}

#[test]
fn interior_points_are_solid_exterior_points_are_empty() {
    let tree = bsp::build(cube_polygons()).expect("build");

    let interior: [[Real; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [0.4, 0.4, 0.4],
        [-0.4, 0.1, -0.3],
        [0.2, -0.45, 0.0],
    ];
    for p in interior {
        let leaf = tree.locate(&Point3::new(p[0], p[1], p[2]));
        assert!(leaf.is_solid(), "interior point {p:?} landed in empty leaf");
    }

    let exterior: [[Real; 3]; 5] = [
        [2.0, 0.0, 0.0],
        [-2.0, 0.0, 0.0],
        [0.0, 0.7, 0.0],
        [0.0, 0.0, -0.7],
        [0.6, 0.6, 0.6],
    ];
    for p in exterior {
        let leaf = tree.locate(&Point3::new(p[0], p[1], p[2]));
        assert!(!leaf.is_solid(), "exterior point {p:?} landed in solid leaf");
    }
}

#[test]
fn build_is_stable() {
    let first = bsp::build(cube_polygons()).expect("build");
    let second = bsp::build(cube_polygons()).expect("build");
    let planes_a = first.split_planes();
    let planes_b = second.split_planes();
    assert_eq!(planes_a.len(), planes_b.len());
    for (a, b) in planes_a.iter().zip(planes_b.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn empty_input_builds_an_empty_leaf() {
    let tree = bsp::build(Vec::new()).expect("build");
    match tree {
        Node::Leaf(leaf) => assert!(!leaf.is_solid()),
        Node::Internal { .. } => panic!("empty input produced an internal node"),
    }
}

#[test]
fn union_output_still_separates_inside_from_outside() {
    // the L-shaped union of two overlapping cubes
    let a = cube_brush([0.0, 0.0, 0.0], 0.5);
    let b = cube_brush([0.5, 0.0, 0.0], 0.5);
    let unioned = brushbsp::brush::union(&[a, b]).expect("union");
    let mut polygons = Vec::new();
    for brush in &unioned {
        polygons.extend(brush.polygons().expect("polygons"));
    }
    let tree = bsp::build(polygons).expect("build");

    for p in [[0.0, 0.0, 0.0], [0.75, 0.0, 0.0], [0.45, 0.3, -0.3]] {
        assert!(tree.locate(&Point3::new(p[0], p[1], p[2])).is_solid());
    }
    for p in [[-1.0, 0.0, 0.0], [1.5, 0.0, 0.0], [0.0, 0.0, 2.0]] {
        assert!(!tree.locate(&Point3::new(p[0], p[1], p[2])).is_solid());
    }
}
