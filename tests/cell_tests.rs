mod support;

use brushbsp::bsp::{self, generate_cells};
use support::{approx_eq, bounding_box, cube_brush};

#[test]
fn single_cube_yields_a_single_cell() {
    let polygons = cube_brush([0.0, 0.0, 0.0], 0.5)
        .polygons()
        .expect("polygons");
    let tree = bsp::build(polygons.clone()).expect("build");

    let cells = generate_cells(polygons, &tree).expect("cells");
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].len(), 6);

    // the cell is the cube interior, not some exterior slab
    let bb = bounding_box(&cells[0]);
    for lo in &bb[0..3] {
        assert!(approx_eq(*lo, -0.5, 1e-6));
    }
    for hi in &bb[3..6] {
        assert!(approx_eq(*hi, 0.5, 1e-6));
    }
}

#[test]
fn solid_leaves_carry_their_filler_faces() {
    let polygons = cube_brush([1.0, 2.0, 3.0], 0.5)
        .polygons()
        .expect("polygons");
    let tree = bsp::build(polygons.clone()).expect("build");
    generate_cells(polygons, &tree).expect("cells");

    for leaf in tree.leaves() {
        if leaf.is_solid() {
            let filler = leaf.filler().expect("solid leaf was visited");
            assert_eq!(filler.len(), 6);
        } else {
            assert!(leaf.filler().is_none());
        }
    }
}

#[test]
fn overlapping_cubes_cells_cover_the_union_box() {
    let a = cube_brush([0.0, 0.0, 0.0], 0.5);
    let b = cube_brush([0.5, 0.0, 0.0], 0.5);
    let unioned = brushbsp::brush::union(&[a, b]).expect("union");
    let mut polygons = Vec::new();
    for brush in &unioned {
        polygons.extend(brush.polygons().expect("polygons"));
    }
    let tree = bsp::build(polygons.clone()).expect("build");
    let cells = generate_cells(polygons, &tree).expect("cells");

    // the union of two equal overlapping cubes is one convex box, so a
    // single solid leaf and a single cell spanning it
    assert_eq!(cells.len(), 1);
    let bb = bounding_box(&cells[0]);
    assert!(approx_eq(bb[0], -0.5, 1e-6));
    assert!(approx_eq(bb[3], 1.0, 1e-6));
    for (lo, hi) in [(bb[1], bb[4]), (bb[2], bb[5])] {
        assert!(approx_eq(lo, -0.5, 1e-6));
        assert!(approx_eq(hi, 0.5, 1e-6));
    }
}
