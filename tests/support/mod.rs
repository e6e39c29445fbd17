//! Test support library
//! Helper constructors and measures shared by the integration suites.
#![allow(dead_code)]

use brushbsp::brush::Brush;
use brushbsp::float_types::Real;
use brushbsp::geom::{MapPlane, Plane, Polygon};
use nalgebra::Vector3;

/// Supporting planes of an axis-aligned cube, inward normals (the brush
/// interior on the positive side of each plane equation), in the order
/// [x+, x-, y+, y-, z+, z-].
pub fn cube_planes(center: [Real; 3], half: Real) -> Vec<MapPlane> {
    let c = Vector3::new(center[0], center[1], center[2]);
    let axes: [Vector3<Real>; 3] = [Vector3::x(), Vector3::y(), Vector3::z()];
    let mut planes = Vec::new();
    for axis in axes {
        let offset = c.dot(&axis);
        planes.push(MapPlane::synthetic(Plane::new(-axis, offset + half)));
        planes.push(MapPlane::synthetic(Plane::new(axis, -(offset - half))));
    }
    planes
}

pub fn cube_brush(center: [Real; 3], half: Real) -> Brush {
    Brush::from_planes(cube_planes(center, half)).expect("cube brush")
}

/// Approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// of a polygon set.
pub fn bounding_box(polygons: &[Polygon]) -> [Real; 6] {
    let mut bounds = [
        Real::MAX,
        Real::MAX,
        Real::MAX,
        -Real::MAX,
        -Real::MAX,
        -Real::MAX,
    ];
    for poly in polygons {
        for p in &poly.points {
            bounds[0] = bounds[0].min(p.x);
            bounds[1] = bounds[1].min(p.y);
            bounds[2] = bounds[2].min(p.z);
            bounds[3] = bounds[3].max(p.x);
            bounds[4] = bounds[4].max(p.y);
            bounds[5] = bounds[5].max(p.z);
        }
    }
    bounds
}

/// Quick helper to compare floating-point results with a tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Area of a convex polygon, summed over its fan triangles.
pub fn polygon_area(polygon: &Polygon) -> Real {
    polygon
        .triangulate()
        .iter()
        .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
        .sum()
}

/// A six-plane unit cube `[0,1]^3` in map text form, with the winding the
/// reader expects (interior on the positive side of every plane).
pub const UNIT_CUBE_MAP: &str = r#"// test level
{
"classname" "worldspawn"
"message" "cube room"
{
( 0 0 0 ) ( 1 0 0 ) ( 1 1 0 ) floor [ 1 0 0 0 ] [ 0 1 0 0 ] 0 0 0
( 0 0 1 ) ( 0 1 1 ) ( 1 1 1 ) ceiling [ 1 0 0 0 ] [ 0 1 0 0 ] 0 0 0
( 0 0 0 ) ( 0 1 0 ) ( 0 1 1 ) west [ 0 1 0 0 ] [ 0 0 1 0 ] 0 0 0
( 1 0 0 ) ( 1 0 1 ) ( 1 1 1 ) east [ 0 1 0 0 ] [ 0 0 1 0 ] 0 0 0
( 0 0 0 ) ( 1 0 1 ) ( 1 0 0 ) south [ 1 0 0 0 ] [ 0 0 1 0 ] 0 0 0
( 0 1 0 ) ( 1 1 0 ) ( 1 1 1 ) north [ 1 0 0 0 ] [ 0 0 1 0 ] 0 0 0
}
}
"#;
