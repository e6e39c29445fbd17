//! Geometry primitives: side classification, plane intersections, and
//! the convex polygon the BSP stages operate on.

pub mod plane;
pub mod polygon;

pub use plane::{tangent_frame, MapPlane, Plane};
pub use polygon::Polygon;

use crate::float_types::{Real, DET_EPSILON, RAY_EPSILON};
use nalgebra::{Point3, Vector3};

/// Where a point or point set sits relative to a plane.
///
/// `Coplanar`, `Front` and `Back` describe single points as well as
/// whole sets; the remaining variants only arise from tallying sets:
/// `Spanning` has strict vertices on both sides, `CoplanarFront` /
/// `CoplanarBack` mix coplanar vertices with one strict side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    Coplanar,
    Front,
    Back,
    Spanning,
    CoplanarFront,
    CoplanarBack,
}

impl PlaneSide {
    /// True for `Front` and `CoplanarFront`.
    #[inline]
    pub fn is_front(self) -> bool {
        matches!(self, PlaneSide::Front | PlaneSide::CoplanarFront)
    }

    /// True for `Back` and `CoplanarBack`.
    #[inline]
    pub fn is_back(self) -> bool {
        matches!(self, PlaneSide::Back | PlaneSide::CoplanarBack)
    }
}

/// Classify a single point against a plane with the given epsilon.
///
/// The side value is the *negated* plane equation, `s = -(n·p + d)`, so
/// a brush interior (positive plane equation under map winding) reads as
/// `Back`. Every caller picks its own epsilon; see `float_types`.
pub fn point_side(p: &Point3<Real>, plane: &Plane, epsilon: Real) -> PlaneSide {
    let s = -plane.eval(p);
    if s < -epsilon {
        PlaneSide::Back
    } else if s > epsilon {
        PlaneSide::Front
    } else {
        PlaneSide::Coplanar
    }
}

/// Tally the sides of a point set and collapse the counts.
///
/// All on one side gives that side; strict vertices on both sides give
/// `Spanning` regardless of coplanar count; coplanar plus one strict
/// side gives the corresponding `Coplanar*` variant.
pub fn classify_points<'a, I>(points: I, plane: &Plane, epsilon: Real) -> PlaneSide
where
    I: IntoIterator<Item = &'a Point3<Real>>,
{
    let mut coplanar = 0usize;
    let mut front = 0usize;
    let mut back = 0usize;
    for p in points {
        match point_side(p, plane, epsilon) {
            PlaneSide::Front => front += 1,
            PlaneSide::Back => back += 1,
            _ => coplanar += 1,
        }
    }
    match (coplanar, front, back) {
        (_, f, b) if f > 0 && b > 0 => PlaneSide::Spanning,
        (0, f, 0) if f > 0 => PlaneSide::Front,
        (0, 0, b) if b > 0 => PlaneSide::Back,
        (_, f, 0) if f > 0 => PlaneSide::CoplanarFront,
        (_, 0, b) if b > 0 => PlaneSide::CoplanarBack,
        _ => PlaneSide::Coplanar,
    }
}

/// The unique point satisfying all three plane equations, via Cramer's
/// rule. Fails when the normals are linearly dependent
/// (`|det| < DET_EPSILON`).
pub fn intersect3(p0: &Plane, p1: &Plane, p2: &Plane) -> Option<Point3<Real>> {
    let det = p0.normal.cross(&p1.normal).dot(&p2.normal);
    if det.abs() < DET_EPSILON {
        return None;
    }
    let x = (p1.normal.cross(&p2.normal) * -p0.d
        + p2.normal.cross(&p0.normal) * -p1.d
        + p0.normal.cross(&p1.normal) * -p2.d)
        / det;
    Some(Point3::from(x))
}

/// Intersection of the line `origin + t·dir` with a plane. `dir` need not
/// be unit length. Fails when the line is parallel to the plane
/// (`|n·dir| < RAY_EPSILON`).
pub fn ray_plane(
    origin: &Point3<Real>,
    dir: &Vector3<Real>,
    plane: &Plane,
) -> Option<Point3<Real>> {
    let denom = plane.normal.dot(dir);
    if denom.abs() < RAY_EPSILON {
        return None;
    }
    let t = plane.normal.dot(&(plane.normal * -plane.d - origin.coords)) / denom;
    Some(origin + dir * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::SIDE_EPSILON;

    #[test]
    fn point_side_is_negated_distance() {
        let plane = Plane::new(Vector3::x(), 0.0);
        // positive plane equation => Back
        assert_eq!(
            point_side(&Point3::new(1.0, 0.0, 0.0), &plane, SIDE_EPSILON),
            PlaneSide::Back
        );
        assert_eq!(
            point_side(&Point3::new(-1.0, 0.0, 0.0), &plane, SIDE_EPSILON),
            PlaneSide::Front
        );
        assert_eq!(
            point_side(&Point3::new(0.0, 5.0, -3.0), &plane, SIDE_EPSILON),
            PlaneSide::Coplanar
        );
    }
}
