//! Planar convex polygons as ordered point cycles.
//!
//! `Polygon` is the weaker sibling of `brush::Face`: once the union no
//! longer needs plane-triple vertex identities, faces are lowered to
//! point cycles and everything downstream (BSP build, cell enumeration)
//! runs on these.

use crate::errors::Error;
use crate::float_types::{side_epsilon, Real, CENTROID_BIAS, SPLIT_EPSILON};
use crate::geom::{classify_points, point_side, ray_plane, MapPlane, Plane, PlaneSide};
use nalgebra::Point3;

/// An ordered cycle of 3D points on a `MapPlane`, convex and angularly
/// sorted in the plane's tangent frame.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub points: Vec<Point3<Real>>,
    pub plane: MapPlane,
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points && self.plane == other.plane
    }
}

impl Polygon {
    /// Build a polygon from unordered points on `plane`.
    ///
    /// Each point is projected into the plane's 2D tangent frame and the
    /// set is sorted by angle around the (biased) centroid, yielding a
    /// convex cyclic order.
    pub fn new(points: Vec<Point3<Real>>, plane: MapPlane) -> Self {
        assert!(points.len() >= 3, "degenerate polygon");

        let uv: Vec<(Real, Real)> = points
            .iter()
            .map(|p| (plane.tangent.dot(&p.coords), plane.bitangent.dot(&p.coords)))
            .collect();
        let n = uv.len() as Real;
        let cu = uv.iter().map(|(u, _)| u).sum::<Real>() / n + CENTROID_BIAS;
        let cv = uv.iter().map(|(_, v)| v).sum::<Real>() / n + CENTROID_BIAS;

        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by(|&a, &b| {
            let ta = (uv[a].1 - cv).atan2(uv[a].0 - cu);
            let tb = (uv[b].1 - cv).atan2(uv[b].0 - cu);
            ta.total_cmp(&tb)
        });

        Polygon {
            points: order.into_iter().map(|i| points[i]).collect(),
            plane,
        }
    }

    /// Build a polygon from points already in cyclic order (split pieces,
    /// lowered faces). Skips the angular sort.
    pub fn from_sorted_points(points: Vec<Point3<Real>>, plane: MapPlane) -> Self {
        assert!(points.len() >= 3, "degenerate polygon");
        Polygon { points, plane }
    }

    /// A finite `half_size` quad on an unbounded plane, with a synthetic
    /// tangent frame. Used for the cell-enumeration bounding cube and the
    /// caps that close split cells.
    pub fn from_plane(plane: Plane, half_size: Real) -> Self {
        let map_plane = MapPlane::synthetic(plane);
        let right = map_plane.tangent * half_size;
        let left = map_plane.bitangent * half_size;
        let base = plane.basepoint();
        let corners = vec![
            base + right + left,
            base + right - left,
            base - right + left,
            base - right - left,
        ];
        Polygon::new(corners, map_plane)
    }

    /// Tally this polygon's vertices against `plane` (classification
    /// epsilon).
    pub fn classify(&self, plane: &Plane) -> PlaneSide {
        classify_points(self.points.iter(), plane, side_epsilon())
    }

    /// Split by `plane` into `(back, front)` halves.
    ///
    /// Walks the cycle once: each vertex goes to its own side (coplanar
    /// to both), and for each edge strictly straddling the plane the
    /// edge/plane intersection is appended to both halves. The walk
    /// preserves the cyclic order, so no re-sort is needed and both
    /// halves stay convex on the original surface plane.
    pub fn split(&self, plane: &Plane) -> Result<(Polygon, Polygon), Error> {
        let mut back: Vec<Point3<Real>> = Vec::new();
        let mut front: Vec<Point3<Real>> = Vec::new();

        let k = self.points.len();
        for i in 0..k {
            let a = &self.points[i];
            let b = &self.points[(i + 1) % k];
            let side_a = point_side(a, plane, SPLIT_EPSILON);
            let side_b = point_side(b, plane, SPLIT_EPSILON);

            match side_a {
                PlaneSide::Back => back.push(*a),
                PlaneSide::Front => front.push(*a),
                _ => {
                    back.push(*a);
                    front.push(*a);
                }
            }

            let straddles = matches!(
                (side_a, side_b),
                (PlaneSide::Back, PlaneSide::Front) | (PlaneSide::Front, PlaneSide::Back)
            );
            if straddles {
                let dir = (b - a).normalize();
                if let Some(hit) = ray_plane(a, &dir, plane) {
                    back.push(hit);
                    front.push(hit);
                }
            }
        }

        if back.len() < 3 || front.len() < 3 {
            return Err(Error::DegenerateGeometry(format!(
                "polygon split left {} back / {} front vertices",
                back.len(),
                front.len()
            )));
        }

        Ok((
            Polygon::from_sorted_points(back, self.plane.clone()),
            Polygon::from_sorted_points(front, self.plane.clone()),
        ))
    }

    /// Fan triangulation from the first point: `(v0, vi, vi+1)`.
    pub fn triangulate(&self) -> Vec<[Point3<Real>; 3]> {
        (1..self.points.len() - 1)
            .map(|i| [self.points[0], self.points[i], self.points[i + 1]])
            .collect()
    }
}
