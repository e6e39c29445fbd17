//! Oriented half-space planes, with and without a carried tangent frame.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A plane in 3D space: unit normal `n` and signed distance `d`, with the
/// plane equation `n·x + d = 0`. "Front" is the side of positive
/// `n·x + d` as seen by the plane equation; note that [`point_side`]
/// negates the distance, so `PlaneSide::Front` is the *opposite* side.
///
/// Planes are compared structurally: two planes are equal exactly when
/// their components are, which is what brush construction relies on to
/// track supporting planes as identities.
///
/// [`point_side`]: crate::geom::point_side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub d: Real,
}

impl Plane {
    pub const fn new(normal: Vector3<Real>, d: Real) -> Self {
        Plane { normal, d }
    }

    /// Signed value of the plane equation at `p`: `n·p + d`.
    #[inline]
    pub fn eval(&self, p: &Point3<Real>) -> Real {
        self.normal.dot(&p.coords) + self.d
    }

    /// The same plane facing the other way: `(-n, -d)`.
    #[inline]
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: -self.normal,
            d: -self.d,
        }
    }

    /// A point on the plane closest to the origin: `-d·n`.
    #[inline]
    pub fn basepoint(&self) -> Point3<Real> {
        Point3::from(self.normal * -self.d)
    }
}

/// A [`Plane`] augmented with the tangent and bitangent carried from map
/// input. The frame is opaque to the geometry core (it exists for
/// downstream texture mapping) except that the angular-sort polygon
/// constructor projects into it.
///
/// Two `MapPlane`s with an identical underlying plane but different
/// frames are *distinct* identities for face/vertex tracking, which the
/// derived structural equality provides.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPlane {
    pub plane: Plane,
    pub tangent: Vector3<Real>,
    pub bitangent: Vector3<Real>,
}

impl MapPlane {
    pub const fn new(plane: Plane, tangent: Vector3<Real>, bitangent: Vector3<Real>) -> Self {
        MapPlane {
            plane,
            tangent,
            bitangent,
        }
    }

    /// Wrap a bare plane, synthesizing a tangent frame from a world axis
    /// not parallel to the normal (try Y, then X, then Z; a non-parallel
    /// axis exists for any unit normal). Used for the bounding-cube and
    /// cell-cap polygons that never came from map input.
    pub fn synthetic(plane: Plane) -> Self {
        let (tangent, bitangent) = tangent_frame(&plane.normal);
        MapPlane {
            plane,
            tangent,
            bitangent,
        }
    }

    /// Construct from the three points of a map plane line. The normal is
    /// `normalize((v2-v1) × (v3-v1))` and `d = -n·v1`; with map winding
    /// this puts the brush interior on the positive side of the plane
    /// equation. Returns `None` for a colinear point triple.
    pub fn from_points(
        v1: Point3<Real>,
        v2: Point3<Real>,
        v3: Point3<Real>,
        tangent: Vector3<Real>,
        bitangent: Vector3<Real>,
    ) -> Option<Self> {
        let n = (v2 - v1).cross(&(v3 - v1));
        if n.norm_squared() < Real::EPSILON {
            return None;
        }
        let normal = n.normalize();
        let d = -normal.dot(&v1.coords);
        Some(MapPlane {
            plane: Plane::new(normal, d),
            tangent,
            bitangent,
        })
    }

    #[inline]
    pub fn normal(&self) -> Vector3<Real> {
        self.plane.normal
    }

    #[inline]
    pub fn d(&self) -> Real {
        self.plane.d
    }

    /// The reversed surface: plane flipped, tangent frame kept verbatim.
    pub fn flipped(&self) -> MapPlane {
        MapPlane {
            plane: self.plane.flipped(),
            tangent: self.tangent,
            bitangent: self.bitangent,
        }
    }
}

/// Build two in-plane axes for `normal` by crossing with the first world
/// axis not parallel to it: `right = n × axis`, `left = right × n`.
pub fn tangent_frame(normal: &Vector3<Real>) -> (Vector3<Real>, Vector3<Real>) {
    let axis = [Vector3::y(), Vector3::x(), Vector3::z()]
        .into_iter()
        .find(|axis| normal.cross(axis).norm_squared() > Real::EPSILON)
        .unwrap_or_else(Vector3::z);
    let right = normal.cross(&axis).normalize();
    let left = right.cross(normal).normalize();
    (right, left)
}
