//! Convex brushes and their boolean union.
//!
//! A brush is the intersection of the half-spaces its map planes define.
//! Construction resolves every plane triple into candidate vertices and
//! assembles one face per contributing plane; the union then clips each
//! brush's faces against every other brush's half-space set so only the
//! outer shell survives.

pub mod face;

pub use face::{Face, FaceEdge, FaceVertex};

use crate::errors::Error;
use crate::float_types::{
    parry3d::bounding_volume::{Aabb, BoundingVolume},
    side_epsilon, Real, SPLIT_EPSILON,
};
use crate::geom::{intersect3, point_side, MapPlane, PlaneSide, Polygon};
use nalgebra::Point3;

/// A convex polyhedron: its supporting planes, the faces they carve out,
/// and the bounding box of its vertices.
#[derive(Debug, Clone)]
pub struct Brush {
    pub planes: Vec<MapPlane>,
    pub faces: Vec<Face>,
    pub bounding_box: Aabb,
}

impl Brush {
    /// Build the explicit polyhedron from a supporting-plane set.
    ///
    /// Every ordered triple `(i, j, k)` with a non-degenerate intersection
    /// yields a candidate vertex; candidates strictly outside any other
    /// half-space are discarded, as are coincident duplicates. Each plane
    /// with at least three surviving candidates contributes a face.
    pub fn from_planes(planes: Vec<MapPlane>) -> Result<Brush, Error> {
        let mut candidates: Vec<FaceVertex> = Vec::new();
        let mut points: Vec<Point3<Real>> = Vec::new();

        for i in 0..planes.len() {
            for j in (i + 1)..planes.len() {
                for k in (j + 1)..planes.len() {
                    let Some(point) =
                        intersect3(&planes[i].plane, &planes[j].plane, &planes[k].plane)
                    else {
                        continue;
                    };
                    // outside any half-space: cannot be a polyhedron vertex
                    let outside = planes
                        .iter()
                        .any(|p| point_side(&point, &p.plane, side_epsilon()) == PlaneSide::Front);
                    if outside {
                        continue;
                    }
                    if points
                        .iter()
                        .any(|p| (p - point).norm_squared() < SPLIT_EPSILON)
                    {
                        continue;
                    }
                    candidates.push(FaceVertex::with_point(
                        planes[i].clone(),
                        planes[j].clone(),
                        planes[k].clone(),
                        point,
                    ));
                    points.push(point);
                }
            }
        }

        if candidates.len() < 4 {
            return Err(Error::DegenerateGeometry(format!(
                "brush with {} planes resolved only {} vertices",
                planes.len(),
                candidates.len()
            )));
        }

        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for p in &points {
            mins = mins.inf(p);
            maxs = maxs.sup(p);
        }

        let mut faces = Vec::with_capacity(planes.len());
        for plane in &planes {
            let members: Vec<FaceVertex> = candidates
                .iter()
                .filter(|v| v.lies_on(plane))
                .cloned()
                .collect();
            if members.len() < 3 {
                log::debug!("supporting plane contributes no face");
                continue;
            }
            faces.push(Face::order(plane.clone(), members)?);
        }

        Ok(Brush {
            planes,
            faces,
            bounding_box: Aabb::new(mins, maxs),
        })
    }

    /// All faces lowered to point-cycle polygons.
    pub fn polygons(&self) -> Result<Vec<Polygon>, Error> {
        self.faces.iter().map(Face::to_polygon).collect()
    }
}

/// Boolean union of a brush list, at the boundary level: each brush keeps
/// the portion of its faces lying outside every other brush.
///
/// Brush order is semantic. While clipping brush `i`, `keep_shared` flips
/// to true once the walk passes `i` itself, so of two brushes with a
/// coincident face exactly one copy survives. Reordering the input
/// changes which brush that is.
pub fn union(brushes: &[Brush]) -> Result<Vec<Brush>, Error> {
    let mut out = Vec::with_capacity(brushes.len());
    for (i, brush) in brushes.iter().enumerate() {
        let mut faces = brush.faces.clone();
        let mut keep_shared = false;
        for (j, other) in brushes.iter().enumerate() {
            if i == j {
                keep_shared = true;
                continue;
            }
            // closed-interval test, so abutting brushes still clip
            if !brush.bounding_box.intersects(&other.bounding_box) {
                continue;
            }
            let mut clipped = Vec::with_capacity(faces.len());
            for face in faces {
                clipped.extend(clip_face(face, keep_shared, &other.planes, 0)?);
            }
            faces = clipped;
        }
        out.push(Brush {
            planes: brush.planes.clone(),
            faces,
            bounding_box: brush.bounding_box,
        });
    }
    Ok(out)
}

/// Clip one face against the half-space intersection `volume[idx..]`,
/// returning the surviving pieces. An empty result means the face was
/// entirely inside the volume.
fn clip_face(
    face: Face,
    keep_shared: bool,
    volume: &[MapPlane],
    idx: usize,
) -> Result<Vec<Face>, Error> {
    if idx >= volume.len() {
        // survived every half-space test as "inside": fully contained
        return Ok(Vec::new());
    }
    let plane = &volume[idx];
    match face.classify(&plane.plane) {
        PlaneSide::Back | PlaneSide::CoplanarBack => clip_face(face, keep_shared, volume, idx + 1),
        PlaneSide::Front | PlaneSide::CoplanarFront => Ok(vec![face]),
        PlaneSide::Coplanar => {
            // coincident faces: the pass with keep_shared == false keeps
            // the one copy, every other pass drops into the volume test
            if face.plane.normal().dot(&plane.normal()) > 0.0 && !keep_shared {
                Ok(vec![face])
            } else {
                clip_face(face, keep_shared, volume, idx + 1)
            }
        }
        PlaneSide::Spanning => {
            let (back, front) = face.split(plane)?;
            if idx + 1 >= volume.len() {
                return Ok(vec![front]);
            }
            let rest = clip_face(back.clone(), keep_shared, volume, idx + 1)?;
            if rest.is_empty() {
                Ok(vec![front])
            } else if rest.len() == 1 && rest[0] == back {
                // the back half came through untouched: a coplanar keep
                // deeper in the volume, so the split must not propagate
                Ok(vec![face])
            } else {
                let mut pieces = Vec::with_capacity(rest.len() + 1);
                pieces.push(front);
                pieces.extend(rest);
                Ok(pieces)
            }
        }
    }
}
