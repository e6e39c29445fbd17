//! Identity-carrying faces: vertices are unordered triples of supporting
//! planes, edges carry the two planes their endpoints share. The union
//! stage needs these identities to synthesize exact crossing vertices;
//! afterwards faces are lowered to plain point-cycle polygons.

use crate::errors::Error;
use crate::float_types::{side_epsilon, Real, SPLIT_EPSILON};
use crate::geom::{classify_points, intersect3, point_side, MapPlane, Plane, PlaneSide, Polygon};
use nalgebra::Point3;
use std::sync::OnceLock;

/// A polyhedron vertex identified by the unordered triple of planes whose
/// intersection defines it. The point itself is solved on first use and
/// cached. The triple is linearly independent by construction.
#[derive(Debug, Clone)]
pub struct FaceVertex {
    planes: [MapPlane; 3],
    point: OnceLock<Point3<Real>>,
}

impl PartialEq for FaceVertex {
    fn eq(&self, other: &Self) -> bool {
        self.planes.iter().all(|p| other.planes.contains(p))
            && other.planes.iter().all(|p| self.planes.contains(p))
    }
}

impl FaceVertex {
    pub fn new(a: MapPlane, b: MapPlane, c: MapPlane) -> Self {
        FaceVertex {
            planes: [a, b, c],
            point: OnceLock::new(),
        }
    }

    /// Construct with the intersection point already solved (brush
    /// construction computes it anyway while filtering candidates).
    pub(crate) fn with_point(a: MapPlane, b: MapPlane, c: MapPlane, point: Point3<Real>) -> Self {
        let vertex = FaceVertex::new(a, b, c);
        let _ = vertex.point.set(point);
        vertex
    }

    pub fn planes(&self) -> &[MapPlane; 3] {
        &self.planes
    }

    /// The vertex position, solved from the 3-plane system and cached.
    pub fn point(&self) -> Result<Point3<Real>, Error> {
        if let Some(p) = self.point.get() {
            return Ok(*p);
        }
        let p = intersect3(
            &self.planes[0].plane,
            &self.planes[1].plane,
            &self.planes[2].plane,
        )
        .ok_or_else(|| {
            Error::DegenerateGeometry("vertex planes are linearly dependent".into())
        })?;
        let _ = self.point.set(p);
        Ok(p)
    }

    /// True when this vertex's triple contains `plane`.
    pub fn lies_on(&self, plane: &MapPlane) -> bool {
        self.planes.contains(plane)
    }

    /// Planes present in both triples.
    pub fn common_planes(&self, other: &FaceVertex) -> Vec<MapPlane> {
        self.planes
            .iter()
            .filter(|p| other.planes.contains(p))
            .cloned()
            .collect()
    }

    /// Two vertices are edge-adjacent exactly when they share two of
    /// their three planes.
    pub fn is_adjacent(&self, other: &FaceVertex) -> bool {
        self.common_planes(other).len() == 2
    }
}

/// An ordered pair of face vertices plus the two planes common to both
/// endpoints (the two faces sharing the edge).
#[derive(Debug, Clone, PartialEq)]
pub struct FaceEdge {
    pub a: FaceVertex,
    pub b: FaceVertex,
    pub common: [MapPlane; 2],
}

impl FaceEdge {
    fn between(a: &FaceVertex, b: &FaceVertex) -> Result<FaceEdge, Error> {
        let common = a.common_planes(b);
        let [p, q]: [MapPlane; 2] = common.try_into().map_err(|_| {
            Error::DegenerateGeometry("edge endpoints do not share exactly two planes".into())
        })?;
        Ok(FaceEdge {
            a: a.clone(),
            b: b.clone(),
            common: [p, q],
        })
    }
}

/// A planar convex polygon on a surface `MapPlane`, as parallel cycles of
/// vertices and edges: edge `i` joins vertex `i` to vertex `i+1 mod k`.
/// Vertices wind counter-clockwise seen from the front side of the
/// surface plane.
#[derive(Debug, Clone)]
pub struct Face {
    pub plane: MapPlane,
    pub vertices: Vec<FaceVertex>,
    pub edges: Vec<FaceEdge>,
}

impl PartialEq for Face {
    fn eq(&self, other: &Self) -> bool {
        self.plane == other.plane && self.vertices == other.vertices
    }
}

impl Face {
    /// Assemble a face from the unordered vertices lying on `plane`.
    ///
    /// The cycle is recovered by walking adjacency (each step moves to an
    /// unused vertex sharing two planes with the current one), then
    /// oriented by the sign of `(v0-v1) × (v2-v1) · n` — a negative area
    /// reverses both cycles.
    pub fn order(plane: MapPlane, vertices: Vec<FaceVertex>) -> Result<Face, Error> {
        if vertices.len() < 3 {
            return Err(Error::DegenerateGeometry(format!(
                "face on plane with normal {:?} has only {} vertices",
                plane.normal(),
                vertices.len()
            )));
        }

        let mut remaining = vertices;
        let mut ordered = vec![remaining.swap_remove(0)];
        while let Some(pos) = remaining
            .iter()
            .position(|v| v.is_adjacent(ordered.last().unwrap()))
        {
            ordered.push(remaining.swap_remove(pos));
        }
        if !remaining.is_empty() {
            log::warn!(
                "face ordering left {} vertices outside the cycle",
                remaining.len()
            );
        }
        if ordered.len() < 3 {
            return Err(Error::DegenerateGeometry(
                "face cycle closed with fewer than 3 vertices".into(),
            ));
        }

        let v0 = ordered[0].point()?;
        let v1 = ordered[1].point()?;
        let v2 = ordered[2].point()?;
        if (v0 - v1).cross(&(v2 - v1)).dot(&plane.normal()) < 0.0 {
            ordered.reverse();
        }

        let edges = ordered
            .iter()
            .enumerate()
            .map(|(i, v)| FaceEdge::between(v, &ordered[(i + 1) % ordered.len()]))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Face {
            plane,
            vertices: ordered,
            edges,
        })
    }

    /// Vertex positions in cycle order. A vertex whose planes went
    /// degenerate is logged and omitted rather than aborting.
    pub fn points(&self) -> Vec<Point3<Real>> {
        self.vertices
            .iter()
            .filter_map(|v| match v.point() {
                Ok(p) => Some(p),
                Err(e) => {
                    log::warn!("omitting face vertex: {e}");
                    None
                }
            })
            .collect()
    }

    /// Tally this face's vertices against `plane` (classification
    /// epsilon).
    pub fn classify(&self, plane: &Plane) -> PlaneSide {
        classify_points(self.points().iter(), plane, side_epsilon())
    }

    /// Edge-based split into `(back, front)` halves.
    ///
    /// Where an edge strictly straddles the splitter, the crossing vertex
    /// is the triple of the edge's two carrier planes with the splitter —
    /// an exact identity, no interpolated coordinates. Coplanar endpoints
    /// go to both halves. Both halves are re-assembled with [`Face::order`]
    /// and inherit the surface plane.
    pub fn split(&self, splitter: &MapPlane) -> Result<(Face, Face), Error> {
        let mut back: Vec<FaceVertex> = Vec::new();
        let mut front: Vec<FaceVertex> = Vec::new();

        for edge in &self.edges {
            let side_a = point_side(&edge.a.point()?, &splitter.plane, SPLIT_EPSILON);
            let side_b = point_side(&edge.b.point()?, &splitter.plane, SPLIT_EPSILON);

            match side_a {
                PlaneSide::Back => back.push(edge.a.clone()),
                PlaneSide::Front => front.push(edge.a.clone()),
                _ => {
                    back.push(edge.a.clone());
                    front.push(edge.a.clone());
                }
            }

            let straddles = matches!(
                (side_a, side_b),
                (PlaneSide::Back, PlaneSide::Front) | (PlaneSide::Front, PlaneSide::Back)
            );
            if straddles {
                let crossing = FaceVertex::new(
                    edge.common[0].clone(),
                    edge.common[1].clone(),
                    splitter.clone(),
                );
                match crossing.point() {
                    Ok(_) => {
                        back.push(crossing.clone());
                        front.push(crossing);
                    }
                    Err(e) => log::warn!("omitting split crossing vertex: {e}"),
                }
            }
        }

        Ok((
            Face::order(self.plane.clone(), back)?,
            Face::order(self.plane.clone(), front)?,
        ))
    }

    /// Lower to a point-cycle polygon for the BSP stages.
    ///
    /// The surface plane is flipped on the way down: brush supporting
    /// planes carry the solid on their positive side, while everything
    /// downstream of the union treats a polygon's front as the solid's
    /// interior.
    pub fn to_polygon(&self) -> Result<Polygon, Error> {
        let points = self.points();
        if points.len() < 3 {
            return Err(Error::DegenerateGeometry(
                "face collapsed below 3 usable vertices".into(),
            ));
        }
        Ok(Polygon::from_sorted_points(points, self.plane.flipped()))
    }
}
