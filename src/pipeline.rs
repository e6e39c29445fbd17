//! The straight-line compile pipeline: map text → brushes → union →
//! polygons → BSP tree → convex cells → colored triangle stream.
//!
//! Everything is single-threaded and deterministic; brush and polygon
//! order is preserved end to end because both the union's keep-shared
//! tie-break and the BSP pivot choice depend on it.

use crate::brush::{self, Brush};
use crate::bsp::{self, Node};
use crate::errors::Error;
use crate::float_types::Real;
use crate::geom::Polygon;
use crate::io::map::{self, Entity};
use nalgebra::Point3;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// One vertex of the triangle-primitive stream handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorVertex {
    pub position: Point3<Real>,
    pub color: [u8; 4],
}

/// Everything the compile produces: the upload-ready vertex stream, the
/// tree for spatial queries, and one face list per solid-leaf cell.
#[derive(Debug)]
pub struct Compiled {
    pub vertices: Vec<ColorVertex>,
    pub tree: Node,
    pub cells: Vec<Vec<Polygon>>,
}

/// Compile the first entity of a map. The seed fixes the per-polygon
/// colors, so equal inputs reproduce the vertex buffer byte for byte.
pub fn compile(map_text: &str, color_seed: u64) -> Result<Compiled, Error> {
    let entities = map::parse(map_text)?;
    let entity = entities
        .first()
        .ok_or_else(|| Error::parse(1, "map contains no entities"))?;
    compile_entity(entity, color_seed)
}

/// Compile a single entity's brushes.
pub fn compile_entity(entity: &Entity, color_seed: u64) -> Result<Compiled, Error> {
    if entity.brushes.is_empty() {
        return Err(Error::DegenerateGeometry("entity has no brushes".into()));
    }
    let brushes = entity
        .brushes
        .iter()
        .map(|planes| Brush::from_planes(planes.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let unioned = brush::union(&brushes)?;
    let mut polygons = Vec::new();
    for brush in &unioned {
        polygons.extend(brush.polygons()?);
    }

    let tree = bsp::build(polygons.clone())?;
    let cells = bsp::generate_cells(polygons.clone(), &tree)?;
    let vertices = triangulate_colored(&polygons, color_seed);

    Ok(Compiled {
        vertices,
        tree,
        cells,
    })
}

/// Fan-triangulate every polygon into a flat vertex stream, one random
/// (seed-deterministic) color per polygon.
pub fn triangulate_colored(polygons: &[Polygon], color_seed: u64) -> Vec<ColorVertex> {
    let mut rng = StdRng::seed_from_u64(color_seed);
    let mut vertices = Vec::new();
    for polygon in polygons {
        let color = [rng.gen(), rng.gen(), rng.gen(), 255];
        for triangle in polygon.triangulate() {
            vertices.extend(triangle.map(|position| ColorVertex { position, color }));
        }
    }
    vertices
}
