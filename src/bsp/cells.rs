//! Convex cell enumeration: walk each boundary polygon down the tree
//! while splitting a bounding cube along the way, so every solid leaf
//! ends up with the face list of its convex region.

use crate::errors::Error;
use crate::float_types::{Real, BOUNDS_MAX};
use crate::geom::{Plane, PlaneSide, Polygon};
use nalgebra::Vector3;

use super::node::Node;

/// The six faces of the axis-aligned world cube of half-size
/// [`BOUNDS_MAX`], planes facing outward so that "front" is the cube
/// interior.
pub fn initial_bounds() -> Vec<Polygon> {
    let axes: [Vector3<Real>; 3] = [Vector3::x(), Vector3::y(), Vector3::z()];
    axes.iter()
        .flat_map(|axis| [*axis, -*axis])
        .map(|normal| Polygon::from_plane(Plane::new(normal, -BOUNDS_MAX), BOUNDS_MAX))
        .collect()
}

/// Close the open side a split left in `cell`: a fresh quad on `plane`
/// is clipped against each existing face's supporting plane (front piece
/// only) and appended as the cap.
fn fix_convex_cell(cell: &mut Vec<Polygon>, plane: Plane) -> Result<(), Error> {
    let mut cap = Polygon::from_plane(plane, BOUNDS_MAX);
    for face in cell.iter() {
        match cap.classify(&face.plane.plane) {
            PlaneSide::Spanning => {
                let (_, front) = cap.split(&face.plane.plane)?;
                cap = front;
            }
            PlaneSide::Back | PlaneSide::CoplanarBack => {
                // the cut plane misses this cell entirely
                return Ok(());
            }
            _ => {}
        }
    }
    cell.push(cap);
    Ok(())
}

/// Descend `target` through the tree, splitting `bounds` at every
/// internal node. Reaching a solid leaf stores `bounds` as that leaf's
/// filler faces, records the cell into `cells_out` and the leaf's
/// boundary polygons into `deleted_out`.
fn split_cell_until(
    target: &Polygon,
    bounds: Vec<Polygon>,
    cells_out: &mut Vec<Vec<Polygon>>,
    deleted_out: &mut Vec<Polygon>,
    node: &Node,
) -> Result<(), Error> {
    let (plane, back, front) = match node {
        Node::Leaf(leaf) => {
            if leaf.is_solid() {
                deleted_out.extend(leaf.polygons.iter().cloned());
                if leaf.set_filler(bounds.clone()) {
                    cells_out.push(bounds);
                }
            }
            return Ok(());
        }
        Node::Internal { plane, back, front } => (*plane, back, front),
    };

    let mut front_cell = Vec::with_capacity(bounds.len());
    let mut back_cell = Vec::with_capacity(bounds.len());
    let mut any_split = false;
    for polygon in bounds {
        match polygon.classify(&plane) {
            PlaneSide::Front | PlaneSide::CoplanarFront => front_cell.push(polygon),
            PlaneSide::Back | PlaneSide::CoplanarBack => back_cell.push(polygon),
            PlaneSide::Coplanar => {
                front_cell.push(polygon.clone());
                back_cell.push(polygon);
            }
            PlaneSide::Spanning => {
                let (back_piece, front_piece) = polygon.split(&plane)?;
                back_cell.push(back_piece);
                front_cell.push(front_piece);
                any_split = true;
            }
        }
    }
    if any_split {
        fix_convex_cell(&mut front_cell, plane)?;
        fix_convex_cell(&mut back_cell, plane.flipped())?;
    }

    match target.classify(&plane) {
        PlaneSide::Front | PlaneSide::CoplanarFront => {
            split_cell_until(target, front_cell, cells_out, deleted_out, front)
        }
        PlaneSide::Back | PlaneSide::CoplanarBack => {
            split_cell_until(target, back_cell, cells_out, deleted_out, back)
        }
        PlaneSide::Coplanar => {
            if target.plane.normal().dot(&plane.normal) > 0.0 {
                split_cell_until(target, front_cell, cells_out, deleted_out, front)
            } else {
                split_cell_until(target, back_cell, cells_out, deleted_out, back)
            }
        }
        PlaneSide::Spanning => {
            // a spanning polygon bounds solid regions on both sides of
            // the cut; descend with the matching piece each way
            let (back_piece, front_piece) = target.split(&plane)?;
            split_cell_until(&front_piece, front_cell, cells_out, deleted_out, front)?;
            split_cell_until(&back_piece, back_cell, cells_out, deleted_out, back)
        }
    }
}

/// Enumerate the convex cell of every solid leaf.
///
/// Repeatedly descends with the head of the work list, then drops every
/// boundary polygon of the leaf just discovered. Returns one face list
/// per solid leaf, in discovery order; the leaves keep the same lists as
/// their filler faces.
pub fn generate_cells(mut polygons: Vec<Polygon>, root: &Node) -> Result<Vec<Vec<Polygon>>, Error> {
    let mut cells = Vec::new();
    while !polygons.is_empty() {
        let target = polygons[0].clone();
        let mut deleted = Vec::new();
        split_cell_until(&target, initial_bounds(), &mut cells, &mut deleted, root)?;

        let before = polygons.len();
        polygons.retain(|p| !deleted.contains(p));
        if polygons.len() == before {
            // the tree split this polygon, so the leaf's pieces match
            // nothing verbatim; drop the head to keep making progress
            log::debug!("cell enumeration dropped an unmatched polygon");
            polygons.remove(0);
        }
    }

    let missed = root
        .leaves()
        .iter()
        .filter(|leaf| leaf.is_solid() && leaf.filler().is_none())
        .count();
    if missed > 0 {
        return Err(Error::InvariantViolation(format!(
            "{missed} solid leaves missed by cell enumeration"
        )));
    }
    Ok(cells)
}
