//! BSP construction: recursively partition the union's surviving
//! polygons along their own supporting planes, labeling leaves solid or
//! empty, then split a world cube through the finished tree to enumerate
//! the solid cells.

pub mod cells;
pub mod node;

pub use cells::generate_cells;
pub use node::{Leaf, Node};

use crate::errors::Error;
use crate::geom::{PlaneSide, Polygon};

/// A polygon plus the flag recording whether it has served as a pivot.
/// Split pieces inherit the flag of their source.
#[derive(Debug, Clone)]
struct Record {
    polygon: Polygon,
    used: bool,
}

/// Build the tree from the unioned polygon list.
///
/// Each level takes the first unused polygon as pivot and partitions the
/// whole list against its plane. A back side with nothing unused left is
/// an empty (exterior) leaf; a front side with nothing unused left is a
/// solid leaf carrying the surviving boundary. List order is semantic:
/// the pivot choice, and with it the tree shape, follows it.
pub fn build(polygons: Vec<Polygon>) -> Result<Node, Error> {
    if polygons.is_empty() {
        return Ok(Node::Leaf(Leaf::empty()));
    }
    build_records(
        polygons
            .into_iter()
            .map(|polygon| Record {
                polygon,
                used: false,
            })
            .collect(),
    )
}

fn build_records(mut records: Vec<Record>) -> Result<Node, Error> {
    let pivot = records
        .iter_mut()
        .find(|r| !r.used)
        .ok_or_else(|| Error::InvariantViolation("BSP recursion with no unused polygon".into()))?;
    pivot.used = true;
    let plane = pivot.polygon.plane.plane;

    let mut front = Vec::with_capacity(records.len());
    let mut back = Vec::new();
    for record in records {
        match record.polygon.classify(&plane) {
            PlaneSide::Front | PlaneSide::CoplanarFront => front.push(record),
            PlaneSide::Back | PlaneSide::CoplanarBack => back.push(record),
            PlaneSide::Coplanar => {
                if record.polygon.plane.normal().dot(&plane.normal) > 0.0 {
                    front.push(record);
                } else {
                    back.push(record);
                }
            }
            PlaneSide::Spanning => {
                let (back_piece, front_piece) = record.polygon.split(&plane)?;
                back.push(Record {
                    polygon: back_piece,
                    used: record.used,
                });
                front.push(Record {
                    polygon: front_piece,
                    used: record.used,
                });
            }
        }
    }

    let back_node = if back.iter().all(|r| r.used) {
        // covers the empty list too
        Node::Leaf(Leaf::empty())
    } else {
        build_records(back)?
    };

    let front_node = if front.iter().all(|r| r.used) {
        Node::Leaf(Leaf::solid(
            front.into_iter().map(|r| r.polygon).collect(),
        ))
    } else {
        build_records(front)?
    };

    Ok(Node::Internal {
        plane,
        back: Box::new(back_node),
        front: Box::new(front_node),
    })
}
