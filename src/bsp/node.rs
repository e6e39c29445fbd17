//! BSP node structure: a tagged variant, not a class hierarchy, so every
//! traversal dispatches by exhaustive match.

use crate::float_types::{side_epsilon, Real};
use crate::geom::{point_side, Plane, PlaneSide, Polygon};
use nalgebra::Point3;
use std::sync::OnceLock;

/// A node of the BSP tree: either an internal split or a leaf region.
#[derive(Debug, Clone)]
pub enum Node {
    Internal {
        plane: Plane,
        back: Box<Node>,
        front: Box<Node>,
    },
    Leaf(Leaf),
}

/// A leaf region. Leaves holding boundary polygons are *solid* (interior
/// of the modeled solid); polygon-free leaves are *empty* (exterior).
/// The filler faces describing the leaf's convex cell volume are written
/// exactly once, by cell enumeration.
#[derive(Debug, Clone)]
pub struct Leaf {
    pub polygons: Vec<Polygon>,
    filler: OnceLock<Vec<Polygon>>,
}

impl Leaf {
    pub fn empty() -> Self {
        Leaf {
            polygons: Vec::new(),
            filler: OnceLock::new(),
        }
    }

    pub fn solid(polygons: Vec<Polygon>) -> Self {
        Leaf {
            polygons,
            filler: OnceLock::new(),
        }
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        !self.polygons.is_empty()
    }

    /// The convex cell faces, once enumeration has visited this leaf.
    pub fn filler(&self) -> Option<&Vec<Polygon>> {
        self.filler.get()
    }

    /// Store the cell faces. Returns false if the leaf was already
    /// filled (the first visit wins).
    pub fn set_filler(&self, faces: Vec<Polygon>) -> bool {
        self.filler.set(faces).is_ok()
    }
}

impl Node {
    /// The leaf containing `point`. Coplanar points descend front.
    pub fn locate(&self, point: &Point3<Real>) -> &Leaf {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf,
                Node::Internal { plane, back, front } => {
                    node = match point_side(point, plane, side_epsilon()) {
                        PlaneSide::Back => back,
                        _ => front,
                    };
                }
            }
        }
    }

    /// Every leaf, in front-before-back pre-order.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf(leaf) => result.push(leaf),
                Node::Internal { back, front, .. } => {
                    stack.push(back);
                    stack.push(front);
                }
            }
        }
        result
    }

    /// Splitting planes in pivot order (pre-order over internal nodes).
    /// Two builds of the same polygon list produce the same sequence.
    pub fn split_planes(&self) -> Vec<Plane> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Node::Internal { plane, back, front } = node {
                result.push(*plane);
                stack.push(back);
                stack.push(front);
            }
        }
        result
    }

    /// Total boundary polygons stored in leaves.
    pub fn polygon_count(&self) -> usize {
        self.leaves().iter().map(|l| l.polygons.len()).sum()
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Internal { back, front, .. } => 1 + back.depth().max(front.depth()),
        }
    }
}
