//! JSON dump of a built BSP tree, for offline inspection.
//!
//! Internal nodes serialize as `{"plane": {"n": [x,y,z], "d": d},
//! "back": ..., "front": ...}`, leaves as `{"solid": bool,
//! "faces": [[[x,y,z], ...], ...]}`.

use crate::bsp::Node;
use crate::errors::Error;
use serde_json::{json, Value};
use std::path::Path;

pub fn tree_to_value(node: &Node) -> Value {
    match node {
        Node::Internal { plane, back, front } => json!({
            "plane": {
                "n": [plane.normal.x, plane.normal.y, plane.normal.z],
                "d": plane.d,
            },
            "back": tree_to_value(back),
            "front": tree_to_value(front),
        }),
        Node::Leaf(leaf) => json!({
            "solid": leaf.is_solid(),
            "faces": leaf
                .polygons
                .iter()
                .map(|polygon| {
                    polygon
                        .points
                        .iter()
                        .map(|p| vec![p.x, p.y, p.z])
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>(),
        }),
    }
}

/// Pretty-print the tree to `path` (conventionally `./bsptree.json`).
pub fn write_tree(node: &Node, path: impl AsRef<Path>) -> Result<(), Error> {
    let text = serde_json::to_string_pretty(&tree_to_value(node)).map_err(std::io::Error::from)?;
    std::fs::write(path, text)?;
    Ok(())
}
