//! Input/output: the brush map text format and the BSP debug dump.

pub mod json;
pub mod map;
