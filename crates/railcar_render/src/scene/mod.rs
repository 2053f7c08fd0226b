//! Compiled model scene structures
//!
//! The part tree produced by the model compiler: an arena of part nodes with
//! resolved local transforms, per-part geometry boxes, and the flat-face
//! display anchors used to place overlay text. Built once at load time and
//! immutable afterward.

mod part_tree;

pub use part_tree::{DisplayAnchor, Part, PartCube, PartKey, PartTree};
