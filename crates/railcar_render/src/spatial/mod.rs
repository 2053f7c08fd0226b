//! Spatial queries for multi-block signage
//!
//! Resolves contiguous runs of same-type signage blocks so tiled textures
//! can be cropped to a block's position within its run.

mod span;

pub use span::{span_length, BlockPos, Direction, SignageWorld, TileSpan};
