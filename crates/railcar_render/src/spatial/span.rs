//! Contiguous signage span resolution
//!
//! A tiled station sign spreads one texture over a row of identical blocks.
//! Each block resolves its position within the run by walking perpendicular
//! to its facing, in both directions, counting neighbors of the same signage
//! kind. The counts drive the UV window of this block's tile and decide
//! which block of the run carries the logo.

/// Integer block position in world space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    /// East/west coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
    /// North/south coordinate
    pub z: i32,
}

impl BlockPos {
    /// Create a block position
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The position `distance` blocks away in `direction`
    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        let (dx, dz) = direction.step();
        Self {
            x: self.x + dx * distance,
            y: self.y,
            z: self.z + dz * distance,
        }
    }
}

/// Horizontal block facing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward negative Z
    North,
    /// Toward positive Z
    South,
    /// Toward positive X
    East,
    /// Toward negative X
    West,
}

impl Direction {
    /// Unit step of this direction in the X/Z plane
    pub fn step(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// The direction 90° clockwise, seen from above
    pub fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// The direction 90° counter-clockwise, seen from above
    pub fn counter_clockwise(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }
}

/// World queries the span resolver needs, implemented by the host
pub trait SignageWorld {
    /// Facing of the signage block at `pos`, if one is there
    fn facing(&self, pos: BlockPos) -> Option<Direction>;

    /// Whether the block at `probe` is the same signage kind as at `origin`
    fn same_signage(&self, origin: BlockPos, probe: BlockPos) -> bool;
}

/// Length of the contiguous run from `pos` in one perpendicular direction
///
/// Counts `pos` itself, so an isolated block reports 1. Walking direction is
/// 90° clockwise of the block's facing for `look_right`, counter-clockwise
/// otherwise. An absent world or a facing-less block also reports 1.
pub fn span_length(world: Option<&dyn SignageWorld>, pos: BlockPos, look_right: bool) -> u32 {
    let Some(world) = world else { return 1 };
    let Some(facing) = world.facing(pos) else { return 1 };
    let walk = if look_right {
        facing.clockwise()
    } else {
        facing.counter_clockwise()
    };

    let mut length = 1;
    while world.same_signage(pos, pos.offset(walk, length as i32)) {
        length += 1;
    }
    length
}

/// A block's position within its contiguous signage run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpan {
    /// Run length looking left, counting this block
    pub length_left: u32,
    /// Run length looking right, counting this block
    pub length_right: u32,
}

impl TileSpan {
    /// Resolve both run lengths for the block at `pos`
    pub fn resolve(world: Option<&dyn SignageWorld>, pos: BlockPos) -> Self {
        Self {
            length_left: span_length(world, pos, false),
            length_right: span_length(world, pos, true),
        }
    }

    /// Total blocks in the run (this block counted once)
    pub fn total(self) -> u32 {
        self.length_left + self.length_right - 1
    }

    /// Horizontal UV window of this block's tile within the run texture
    pub fn uv_window(self) -> (f32, f32) {
        let total = self.total() as f32;
        (
            (self.length_left - 1) as f32 / total,
            self.length_left as f32 / total,
        )
    }

    /// Whether this block is position 1 of its run (carries the logo)
    pub fn is_run_start(self) -> bool {
        self.length_left == 1
    }

    /// Logo edge size for a run-start block, by signage style
    ///
    /// Even styles use the half-height logo, odd styles the full-height one.
    pub fn logo_size(style: u32) -> f32 {
        if style % 2 == 0 {
            0.5
        } else {
            1.0
        }
    }
}
