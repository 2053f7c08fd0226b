//! Part tree arena and display anchors
//!
//! The hierarchy is a rooted tree with exclusive ownership: group nodes are
//! created fresh during compilation and element nodes are leaves, so no
//! back-edges can exist. Nodes live in a slotmap arena and refer to children
//! by key, which keeps the structure trivially acyclic and cheap to walk.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::Vec3;

new_key_type! {
    /// Handle to a part node in the arena
    pub struct PartKey;
}

/// One geometry box of a part
///
/// Sizes are rounded to whole model units, matching the authoring tool's
/// box dimensions; `inflate` grows the box symmetrically without affecting
/// the rounded size.
#[derive(Debug, Clone, PartialEq)]
pub struct PartCube {
    /// Box corner offset relative to the part pivot
    pub offset: Vec3,
    /// Box dimensions in model units (per-axis rounded)
    pub size: Vec3,
    /// Texture offset in texels
    pub uv_offset: [i32; 2],
    /// Symmetric box inflation in model units
    pub inflate: f32,
    /// Horizontally mirrored UV mapping
    pub mirror: bool,
}

impl PartCube {
    /// A zero-size cube, used to keep empty group parts constructible
    pub fn degenerate() -> Self {
        Self {
            offset: Vec3::zeros(),
            size: Vec3::zeros(),
            uv_offset: [0, 0],
            inflate: 0.0,
            mirror: false,
        }
    }
}

/// A named node in the compiled model hierarchy
///
/// Rotation is stored in radians. Group nodes carry a name and usually no
/// geometry; element nodes carry geometry and no name. A part with zero-volume
/// geometry is valid and acts as a pure pivot.
#[derive(Debug, Clone)]
pub struct Part {
    /// Group name, `None` for element leaves
    pub name: Option<String>,
    /// Local translation
    pub translation: Vec3,
    /// Local rotation in radians
    pub rotation: Vec3,
    /// Geometry boxes owned by this part
    pub cubes: Vec<PartCube>,
    /// Child part keys, in authoring order
    pub children: Vec<PartKey>,
}

impl Default for Part {
    fn default() -> Self {
        Self {
            name: None,
            translation: Vec3::zeros(),
            rotation: Vec3::zeros(),
            cubes: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl Part {
    /// Create an empty named group part
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A computed flat-face placement used to position overlay text on a part
///
/// Anchor rotations are stored in degrees and applied through the host's
/// rotate-by-degrees primitives; only part-node rotations are pre-converted
/// to radians.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayAnchor {
    /// Face origin in block units
    pub origin: Vec3,
    /// Face-center offset from the origin in block units
    pub offset: Vec3,
    /// Anchor rotation in degrees
    pub rotation: Vec3,
    /// Face width in block units
    pub width: f32,
    /// Face height in block units
    pub height: f32,
}

/// The compiled part hierarchy of one model
///
/// Fixed after construction: parts are never re-parented and anchors never
/// change. All render-time access is read-only.
#[derive(Debug, Default)]
pub struct PartTree {
    parts: SlotMap<PartKey, Part>,
    roots: Vec<PartKey>,
    named: HashMap<String, PartKey>,
    anchors: HashMap<String, Vec<DisplayAnchor>>,
    texture_size: (u32, u32),
}

impl PartTree {
    /// Create an empty tree for the given texture resolution
    pub(crate) fn new(texture_size: (u32, u32)) -> Self {
        Self {
            texture_size,
            ..Self::default()
        }
    }

    pub(crate) fn insert(&mut self, part: Part) -> PartKey {
        self.parts.insert(part)
    }

    pub(crate) fn add_child(&mut self, parent: PartKey, child: PartKey) {
        self.parts[parent].children.push(child);
    }

    pub(crate) fn add_root(&mut self, key: PartKey) {
        self.roots.push(key);
    }

    pub(crate) fn register_name(&mut self, name: &str, key: PartKey) {
        self.named.insert(name.to_owned(), key);
    }

    pub(crate) fn push_anchor(&mut self, name: &str, anchor: DisplayAnchor) {
        self.anchors.entry(name.to_owned()).or_default().push(anchor);
    }

    pub(crate) fn part_mut(&mut self, key: PartKey) -> &mut Part {
        &mut self.parts[key]
    }

    /// Look up a part node by key
    pub fn part(&self, key: PartKey) -> Option<&Part> {
        self.parts.get(key)
    }

    /// Resolve a named group part
    pub fn find(&self, name: &str) -> Option<PartKey> {
        self.named.get(name).copied()
    }

    /// Display anchors attached to a named part (empty if none)
    pub fn anchors(&self, name: &str) -> &[DisplayAnchor] {
        self.anchors.get(name).map_or(&[], Vec::as_slice)
    }

    /// Root part keys in authoring order
    pub fn roots(&self) -> &[PartKey] {
        &self.roots
    }

    /// Number of parts in the arena
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the tree holds no parts
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Texture resolution the model was authored against
    pub fn texture_size(&self) -> (u32, u32) {
        self.texture_size
    }

    /// Keys of all parts reachable from the roots, depth-first
    pub fn reachable(&self) -> Vec<PartKey> {
        let mut seen = Vec::new();
        let mut stack: Vec<PartKey> = self.roots.iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            if let Some(part) = self.parts.get(key) {
                stack.extend(part.children.iter().rev().copied());
            }
        }
        seen
    }
}
