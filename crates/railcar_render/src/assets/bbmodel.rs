//! Model JSON loader and geometry compiler
//!
//! Parses the authoring tool's model JSON (a flat `elements` list plus a
//! named `outliner` hierarchy) and compiles it into a [`PartTree`]: element
//! transforms resolved into part-local translation/rotation, one geometry box
//! per element, and a display anchor for every flat face eligible to carry
//! overlay text.
//!
//! The authoring tool's X and Y axes are mirrored relative to render space,
//! which is why origins and rotations are negated on those axes. All
//! block-unit values are the authored coordinates divided by 16.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::foundation::math::{utils, Vec3};
use crate::scene::{DisplayAnchor, Part, PartCube, PartKey, PartTree};

/// Authoring unit scale: 16 model units per block
const UNITS_PER_BLOCK: f32 = 16.0;

/// Errors produced while loading or compiling a model
///
/// Any error here is fatal for the whole model: a half-built hierarchy has
/// undefined transforms, so no partial tree is ever returned.
#[derive(Error, Debug)]
pub enum ModelError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON or missing required fields
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The outliner references an element uuid that does not exist
    #[error("Outliner references unknown element '{0}'")]
    UnknownElement(String),
}

/// Raw model document
#[derive(Debug, Deserialize)]
pub struct ModelJson {
    /// Texture resolution block
    pub resolution: ResolutionJson,
    /// Flat list of geometry definitions
    pub elements: Vec<ElementJson>,
    /// Named hierarchy referencing element uuids or nested groups
    pub outliner: Vec<OutlinerNode>,
}

/// Texture resolution of the model
#[derive(Debug, Deserialize)]
pub struct ResolutionJson {
    /// Texture width in texels
    pub width: u32,
    /// Texture height in texels
    pub height: u32,
}

/// One geometry definition from the `elements` list
#[derive(Debug, Deserialize)]
pub struct ElementJson {
    /// Unique element id
    pub uuid: String,
    /// Pivot origin in model units
    #[serde(default)]
    pub origin: [f32; 3],
    /// Rotation in degrees around the origin
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Lower box corner in model units
    #[serde(default)]
    pub from: [f32; 3],
    /// Upper box corner in model units
    #[serde(default)]
    pub to: [f32; 3],
    /// Texture offset in texels
    #[serde(default)]
    pub uv_offset: [i32; 2],
    /// Symmetric box inflation
    #[serde(default)]
    pub inflate: f32,
    /// Shading flag; an explicit `false` selects mirrored UV mapping
    #[serde(default = "default_shade")]
    pub shade: bool,
}

fn default_shade() -> bool {
    true
}

/// One entry of the `outliner` hierarchy
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OutlinerNode {
    /// Reference to an element by uuid
    Element(String),
    /// Nested named group
    Group(OutlinerGroup),
}

/// A named group in the outliner
#[derive(Debug, Deserialize)]
pub struct OutlinerGroup {
    /// Group name, addressable from render descriptor rules
    pub name: String,
    /// Child nodes in authoring order
    #[serde(default)]
    pub children: Vec<OutlinerNode>,
}

/// Model file loader
pub struct ModelLoader;

impl ModelLoader {
    /// Load a model JSON file and compile it into a part tree
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<PartTree, ModelError> {
        let contents = std::fs::read_to_string(path)?;
        Self::load_str(&contents)
    }

    /// Parse model JSON text and compile it into a part tree
    pub fn load_str(json: &str) -> Result<PartTree, ModelError> {
        let model: ModelJson = serde_json::from_str(json)?;
        let tree = compile(&model)?;
        log::info!(
            "Compiled model: {} parts, {} roots, texture {}x{}",
            tree.len(),
            tree.roots().len(),
            tree.texture_size().0,
            tree.texture_size().1
        );
        Ok(tree)
    }
}

/// Compile a parsed model document into a part tree
pub fn compile(model: &ModelJson) -> Result<PartTree, ModelError> {
    let mut tree = PartTree::new((model.resolution.width, model.resolution.height));

    // One part per element, before the hierarchy exists.
    let mut by_uuid: HashMap<&str, PartKey> = HashMap::new();
    for element in &model.elements {
        let key = tree.insert(Part::default());
        by_uuid.insert(&element.uuid, key);
    }

    // Walk the outliner, attaching element parts to their groups and
    // recording each element's immediate named ancestor for anchor placement.
    let mut parent_of: HashMap<&str, &str> = HashMap::new();
    let mut root_groups = Vec::new();
    for node in &model.outliner {
        match node {
            OutlinerNode::Group(group) => {
                let key = add_group(group, &mut tree, &by_uuid, &mut parent_of)?;
                tree.add_root(key);
                root_groups.push(key);
            }
            OutlinerNode::Element(uuid) => {
                // A bare element at the outliner root has no named ancestor;
                // it renders with its group-less transform and carries no
                // display anchors.
                let key = resolve_element(uuid, &by_uuid)?;
                tree.add_root(key);
            }
        }
    }

    // Resolve element transforms and geometry after the hierarchy exists.
    for element in &model.elements {
        let key = by_uuid[element.uuid.as_str()];
        let [ox, oy, oz] = element.origin;
        let [rx, ry, rz] = element.rotation;
        let from = Vec3::from(element.from);
        let to = Vec3::from(element.to);

        let part = tree.part_mut(key);
        part.translation = Vec3::new(-ox, -oy, oz);
        part.rotation = Vec3::new(
            -utils::deg_to_rad(rx),
            -utils::deg_to_rad(ry),
            utils::deg_to_rad(rz),
        );
        part.cubes.push(PartCube {
            offset: Vec3::new(ox - to.x, oy - to.y, from.z - oz),
            size: Vec3::new(
                (to.x - from.x).round(),
                (to.y - from.y).round(),
                (to.z - from.z).round(),
            ),
            uv_offset: element.uv_offset,
            inflate: element.inflate,
            mirror: !element.shade,
        });

        // A face that is flat but extended in both X and Y can carry a
        // display; anchor it under the element's immediate named ancestor.
        let width = (to.x - from.x).abs() / UNITS_PER_BLOCK;
        let height = (to.y - from.y).abs() / UNITS_PER_BLOCK;
        if width > 0.0 && height > 0.0 {
            if let Some(parent) = parent_of.get(element.uuid.as_str()) {
                let anchor = DisplayAnchor {
                    origin: Vec3::new(ox, oy, oz) / UNITS_PER_BLOCK,
                    offset: Vec3::new(
                        (from.x + to.x) / 2.0 - ox,
                        (from.y + to.y) / 2.0 - oy,
                        from.z - oz,
                    ) / UNITS_PER_BLOCK,
                    rotation: Vec3::new(-rx, -ry, rz),
                    width,
                    height,
                };
                tree.push_anchor(parent, anchor);
            }
        }
    }

    // Root-level named parts stay constructible even with no direct geometry.
    for key in root_groups {
        tree.part_mut(key).cubes.push(PartCube::degenerate());
    }

    Ok(tree)
}

fn add_group<'a>(
    group: &'a OutlinerGroup,
    tree: &mut PartTree,
    by_uuid: &HashMap<&str, PartKey>,
    parent_of: &mut HashMap<&'a str, &'a str>,
) -> Result<PartKey, ModelError> {
    let key = tree.insert(Part::named(group.name.as_str()));
    for child in &group.children {
        match child {
            OutlinerNode::Group(nested) => {
                let child_key = add_group(nested, tree, by_uuid, parent_of)?;
                tree.add_child(key, child_key);
            }
            OutlinerNode::Element(uuid) => {
                let child_key = resolve_element(uuid, by_uuid)?;
                tree.add_child(key, child_key);
                parent_of.insert(uuid, &group.name);
            }
        }
    }
    tree.register_name(&group.name, key);
    Ok(key)
}

fn resolve_element(uuid: &str, by_uuid: &HashMap<&str, PartKey>) -> Result<PartKey, ModelError> {
    by_uuid
        .get(uuid)
        .copied()
        .ok_or_else(|| ModelError::UnknownElement(uuid.to_owned()))
}
