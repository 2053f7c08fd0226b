//! Asset loading
//!
//! Loaders for the two JSON documents a renderable model is built from: the
//! authoring tool's model file and the render descriptor. Both fail
//! atomically at load time; nothing here runs on the per-frame path.

pub mod bbmodel;
pub mod descriptor_loader;

pub use bbmodel::{ModelError, ModelJson, ModelLoader};
pub use descriptor_loader::{DescriptorError, DescriptorLoader};
