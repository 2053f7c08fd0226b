//! # Railcar Render
//!
//! A resource-pack driven railcar model compiler and display renderer.
//!
//! Model geometry authored in a Blockbench-style editor is compiled once
//! into a part tree with resolved transforms and flat-face display anchors.
//! Every frame, a declarative render descriptor decides per car, per part
//! and per display whether and how each part is drawn, including
//! door-linked position offsets and scrolling marquee text.
//!
//! ## Features
//!
//! - **Geometry Compiler**: model JSON to an arena-backed part hierarchy
//! - **Render Descriptor**: validated per-part render rules, read-only
//! - **Car Filters**: whitelist/blacklist car selection, memoized
//! - **Displays**: destination/route/station text, static or scrolling
//! - **Span Resolver**: contiguous-run sizing for multi-block signage
//!
//! Drawing itself stays with the host: the evaluator issues calls through
//! the [`render::DrawHost`] and [`render::GlyphSource`] traits and never
//! touches vertex buffers, textures, or fonts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use railcar_render::prelude::*;
//! use railcar_render::scene::{PartKey, PartTree};
//!
//! /// Host stub; a real implementation forwards to the render pipeline.
//! struct NullHost;
//!
//! impl DrawHost for NullHost {
//!     fn push_transform(&mut self) {}
//!     fn pop_transform(&mut self) {}
//!     fn translate(&mut self, _x: f32, _y: f32, _z: f32) {}
//!     fn rotate_x_degrees(&mut self, _degrees: f32) {}
//!     fn rotate_y_degrees(&mut self, _degrees: f32) {}
//!     fn rotate_z_degrees(&mut self, _degrees: f32) {}
//!     fn draw_part(&mut self, _tree: &PartTree, _part: PartKey, _light: u32,
//!                  _x: f32, _z: f32, _flipped: bool) {}
//!     fn draw_texture_region(&mut self, _image: TextImage, _x: f32, _y: f32,
//!                            _width: f32, _height: f32, _u0: f32, _v0: f32,
//!                            _u1: f32, _v1: f32, _light: u32) {}
//!     fn draw_centered_text(&mut self, _text: &str, _color: u32,
//!                           _max_width: f32, _max_height: f32, _light: u32) {}
//! }
//!
//! impl GlyphSource for NullHost {
//!     fn render_text(&mut self, text: &str, _color: u32, _small: bool) -> TextImage {
//!         TextImage {
//!             handle: TextImageHandle(0),
//!             width_px: text.chars().count() as u32 * 6,
//!             height_px: 8,
//!         }
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tree = ModelLoader::load_file("train.bbmodel.json")?;
//!     let descriptor = DescriptorLoader::load_file("train_properties.json")?;
//!     let mut model = RailcarModel::new(tree, descriptor, RenderSettings::default());
//!
//!     let snapshot = TrainSnapshot::default();
//!     let frame = FrameInput {
//!         stage: RenderStage::Exterior,
//!         light: 15,
//!         doors: DoorOffsets::closed(),
//!         current_car: 0,
//!         total_cars: 1,
//!         head_is_front: true,
//!         render_details: true,
//!         snapshot: &snapshot,
//!     };
//!     let (mut host, mut glyphs) = (NullHost, NullHost);
//!     model.render(&frame, &mut host, &mut glyphs);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod core;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod spatial;

pub use render::evaluator::{FrameInput, RailcarModel};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        assets::{DescriptorError, DescriptorLoader, ModelError, ModelLoader},
        core::config::{Config, ConfigError, RenderSettings},
        foundation::math::{Vec2, Vec3},
        render::{
            DisplayTextKind, DoorOffsetMode, DoorOffsets, DrawHost, FrameInput, GlyphSource,
            RailcarModel, RenderCondition, RenderDescriptor, RenderStage, RouteInfo, StationInfo,
            TextImage, TextImageHandle, TrainSnapshot,
        },
        scene::{DisplayAnchor, PartTree},
        spatial::{span_length, BlockPos, Direction, SignageWorld, TileSpan},
    };
}
