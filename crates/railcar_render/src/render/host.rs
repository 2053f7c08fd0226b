//! Host abstraction traits for drawing and glyph generation
//!
//! This module defines the traits a host rendering pipeline must implement
//! for the frame evaluator to draw through. The evaluator only ever invokes
//! these primitives; it never touches vertex buffers, textures, or fonts
//! itself.

use crate::scene::{PartKey, PartTree};

/// Handle to a glyph image owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextImageHandle(pub u64);

/// A rendered text image: host-owned pixels plus their dimensions
///
/// The pixel dimensions drive marquee content-width math, so hosts must
/// report the full untruncated text width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextImage {
    /// Opaque host handle for the image
    pub handle: TextImageHandle,
    /// Image width in pixels
    pub width_px: u32,
    /// Image height in pixels
    pub height_px: u32,
}

/// Glyph image generation, implemented by the host's text rasterizer
pub trait GlyphSource {
    /// Rasterize `text` into an image
    ///
    /// `small` selects the denser glyph mode used by low displays. Called
    /// only when a marquee's text content actually changes.
    fn render_text(&mut self, text: &str, color: u32, small: bool) -> TextImage;
}

/// Drawing primitives, implemented by the host rendering pipeline
///
/// Transform calls nest: `push_transform`/`pop_transform` bracket every
/// display draw issued by the evaluator, and rotations are given in degrees
/// exactly as carried on display anchors.
pub trait DrawHost {
    /// Push a copy of the current transform
    fn push_transform(&mut self);

    /// Pop back to the previously pushed transform
    fn pop_transform(&mut self);

    /// Translate the current transform
    fn translate(&mut self, x: f32, y: f32, z: f32);

    /// Rotate the current transform around the X axis
    fn rotate_x_degrees(&mut self, degrees: f32);

    /// Rotate the current transform around the Y axis
    fn rotate_y_degrees(&mut self, degrees: f32);

    /// Rotate the current transform around the Z axis
    fn rotate_z_degrees(&mut self, degrees: f32);

    /// Draw a part and its children under the current transform
    ///
    /// The position is in model units: hosts translate by
    /// `(x / 16, 0, z / 16)` before walking the part's local transforms.
    /// Flipped draws rotate 180° about Y first (the horizontally mirrored
    /// variant).
    fn draw_part(&mut self, tree: &PartTree, part: PartKey, light: u32, x: f32, z: f32, flipped: bool);

    /// Draw a window of a text image as a textured quad in the local X/Y
    /// plane at `(x, y)` with size `(width, height)`, sampling the UV
    /// rectangle `(u0, v0)..(u1, v1)`
    fn draw_texture_region(
        &mut self,
        image: TextImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        u0: f32,
        v0: f32,
        u1: f32,
        v1: f32,
        light: u32,
    );

    /// Draw a single line of text centered in a `max_width` × `max_height`
    /// box around the current transform origin, shrunk to fit
    fn draw_centered_text(&mut self, text: &str, color: u32, max_width: f32, max_height: f32, light: u32);
}
