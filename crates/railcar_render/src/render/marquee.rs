//! Scrolling marquee buffers
//!
//! Each scrollable display anchor consumes one slot of a per-renderable
//! buffer pool. Slots are handed out by sequential index per frame, so slot
//! `i` keeps addressing the same logical marquee for as long as rule and
//! anchor iteration order is stable. The pool grows on demand and never
//! shrinks; it is discarded with the owning evaluator.

use crate::render::host::{DrawHost, GlyphSource, TextImage};

/// Mutable state of one marquee slot
#[derive(Debug)]
pub struct ScrollBuffer {
    width: f32,
    height: f32,
    small_text: bool,
    text: String,
    image: Option<TextImage>,
    phase: f32,
}

impl ScrollBuffer {
    fn new(width: f32, height: f32, small_text: bool) -> Self {
        Self {
            width,
            height,
            small_text,
            text: String::new(),
            image: None,
            phase: 0.0,
        }
    }

    /// Display window width in block units
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Display window height in block units
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether the dense small-glyph mode was selected for this slot
    pub fn small_text(&self) -> bool {
        self.small_text
    }

    /// Current animation phase in block units of scrolled content
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Update the slot's content, regenerating the glyph image only when the
    /// text actually changed
    ///
    /// Empty text clears the image; the slot then draws nothing until text
    /// reappears.
    pub fn set_text(&mut self, text: &str, color: u32, glyphs: &mut dyn GlyphSource) {
        if text == self.text {
            return;
        }
        self.text.clear();
        self.text.push_str(text);
        self.image = if text.is_empty() {
            None
        } else {
            Some(glyphs.render_text(text, color, self.small_text))
        };
        self.phase = 0.0;
    }

    /// Advance the animation by `step` and draw the currently visible window
    ///
    /// The content repeats seamlessly: segments are laid out from `-phase`
    /// rightward and clipped to the window, so at most two partial quads are
    /// emitted for content wider than the window. The phase wraps at the
    /// content width.
    pub fn advance_and_draw(&mut self, step: f32, light: u32, host: &mut dyn DrawHost) {
        let Some(image) = self.image else { return };
        if image.width_px == 0 || image.height_px == 0 {
            return;
        }

        // Content width once the image is scaled to the window height.
        let content_width = image.width_px as f32 / image.height_px as f32 * self.height;

        let mut start = -self.phase;
        while start < self.width {
            let end = start + content_width;
            let clip_lo = start.max(0.0);
            let clip_hi = end.min(self.width);
            if clip_hi > clip_lo {
                let u0 = (clip_lo - start) / content_width;
                let u1 = (clip_hi - start) / content_width;
                host.draw_texture_region(
                    image,
                    clip_lo,
                    0.0,
                    clip_hi - clip_lo,
                    self.height,
                    u0,
                    0.0,
                    u1,
                    1.0,
                    light,
                );
            }
            start = end;
        }

        self.phase = (self.phase + step) % content_width;
    }
}

/// Grow-on-demand pool of marquee slots
#[derive(Debug)]
pub struct MarqueePool {
    buffers: Vec<ScrollBuffer>,
    cursor: usize,
    small_text_threshold: f32,
}

impl MarqueePool {
    /// Create an empty pool
    pub fn new(small_text_threshold: f32) -> Self {
        Self {
            buffers: Vec::new(),
            cursor: 0,
            small_text_threshold,
        }
    }

    /// Reset the slot cursor; called once at the start of every frame
    pub fn begin_frame(&mut self) {
        self.cursor = 0;
    }

    /// Claim the next sequential slot, growing the pool if needed
    ///
    /// New slots are sized to the requesting anchor; existing slots keep
    /// their original size even if a differently-sized anchor lands on them
    /// after a descriptor change.
    pub fn next_slot(&mut self, width: f32, height: f32) -> &mut ScrollBuffer {
        while self.buffers.len() <= self.cursor {
            self.buffers.push(ScrollBuffer::new(
                width,
                height,
                height < self.small_text_threshold,
            ));
        }
        let slot = &mut self.buffers[self.cursor];
        self.cursor += 1;
        slot
    }

    /// Number of slots allocated so far
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether no slot has been allocated yet
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}
