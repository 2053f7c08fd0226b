//! Per-frame rendering
//!
//! Everything that runs inside the host's render callback: the descriptor
//! walk, car filtering, display text resolution, and the scrolling marquee
//! state. The geometry itself is drawn by the host through the [`DrawHost`]
//! trait; this module decides what to draw where.

pub mod context;
pub mod descriptor;
pub mod display_text;
pub mod evaluator;
pub mod filter;
pub mod host;
pub mod marquee;

pub use context::{DoorOffsets, RouteInfo, StationInfo, TrainSnapshot};
pub use descriptor::{
    DisplayConfig, DisplayTextKind, DoorOffsetMode, PartRenderRule, RenderCondition,
    RenderDescriptor, RenderStage,
};
pub use evaluator::{FrameInput, RailcarModel};
pub use filter::{filter_strength, FilterCache};
pub use host::{DrawHost, GlyphSource, TextImage, TextImageHandle};
pub use marquee::{MarqueePool, ScrollBuffer};
