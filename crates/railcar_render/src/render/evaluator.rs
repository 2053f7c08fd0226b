//! Per-frame render descriptor evaluation
//!
//! Walks the render descriptor in document order every frame and decides,
//! per rule, whether and how the referenced part is drawn: render-stage and
//! skip-far gates first, then the memoized car filter, then the door/motion
//! condition, then door-linked position offsets, then the draw itself plus
//! any overlay displays on the part's anchors.
//!
//! One [`RailcarModel`] instance owns the mutable evaluation state (filter
//! cache, marquee pool, slot cursor) for exactly one renderable, such as a
//! specific train car set or a model preview. Hosts rendering several instances keep
//! one evaluator each; nothing here is shared.

use crate::core::config::RenderSettings;
use crate::render::context::{DoorOffsets, TrainSnapshot};
use crate::render::descriptor::{RenderDescriptor, RenderStage};
use crate::render::display_text::{parse_display_color, resolve_text};
use crate::render::filter::FilterCache;
use crate::render::host::{DrawHost, GlyphSource};
use crate::render::marquee::MarqueePool;
use crate::scene::PartTree;

/// Inputs captured once per frame by the caller
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Render pass currently being drawn
    pub stage: RenderStage,
    /// Packed light value forwarded to every draw call
    pub light: u32,
    /// Current door opening offsets
    pub doors: DoorOffsets,
    /// Zero-based index of the car being drawn
    pub current_car: usize,
    /// Total cars in the train
    pub total_cars: usize,
    /// Whether the train is travelling head-first
    pub head_is_front: bool,
    /// Whether detail rendering (displays, far-skippable parts) is enabled
    pub render_details: bool,
    /// Train/route/station state for display text
    pub snapshot: &'a TrainSnapshot,
}

/// A compiled model plus its render descriptor and evaluation state
pub struct RailcarModel {
    tree: PartTree,
    descriptor: RenderDescriptor,
    settings: RenderSettings,
    filter_cache: FilterCache,
    marquee: MarqueePool,
}

impl RailcarModel {
    /// Assemble a renderable model from its compiled pieces
    pub fn new(tree: PartTree, descriptor: RenderDescriptor, settings: RenderSettings) -> Self {
        let marquee = MarqueePool::new(settings.small_text_threshold);
        Self {
            tree,
            descriptor,
            settings,
            filter_cache: FilterCache::new(),
            marquee,
        }
    }

    /// The compiled part tree
    pub fn tree(&self) -> &PartTree {
        &self.tree
    }

    /// The render descriptor driving evaluation
    pub fn descriptor(&self) -> &RenderDescriptor {
        &self.descriptor
    }

    /// Number of door openings per car side the model supports
    pub fn door_capacity(&self) -> u32 {
        self.descriptor.door_max
    }

    /// Diagnostic access to the car-filter cache
    pub fn filter_cache(&self) -> &FilterCache {
        &self.filter_cache
    }

    /// Number of marquee slots allocated so far
    pub fn marquee_slots(&self) -> usize {
        self.marquee.len()
    }

    /// Evaluate every descriptor rule for one car and one render pass
    ///
    /// Invoked once per part-layer per frame. Per-rule problems (unknown
    /// part names, malformed filter tokens, missing anchors) skip only the
    /// affected rule and never interrupt the frame.
    pub fn render(
        &mut self,
        frame: &FrameInput<'_>,
        host: &mut dyn DrawHost,
        glyphs: &mut dyn GlyphSource,
    ) {
        let tree = &self.tree;
        let descriptor = &self.descriptor;
        let settings = &self.settings;
        let filter_cache = &mut self.filter_cache;
        let marquee = &mut self.marquee;

        marquee.begin_frame();

        for rule in &descriptor.parts {
            if (!frame.render_details && rule.skip_if_far) || rule.stage != Some(frame.stage) {
                continue;
            }
            if filter_cache.should_skip(
                &rule.whitelisted_cars,
                &rule.blacklisted_cars,
                frame.current_car,
                frame.total_cars,
            ) {
                continue;
            }
            if rule.render_condition.skips(frame.doors, frame.head_is_front) {
                continue;
            }
            let Some(part) = tree.find(&rule.name) else {
                // Descriptors may reference parts absent from this model
                // variant; tolerated.
                log::debug!("Descriptor references unknown part '{}'", rule.name);
                continue;
            };

            let (x_shift, z_shift) = rule.door_offset.offsets(frame.doors);
            let anchors = tree.anchors(&rule.name);
            let display = rule
                .display
                .as_ref()
                .filter(|_| frame.render_details && !anchors.is_empty());

            for position in &rule.positions {
                let x = position[0] + if rule.mirror { -x_shift } else { x_shift };
                let z = position[1] + if rule.mirror { -z_shift } else { z_shift };

                host.draw_part(tree, part, frame.light, x, z, rule.mirror);

                let Some(display) = display else { continue };
                let color = parse_display_color(&display.color);
                let text = resolve_text(display.kind, frame.snapshot);

                for anchor in anchors {
                    let width = anchor.width - display.x_padding;
                    let height = anchor.height - display.y_padding;

                    host.push_transform();
                    host.translate(x / 16.0, 0.0, z / 16.0);
                    host.rotate_y_degrees(if rule.mirror { 180.0 } else { 0.0 });
                    host.translate(-anchor.origin.x, -anchor.origin.y, anchor.origin.z);
                    host.rotate_z_degrees(anchor.rotation.z);
                    host.rotate_y_degrees(anchor.rotation.y);
                    host.rotate_x_degrees(anchor.rotation.x);
                    host.translate(
                        -anchor.offset.x,
                        -anchor.offset.y,
                        anchor.offset.z - settings.z_fight_lift,
                    );

                    if display.should_scroll {
                        host.translate(-width / 2.0, -height / 2.0, 0.0);
                        let slot = marquee.next_slot(width, height);
                        slot.set_text(&text, color, glyphs);
                        slot.advance_and_draw(settings.scroll_speed, frame.light, host);
                    } else {
                        host.draw_centered_text(&text, color, width, height, frame.light);
                    }

                    host.pop_transform();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{DescriptorLoader, ModelLoader};
    use crate::render::host::{TextImage, TextImageHandle};
    use crate::scene::PartKey;

    const MODEL_JSON: &str = r#"{
        "resolution": { "width": 64, "height": 32 },
        "elements": [
            {
                "uuid": "body-el",
                "origin": [0, 0, 0],
                "from": [-8, 0, -24],
                "to": [8, 16, 24]
            },
            {
                "uuid": "panel-el",
                "origin": [8, 8, 0],
                "from": [0, 4, 0],
                "to": [16, 12, 0]
            }
        ],
        "outliner": [
            { "name": "body", "children": ["body-el"] },
            { "name": "destination_display", "children": ["panel-el"] }
        ]
    }"#;

    fn descriptor_json(rule_extra: &str) -> String {
        format!(
            r#"{{
                "door_max": 2,
                "parts": [
                    {{
                        "name": "body",
                        "stage": "exterior",
                        "positions": [[0, 0]]{rule_extra}
                    }}
                ]
            }}"#
        )
    }

    /// Records every host invocation the evaluator issues
    #[derive(Default)]
    struct RecordingHost {
        parts: Vec<(f32, f32, bool)>,
        texts: Vec<(String, f32, f32)>,
        quads: usize,
        depth: i32,
    }

    impl DrawHost for RecordingHost {
        fn push_transform(&mut self) {
            self.depth += 1;
        }
        fn pop_transform(&mut self) {
            self.depth -= 1;
        }
        fn translate(&mut self, _x: f32, _y: f32, _z: f32) {}
        fn rotate_x_degrees(&mut self, _degrees: f32) {}
        fn rotate_y_degrees(&mut self, _degrees: f32) {}
        fn rotate_z_degrees(&mut self, _degrees: f32) {}
        fn draw_part(
            &mut self,
            _tree: &PartTree,
            _part: PartKey,
            _light: u32,
            x: f32,
            z: f32,
            flipped: bool,
        ) {
            self.parts.push((x, z, flipped));
        }
        fn draw_texture_region(
            &mut self,
            _image: TextImage,
            _x: f32,
            _y: f32,
            _width: f32,
            _height: f32,
            _u0: f32,
            _v0: f32,
            _u1: f32,
            _v1: f32,
            _light: u32,
        ) {
            self.quads += 1;
        }
        fn draw_centered_text(
            &mut self,
            text: &str,
            _color: u32,
            max_width: f32,
            max_height: f32,
            _light: u32,
        ) {
            self.texts.push((text.to_owned(), max_width, max_height));
        }
    }

    struct StubGlyphs;

    impl GlyphSource for StubGlyphs {
        fn render_text(&mut self, text: &str, _color: u32, _small: bool) -> TextImage {
            TextImage {
                handle: TextImageHandle(1),
                width_px: text.chars().count() as u32 * 8,
                height_px: 8,
            }
        }
    }

    fn model(descriptor: &str) -> RailcarModel {
        RailcarModel::new(
            ModelLoader::load_str(MODEL_JSON).unwrap(),
            DescriptorLoader::load_str(descriptor).unwrap(),
            RenderSettings::default(),
        )
    }

    fn frame<'a>(snapshot: &'a TrainSnapshot) -> FrameInput<'a> {
        FrameInput {
            stage: RenderStage::Exterior,
            light: 15,
            doors: DoorOffsets::closed(),
            current_car: 0,
            total_cars: 1,
            head_is_front: true,
            render_details: true,
            snapshot,
        }
    }

    #[test]
    fn test_whitelisted_car_renders_and_others_do_not() {
        let descriptor = descriptor_json(r#", "whitelisted_cars": "3""#);
        let mut model = model(&descriptor);
        let snapshot = TrainSnapshot::default();
        let mut glyphs = StubGlyphs;

        // 0-indexed car 2 of 5 is 1-indexed car 3: renders.
        let mut host = RecordingHost::default();
        let mut input = frame(&snapshot);
        input.current_car = 2;
        input.total_cars = 5;
        model.render(&input, &mut host, &mut glyphs);
        assert_eq!(host.parts.len(), 1);

        // Car index 1 is filtered out.
        let mut host = RecordingHost::default();
        input.current_car = 1;
        model.render(&input, &mut host, &mut glyphs);
        assert!(host.parts.is_empty());
    }

    #[test]
    fn test_stage_mismatch_skips_rule() {
        let mut model = model(&descriptor_json(""));
        let snapshot = TrainSnapshot::default();
        let mut glyphs = StubGlyphs;
        let mut host = RecordingHost::default();
        let mut input = frame(&snapshot);
        input.stage = RenderStage::Interior;
        model.render(&input, &mut host, &mut glyphs);
        assert!(host.parts.is_empty());
    }

    #[test]
    fn test_skip_far_rule_needs_detail_rendering() {
        let descriptor = descriptor_json(r#", "skip_rendering_if_too_far": true"#);
        let mut model = model(&descriptor);
        let snapshot = TrainSnapshot::default();
        let mut glyphs = StubGlyphs;
        let mut input = frame(&snapshot);
        input.render_details = false;

        let mut host = RecordingHost::default();
        model.render(&input, &mut host, &mut glyphs);
        assert!(host.parts.is_empty());

        input.render_details = true;
        let mut host = RecordingHost::default();
        model.render(&input, &mut host, &mut glyphs);
        assert_eq!(host.parts.len(), 1);
    }

    #[test]
    fn test_doors_open_condition_gates_on_door_depth() {
        let descriptor = descriptor_json(r#", "render_condition": "doors_open""#);
        let mut model = model(&descriptor);
        let snapshot = TrainSnapshot::default();
        let mut glyphs = StubGlyphs;
        let mut input = frame(&snapshot);

        let mut host = RecordingHost::default();
        model.render(&input, &mut host, &mut glyphs);
        assert!(host.parts.is_empty());

        input.doors.right_z = 0.5;
        let mut host = RecordingHost::default();
        model.render(&input, &mut host, &mut glyphs);
        assert_eq!(host.parts.len(), 1);
    }

    #[test]
    fn test_unknown_part_name_is_tolerated() {
        let descriptor = r#"{
            "door_max": 0,
            "parts": [
                { "name": "pantograph", "stage": "exterior", "positions": [[0, 0]] },
                { "name": "body", "stage": "exterior", "positions": [[0, 0]] }
            ]
        }"#;
        let mut model = model(descriptor);
        let snapshot = TrainSnapshot::default();
        let mut glyphs = StubGlyphs;
        let mut host = RecordingHost::default();
        model.render(&frame(&snapshot), &mut host, &mut glyphs);
        // The unknown rule skips silently; the known one still draws.
        assert_eq!(host.parts.len(), 1);
    }

    #[test]
    fn test_door_offset_applies_and_mirror_negates() {
        let descriptor = r#"{
            "door_max": 1,
            "parts": [
                {
                    "name": "body",
                    "stage": "exterior",
                    "door_offset": "left_positive",
                    "positions": [[3, 5]]
                },
                {
                    "name": "body",
                    "stage": "exterior",
                    "door_offset": "left_positive",
                    "mirror": true,
                    "positions": [[3, 5]]
                }
            ]
        }"#;
        let mut model = model(descriptor);
        let snapshot = TrainSnapshot::default();
        let mut glyphs = StubGlyphs;
        let mut input = frame(&snapshot);
        input.doors.left_x = 0.5;
        input.doors.left_z = 1.0;

        let mut host = RecordingHost::default();
        model.render(&input, &mut host, &mut glyphs);
        // left_positive shifts by (-left_x, left_z); mirror negates both.
        assert_eq!(host.parts[0], (2.5, 6.0, false));
        assert_eq!(host.parts[1], (3.5, 4.0, true));
    }

    #[test]
    fn test_static_display_draws_padded_text_per_anchor() {
        let descriptor = r#"{
            "door_max": 0,
            "parts": [
                {
                    "name": "destination_display",
                    "stage": "exterior",
                    "positions": [[0, 0], [10, 0]],
                    "display": {
                        "color": "FFAA00",
                        "type": "destination",
                        "x_padding": 0.125,
                        "y_padding": 0.0625,
                        "should_scroll": false
                    }
                }
            ]
        }"#;
        let mut model = model(descriptor);
        let mut snapshot = TrainSnapshot::default();
        snapshot.custom_destination = Some("Airport West".into());
        let mut glyphs = StubGlyphs;
        let mut host = RecordingHost::default();
        model.render(&frame(&snapshot), &mut host, &mut glyphs);

        // One text draw per position (the panel has a single anchor), sized
        // anchor minus padding: (1 - 0.125) x (0.5 - 0.0625).
        assert_eq!(host.texts.len(), 2);
        for (text, width, height) in &host.texts {
            assert_eq!(text, "Airport West");
            assert!((width - 0.875).abs() < 1e-6);
            assert!((height - 0.4375).abs() < 1e-6);
        }
        assert_eq!(host.depth, 0);
        assert_eq!(model.marquee_slots(), 0);
    }

    #[test]
    fn test_displays_need_detail_rendering() {
        let descriptor = r#"{
            "door_max": 0,
            "parts": [
                {
                    "name": "destination_display",
                    "stage": "exterior",
                    "positions": [[0, 0]],
                    "display": { "color": "FFFFFF", "type": "destination" }
                }
            ]
        }"#;
        let mut model = model(descriptor);
        let snapshot = TrainSnapshot::default();
        let mut glyphs = StubGlyphs;
        let mut input = frame(&snapshot);
        input.render_details = false;

        let mut host = RecordingHost::default();
        model.render(&input, &mut host, &mut glyphs);
        // The part itself still draws; only the display is detail-gated.
        assert_eq!(host.parts.len(), 1);
        assert!(host.texts.is_empty());
    }

    #[test]
    fn test_marquee_slots_stay_stable_across_frames() {
        let descriptor = r#"{
            "door_max": 0,
            "parts": [
                {
                    "name": "destination_display",
                    "stage": "exterior",
                    "positions": [[0, 0], [10, 0]],
                    "display": {
                        "color": "FFFFFF",
                        "type": "destination",
                        "should_scroll": true
                    }
                }
            ]
        }"#;
        let mut model = model(descriptor);
        let mut snapshot = TrainSnapshot::default();
        snapshot.custom_destination = Some("Central".into());
        let mut glyphs = StubGlyphs;

        let mut host = RecordingHost::default();
        model.render(&frame(&snapshot), &mut host, &mut glyphs);
        assert_eq!(model.marquee_slots(), 2);
        assert!(host.quads > 0);

        // Second frame reuses the same two slots instead of growing.
        let mut host = RecordingHost::default();
        model.render(&frame(&snapshot), &mut host, &mut glyphs);
        assert_eq!(model.marquee_slots(), 2);
        assert!(host.quads > 0);
    }

    #[test]
    fn test_filter_cache_is_reused_across_frames() {
        let descriptor = descriptor_json(r#", "whitelisted_cars": "%2""#);
        let mut model = model(&descriptor);
        let snapshot = TrainSnapshot::default();
        let mut glyphs = StubGlyphs;
        let input = frame(&snapshot);

        let mut host = RecordingHost::default();
        model.render(&input, &mut host, &mut glyphs);
        model.render(&input, &mut host, &mut glyphs);
        assert_eq!(model.filter_cache().misses(), 1);
    }
}
