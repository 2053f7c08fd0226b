//! Railcar preview application
//!
//! Loads the bundled sample model and render descriptor, then drives a short
//! animation (doors opening while the marquee scrolls) against a logging
//! host that records every draw call instead of submitting geometry. Useful
//! for eyeballing descriptor behavior without a GPU pipeline.

use railcar_render::foundation::math::{Mat4, Mat4Ext, utils};
use railcar_render::prelude::*;
use railcar_render::scene::{PartKey, PartTree};

const MODEL_JSON: &str = include_str!("../data/metro_car.model.json");
const PROPERTIES_JSON: &str = include_str!("../data/metro_car.properties.json");

/// Number of animation frames to simulate
const FRAMES: usize = 12;
/// Cars in the simulated train
const TOTAL_CARS: usize = 3;
/// Full-bloom light value forwarded to draws
const FULL_LIGHT: u32 = 15;
/// Door travel per frame once opening starts
const DOOR_SPEED: f32 = 0.125;

/// Host that accumulates a transform stack and counts draw calls
struct LoggingHost {
    stack: Vec<Mat4>,
    parts_drawn: usize,
    texts_drawn: usize,
    quads_drawn: usize,
    glyph_renders: usize,
}

impl LoggingHost {
    fn new() -> Self {
        Self {
            stack: vec![Mat4::identity()],
            parts_drawn: 0,
            texts_drawn: 0,
            quads_drawn: 0,
            glyph_renders: 0,
        }
    }

    fn current(&self) -> &Mat4 {
        self.stack.last().expect("transform stack never empties")
    }

    fn apply(&mut self, m: Mat4) {
        let top = self.stack.last_mut().expect("transform stack never empties");
        *top *= m;
    }
}

impl DrawHost for LoggingHost {
    fn push_transform(&mut self) {
        let top = *self.current();
        self.stack.push(top);
    }

    fn pop_transform(&mut self) {
        self.stack.pop();
        assert!(!self.stack.is_empty(), "unbalanced transform pop");
    }

    fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.apply(Mat4::new_translation(&Vec3::new(x, y, z)));
    }

    fn rotate_x_degrees(&mut self, degrees: f32) {
        self.apply(Mat4::rotation_x(utils::deg_to_rad(degrees)));
    }

    fn rotate_y_degrees(&mut self, degrees: f32) {
        self.apply(Mat4::rotation_y(utils::deg_to_rad(degrees)));
    }

    fn rotate_z_degrees(&mut self, degrees: f32) {
        self.apply(Mat4::rotation_z(utils::deg_to_rad(degrees)));
    }

    fn draw_part(&mut self, tree: &PartTree, part: PartKey, _light: u32, x: f32, z: f32, flipped: bool) {
        self.parts_drawn += 1;
        let name = tree
            .part(part)
            .and_then(|p| p.name.as_deref())
            .unwrap_or("<element>");
        log::debug!(
            "draw part '{name}' at ({:.2}, {:.2}) flipped={flipped}",
            x / 16.0,
            z / 16.0
        );
    }

    fn draw_texture_region(
        &mut self,
        image: TextImage,
        x: f32,
        _y: f32,
        width: f32,
        _height: f32,
        u0: f32,
        _v0: f32,
        u1: f32,
        _v1: f32,
        _light: u32,
    ) {
        self.quads_drawn += 1;
        log::debug!(
            "marquee window of image {:?}: x={x:.3} w={width:.3} u=[{u0:.3}, {u1:.3}]",
            image.handle
        );
    }

    fn draw_centered_text(&mut self, text: &str, color: u32, max_width: f32, max_height: f32, _light: u32) {
        self.texts_drawn += 1;
        log::debug!("static text \"{text}\" (#{color:08X}) in {max_width:.3} x {max_height:.3}");
    }
}

impl GlyphSource for LoggingHost {
    fn render_text(&mut self, text: &str, _color: u32, small: bool) -> TextImage {
        self.glyph_renders += 1;
        // 6 px per glyph, halved for the dense small-text mode.
        let glyph_px = if small { 3 } else { 6 };
        TextImage {
            handle: TextImageHandle(self.glyph_renders as u64),
            width_px: text.chars().count() as u32 * glyph_px,
            height_px: glyph_px,
        }
    }
}

fn snapshot_for_frame(frame: usize) -> TrainSnapshot {
    // Approach for the first half of the run, then hold at the platform.
    let at_platform = frame >= FRAMES / 2;
    TrainSnapshot {
        this_route: Some(RouteInfo {
            name: "Harbour Line".into(),
            number: "H2".into(),
        }),
        next_route: None,
        this_station: Some(StationInfo::new("Quayside")),
        next_station: Some(StationInfo::new("Terminal North")),
        last_station: Some(StationInfo::new("Terminal North")),
        at_platform,
        custom_destination: None,
        untitled_label: "Untitled".into(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let tree = ModelLoader::load_str(MODEL_JSON)?;
    let descriptor = DescriptorLoader::load_str(PROPERTIES_JSON)?;
    log::info!(
        "Sample model: {} parts, {} roots",
        tree.len(),
        tree.roots().len()
    );

    let mut model = RailcarModel::new(tree, descriptor, RenderSettings::default());
    log::info!("Door capacity: {} per side", model.door_capacity());

    let mut host = LoggingHost::new();
    let mut glyphs = LoggingHost::new();

    for frame in 0..FRAMES {
        // Doors start opening once the train is held at the platform.
        let door_travel = if frame >= FRAMES / 2 {
            (frame - FRAMES / 2) as f32 * DOOR_SPEED
        } else {
            0.0
        };
        let doors = DoorOffsets {
            left_x: door_travel,
            left_z: door_travel,
            right_x: door_travel,
            right_z: door_travel,
        };
        let snapshot = snapshot_for_frame(frame);

        for current_car in 0..TOTAL_CARS {
            let input = FrameInput {
                stage: RenderStage::Exterior,
                light: FULL_LIGHT,
                doors,
                current_car,
                total_cars: TOTAL_CARS,
                head_is_front: true,
                render_details: true,
                snapshot: &snapshot,
            };
            model.render(&input, &mut host, &mut glyphs);
        }
        log::info!(
            "frame {frame:2}: door travel {door_travel:.3}, {} marquee slot(s)",
            model.marquee_slots()
        );
    }

    log::info!(
        "Preview done: {} part draws, {} static texts, {} marquee quads, {} glyph renders, {} filter cache entries",
        host.parts_drawn,
        host.texts_drawn,
        host.quads_drawn,
        glyphs.glyph_renders,
        model.filter_cache().len()
    );
    Ok(())
}
