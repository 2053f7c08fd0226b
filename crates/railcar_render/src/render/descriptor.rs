//! Render descriptor data structures
//!
//! The validated, in-memory form of the per-part render rules JSON. Loaded
//! once and read-only afterward; the frame evaluator walks the rules in
//! document order every frame.
//!
//! Enum-valued string fields are closed enums with an explicit fallback:
//! an unknown render condition never skips, an unknown door-offset mode
//! yields a zero offset, and an unknown stage name matches no pass (the rule
//! goes dead rather than erroring). This keeps partially incompatible
//! content packs renderable.

use serde::{Deserialize, Deserializer};

use crate::render::context::DoorOffsets;

/// A render pass identifier a rule is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    /// Opaque exterior geometry
    Exterior,
    /// Opaque interior geometry
    Interior,
    /// Translucent interior geometry, drawn after opaque passes
    InteriorTranslucent,
    /// Geometry drawn over everything else
    AlwaysOnTop,
}

impl RenderStage {
    /// Parse a stage name; `None` for names that match no known pass
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "EXTERIOR" => Some(Self::Exterior),
            "INTERIOR" => Some(Self::Interior),
            "INTERIOR_TRANSLUCENT" => Some(Self::InteriorTranslucent),
            "ALWAYS_ON_TOP" => Some(Self::AlwaysOnTop),
            _ => None,
        }
    }
}

/// Predicate over door and motion state gating whether a rule renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderCondition {
    /// Render unconditionally
    #[default]
    All,
    /// Render only while at least one door is open
    DoorsOpen,
    /// Render only while both doors are fully closed
    DoorsClosed,
    /// Render only while the left door is open
    DoorLeftOpen,
    /// Render only while the right door is open
    DoorRightOpen,
    /// Render only while the left door is closed
    DoorLeftClosed,
    /// Render only while the right door is closed
    DoorRightClosed,
    /// Render only while travelling head-first
    MovingForwards,
    /// Render only while travelling tail-first
    MovingBackwards,
}

impl RenderCondition {
    /// Parse a condition name, falling back to [`RenderCondition::All`]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "DOORS_OPEN" => Self::DoorsOpen,
            "DOORS_CLOSED" => Self::DoorsClosed,
            "DOOR_LEFT_OPEN" => Self::DoorLeftOpen,
            "DOOR_RIGHT_OPEN" => Self::DoorRightOpen,
            "DOOR_LEFT_CLOSED" => Self::DoorLeftClosed,
            "DOOR_RIGHT_CLOSED" => Self::DoorRightClosed,
            "MOVING_FORWARDS" => Self::MovingForwards,
            "MOVING_BACKWARDS" => Self::MovingBackwards,
            _ => Self::All,
        }
    }

    /// Whether the current door/motion state skips this rule
    ///
    /// Door depth (`z`) is zero while closed and positive while opening.
    pub fn skips(self, doors: DoorOffsets, head_is_front: bool) -> bool {
        match self {
            Self::All => false,
            Self::DoorsOpen => doors.left_z == 0.0 && doors.right_z == 0.0,
            Self::DoorsClosed => doors.left_z > 0.0 || doors.right_z > 0.0,
            Self::DoorLeftOpen => doors.left_z == 0.0,
            Self::DoorRightOpen => doors.right_z == 0.0,
            Self::DoorLeftClosed => doors.left_z > 0.0,
            Self::DoorRightClosed => doors.right_z > 0.0,
            Self::MovingForwards => !head_is_front,
            Self::MovingBackwards => head_is_front,
        }
    }
}

/// How a rule's position follows the door opening animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorOffsetMode {
    /// Fixed position
    #[default]
    None,
    /// Follow the left door along its opening direction
    LeftPositive,
    /// Follow the right door along its opening direction
    RightPositive,
    /// Follow the left door against its opening direction
    LeftNegative,
    /// Follow the right door against its opening direction
    RightNegative,
}

impl DoorOffsetMode {
    /// Parse a door-offset name, falling back to [`DoorOffsetMode::None`]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "LEFT_POSITIVE" => Self::LeftPositive,
            "RIGHT_POSITIVE" => Self::RightPositive,
            "LEFT_NEGATIVE" => Self::LeftNegative,
            "RIGHT_NEGATIVE" => Self::RightNegative,
            _ => Self::None,
        }
    }

    /// Map the current door state to the rule's (x, z) positional shift
    pub fn offsets(self, doors: DoorOffsets) -> (f32, f32) {
        match self {
            Self::None => (0.0, 0.0),
            Self::LeftPositive => (-doors.left_x, doors.left_z),
            Self::RightPositive => (doors.right_x, doors.right_z),
            Self::LeftNegative => (-doors.left_x, -doors.left_z),
            Self::RightNegative => (doors.right_x, -doors.right_z),
        }
    }
}

/// What text a display surface shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayTextKind {
    /// Terminus name
    #[default]
    Destination,
    /// Terminus name, upper-cased
    DestinationUpperCase,
    /// Route short number
    RouteNumber,
    /// Route short number, upper-cased
    RouteNumberUpperCase,
    /// Next (or current, while at a platform) station name
    NextStationPlain,
    /// Next station name, upper-cased
    NextStationPlainUpperCase,
    /// Composed UK-style next-station announcement
    NextStationUk,
}

impl DisplayTextKind {
    /// Parse a display-type name, falling back to [`DisplayTextKind::Destination`]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "DESTINATION_UPPER_CASE" => Self::DestinationUpperCase,
            "ROUTE_NUMBER" => Self::RouteNumber,
            "ROUTE_NUMBER_UPPER_CASE" => Self::RouteNumberUpperCase,
            "NEXT_STATION_PLAIN" => Self::NextStationPlain,
            "NEXT_STATION_PLAIN_UPPER_CASE" => Self::NextStationPlainUpperCase,
            "NEXT_STATION_UK" => Self::NextStationUk,
            _ => Self::Destination,
        }
    }

    /// Whether the resolved text is upper-cased before drawing
    pub fn upper_case(self) -> bool {
        matches!(
            self,
            Self::DestinationUpperCase
                | Self::RouteNumberUpperCase
                | Self::NextStationPlainUpperCase
        )
    }
}

/// Overlay display configuration of a rule
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Display color as a hex string; alpha is always forced opaque
    #[serde(default)]
    pub color: String,
    /// What text the display shows
    #[serde(rename = "type", default, deserialize_with = "de_text_kind")]
    pub kind: DisplayTextKind,
    /// Horizontal padding subtracted from the anchor width, in block units
    #[serde(default)]
    pub x_padding: f32,
    /// Vertical padding subtracted from the anchor height, in block units
    #[serde(default)]
    pub y_padding: f32,
    /// Scroll the text as a marquee instead of drawing it statically
    #[serde(default)]
    pub should_scroll: bool,
}

/// One per-part render rule
#[derive(Debug, Clone, Deserialize)]
pub struct PartRenderRule {
    /// Named part this rule draws
    pub name: String,
    /// Render pass the rule is restricted to; `None` when the descriptor
    /// names an unknown pass (the rule then never matches)
    #[serde(deserialize_with = "de_stage")]
    pub stage: Option<RenderStage>,
    /// Skip this rule entirely while detail rendering is disabled
    #[serde(default, rename = "skip_rendering_if_too_far")]
    pub skip_if_far: bool,
    /// Comma-separated car filter selecting cars to draw on
    #[serde(default)]
    pub whitelisted_cars: String,
    /// Comma-separated car filter selecting cars to suppress
    #[serde(default)]
    pub blacklisted_cars: String,
    /// Door/motion predicate gating the rule
    #[serde(default, deserialize_with = "de_condition")]
    pub render_condition: RenderCondition,
    /// Door-linked positional shift mode
    #[serde(default, deserialize_with = "de_door_offset")]
    pub door_offset: DoorOffsetMode,
    /// Draw the part horizontally flipped (and negate door shifts)
    #[serde(default)]
    pub mirror: bool,
    /// 2D placement positions the part is drawn at, in model units
    #[serde(default)]
    pub positions: Vec<[f32; 2]>,
    /// Optional overlay display carried by the part's anchors
    #[serde(default)]
    pub display: Option<DisplayConfig>,
}

/// The full render descriptor document
#[derive(Debug, Clone, Deserialize)]
pub struct RenderDescriptor {
    /// Number of door openings per car side the model supports
    pub door_max: u32,
    /// Part rules in document order; iteration order is a stability contract
    /// for marquee slot assignment and must stay deterministic
    pub parts: Vec<PartRenderRule>,
}

fn de_stage<'de, D: Deserializer<'de>>(de: D) -> Result<Option<RenderStage>, D::Error> {
    Ok(RenderStage::from_name(&String::deserialize(de)?))
}

fn de_condition<'de, D: Deserializer<'de>>(de: D) -> Result<RenderCondition, D::Error> {
    Ok(RenderCondition::from_name(&String::deserialize(de)?))
}

fn de_door_offset<'de, D: Deserializer<'de>>(de: D) -> Result<DoorOffsetMode, D::Error> {
    Ok(DoorOffsetMode::from_name(&String::deserialize(de)?))
}

fn de_text_kind<'de, D: Deserializer<'de>>(de: D) -> Result<DisplayTextKind, D::Error> {
    Ok(DisplayTextKind::from_name(&String::deserialize(de)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doors(left_z: f32, right_z: f32) -> DoorOffsets {
        DoorOffsets {
            left_x: 0.5,
            left_z,
            right_x: 0.75,
            right_z,
        }
    }

    #[test]
    fn test_condition_table() {
        let closed = doors(0.0, 0.0);
        let left_open = doors(1.0, 0.0);
        let both_open = doors(1.0, 1.0);

        assert!(!RenderCondition::All.skips(closed, false));
        assert!(RenderCondition::DoorsOpen.skips(closed, false));
        assert!(!RenderCondition::DoorsOpen.skips(left_open, false));
        assert!(!RenderCondition::DoorsClosed.skips(closed, false));
        assert!(RenderCondition::DoorsClosed.skips(left_open, false));
        assert!(RenderCondition::DoorLeftOpen.skips(closed, false));
        assert!(!RenderCondition::DoorLeftOpen.skips(left_open, false));
        assert!(RenderCondition::DoorRightOpen.skips(left_open, false));
        assert!(!RenderCondition::DoorRightOpen.skips(both_open, false));
        assert!(RenderCondition::DoorLeftClosed.skips(left_open, false));
        assert!(!RenderCondition::DoorRightClosed.skips(left_open, false));
        assert!(RenderCondition::MovingForwards.skips(closed, false));
        assert!(!RenderCondition::MovingForwards.skips(closed, true));
        assert!(RenderCondition::MovingBackwards.skips(closed, true));
    }

    #[test]
    fn test_door_offset_table() {
        let state = doors(1.0, 2.0);
        assert_eq!(DoorOffsetMode::None.offsets(state), (0.0, 0.0));
        assert_eq!(DoorOffsetMode::LeftPositive.offsets(state), (-0.5, 1.0));
        assert_eq!(DoorOffsetMode::RightPositive.offsets(state), (0.75, 2.0));
        assert_eq!(DoorOffsetMode::LeftNegative.offsets(state), (-0.5, -1.0));
        assert_eq!(DoorOffsetMode::RightNegative.offsets(state), (0.75, -2.0));
    }

    #[test]
    fn test_unknown_enum_names_fall_back() {
        assert_eq!(RenderStage::from_name("no_such_stage"), None);
        assert_eq!(RenderCondition::from_name("whenever"), RenderCondition::All);
        assert_eq!(DoorOffsetMode::from_name("sideways"), DoorOffsetMode::None);
        assert_eq!(
            DisplayTextKind::from_name("weather"),
            DisplayTextKind::Destination
        );
    }

    #[test]
    fn test_enum_names_parse_case_insensitively() {
        assert_eq!(RenderStage::from_name("exterior"), Some(RenderStage::Exterior));
        assert_eq!(
            RenderStage::from_name("INTERIOR_TRANSLUCENT"),
            Some(RenderStage::InteriorTranslucent)
        );
        assert_eq!(
            RenderCondition::from_name("doors_open"),
            RenderCondition::DoorsOpen
        );
        assert_eq!(
            DisplayTextKind::from_name("next_station_uk"),
            DisplayTextKind::NextStationUk
        );
    }
}
