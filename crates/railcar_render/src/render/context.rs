//! Per-frame render context
//!
//! Snapshot types the host captures once per frame and hands to the
//! evaluator. Nothing in here is read back from world state mid-frame; a
//! rule never observes a different door position or station than the rule
//! before it.

/// Current door opening offsets for one car
///
/// `x` is the lateral travel along the car side, `z` the outward depth.
/// Both are zero while a door is fully closed and positive while it opens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DoorOffsets {
    /// Left door lateral travel
    pub left_x: f32,
    /// Left door outward depth
    pub left_z: f32,
    /// Right door lateral travel
    pub right_x: f32,
    /// Right door outward depth
    pub right_z: f32,
}

impl DoorOffsets {
    /// Both doors fully closed
    pub fn closed() -> Self {
        Self::default()
    }
}

/// A station as seen by displays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationInfo {
    /// Display name of the station
    pub name: String,
}

impl StationInfo {
    /// Convenience constructor
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A route as seen by displays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteInfo {
    /// Full route name, used in composed announcements
    pub name: String,
    /// Short route number shown on number displays; may be empty
    pub number: String,
}

/// Read-only train/route/station state captured once per frame
///
/// The caller resolves localization before capture: `untitled_label` is the
/// already-localized placeholder shown when no destination or station is
/// known.
#[derive(Debug, Clone, Default)]
pub struct TrainSnapshot {
    /// Route currently being served
    pub this_route: Option<RouteInfo>,
    /// Route after the next terminus, if scheduled
    pub next_route: Option<RouteInfo>,
    /// Station currently stopped at or approaching
    pub this_station: Option<StationInfo>,
    /// Station after `this_station`
    pub next_station: Option<StationInfo>,
    /// Terminus of the current trip
    pub last_station: Option<StationInfo>,
    /// Whether the train is currently held at a platform
    pub at_platform: bool,
    /// Override destination text, when the route defines one
    pub custom_destination: Option<String>,
    /// Localized placeholder for unnamed destinations/stations
    pub untitled_label: String,
}
