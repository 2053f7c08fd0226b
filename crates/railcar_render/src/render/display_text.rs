//! Display text resolution
//!
//! Maps a display's text kind plus the per-frame train snapshot to the
//! string actually drawn. All fallbacks funnel to the caller-localized
//! "untitled" placeholder rather than erroring, so displays degrade to
//! placeholder text on incomplete schedule data.

use crate::render::context::TrainSnapshot;
use crate::render::descriptor::DisplayTextKind;

/// Alpha mask forcing display colors opaque
const OPAQUE_ALPHA: u32 = 0xFF00_0000;

/// Resolve the text a display shows this frame
pub fn resolve_text(kind: DisplayTextKind, snapshot: &TrainSnapshot) -> String {
    let text = match kind {
        DisplayTextKind::Destination | DisplayTextKind::DestinationUpperCase => {
            destination_string(snapshot)
        }
        DisplayTextKind::RouteNumber | DisplayTextKind::RouteNumberUpperCase => snapshot
            .this_route
            .as_ref()
            .map(|route| route.number.clone())
            .unwrap_or_default(),
        DisplayTextKind::NextStationPlain | DisplayTextKind::NextStationPlainUpperCase => {
            let station = if snapshot.at_platform {
                snapshot.this_station.as_ref()
            } else {
                snapshot.next_station.as_ref()
            };
            station.map_or_else(|| snapshot.untitled_label.clone(), |s| s.name.clone())
        }
        DisplayTextKind::NextStationUk => uk_announcement(snapshot),
    };

    if kind.upper_case() {
        text.to_uppercase()
    } else {
        text
    }
}

/// Destination shown on terminus displays: custom override, else the trip's
/// last station, else the placeholder
fn destination_string(snapshot: &TrainSnapshot) -> String {
    if let Some(custom) = &snapshot.custom_destination {
        return custom.clone();
    }
    snapshot
        .last_station
        .as_ref()
        .map_or_else(|| snapshot.untitled_label.clone(), |s| s.name.clone())
}

/// Composed UK-style announcement string
///
/// Sentence order: service/terminus line, then the platform or next-station
/// line, then an interchange line when the following route differs.
fn uk_announcement(snapshot: &TrainSnapshot) -> String {
    let destination = destination_string(snapshot);
    let mut out = match &snapshot.this_route {
        Some(route) => format!("This is a {} service to {}.", route.name, destination),
        None => format!("This train terminates at {}.", destination),
    };

    if snapshot.at_platform {
        if let Some(station) = &snapshot.this_station {
            out.push_str(&format!(" This is {}.", station.name));
        }
    } else if let Some(station) = &snapshot.next_station {
        out.push_str(&format!(" The next station is {}.", station.name));
    }

    if let (Some(this_route), Some(next_route)) = (&snapshot.this_route, &snapshot.next_route) {
        if this_route.name != next_route.name {
            out.push_str(&format!(" Change here for the {}.", next_route.name));
        }
    }

    out
}

/// Parse a display color hex string, forcing the alpha channel opaque
///
/// Malformed colors degrade to opaque black rather than erroring.
pub fn parse_display_color(hex: &str) -> u32 {
    let digits = hex.trim_start_matches('#');
    u32::from_str_radix(digits, 16).unwrap_or(0) | OPAQUE_ALPHA
}
