//! Render descriptor loader
//!
//! Parses and validates the per-part render rules JSON. Schema problems
//! (malformed JSON, missing `door_max` or `parts`, missing rule `name` or
//! `stage`) are fatal here, at load time. Unknown enum *values* are not:
//! they fall back per the descriptor's closed-enum defaults so variant
//! content packs keep rendering.

use std::path::Path;

use thiserror::Error;

use crate::render::descriptor::RenderDescriptor;

/// Errors produced while loading a render descriptor
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON or missing required schema fields
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Render descriptor file loader
pub struct DescriptorLoader;

impl DescriptorLoader {
    /// Load a render descriptor JSON file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<RenderDescriptor, DescriptorError> {
        let contents = std::fs::read_to_string(path)?;
        Self::load_str(&contents)
    }

    /// Parse render descriptor JSON text
    pub fn load_str(json: &str) -> Result<RenderDescriptor, DescriptorError> {
        let descriptor: RenderDescriptor = serde_json::from_str(json)?;
        log::info!(
            "Loaded render descriptor: {} part rules, {} door(s) per side",
            descriptor.parts.len(),
            descriptor.door_max
        );
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::descriptor::{
        DisplayTextKind, DoorOffsetMode, RenderCondition, RenderStage,
    };

    #[test]
    fn test_full_rule_parses() {
        let descriptor = DescriptorLoader::load_str(
            r#"{
                "door_max": 2,
                "parts": [
                    {
                        "name": "door_left",
                        "stage": "exterior",
                        "skip_rendering_if_too_far": true,
                        "whitelisted_cars": "%2",
                        "blacklisted_cars": "1",
                        "render_condition": "doors_open",
                        "door_offset": "left_positive",
                        "mirror": true,
                        "positions": [[0, -24], [0, 24]],
                        "display": {
                            "color": "CCFF33",
                            "type": "next_station_plain",
                            "x_padding": 0.25,
                            "y_padding": 0.125,
                            "should_scroll": true
                        }
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(descriptor.door_max, 2);
        let rule = &descriptor.parts[0];
        assert_eq!(rule.stage, Some(RenderStage::Exterior));
        assert!(rule.skip_if_far);
        assert_eq!(rule.render_condition, RenderCondition::DoorsOpen);
        assert_eq!(rule.door_offset, DoorOffsetMode::LeftPositive);
        assert!(rule.mirror);
        assert_eq!(rule.positions.len(), 2);
        let display = rule.display.as_ref().unwrap();
        assert_eq!(display.kind, DisplayTextKind::NextStationPlain);
        assert!(display.should_scroll);
    }

    #[test]
    fn test_optional_fields_default() {
        let descriptor = DescriptorLoader::load_str(
            r#"{
                "door_max": 0,
                "parts": [ { "name": "roof", "stage": "exterior" } ]
            }"#,
        )
        .unwrap();

        let rule = &descriptor.parts[0];
        assert!(!rule.skip_if_far);
        assert_eq!(rule.whitelisted_cars, "");
        assert_eq!(rule.render_condition, RenderCondition::All);
        assert_eq!(rule.door_offset, DoorOffsetMode::None);
        assert!(!rule.mirror);
        assert!(rule.positions.is_empty());
        assert!(rule.display.is_none());
    }

    #[test]
    fn test_unknown_enum_values_fall_back_instead_of_failing() {
        let descriptor = DescriptorLoader::load_str(
            r#"{
                "door_max": 0,
                "parts": [
                    {
                        "name": "roof",
                        "stage": "subterranean",
                        "render_condition": "rainy",
                        "door_offset": "diagonal"
                    }
                ]
            }"#,
        )
        .unwrap();

        let rule = &descriptor.parts[0];
        assert_eq!(rule.stage, None);
        assert_eq!(rule.render_condition, RenderCondition::All);
        assert_eq!(rule.door_offset, DoorOffsetMode::None);
    }

    #[test]
    fn test_missing_required_fields_are_fatal() {
        assert!(matches!(
            DescriptorLoader::load_str(r#"{ "parts": [] }"#),
            Err(DescriptorError::Parse(_))
        ));
        assert!(matches!(
            DescriptorLoader::load_str(r#"{ "door_max": 1, "parts": [ { "name": "roof" } ] }"#),
            Err(DescriptorError::Parse(_))
        ));
    }
}
