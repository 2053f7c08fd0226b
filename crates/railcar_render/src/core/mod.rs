//! Core crate services
//!
//! Currently hosts the unified configuration system. Subsystem-specific
//! types live with their subsystems.

pub mod config;

pub use config::{Config, ConfigError, RenderSettings};
