//! Infrastructure layer - Configuration, logging and collaborator adapters
//!
//! Implements the ports defined in the application layer with in-process
//! collaborators and provides the config and logging setup shared by the
//! binaries.

pub mod adapters;
pub mod config;
pub mod demo;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ConfigError, DemoConfig, FlowConfig};
pub use demo::{DemoCollaborators, seed};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
