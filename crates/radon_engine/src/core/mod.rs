//! # Core Engine Module
//!
//! Shared settings that span subsystems.
//!
//! ## Organization
//!
//! - **Config**: Engine configuration loaded at startup

pub mod config;

pub use config::{Config, ConfigError, EngineConfig, InputConfig, LoggingConfig, PhysicsConfig};
