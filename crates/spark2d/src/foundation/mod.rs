//! Foundation module - Core utilities and types
//!
//! Fundamental utilities used throughout the engine:
//! - 2D math types and operations
//! - Frame timing
//! - Logging utilities

pub mod logging;
pub mod math;
pub mod time;
