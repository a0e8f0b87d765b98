//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and toroidal (wrap-around) operations
//! - Time management and frame pacing
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
