//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Handle-keyed collections
//! - Logging utilities

pub mod collections;
pub mod logging;
