//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Error taxonomy and run summary
//! - Extension (suffix) filtering
//! - Path resolution utilities

pub mod extensions;
pub mod model;
pub mod paths;
