//! Backends module - File operations
//!
//! Provides:
//! - scan: Directory walk with walkdir
//! - concat: Section writer and the concatenation service
//! - lock: Per-output-path run serialization

pub mod concat;
pub mod lock;
pub mod scan;
