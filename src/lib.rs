//! concat - Concatenate the source files of a directory tree into one file
//!
//! The crate provides:
//! - A directory concatenator with a literal suffix filter and a stable,
//!   line-oriented section format (`---- <path> ----`)
//! - A headless launcher that maps menu command identifiers to handlers and
//!   drives an external container tool in an explicit working directory

pub mod backends;
pub mod cli;
pub mod core;
pub mod launcher;

pub use crate::backends::concat::{concatenate, ConcatConfig, Concatenator};
pub use crate::core::extensions::ExtensionSet;
pub use crate::core::model::{ConcatError, ConcatSummary, ErrorKind};
