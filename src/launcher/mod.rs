//! Launcher module - Headless replacement for the tray menu
//!
//! Provides:
//! - command: Menu command identifiers and the handler table
//! - compose: Container tool port and the database recreate sequence
//! - menu: Line-oriented menu loop

pub mod command;
pub mod compose;
pub mod menu;
