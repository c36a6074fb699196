//! Launcher commands and their handlers
//!
//! Menu wiring only ever deals in [`MenuCommand`] values; the handlers are
//! plain functions over a [`LauncherContext`] so they can be exercised
//! without any UI.

use anyhow::{Context, Result};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::launcher::compose::{recreate_database, ComposeConfig, ContainerTool};

/// Actions offered by the launcher menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    Greet,
    CreateDatabase,
    Quit,
}

impl MenuCommand {
    /// All commands in menu order
    pub const ALL: [MenuCommand; 3] = [
        MenuCommand::Greet,
        MenuCommand::CreateDatabase,
        MenuCommand::Quit,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MenuCommand::Greet => "greet",
            MenuCommand::CreateDatabase => "create-database",
            MenuCommand::Quit => "quit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::Greet => "Hello, vrt-cli",
            MenuCommand::CreateDatabase => "Create new Database",
            MenuCommand::Quit => "Quit",
        }
    }
}

impl fmt::Display for MenuCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Parse a command id (`greet`) or its 1-based menu position (`1`)
impl FromStr for MenuCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| format!("no menu entry {}", index));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown command: {}", s))
    }
}

/// What the menu does after a handler returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Everything a handler may touch
pub struct LauncherContext<'a> {
    pub out: &'a mut dyn Write,
    pub tool: &'a dyn ContainerTool,
    pub compose: &'a ComposeConfig,
}

/// Handler signature
pub type Handler = fn(&mut LauncherContext<'_>) -> Result<Outcome>;

fn greet(ctx: &mut LauncherContext<'_>) -> Result<Outcome> {
    writeln!(ctx.out, "Hello, vrt-cli!")?;
    Ok(Outcome::Continue)
}

fn create_database(ctx: &mut LauncherContext<'_>) -> Result<Outcome> {
    let compose_dir = ctx.compose.compose_dir.display();
    recreate_database(ctx.tool, ctx.compose)
        .with_context(|| format!("recreating database in {}", compose_dir))?;
    writeln!(ctx.out, "Database container created and started.")?;
    Ok(Outcome::Continue)
}

fn quit(_ctx: &mut LauncherContext<'_>) -> Result<Outcome> {
    Ok(Outcome::Exit)
}

/// Maps command identifiers to handlers
pub struct Dispatcher {
    handlers: Vec<(MenuCommand, Handler)>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: vec![
                (MenuCommand::Greet, greet as Handler),
                (MenuCommand::CreateDatabase, create_database as Handler),
                (MenuCommand::Quit, quit as Handler),
            ],
        }
    }

    /// Replace the handler bound to a command
    pub fn bind(mut self, command: MenuCommand, handler: Handler) -> Self {
        match self.handlers.iter_mut().find(|(c, _)| *c == command) {
            Some(slot) => slot.1 = handler,
            None => self.handlers.push((command, handler)),
        }
        self
    }

    pub fn handler(&self, command: MenuCommand) -> Option<Handler> {
        self.handlers
            .iter()
            .find(|(c, _)| *c == command)
            .map(|(_, h)| *h)
    }

    pub fn dispatch(
        &self,
        command: MenuCommand,
        ctx: &mut LauncherContext<'_>,
    ) -> Result<Outcome> {
        match self.handler(command) {
            Some(handler) => handler(ctx),
            None => anyhow::bail!("no handler bound to {}", command),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
