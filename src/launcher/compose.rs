//! Container tool integration
//!
//! The launcher never changes the process working directory: every
//! invocation carries its own `current_dir`.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Errors from driving the external container tool
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {}", status_text(.code))]
    ToolFailed { command: String, code: Option<i32> },
}

fn status_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

/// Exit status of one tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub success: bool,
    pub code: Option<i32>,
}

impl ToolStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }
}

/// A command-line tool accepting subcommands, run in a given directory
pub trait ContainerTool {
    /// Display name used in error messages
    fn name(&self) -> &str;

    fn run(&self, args: &[&str], cwd: &Path) -> Result<ToolStatus, LauncherError>;
}

/// Runs the tool as a child process, inheriting stdio
#[derive(Debug, Clone)]
pub struct ProcessTool {
    program: String,
}

impl ProcessTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ContainerTool for ProcessTool {
    fn name(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[&str], cwd: &Path) -> Result<ToolStatus, LauncherError> {
        let status = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| LauncherError::Spawn {
                command: command_line(&self.program, args),
                source,
            })?;

        Ok(ToolStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}

fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Settings for the database recreate sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeConfig {
    /// Directory holding the compose file
    pub compose_dir: PathBuf,

    /// Container removed before the environment is restarted
    pub container: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            compose_dir: PathBuf::from("docker"),
            container: "odin-postgres".to_string(),
        }
    }
}

/// Remove the database container, then stop and start the environment.
///
/// Removal may fail (the container might not exist) and is ignored. A
/// failing `compose down` or `compose up` aborts the sequence.
pub fn recreate_database(
    tool: &dyn ContainerTool,
    config: &ComposeConfig,
) -> Result<(), LauncherError> {
    let cwd = config.compose_dir.as_path();

    tool.run(&["rm", "-f", config.container.as_str()], cwd)?;

    for args in [&["compose", "down"][..], &["compose", "up", "-d"][..]] {
        let status = tool.run(args, cwd)?;
        if !status.success {
            return Err(LauncherError::ToolFailed {
                command: command_line(tool.name(), args),
                code: status.code,
            });
        }
    }

    Ok(())
}
