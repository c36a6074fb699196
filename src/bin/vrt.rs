//! vrt - headless launcher: greet, recreate the database container, quit

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

use concat::launcher::command::{Dispatcher, LauncherContext, MenuCommand};
use concat::launcher::compose::{ComposeConfig, ProcessTool};
use concat::launcher::menu::run_menu;

/// vrt - launcher menu for the local development environment.
#[derive(Parser, Debug)]
#[command(name = "vrt")]
#[command(
    author,
    version,
    about,
    long_about = r#"Run one launcher action, or an interactive menu when no action is given.

Actions:
    greet             print a greeting
    create-database   remove the database container, then `compose down` and
                      `compose up -d` inside the compose directory
    quit              exit

Examples:
    vrt
    vrt create-database --compose-dir ./docker
    VRT_CONTAINER_TOOL=podman vrt create-database
"#
)]
struct Args {
    /// Action to run (greet, create-database, quit); omit for the menu.
    #[arg(value_name = "ACTION", value_parser = parse_command)]
    action: Option<MenuCommand>,

    /// Directory holding the compose file.
    #[arg(long, env = "VRT_COMPOSE_DIR", default_value = "docker", value_name = "DIR")]
    compose_dir: PathBuf,

    /// Database container removed before restarting the environment.
    #[arg(long, env = "VRT_CONTAINER", default_value = "odin-postgres", value_name = "NAME")]
    container: String,

    /// Container tool executable.
    #[arg(long, env = "VRT_CONTAINER_TOOL", default_value = "docker", value_name = "CMD")]
    tool: String,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

fn parse_command(s: &str) -> Result<MenuCommand, String> {
    s.parse()
}

fn run(args: Args) -> Result<()> {
    let compose = ComposeConfig {
        compose_dir: std::path::absolute(&args.compose_dir)?,
        container: args.container,
    };
    let tool = ProcessTool::new(args.tool);
    let dispatcher = Dispatcher::new();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.action {
        Some(action) => {
            let mut ctx = LauncherContext {
                out: &mut out,
                tool: &tool,
                compose: &compose,
            };
            dispatcher.dispatch(action, &mut ctx)?;
        }
        None => {
            let stdin = io::stdin();
            run_menu(stdin.lock(), &mut out, &dispatcher, &tool, &compose)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = run(args) {
        eprintln!("{}: {:#}", "error".red().bold(), err);
        std::process::exit(1);
    }
}
