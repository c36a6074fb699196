//! Text menu loop
//!
//! Prints the numbered menu, reads one selection per line and dispatches it.
//! Handler errors are reported and the loop keeps going; end of input quits.

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::launcher::command::{Dispatcher, LauncherContext, MenuCommand, Outcome};
use crate::launcher::compose::{ComposeConfig, ContainerTool};

/// Write the numbered menu
pub fn print_menu(out: &mut dyn Write) -> Result<()> {
    for (i, cmd) in MenuCommand::ALL.iter().enumerate() {
        writeln!(out, "  {}) {:<22} [{}]", i + 1, cmd.label(), cmd.id())?;
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Run the menu until Quit is chosen or input ends
pub fn run_menu<R: BufRead>(
    input: R,
    out: &mut dyn Write,
    dispatcher: &Dispatcher,
    tool: &dyn ContainerTool,
    compose: &ComposeConfig,
) -> Result<()> {
    print_menu(out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            print_menu(out)?;
            continue;
        }

        let command = match line.parse::<MenuCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{} (choose 1-{})", e, MenuCommand::ALL.len())?;
                print_menu(out)?;
                continue;
            }
        };

        let mut ctx = LauncherContext {
            out: &mut *out,
            tool,
            compose,
        };
        match dispatcher.dispatch(command, &mut ctx) {
            Ok(Outcome::Exit) => return Ok(()),
            Ok(Outcome::Continue) => {}
            Err(e) => writeln!(out, "Error: {:#}", e)?,
        }

        print_menu(out)?;
    }

    writeln!(out)?;
    Ok(())
}
