//! concat - merge matching source files under a root into one text file

use clap::Parser;
use concat::cli;

fn main() {
    let cli = cli::Cli::parse();
    if let Err(err) = cli::run(cli) {
        std::process::exit(cli::report_error(&err));
    }
}
