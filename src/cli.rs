//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use crate::backends::concat::{ConcatConfig, Concatenator};
use crate::core::extensions::ExtensionSet;
use crate::core::model::{ConcatError, ConcatSummary, ErrorKind};
use crate::core::paths::make_relative;

/// concat - merge the source files of a directory tree into one text file.
#[derive(Parser, Debug)]
#[command(name = "concat")]
#[command(
    author,
    version,
    about,
    long_about = r#"concat walks ROOT recursively and writes every file whose name ends with
one of the selected suffixes into a single output file.

Each file becomes one section:

    ---- /absolute/path/to/file.ts ----
    <file contents>
    <blank line>

Sections follow the filesystem's traversal order (files of a directory
before its subdirectories); nothing is sorted.

Examples:
    concat --root www/src --out salida.txt
    concat --root . --out bundle.txt --ext rs,toml
    concat --root app --out /tmp/app.txt --json
"#
)]
pub struct Cli {
    /// Directory to scan.
    #[arg(
        long,
        default_value = ".",
        value_name = "DIR",
        long_help = "Directory to scan recursively (defaults to the current directory).\n\n\
It must exist and be a directory. It is resolved to an absolute path before the\n\
walk starts, and section headers carry absolute paths."
    )]
    pub root: PathBuf,

    /// Output file name, relative to ROOT unless absolute.
    #[arg(
        long,
        value_name = "FILENAME",
        long_help = "Output file name. A relative name is placed inside ROOT; an absolute\n\
path is used as is.\n\n\
The file is created or truncated at the start of the run. It is never included\n\
in its own output, even if its name matches a selected suffix."
    )]
    pub out: PathBuf,

    /// Comma-separated file-name suffixes to include.
    #[arg(
        long,
        env = "CONCAT_EXT",
        default_value = "ts,tsx,css",
        value_name = "LIST",
        value_parser = parse_extensions,
        long_help = "Comma-separated list of file-name suffixes to include (case-sensitive).\n\n\
A leading dot is added when missing, so `ts` selects files ending in `.ts`.\n\
Matching is a literal suffix test on the file name."
    )]
    pub ext: ExtensionSet,

    /// Print run statistics on stderr.
    #[arg(long)]
    pub stats: bool,

    /// Print the run summary as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors. NO_COLOR is honoured as well."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (list each section as it is written).
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_extensions(s: &str) -> Result<ExtensionSet, String> {
    s.parse::<ExtensionSet>().map_err(|e| e.to_string())
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = ConcatConfig::new(&cli.root, &cli.out).with_extensions(cli.ext.clone());
    let concatenator = Concatenator::new(config);

    let summary = if cli.verbose {
        let root = std::path::absolute(&cli.root).unwrap_or_else(|_| cli.root.clone());
        concatenator.run_with_progress(|path, len| {
            let shown = make_relative(path, &root).unwrap_or_else(|| path.display().to_string());
            eprintln!("  {} {} ({} bytes)", "+".green(), shown, len);
        })?
    } else {
        concatenator.run()?
    };

    if cli.json {
        println!("{}", serde_json::to_string(&summary)?);
    }

    if cli.stats && !cli.quiet {
        print_stats(&summary);
    }

    Ok(())
}

fn print_stats(summary: &ConcatSummary) {
    eprintln!("{}", "Concat Statistics:".bold());
    eprintln!("   Root: {}", summary.root);
    eprintln!("   Output: {}", summary.output);
    eprintln!("   Suffixes: {}", summary.extensions.join(" "));
    eprintln!("   Files: {}", summary.files);
    eprintln!("   Bytes: {}", summary.bytes);
    if summary.skipped_output {
        eprintln!("   Output file matched the filter and was left out");
    }
}

/// Print an error chain on stderr and return the process exit code.
pub fn report_error(err: &anyhow::Error) -> i32 {
    let label = match err.downcast_ref::<ConcatError>() {
        Some(e) => format!("error[{}]", kind_name(e)),
        None => "error".to_string(),
    };
    eprintln!("{}: {:#}", label.red().bold(), err);
    1
}

fn kind_name(err: &ConcatError) -> &'static str {
    match err.kind() {
        ErrorKind::Filesystem => "filesystem",
        ErrorKind::Encoding => "encoding",
    }
}
