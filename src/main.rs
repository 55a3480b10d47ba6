use clap::{CommandFactory, Parser};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thumbtree::resolve::{RawArgs, ResolveError};
use thumbtree::types::ScanConfig;
use thumbtree::walk::WalkSummary;
use thumbtree::{config, output, resolve, walk};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Exit code for command-line usage errors.
const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(name = "thumbtree")]
#[command(about = "Resize every JPEG in a directory tree into a mirrored tree")]
#[command(long_about = "\
Resize every JPEG in a directory tree into a mirrored tree

Each file under the source directory whose name ends in .jpg or .jpeg (any
case) is resized and written to the same relative path under the destination
directory. Missing destination directories are created. Other files are
ignored and the source tree is never modified.

Choose exactly one resize mode:

  -r 0.3              scale both sides by a factor
  -w 640 -h 480       fit inside a 640x480 box, keeping proportions

Examples:

  thumbtree -d thumbs -r 0.5                 # current dir, top level only
  thumbtree -s photos -d thumbs -w 800 -h 800 -R

A file that cannot be resized is reported and skipped; the exit code is then
non-zero. Run 'thumbtree --gen-config' for the documented config file.")]
#[command(version, disable_help_flag = true, allow_negative_numbers = true)]
struct Cli {
    /// Source directory [default: current directory]
    #[arg(short = 's', long = "src", value_name = "DIR")]
    src: Option<String>,

    /// Destination directory (created if missing)
    #[arg(short = 'd', long = "dst", value_name = "DIR")]
    dst: Option<String>,

    /// Scale factor, e.g. 0.3
    #[arg(short = 'r', long, value_name = "FACTOR")]
    ratio: Option<String>,

    /// Target width in pixels (with --height)
    #[arg(short = 'w', long, value_name = "PX")]
    width: Option<String>,

    /// Target height in pixels (with --width)
    #[arg(short = 'h', long, value_name = "PX")]
    height: Option<String>,

    /// Descend into subdirectories at any depth
    #[arg(short = 'R', long)]
    recursive: bool,

    /// Tool config file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a stock config file with all options documented
    #[arg(long)]
    gen_config: bool,

    /// Write the run summary as JSON
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn raw_args(&self) -> RawArgs {
        RawArgs {
            src: self.src.clone(),
            dst: self.dst.clone(),
            width: self.width.clone(),
            height: self.height.clone(),
            ratio: self.ratio.clone(),
            recursive: self.recursive,
        }
    }
}

/// JSON written by `--report`.
#[derive(Serialize)]
struct Report<'a> {
    config: &'a ScanConfig,
    summary: &'a WalkSummary,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return ExitCode::SUCCESS;
    }

    run(&cli)
}

/// `RUST_LOG` wins; otherwise errors only, or everything with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> ExitCode {
    let tool_config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: cannot read current directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let scan = match resolve::resolve(&cli.raw_args(), &cwd) {
        Ok(scan) => scan,
        Err(e) => return report_resolve_error(&e),
    };

    output::print_header(&scan);

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_walk_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = walk::walk(
        &scan,
        &tool_config.walk_options(),
        &tool_config.resize_options(),
        Some(tx),
    );
    if printer.join().is_err() {
        warn!("output printer thread panicked");
    }

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    output::print_summary(&summary);

    ExitCode::from(finish_run(cli.report.as_deref(), &scan, &summary))
}

/// Writes the optional report and picks the exit code of a completed walk.
/// A report that cannot be written fails the run even when every file did.
fn finish_run(report: Option<&Path>, scan: &ScanConfig, summary: &WalkSummary) -> u8 {
    if let Some(path) = report {
        if let Err(e) = write_report(path, scan, summary) {
            eprintln!("error: cannot write report {}: {e}", path.display());
            return 1;
        }
    }

    if summary.is_clean() { 0 } else { 1 }
}

/// Usage errors get the help text and exit code 2; setup errors exit 1.
fn report_resolve_error(err: &ResolveError) -> ExitCode {
    eprintln!("error: {err}");
    if err.is_usage() {
        eprintln!();
        eprintln!("{}", Cli::command().render_help());
    }
    ExitCode::from(resolve_exit_code(err))
}

fn resolve_exit_code(err: &ResolveError) -> u8 {
    if err.is_usage() {
        EXIT_USAGE
    } else {
        1
    }
}

fn write_report(
    path: &Path,
    scan: &ScanConfig,
    summary: &WalkSummary,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = Report {
        config: scan,
        summary,
    };
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(path, json)?;
    Ok(())
}
