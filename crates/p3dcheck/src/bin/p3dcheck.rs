//! # P3DCHECK Command Line
//!
//! Scans a directory tree for P3D models, decodes and verifies them on a
//! worker pool, and prints the findings report to stdout. Progress and the
//! run summary go to stderr so the report stays pipeable.
//!
//! ## Usage
//!
//! ```bash
//! p3dcheck path/to/models --jobs 8
//! p3dcheck addons --no-verify --quiet > report.txt
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use p3dcheck::{render_report, BatchConfig, BatchLoader};
use p3dcheck_verify::Registry;

/// Files between progress lines on stderr.
const PROGRESS_INTERVAL: usize = 100;

fn print_help() {
    println!("Usage: p3dcheck [OPTIONS] <DIRECTORY>");
    println!();
    println!("Options:");
    println!("  -j, --jobs <NUM>    Worker threads (default: all cores)");
    println!("      --no-verify     Decode only, skip property verification");
    println!("  -q, --quiet         No progress or summary on stderr");
    println!("  -h, --help          Show this help");
    println!();
    println!("The findings report goes to stdout; one line per model with");
    println!("findings, indented lines per LOD and per finding. Exit code 0");
    println!("when every file loaded and no error-severity finding exists.");
}

fn main() -> ExitCode {
    // Parse command line arguments (simple parsing, no external deps)
    let args: Vec<String> = std::env::args().collect();
    let mut config = BatchConfig::default();
    let mut quiet = false;
    let mut root: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--jobs" | "-j" => {
                if i + 1 < args.len() {
                    config.worker_count = args[i + 1].parse().unwrap_or(config.worker_count);
                    i += 1;
                }
            }
            "--no-verify" => {
                config.verify = false;
            }
            "--quiet" | "-q" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            other => {
                if root.is_none() && !other.starts_with('-') {
                    root = Some(other.to_string());
                }
            }
        }
        i += 1;
    }

    let Some(root) = root else {
        eprintln!("p3dcheck: missing <DIRECTORY>");
        eprintln!("Try 'p3dcheck --help'.");
        return ExitCode::FAILURE;
    };

    let registry = Arc::new(Registry::standard());
    let loader = BatchLoader::start(&root, config, registry);
    if !quiet {
        eprintln!("Checking {} file(s) under {}", loader.total(), root);
    }

    let mut models = Vec::new();
    let mut last_reported = 0;
    while let Some(model) = loader.recv() {
        models.push(model);
        let progress = loader.progress();
        if !quiet && progress >= last_reported + PROGRESS_INTERVAL {
            last_reported = progress - progress % PROGRESS_INTERVAL;
            eprintln!("  {progress}/{} files", loader.total());
        }
    }

    print!("{}", render_report(&models));

    let stats = loader.stats();
    let with_findings = models.iter().filter(|m| m.has_diagnostics()).count();
    let failed = stats.io_failures + stats.decode_failures;
    if !quiet {
        eprintln!(
            "checked {} files, {} with findings, {} failed to load",
            stats.attempted, with_findings, failed
        );
    }

    let any_errors = models.iter().any(p3dcheck_format::Model::has_errors);
    if failed == 0 && !any_errors {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
