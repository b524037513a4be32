// Declare modules
pub mod cli;
pub mod comments;
pub mod config;
pub mod formatter;
pub mod models;
pub mod rules;
pub mod scanner;
pub mod strategy;
pub mod summarizer;
pub mod whitespace;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::scanner::scan_path;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Drops surrounding double quotes left by drag-and-drop shells, then keeps
/// only paths that exist.
fn resolve_roots(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|p| {
            let raw = p.to_string_lossy();
            PathBuf::from(raw.trim_matches('"'))
        })
        .filter(|p| {
            let valid = p.is_dir() || p.is_file();
            if !valid {
                log::warn!("{} is not a valid directory or file, skipping", p.display());
            }
            valid
        })
        .collect()
}

fn write_output(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create output directory {:?}", parent))?;
    }
    fs::write(path, document).context(format!("Error writing output file {:?}", path))
}

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();
    init_logging(args.verbose);

    // 2. Resolve Configuration
    let config = resolve_config(&args)?;

    // 3. Validate roots
    let roots = resolve_roots(&args.paths);
    if roots.is_empty() {
        bail!("No valid directory or file to scan");
    }

    // 4. Scan each root
    let sections: Vec<Vec<String>> = roots
        .iter()
        .map(|root| {
            log::info!("Scanning {}...", root.display());
            scan_path(root, &config.scan)
        })
        .collect();

    // 5. Generate and emit output
    let document = OutputGenerator::format_document(&config.scan.guide, &sections);

    if config.to_stdout {
        println!("{}", document);
        return Ok(());
    }

    write_output(&config.output_path, &document)?;
    log::info!(
        "Scan completed. Output saved to {} ({} bytes)",
        config.output_path.display(),
        document.len()
    );

    Ok(())
}
