use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use exif_view::pipeline::Viewer;

#[derive(Parser, Debug)]
#[command(
    name = "exif-view",
    version,
    about = "Show EXIF tags and PNG text chunks of images, with embedded JSON expanded"
)]
struct Cli {
    /// Image files to inspect (.png .jpg .jpeg .tiff .bmp .gif)
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// One `--json` output record.
#[derive(Serialize)]
struct Record {
    path: String,
    #[serde(flatten)]
    viewer: Viewer,
}

// ANSI color codes
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let mut results = Vec::new();
    for path in &cli.paths {
        // One viewer per file; nothing carries over between loads.
        let mut viewer = Viewer::default();
        if !viewer.load(path) {
            continue;
        }

        if !cli.json {
            print_viewer(&viewer);
        }
        results.push(Record {
            path: path.display().to_string(),
            viewer,
        });
    }

    if results.is_empty() {
        anyhow::bail!("No supported image files among the given paths.");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}

/// Print the label as a header followed by the metadata text.
fn print_viewer(viewer: &Viewer) {
    println!();
    println!("{BOLD}{}{RESET}", viewer.label);
    println!("{DIM}{}{RESET}", "═".repeat(72));
    println!("{}", viewer.text);
}
