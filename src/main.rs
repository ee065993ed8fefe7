//! mindverse-layout CLI entry point.
//!
//! Reads a JSON graph document, writes the computed layout as JSON.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mindverse_layout::{Direction, GraphDocument, LayoutConfig, LayoutMode};

/// Auto-layout a Mindverse graph document.
#[derive(Parser, Debug)]
#[command(
    name = "mindverse-layout",
    version = env!("MINDVERSE_LAYOUT_VERSION"),
    about = "Hierarchical auto-layout for Mindverse graph documents"
)]
struct Cli {
    /// Input JSON document (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Override direction (TB, BT, LR, RL)
    #[arg(short = 'd', long = "direction")]
    direction: Option<Direction>,

    /// Layout config JSON file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Lay out every node as a layered graph, without the disconnected grid
    #[arg(long = "connected-only")]
    connected_only: bool,

    /// Pretty-print the JSON output
    #[arg(long = "pretty")]
    pretty: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => {
            let src = read_file(path);
            LayoutConfig::from_json(&src).unwrap_or_else(|e| {
                fail(&format!("invalid config '{}': {}", path.display(), e))
            })
        }
        None => LayoutConfig::default(),
    };

    // Read input from file or stdin
    let text = match cli.input {
        Some(ref path) => read_file(path),
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                fail(&format!("cannot read stdin: {}", e));
            }
            buf
        }
    };

    let mode = if cli.connected_only {
        LayoutMode::ConnectedOnly
    } else {
        LayoutMode::Full
    };
    let layout = GraphDocument::from_json(&text)
        .and_then(|doc| doc.layout(cli.direction, &config, mode))
        .unwrap_or_else(|e| fail(&e.to_string()));
    tracing::info!(
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        ?mode,
        "layout computed"
    );

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&layout)
    } else {
        serde_json::to_string(&layout)
    }
    .unwrap_or_else(|e| fail(&format!("cannot serialise layout: {}", e)));

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered + "\n") {
            fail(&format!("cannot write '{}': {}", path.display(), e));
        }
    } else {
        let mut stdout = io::stdout();
        if let Err(e) = writeln!(stdout, "{}", rendered).and_then(|()| stdout.flush()) {
            fail(&format!("cannot write stdout: {}", e));
        }
    }
}

fn read_file(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("cannot read '{}': {}", path.display(), e)))
}

fn fail(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}
