//! Sprig CLI
//!
//! Resolves a JSON style document and prints the layout tree.
//!
//! Set `SPRIG_LOG` (e.g. `SPRIG_LOG=debug`) to see engine logs.

mod document;
mod print;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sprig_layout::{LayoutConfig, LayoutEngine};
use sprig_style::Size;

use document::DocumentNode;
use print::TreePrinter;

/// Sprig: flexbox layout for JSON style documents
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lay out a document with unbounded space
    sprig layout.json

    # Offer a 800x600 viewport
    sprig layout.json --width 800 --height 600

    # Print the layout tree as JSON
    sprig layout.json --json

    # Snap the result to whole pixels
    sprig layout.json --width 1000 --round

    # Use engine settings from a file
    sprig layout.json --config engine.json --no-cache
"#)]
struct Cli {
    /// Path to the JSON style document
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Available width for the root (unbounded when omitted)
    #[arg(long)]
    width: Option<f32>,

    /// Available height for the root (unbounded when omitted)
    #[arg(long)]
    height: Option<f32>,

    /// Print the layout tree as JSON instead of text
    #[arg(long)]
    json: bool,

    /// JSON file with engine settings (`max_depth`, `cache`)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable result caching
    #[arg(long)]
    no_cache: bool,

    /// Snap positions and sizes to whole pixels
    #[arg(long)]
    round: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("SPRIG_LOG", "warn")).init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let doc: DocumentNode = serde_json::from_str(&source)
        .with_context(|| format!("{} is not a valid style document", cli.file.display()))?;
    let built = doc.build().context("failed to build the style tree")?;
    log::debug!(
        "loaded {} nodes from {}",
        doc.node_count(),
        cli.file.display()
    );

    let engine = LayoutEngine::with_config(config);
    let available = Size {
        width: cli.width,
        height: cli.height,
    };
    let (layout, issues) = engine
        .compute_layout_with_issues(&built.tree, built.root, available, &built.content)
        .context("layout failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        let stdout = io::stdout();
        let printer = TreePrinter {
            color: stdout.is_terminal(),
        };
        printer.write(&mut stdout.lock(), &doc, &layout)?;
    }

    for issue in &issues {
        eprintln!("warning: {issue}");
    }
    Ok(())
}

/// Engine settings from `--config`, with `--no-cache` and `--round` applied
/// on top.
fn load_config(cli: &Cli) -> anyhow::Result<LayoutConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("{} is not a valid engine config", path.display()))?
        }
        None => LayoutConfig::default(),
    };
    if cli.no_cache {
        config.cache = false;
    }
    if cli.round {
        config.round = true;
    }
    Ok(config)
}
