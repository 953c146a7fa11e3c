use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use memlane_core::config::CarouselStyle;
use memlane_core::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "memlane")]
#[command(author, version, about = "A themeable terminal photo-story viewer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON file with the memories to show (defaults to the built-in samples)
    #[arg(short = 'm', long = "memories", global = true)]
    memories: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run {
        /// Carousel style (orbit, timeline, stack, stories, flow)
        #[arg(short = 's', long)]
        style: Option<CarouselStyle>,
        /// Theme name
        #[arg(short = 't', long)]
        theme: Option<String>,
        /// Start with autoplay on
        #[arg(short = 'a', long)]
        autoplay: bool,
        /// Skip the cover view
        #[arg(long)]
        no_hero: bool,
    },
    /// List memories
    List {
        /// Print the collection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export memories as JSON records
    Export {
        /// Position of the memory to export (1-based); all when omitted
        #[arg(short = 'i', long)]
        index: Option<usize>,
        /// Output directory (defaults to <data_dir>/exports)
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
        /// Save the whole collection to one file, loadable with --memories
        #[arg(long, value_name = "FILE", conflicts_with_all = ["index", "out"])]
        collection: Option<PathBuf>,
    },
    /// Host an image and print its reference (URL, or data URL offline)
    Upload {
        /// Image file
        file: PathBuf,
    },
    /// Print the card layout of a carousel style at a position
    Layout {
        /// Carousel style
        #[arg(short = 's', long, default_value = "orbit")]
        style: CarouselStyle,
        /// Number of cards
        #[arg(short = 'n', long, default_value_t = 6)]
        count: usize,
        /// Carousel position in items (fractional values show mid-animation)
        #[arg(short = 'p', long, default_value_t = 0.0, allow_negative_numbers = true)]
        position: f64,
    },
    /// Show the configuration file location
    Config {
        /// Write the current (or default) configuration to disk
        #[arg(long)]
        write: bool,
    },
}

/// Log to `log_path` instead of stderr when given
fn init_logging(config: &AppConfig, log_path: Option<PathBuf>) -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone());
    let filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, stderr_layer) = match log_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false);
            (Some(layer), None)
        }
        None => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;

    // The TUI owns the terminal, so its logs go to a file
    let tui = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logging(&config, tui.then(|| config.log_path()))?;

    let memories = cli.memories.as_deref();
    match cli.command {
        None => commands::run::run(Arc::new(config), memories).await,
        Some(Commands::Run {
            style,
            theme,
            autoplay,
            no_hero,
        }) => {
            if let Some(style) = style {
                config.ui.carousel_style = style;
            }
            if let Some(theme) = theme {
                config.ui.theme.name = theme;
            }
            config.autoplay.enabled |= autoplay;
            if no_hero {
                config.hero.start_in_hero = false;
            }
            commands::run::run(Arc::new(config), memories).await
        }
        Some(Commands::List { json }) => commands::list::run(memories, json),
        Some(Commands::Export {
            collection: Some(file),
            ..
        }) => commands::export::save_collection(memories, &file),
        Some(Commands::Export { index, out, .. }) => {
            let out = out.unwrap_or_else(|| config.export_dir());
            commands::export::run(memories, index, &out)
        }
        Some(Commands::Upload { file }) => commands::upload::run(&config, &file).await,
        Some(Commands::Layout {
            style,
            count,
            position,
        }) => commands::layout::run(style, count, position),
        Some(Commands::Config { write }) => commands::config::run(&config, write),
    }
}
