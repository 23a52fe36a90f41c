//! SVG Graphics CLI
//!
//! Usage:
//!   svg-graphics [OPTIONS] [OUTPUT]
//!
//! Options:
//!   -c, --config <FILE>  Export configuration (TOML format)
//!   --inline-styles      Write presentation attributes instead of CSS classes
//!   -v, --verbose        Log what gets written
//!   --gui                Use native file dialogs (with the `gui` feature)
//!   -h, --help           Print help

use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use svg_graphics::geometry::Size;
use svg_graphics::scene;
use svg_graphics::writer::{self, ConsoleDialog, SaveOutcome};
use svg_graphics::{ExportConfig, SvgGraphics};

#[derive(Parser)]
#[command(name = "svg-graphics")]
#[command(about = "Render the gradient demonstration scene to an SVG file")]
struct Cli {
    /// Output file (prompts for one if not provided)
    output: Option<PathBuf>,

    /// Export configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write presentation attributes instead of CSS classes
    #[arg(long)]
    inline_styles: bool,

    /// Log what gets written
    #[arg(short, long)]
    verbose: bool,

    /// Use native file dialogs instead of terminal prompts
    #[cfg(feature = "gui")]
    #[arg(long)]
    gui: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let mut config = match &cli.config {
        Some(path) => match ExportConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ExportConfig::default(),
    };
    if cli.inline_styles {
        config.svg.use_css = false;
    }
    if config.canvas.is_none() {
        config.canvas = Some(Size::new(800.0, 800.0));
    }

    let mut graphics = SvgGraphics::with_config(config);
    let image = scene::noise_image(100, 100, 0x5eed);
    if let Err(e) = scene::draw_demo(&mut graphics, &image) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    #[cfg(feature = "gui")]
    let outcome = if cli.gui {
        let mut dialog = svg_graphics::native_dialog::NativeDialog::new().with_file_name("scene.svg");
        writer::save(&graphics, &mut dialog, cli.output)
    } else {
        save_from_terminal(&graphics, cli.output)
    };
    #[cfg(not(feature = "gui"))]
    let outcome = save_from_terminal(&graphics, cli.output);

    match outcome {
        SaveOutcome::Saved(path) => println!("{}", path.display()),
        SaveOutcome::Cancelled => {}
        SaveOutcome::Failed(_) => std::process::exit(1),
    }
}

fn save_from_terminal(graphics: &SvgGraphics, output: Option<PathBuf>) -> SaveOutcome {
    let stdin = io::stdin();
    let mut dialog = ConsoleDialog::new(stdin.lock(), io::stderr());
    writer::save(graphics, &mut dialog, output)
}
