use clap::Parser;
use std::path::PathBuf;
use vitae::{render_to_file, InkSpread, LayoutConfig, PipelineError, RenderPaths};

/// Render a CV from coordinate JSON into a single-page PDF.
#[derive(Parser, Debug)]
#[command(name = "vitae", version, about)]
struct Cli {
    /// Text elements (JSON array, top-down coordinates)
    #[arg(long, default_value = "data/coordinates.json")]
    text: PathBuf,

    /// Shape elements (JSON array, page coordinates)
    #[arg(long, default_value = "data/shapes.json")]
    shapes: PathBuf,

    #[arg(short, long, default_value = "outputs/cv.pdf")]
    output: PathBuf,

    /// Directory holding the font files named in the configuration
    #[arg(long, default_value = "data/assets")]
    assets: PathBuf,

    /// JSON file overriding layout defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document title written to the PDF metadata
    #[arg(long)]
    title: Option<String>,

    /// Stroke text in its fill color to mimic ink spread
    #[arg(long)]
    ink_spread: bool,
}

fn main() -> Result<(), PipelineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("vitae=info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LayoutConfig::from_json_file(path)?,
        None => LayoutConfig::default(),
    };
    if cli.title.is_some() {
        config.metadata.title = cli.title.clone();
    }
    if cli.ink_spread && config.ink_spread.is_none() {
        config.ink_spread = Some(InkSpread::default());
    }

    let paths = RenderPaths {
        text: cli.text,
        shapes: cli.shapes,
        output: cli.output,
        assets: cli.assets,
    };
    let report = render_to_file(&config, &paths)?;
    println!("{}: {}", paths.output.display(), report);
    Ok(())
}
