use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use facetag_core::{GalleryManifest, KnownPerson, OnnxEngine};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod pipeline;

use config::Config;

#[derive(Parser)]
#[command(
    name = "facetag",
    about = "Match faces in an image against known people and render an HTML report"
)]
struct Cli {
    /// Known person as NAME=IMAGE (repeatable)
    #[arg(short, long = "known", value_name = "NAME=IMAGE", value_parser = parse_known)]
    known: Vec<KnownPerson>,

    /// TOML manifest listing known people ([[person]] name/image tables)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Image with faces to recognize
    #[arg(short, long, default_value = pipeline::DEFAULT_UNKNOWN_IMAGE)]
    unknown: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Maximum encoding distance for a match (lower is stricter) [env: FACETAG_TOLERANCE]
    #[arg(short, long)]
    tolerance: Option<f32>,

    /// Directory holding det_10g.onnx and w600k_r50.onnx [env: FACETAG_MODEL_DIR]
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// TrueType font for face labels [env: FACETAG_FONT]
    #[arg(long)]
    font: Option<PathBuf>,

    /// JPEG quality of the embedded image [env: FACETAG_JPEG_QUALITY]
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: Option<u8>,

    /// Create blank white images for input files that do not exist
    #[arg(long)]
    create_placeholders: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Json,
}

fn parse_known(arg: &str) -> Result<KnownPerson, String> {
    match arg.split_once('=') {
        Some((name, image)) if !name.trim().is_empty() && !image.is_empty() => {
            Ok(KnownPerson::new(name.trim(), image))
        }
        _ => Err(format!("expected NAME=IMAGE, got {arg:?}")),
    }
}

fn check_tolerance(tolerance: f32) -> Result<()> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        bail!("tolerance must be a non-negative number, got {tolerance}");
    }
    Ok(())
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(dir) = &self.model_dir {
            config.model_dir = dir.clone();
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
        if let Some(quality) = self.jpeg_quality {
            config.jpeg_quality = quality;
        }
        config
    }

    /// Known people from the manifest and `--known`, or the defaults when neither is given.
    fn people(&self) -> Result<Vec<KnownPerson>> {
        let mut people = Vec::new();
        if let Some(path) = &self.manifest {
            people.extend(GalleryManifest::load(path)?.people);
        }
        people.extend(self.known.iter().cloned());
        if self.manifest.is_none() && self.known.is_empty() {
            people = pipeline::default_people();
        }
        Ok(people)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    check_tolerance(config.tolerance)?;

    let people = cli.people()?;

    if cli.create_placeholders {
        pipeline::create_placeholders(
            people
                .iter()
                .map(|p| p.image.as_path())
                .chain(std::iter::once(cli.unknown.as_path())),
        );
    }

    tracing::info!(
        model_dir = %config.model_dir.display(),
        tolerance = config.tolerance,
        known = people.len(),
        "facetag starting"
    );

    let mut engine = OnnxEngine::load(&config.scrfd_model_path(), &config.arcface_model_path())
        .context("failed to load face models")?;
    let font = facetag_render::resolve_font(config.font_path.as_deref());

    let report = pipeline::run(&mut engine, &config, font.as_ref(), &people, &cli.unknown);

    let rendered = match cli.format {
        Format::Html => report.to_html(),
        Format::Json => report.to_json().context("failed to serialize report")?,
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
