use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use atlasc_core::{build_atlas, to_manifest, AtlasConfig, InputImage};
use clap::{ArgAction, Parser};
use image::ImageReader;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "atlasc",
    about = "Pack sprite images into a texture atlas with a JSON manifest",
    version
)]
struct Cli {
    /// Input image file; repeat for each sprite
    #[arg(short = 'i', long = "input", value_name = "PATH", help_heading = "Input/Output")]
    input: Vec<PathBuf>,
    /// Output manifest path; the sheet PNG is written next to it
    #[arg(short = 'o', long = "output", value_name = "PATH", help_heading = "Input/Output")]
    output: Option<PathBuf>,

    /// Sheet width cap
    #[arg(short = 'W', long, default_value_t = 2048, help_heading = "Layout")]
    max_width: u32,
    /// Sheet height cap
    #[arg(short = 'H', long, default_value_t = 2048, help_heading = "Layout")]
    max_height: u32,
    /// Transparent border between sprites
    #[arg(short = 'B', long, default_value_t = 2, help_heading = "Layout")]
    border: u32,
    /// Padding band inside each sprite's sheet slot
    #[arg(short = 'P', long, default_value_t = 1, help_heading = "Layout")]
    padding: u32,
    /// Round final sheet dimensions to powers of two
    #[arg(short = '2', long = "pot", default_value_t = false, help_heading = "Layout")]
    pot: bool,

    /// Generate triangle meshes covering each sprite's opaque silhouette
    #[arg(short = 'm', long = "mesh", default_value_t = false, help_heading = "Mesh")]
    mesh: bool,
    /// Cap on the simplified polygon vertex count
    #[arg(short = 'M', long, default_value_t = 25, help_heading = "Mesh")]
    max_verts: u32,
    /// Opacity threshold (0..=255)
    #[arg(short = 'A', long, default_value_t = 20, help_heading = "Mesh")]
    alpha_threshold: u8,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(short, long, default_value_t = false, help_heading = "Logging")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    if let Err(e) = run(&cli) {
        error!("{e:#}");
        std::process::exit(-1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.input.is_empty() {
        anyhow::bail!("no input images specified (use --input)");
    }
    let Some(output) = &cli.output else {
        anyhow::bail!("no output path specified (use --output)");
    };
    if output.file_name().is_none() {
        anyhow::bail!("output path must end in a file name: {}", output.display());
    }

    let inputs = load_inputs(&cli.input)?;
    info!(count = inputs.len(), "loaded input images");

    let cfg = AtlasConfig {
        max_width: cli.max_width,
        max_height: cli.max_height,
        border: cli.border,
        padding: cli.padding,
        power_of_two: cli.pot,
        mesh: cli.mesh,
        max_verts: cli.max_verts,
        alpha_threshold: cli.alpha_threshold,
    };

    let out = build_atlas(inputs, cfg)?;

    for s in &out.atlas.sprites {
        info!(
            name = %s.key,
            x = s.sheet_rect.x,
            y = s.sheet_rect.y,
            w = s.sheet_rect.w,
            h = s.sheet_rect.h,
            "sprite"
        );
    }
    let stats = out.atlas.stats();
    info!(
        sprites = stats.num_sprites,
        width = out.atlas.width,
        height = out.atlas.height,
        occupancy = format!("{:.2}%", stats.occupancy * 100.0),
        "atlas built"
    );

    let png_path = output.with_extension("png");
    let image_name = png_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "atlas.png".to_string());
    let manifest = to_manifest(&out.atlas, &image_name);
    let json = serde_json::to_string_pretty(&manifest)?;

    out.rgba
        .save(&png_path)
        .with_context(|| format!("write {}", png_path.display()))?;
    if let Err(e) = fs::write(output, json) {
        // Never leave a half-emitted atlas behind.
        let _ = fs::remove_file(&png_path);
        return Err(e).with_context(|| format!("write {}", output.display()));
    }
    info!(manifest = %output.display(), image = %png_path.display(), "atlas written");
    Ok(())
}

fn load_inputs(paths: &[PathBuf]) -> anyhow::Result<Vec<InputImage>> {
    // Validate every path before decoding anything.
    for path in paths {
        if !path.is_file() {
            anyhow::bail!("input image not found: {}", path.display());
        }
    }
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        let image = load_image(path).with_context(|| format!("invalid image format: {}", path.display()))?;
        inputs.push(InputImage {
            key: unix_path(path),
            image,
        });
    }
    Ok(inputs)
}

fn load_image(path: &Path) -> anyhow::Result<image::DynamicImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img)
}

fn unix_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn init_tracing(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
