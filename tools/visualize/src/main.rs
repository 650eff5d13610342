//! Heatmap renderer for environments written by `slick populate`.
//!
//! Writes `<stem>_thickness.png`, `<stem>_band<k>.png` and a side-by-side
//! `<stem>_compare.png` next to the output prefix.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use image::{Rgb, RgbImage};
use slick_core::generator::Environment;
use slick_core::grid::Shape;

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Render thickness and reflectivity heatmaps")]
struct Args {
    /// Environment JSON file.
    #[arg(short, long)]
    input: PathBuf,

    /// Reflectivity band to render.
    #[arg(short, long, default_value_t = 0)]
    band: usize,

    /// Output directory.
    #[arg(short, long, default_value = "data/debug")]
    out: PathBuf,
}

/// Gap between the two panels of the comparison image, in pixels.
const PANEL_GAP: u32 = 8;

// ── Colour helpers ────────────────────────────────────────────────────────────

/// Jet colormap: 0 = dark blue, 0.5 = green, 1 = dark red.
fn jet(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let channel = |offset: f64| ((1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0) * 255.0) as u8;
    Rgb([channel(3.0), channel(2.0), channel(1.0)])
}

/// Render a row-major plane as a jet heatmap stretched over its own range.
fn heatmap(values: &[f64], shape: Shape) -> RgbImage {
    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = if hi > lo { hi - lo } else { 1.0 };
    let mut img = RgbImage::new(shape.width as u32, shape.height as u32);
    for r in 0..shape.height {
        for c in 0..shape.width {
            let v = values[shape.index(r, c)];
            img.put_pixel(c as u32, r as u32, jet((v - lo) / range));
        }
    }
    img
}

fn side_by_side(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let width = left.width() + PANEL_GAP + right.width();
    let height = left.height().max(right.height());
    let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for (x, y, px) in left.enumerate_pixels() {
        img.put_pixel(x, y, *px);
    }
    let offset = left.width() + PANEL_GAP;
    for (x, y, px) in right.enumerate_pixels() {
        img.put_pixel(offset + x, y, *px);
    }
    img
}

fn save(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path).with_context(|| format!("failed to save {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let env: Environment = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", args.input.display()))?;

    let band = env.populated.band(args.band).with_context(|| {
        format!("band {} out of range: environment has {} bands", args.band, env.populated.num_bands)
    })?;
    if env.thickness.shape != env.populated.shape {
        bail!(
            "thickness field {} and reflectivity cube {} disagree in shape",
            env.thickness.shape,
            env.populated.shape
        );
    }
    fs::create_dir_all(&args.out).with_context(|| format!("creating {}", args.out.display()))?;

    let stem = args
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("environment");

    let thickness: Vec<f64> = env.thickness.data.iter().map(|&t| t as f64).collect();
    let thickness_img = heatmap(&thickness, env.thickness.shape);
    save(&thickness_img, &args.out.join(format!("{stem}_thickness.png")))?;

    let band_img = heatmap(&band, env.populated.shape);
    save(&band_img, &args.out.join(format!("{stem}_band{}.png", args.band)))?;

    save(&side_by_side(&thickness_img, &band_img), &args.out.join(format!("{stem}_compare.png")))?;
    Ok(())
}
