//! Rasterop command line interface.
//!
//! Loads a JPEG, applies one operation from the catalog, and saves the
//! result. All pixel work happens in `rasterop-core`; this binary only
//! handles arguments, paths and logging.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use rasterop_core::convolve;
use rasterop_core::histogram::{self, Histogram};
use rasterop_core::io::{decode_jpeg, encode_jpeg};
use rasterop_core::tone;
use rasterop_core::transform;
use rasterop_core::{Kernel, PixelGrid};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "rasterop")]
#[command(about = "Pixel-level raster image editor")]
#[command(version)]
struct Args {
    /// Input JPEG path (a missing .jpg extension is appended)
    input: String,

    /// Output path (defaults to "<input>_edited.jpg")
    #[arg(short, long)]
    output: Option<String>,

    /// JPEG quality for the saved result (1-100)
    #[arg(long, default_value_t = 90)]
    quality: u8,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    operation: Operation,
}

#[derive(Subcommand, Debug)]
enum Operation {
    /// Convert the image to grayscale
    Grayscale,
    /// Reduce the image to a number of evenly spaced gray levels
    Quantize {
        /// Number of gray levels, at least 2
        #[arg(long)]
        levels: u32,
    },
    /// Invert every channel
    Invert,
    /// Shift every channel by a fixed amount
    Brightness {
        /// Shift in [-255, 255]
        #[arg(long, allow_hyphen_values = true)]
        delta: i32,
    },
    /// Stretch every channel away from mid-gray
    Contrast {
        /// Positive multiplier; above 1 increases contrast
        #[arg(long)]
        factor: f32,
    },
    /// Spread the luminance distribution toward uniform
    Equalize,
    /// Mirror left-to-right
    MirrorH,
    /// Mirror top-to-bottom
    MirrorV,
    /// Rotate 90 degrees clockwise
    RotateCw,
    /// Rotate 90 degrees counter-clockwise
    RotateCcw,
    /// Rotate by an arbitrary angle (degrees, positive = counter-clockwise)
    Rotate {
        #[arg(long, allow_hyphen_values = true)]
        angle: f64,
    },
    /// Upsample 2x with nearest-neighbor sampling
    ScaleUp,
    /// Downsample by integer factors with box averaging
    ScaleDown {
        /// Horizontal factor
        #[arg(long, default_value_t = 2)]
        x: u32,
        /// Vertical factor
        #[arg(long, default_value_t = 2)]
        y: u32,
    },
    /// Apply a convolution kernel
    Convolve {
        /// Catalog kernel name (see --help for the list)
        #[arg(long, value_parser = Kernel::names().to_vec())]
        kernel: Option<String>,
        /// JSON file holding a custom kernel as a list of rows
        #[arg(long, conflicts_with = "kernel")]
        kernel_file: Option<PathBuf>,
    },
    /// Blur with the 3x3 Gaussian kernel
    Blur,
    /// Render the luminance histogram as a 256x256 image
    Histogram,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let input = ensure_jpg_extension(&args.input);
    let bytes = fs::read(&input).with_context(|| format!("failed to read {}", input))?;
    let grid = decode_jpeg(&bytes).context("failed to decode input image")?;
    tracing::info!(
        width = grid.width(),
        height = grid.height(),
        "loaded {}",
        input
    );

    let result = apply_operation(grid, &args.operation)?;

    let output = ensure_jpg_extension(
        &args
            .output
            .unwrap_or_else(|| default_output_path(&input)),
    );
    let jpeg = encode_jpeg(&result, args.quality).context("failed to encode result")?;
    fs::write(&output, &jpeg).with_context(|| format!("failed to write {}", output))?;
    tracing::info!(
        width = result.width(),
        height = result.height(),
        "saved {}",
        output
    );

    Ok(())
}

fn apply_operation(mut grid: PixelGrid, operation: &Operation) -> anyhow::Result<PixelGrid> {
    tracing::debug!(?operation, "applying operation");

    let result = match operation {
        Operation::Grayscale => {
            tone::grayscale(&mut grid);
            grid
        }
        Operation::Quantize { levels } => {
            tone::quantize(&mut grid, *levels)?;
            grid
        }
        Operation::Invert => {
            tone::invert(&mut grid);
            grid
        }
        Operation::Brightness { delta } => {
            tone::brightness(&mut grid, *delta)?;
            grid
        }
        Operation::Contrast { factor } => {
            tone::contrast(&mut grid, *factor)?;
            grid
        }
        Operation::Equalize => {
            tone::equalize(&mut grid);
            grid
        }
        Operation::MirrorH => {
            transform::mirror_horizontal(&mut grid);
            grid
        }
        Operation::MirrorV => {
            transform::mirror_vertical(&mut grid);
            grid
        }
        Operation::RotateCw => transform::rotate_cw(&grid)?,
        Operation::RotateCcw => transform::rotate_ccw(&grid)?,
        Operation::Rotate { angle } => transform::rotate_by(&grid, *angle)?,
        Operation::ScaleUp => transform::scale_up(&grid)?,
        Operation::ScaleDown { x, y } => transform::scale_down(&grid, *x, *y)?,
        Operation::Convolve {
            kernel,
            kernel_file,
        } => {
            let kernel = load_kernel(kernel.as_deref(), kernel_file.as_deref())?;
            convolve::convolve(&grid, &kernel)?
        }
        Operation::Blur => convolve::gauss_blur(&grid)?,
        Operation::Histogram => {
            let hist = Histogram::of_grid(&grid);
            histogram::render(&hist)?
        }
    };
    Ok(result)
}

fn load_kernel(
    name: Option<&str>,
    file: Option<&std::path::Path>,
) -> anyhow::Result<Kernel> {
    match (name, file) {
        (Some(name), None) => {
            // The clap value parser has already restricted the name.
            Kernel::by_name(name).with_context(|| format!("unknown kernel {}", name))
        }
        (None, Some(path)) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read kernel file {}", path.display()))?;
            let kernel: Kernel = serde_json::from_str(&text)
                .with_context(|| format!("invalid kernel in {}", path.display()))?;
            Ok(kernel)
        }
        _ => bail!("convolve needs either --kernel or --kernel-file"),
    }
}

/// Append a `.jpg` extension when the path carries none.
fn ensure_jpg_extension(path: &str) -> String {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        path.to_string()
    } else {
        format!("{}.jpg", path)
    }
}

/// Derive the default output path from the input path.
fn default_output_path(input: &str) -> String {
    let stem = input
        .strip_suffix(".jpeg")
        .or_else(|| input.strip_suffix(".jpg"))
        .unwrap_or(input);
    format!("{}_edited.jpg", stem)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterop_core::Rgb;

    #[test]
    fn test_ensure_jpg_extension_appends() {
        assert_eq!(ensure_jpg_extension("photo"), "photo.jpg");
        assert_eq!(ensure_jpg_extension("dir/photo"), "dir/photo.jpg");
    }

    #[test]
    fn test_ensure_jpg_extension_keeps_existing() {
        assert_eq!(ensure_jpg_extension("photo.jpg"), "photo.jpg");
        assert_eq!(ensure_jpg_extension("photo.JPG"), "photo.JPG");
        assert_eq!(ensure_jpg_extension("photo.jpeg"), "photo.jpeg");
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(default_output_path("photo.jpg"), "photo_edited.jpg");
        assert_eq!(default_output_path("photo.jpeg"), "photo_edited.jpg");
        assert_eq!(default_output_path("photo"), "photo_edited.jpg");
    }

    #[test]
    fn test_apply_operation_in_place_ops() {
        let grid = PixelGrid::filled(4, 4, Rgb::new(10, 20, 30)).unwrap();

        let gray = apply_operation(grid.clone(), &Operation::Grayscale).unwrap();
        assert_eq!(gray.width(), 4);
        let px = gray.get(0, 0).unwrap();
        assert!(px.r == px.g && px.g == px.b);

        let inverted = apply_operation(grid, &Operation::Invert).unwrap();
        assert_eq!(inverted.get(0, 0).unwrap(), Rgb::new(245, 235, 225));
    }

    #[test]
    fn test_apply_operation_resizing_ops() {
        let grid = PixelGrid::filled(6, 4, Rgb::splat(100)).unwrap();

        let rotated = apply_operation(grid.clone(), &Operation::RotateCw).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (4, 6));

        let scaled = apply_operation(grid, &Operation::ScaleDown { x: 2, y: 2 }).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (3, 2));
    }

    #[test]
    fn test_apply_operation_histogram_render() {
        let grid = PixelGrid::filled(4, 4, Rgb::splat(77)).unwrap();
        let chart = apply_operation(grid, &Operation::Histogram).unwrap();
        assert_eq!((chart.width(), chart.height()), (256, 256));
    }

    #[test]
    fn test_apply_operation_rejects_bad_arguments() {
        let grid = PixelGrid::filled(4, 4, Rgb::splat(100)).unwrap();
        assert!(apply_operation(grid.clone(), &Operation::Quantize { levels: 1 }).is_err());
        assert!(apply_operation(grid, &Operation::ScaleDown { x: 0, y: 2 }).is_err());
    }

    #[test]
    fn test_load_kernel_requires_a_source() {
        assert!(load_kernel(None, None).is_err());
    }

    #[test]
    fn test_load_kernel_by_name() {
        let kernel = load_kernel(Some("gaussian"), None).unwrap();
        assert_eq!(kernel.size(), 3);
    }
}
