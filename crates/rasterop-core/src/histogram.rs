//! Histogram computation and rendering.
//!
//! Provides per-channel and luminance frequency counts over a pixel grid,
//! the cumulative-distribution lookup table used by histogram equalization,
//! and a small renderable bar chart of the luminance distribution.

use crate::error::Error;
use crate::grid::{PixelGrid, Rgb};

/// Side length of the rendered histogram image.
pub const RENDER_SIZE: u32 = 256;

/// Frequency counts for an image, 256 bins per channel.
///
/// Derived data: recomputed on demand, never persisted. The luminance bins
/// always sum to the number of pixels counted.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Red channel counts.
    pub red: [u32; 256],
    /// Green channel counts.
    pub green: [u32; 256],
    /// Blue channel counts.
    pub blue: [u32; 256],
    /// BT.601 luminance counts.
    pub luminance: [u32; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            red: [0; 256],
            green: [0; 256],
            blue: [0; 256],
            luminance: [0; 256],
        }
    }
}

impl Histogram {
    /// Create a new empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the histogram of a grid in a single pass.
    pub fn of_grid(grid: &PixelGrid) -> Self {
        let mut hist = Self::new();
        for px in grid.pixels() {
            hist.red[px.r as usize] += 1;
            hist.green[px.g as usize] += 1;
            hist.blue[px.b as usize] += 1;
            hist.luminance[px.luminance() as usize] += 1;
        }
        hist
    }

    /// The largest luminance bin, used to scale rendered bars.
    pub fn luminance_max(&self) -> u32 {
        self.luminance.iter().copied().max().unwrap_or(0)
    }
}

/// Build the 256-entry remap table for histogram equalization.
///
/// Uses the standard normalization
/// `lut[v] = round((cdf(v) - cdf_min) / (n - cdf_min) * 255)`, where
/// `cdf_min` is the cumulative count of the first occupied bin. A constant
/// image (every pixel in one bin) maps to full white.
pub fn equalization_lut(bins: &[u32; 256], pixel_count: usize) -> [u8; 256] {
    let mut lut = [0u8; 256];
    if pixel_count == 0 {
        return lut;
    }

    let mut cdf = [0u64; 256];
    let mut running = 0u64;
    for (v, &count) in bins.iter().enumerate() {
        running += count as u64;
        cdf[v] = running;
    }

    let cdf_min = cdf
        .iter()
        .copied()
        .find(|&c| c > 0)
        .unwrap_or(0);
    let denom = (pixel_count as u64).saturating_sub(cdf_min);

    for (v, lut_v) in lut.iter_mut().enumerate() {
        if cdf[v] == 0 {
            continue;
        }
        if denom == 0 {
            // Every counted pixel sits in a single bin.
            *lut_v = 255;
            continue;
        }
        let num = (cdf[v] - cdf_min) * 255;
        *lut_v = ((num + denom / 2) / denom).min(255) as u8;
    }
    lut
}

/// Render the luminance histogram as a 256x256 monochrome bar chart.
///
/// One vertical bar per bin, scaled so the largest bin spans the full
/// height, drawn bottom-up in white on black. Display-only output; the
/// caller encodes or shows it like any other grid.
pub fn render(hist: &Histogram) -> Result<PixelGrid, Error> {
    let mut grid = PixelGrid::new(RENDER_SIZE, RENDER_SIZE)?;
    let max = hist.luminance_max();
    if max == 0 {
        return Ok(grid);
    }

    for x in 0..RENDER_SIZE {
        let count = hist.luminance[x as usize] as u64;
        let bar = ((count * RENDER_SIZE as u64) / max as u64) as u32;
        for y in (RENDER_SIZE - bar)..RENDER_SIZE {
            grid.set(x, y, Rgb::splat(255))?;
        }
    }
    Ok(grid)
}
