//! Integer-factor resampling.
//!
//! Downscaling averages each `sx` by `sy` block of source pixels into one
//! output pixel (box filter). Upscaling is a fixed 2x nearest-neighbor
//! expansion; the factor is a constant, not a parameter.

use crate::error::Error;
use crate::grid::{PixelGrid, Rgb};

/// The fixed factor applied by [`scale_up`].
pub const UPSCALE_FACTOR: u32 = 2;

/// Downsample a grid by integer factors to `width / sx` x `height / sy`.
///
/// Each output pixel is the rounded average of its `sx * sy` source block.
/// Fails with `InvalidArgument` when a factor is zero or the result would
/// have a zero dimension.
pub fn scale_down(grid: &PixelGrid, sx: u32, sy: u32) -> Result<PixelGrid, Error> {
    if sx == 0 || sy == 0 {
        return Err(Error::InvalidArgument(format!(
            "scale factors must be positive, got {}x{}",
            sx, sy
        )));
    }

    let out_w = grid.width() / sx;
    let out_h = grid.height() / sy;
    if out_w == 0 || out_h == 0 {
        return Err(Error::InvalidArgument(format!(
            "scaling {}x{} down by {}x{} leaves no pixels",
            grid.width(),
            grid.height(),
            sx,
            sy
        )));
    }

    let block = (sx * sy) as u64;
    let mut out = Vec::with_capacity((out_w * out_h) as usize);
    for oy in 0..out_h {
        for ox in 0..out_w {
            let mut sum = [0u64; 3];
            for dy in 0..sy {
                for dx in 0..sx {
                    let px = grid.at(ox * sx + dx, oy * sy + dy);
                    sum[0] += px.r as u64;
                    sum[1] += px.g as u64;
                    sum[2] += px.b as u64;
                }
            }
            out.push(Rgb::new(
                ((sum[0] + block / 2) / block) as u8,
                ((sum[1] + block / 2) / block) as u8,
                ((sum[2] + block / 2) / block) as u8,
            ));
        }
    }
    PixelGrid::from_pixels(out_w, out_h, out)
}

/// Upsample a grid by the fixed 2x factor with nearest-neighbor sampling.
///
/// Every source pixel becomes a 2x2 block in the output.
pub fn scale_up(grid: &PixelGrid) -> Result<PixelGrid, Error> {
    let out_w = grid
        .width()
        .checked_mul(UPSCALE_FACTOR)
        .ok_or(Error::Allocation { bytes: usize::MAX })?;
    let out_h = grid
        .height()
        .checked_mul(UPSCALE_FACTOR)
        .ok_or(Error::Allocation { bytes: usize::MAX })?;

    let mut out = Vec::with_capacity(out_w as usize * out_h as usize);
    for ny in 0..out_h {
        for nx in 0..out_w {
            out.push(grid.at(nx / UPSCALE_FACTOR, ny / UPSCALE_FACTOR));
        }
    }
    PixelGrid::from_pixels(out_w, out_h, out)
}
