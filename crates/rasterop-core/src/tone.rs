//! Tone operations: position-independent per-pixel mappings.
//!
//! All operations work in place on the grid. Operations with arguments
//! validate them before touching any pixel, so a failed call leaves the
//! grid exactly as it was.
//!
//! The grayscale-derivative operations (grayscale, quantize, equalize)
//! produce monochrome output: the computed luminance replaces all three
//! channels.

use crate::error::Error;
use crate::grid::{PixelGrid, Rgb};
use crate::histogram::{equalization_lut, Histogram};

/// Replace every pixel with its luminance.
pub fn grayscale(grid: &mut PixelGrid) {
    for px in grid.pixels_mut() {
        *px = Rgb::splat(px.luminance());
    }
}

/// Reduce the image to `levels` evenly spaced shades of gray.
///
/// Computes `step = 255 / (levels - 1)` and snaps each pixel's luminance to
/// the nearest multiple of `step`. With `levels = 2` the output holds only
/// pure black and pure white. Fails with `InvalidArgument` when
/// `levels < 2`.
pub fn quantize(grid: &mut PixelGrid, levels: u32) -> Result<(), Error> {
    if levels < 2 {
        return Err(Error::InvalidArgument(format!(
            "quantize needs at least 2 levels, got {}",
            levels
        )));
    }

    let step = 255.0 / (levels - 1) as f32;
    for px in grid.pixels_mut() {
        let lum = px.luminance() as f32;
        let snapped = (lum / step).round() * step;
        *px = Rgb::splat(snapped.round().clamp(0.0, 255.0) as u8);
    }
    Ok(())
}

/// Invert every channel of every pixel.
pub fn invert(grid: &mut PixelGrid) {
    for px in grid.pixels_mut() {
        *px = Rgb::new(255 - px.r, 255 - px.g, 255 - px.b);
    }
}

/// Add `delta` to every channel, clamping to `[0, 255]`.
///
/// Fails with `InvalidArgument` when `delta` is outside `[-255, 255]`.
pub fn brightness(grid: &mut PixelGrid, delta: i32) -> Result<(), Error> {
    if !(-255..=255).contains(&delta) {
        return Err(Error::InvalidArgument(format!(
            "brightness delta must be in [-255, 255], got {}",
            delta
        )));
    }

    for px in grid.pixels_mut() {
        *px = Rgb::new(
            shift_channel(px.r, delta),
            shift_channel(px.g, delta),
            shift_channel(px.b, delta),
        );
    }
    Ok(())
}

#[inline]
fn shift_channel(c: u8, delta: i32) -> u8 {
    (c as i32 + delta).clamp(0, 255) as u8
}

/// Stretch every channel away from (or toward) mid-gray.
///
/// Applies `c -> (c - 128) * factor + 128`, clamped to `[0, 255]`. Fails
/// with `InvalidArgument` unless `factor` is positive and finite.
pub fn contrast(grid: &mut PixelGrid, factor: f32) -> Result<(), Error> {
    if !(factor.is_finite() && factor > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "contrast factor must be positive and finite, got {}",
            factor
        )));
    }

    for px in grid.pixels_mut() {
        *px = Rgb::new(
            stretch_channel(px.r, factor),
            stretch_channel(px.g, factor),
            stretch_channel(px.b, factor),
        );
    }
    Ok(())
}

#[inline]
fn stretch_channel(c: u8, factor: f32) -> u8 {
    ((c as f32 - 128.0) * factor + 128.0).round().clamp(0.0, 255.0) as u8
}

/// Spread the luminance distribution toward uniform.
///
/// Builds the cumulative distribution of the luminance histogram and remaps
/// every pixel through it. The equalized luminance replaces all three
/// channels, so the output is monochrome like the other grayscale-derived
/// operations.
pub fn equalize(grid: &mut PixelGrid) {
    let hist = Histogram::of_grid(grid);
    let lut = equalization_lut(&hist.luminance, grid.pixel_count());

    for px in grid.pixels_mut() {
        *px = Rgb::splat(lut[px.luminance() as usize]);
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn pixels_strategy() -> impl Strategy<Value = Vec<Rgb>> {
        prop::collection::vec(
            (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b)),
            1..=64,
        )
    }

    proptest! {
        /// Property: invert is an involution on any image.
        #[test]
        fn prop_invert_involution(pixels in pixels_strategy()) {
            let width = pixels.len() as u32;
            let mut grid = PixelGrid::from_pixels(width, 1, pixels).unwrap();
            let original = grid.clone();
            invert(&mut grid);
            invert(&mut grid);
            prop_assert_eq!(grid, original);
        }

        /// Property: quantize(2) only ever produces pure black and white.
        #[test]
        fn prop_quantize_two_levels(pixels in pixels_strategy()) {
            let width = pixels.len() as u32;
            let mut grid = PixelGrid::from_pixels(width, 1, pixels).unwrap();
            quantize(&mut grid, 2).unwrap();
            for px in grid.pixels() {
                prop_assert!(*px == Rgb::splat(0) || *px == Rgb::splat(255));
            }
        }

        /// Property: grayscale output replicates one value across channels.
        #[test]
        fn prop_grayscale_monochrome(pixels in pixels_strategy()) {
            let width = pixels.len() as u32;
            let mut grid = PixelGrid::from_pixels(width, 1, pixels).unwrap();
            grayscale(&mut grid);
            for px in grid.pixels() {
                prop_assert!(px.r == px.g && px.g == px.b);
            }
        }
    }
}
