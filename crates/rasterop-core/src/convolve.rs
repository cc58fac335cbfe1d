//! Kernel application over the pixel grid.
//!
//! For every output pixel, each channel is the correlation sum of the
//! kernel with the source neighborhood, clamped to `[0, 255]`. Reads past
//! the grid edges replicate the border pixel, so uniform regions stay
//! uniform all the way to the border instead of darkening.

use crate::error::Error;
use crate::grid::{PixelGrid, Rgb};
use crate::kernel::Kernel;

/// Apply a kernel to the grid, producing a new grid of the same size.
pub fn convolve(grid: &PixelGrid, kernel: &Kernel) -> Result<PixelGrid, Error> {
    let radius = kernel.radius() as i64;
    let (width, height) = (grid.width(), grid.height());

    let mut out = Vec::with_capacity(grid.pixel_count());
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 3];
            for ky in 0..kernel.size() {
                for kx in 0..kernel.size() {
                    let sx = x as i64 + kx as i64 - radius;
                    let sy = y as i64 + ky as i64 - radius;
                    let px = grid.sample_clamped(sx, sy);
                    let c = kernel.coeff(ky, kx);
                    acc[0] += c * px.r as f32;
                    acc[1] += c * px.g as f32;
                    acc[2] += c * px.b as f32;
                }
            }
            out.push(Rgb::new(
                clamp_channel(acc[0]),
                clamp_channel(acc[1]),
                clamp_channel(acc[2]),
            ));
        }
    }
    PixelGrid::from_pixels(width, height, out)
}

/// Blur the grid with the 3x3 Gaussian catalog kernel.
pub fn gauss_blur(grid: &PixelGrid) -> Result<PixelGrid, Error> {
    convolve(grid, &Kernel::gaussian())
}

#[inline]
fn clamp_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_grid(width: u32, height: u32) -> PixelGrid {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(Rgb::splat(((x + y) * 8 % 256) as u8));
            }
        }
        PixelGrid::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_identity_kernel_is_noop() {
        let grid = gradient_grid(7, 5);
        let out = convolve(&grid, &Kernel::identity()).unwrap();
        // Edge-clamped sampling makes the identity exact everywhere,
        // border included.
        assert_eq!(out, grid);
    }

    #[test]
    fn test_output_dimensions_match_input() {
        let grid = gradient_grid(9, 4);
        let out = convolve(&grid, &Kernel::gaussian()).unwrap();
        assert_eq!(out.width(), 9);
        assert_eq!(out.height(), 4);
    }

    #[test]
    fn test_gaussian_preserves_uniform_image() {
        let grid = PixelGrid::filled(6, 6, Rgb::splat(200)).unwrap();
        let out = gauss_blur(&grid).unwrap();
        // The kernel sums to one and the border replicates, so a flat
        // image passes through unchanged.
        assert_eq!(out, grid);
    }

    #[test]
    fn test_gaussian_smooths_an_impulse() {
        let mut grid = PixelGrid::new(5, 5).unwrap();
        grid.set(2, 2, Rgb::splat(255)).unwrap();
        let out = gauss_blur(&grid).unwrap();

        // Center keeps the largest share, neighbors get smaller weights.
        let center = out.get(2, 2).unwrap().r;
        let side = out.get(1, 2).unwrap().r;
        let corner = out.get(1, 1).unwrap().r;
        assert_eq!(center, 64); // 255 * 0.25 rounded
        assert_eq!(side, 32); // 255 * 0.125 rounded
        assert_eq!(corner, 16); // 255 * 0.0625 rounded
        assert_eq!(out.get(4, 4).unwrap().r, 0);
    }

    #[test]
    fn test_laplacian_zero_on_flat_image() {
        let grid = PixelGrid::filled(4, 4, Rgb::splat(90)).unwrap();
        let out = convolve(&grid, &Kernel::laplacian()).unwrap();
        assert!(out.pixels().iter().all(|&px| px == Rgb::splat(0)));
    }

    #[test]
    fn test_sobel_detects_vertical_edge() {
        // Left half dark, right half bright.
        let mut pixels = Vec::new();
        for _y in 0..4 {
            pixels.extend([Rgb::splat(0), Rgb::splat(0), Rgb::splat(255), Rgb::splat(255)]);
        }
        let grid = PixelGrid::from_pixels(4, 4, pixels).unwrap();

        let out = convolve(&grid, &Kernel::sobel_hx()).unwrap();
        // Strong response on the edge columns, none in the flat regions.
        assert_eq!(out.get(0, 1).unwrap(), Rgb::splat(0));
        assert_eq!(out.get(3, 1).unwrap(), Rgb::splat(0));
        assert!(out.get(1, 1).unwrap().r > 0);
        assert!(out.get(2, 1).unwrap().r > 0);
    }

    #[test]
    fn test_sobel_hy_ignores_vertical_edge() {
        let mut pixels = Vec::new();
        for _y in 0..4 {
            pixels.extend([Rgb::splat(0), Rgb::splat(0), Rgb::splat(255), Rgb::splat(255)]);
        }
        let grid = PixelGrid::from_pixels(4, 4, pixels).unwrap();

        let out = convolve(&grid, &Kernel::sobel_hy()).unwrap();
        assert!(out.pixels().iter().all(|&px| px == Rgb::splat(0)));
    }

    #[test]
    fn test_negative_results_clamp_to_zero() {
        // Bright-to-dark step: the gradient points the other way, so the
        // unclamped response is negative on one side.
        let mut pixels = Vec::new();
        for _y in 0..3 {
            pixels.extend([Rgb::splat(255), Rgb::splat(0), Rgb::splat(0)]);
        }
        let grid = PixelGrid::from_pixels(3, 3, pixels).unwrap();

        let out = convolve(&grid, &Kernel::prewitt_hx()).unwrap();
        assert_eq!(out.get(1, 1).unwrap(), Rgb::splat(0));
    }

    #[test]
    fn test_five_by_five_box_kernel() {
        let kernel = Kernel::new(5, vec![1.0 / 25.0; 25]).unwrap();
        let grid = PixelGrid::filled(8, 8, Rgb::splat(75)).unwrap();
        let out = convolve(&grid, &kernel).unwrap();
        assert_eq!(out, grid);
    }

    #[test]
    fn test_single_pixel_grid() {
        let grid = PixelGrid::from_pixels(1, 1, vec![Rgb::new(10, 20, 30)]).unwrap();
        let out = gauss_blur(&grid).unwrap();
        // Every clamped sample is the one pixel, and gaussian sums to one.
        assert_eq!(out.get(0, 0).unwrap(), Rgb::new(10, 20, 30));
    }
}
