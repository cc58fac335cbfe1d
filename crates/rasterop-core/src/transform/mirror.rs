//! Mirror reflections across the vertical and horizontal axes.

use crate::grid::PixelGrid;

/// Mirror the grid left-to-right, in place.
///
/// Builds the reflected buffer in full before swapping it in, so the
/// center column of an odd width is never read after being written.
pub fn mirror_horizontal(grid: &mut PixelGrid) {
    let (width, height) = (grid.width(), grid.height());
    let mut flipped = Vec::with_capacity(grid.pixel_count());
    for y in 0..height {
        for x in 0..width {
            flipped.push(grid.at(width - 1 - x, y));
        }
    }
    grid.replace_pixels(flipped);
}

/// Mirror the grid top-to-bottom, in place, one whole row at a time.
pub fn mirror_vertical(grid: &mut PixelGrid) {
    let height = grid.height();
    let mut flipped = Vec::with_capacity(grid.pixel_count());
    for y in (0..height).rev() {
        flipped.extend_from_slice(grid.row(y));
    }
    grid.replace_pixels(flipped);
}


// ============================================================================
// Property-Based Tests
// ============================================================================
