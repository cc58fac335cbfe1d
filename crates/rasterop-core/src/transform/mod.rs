//! Geometric transforms: mirroring, rotation and scaling.
//!
//! Mirrors work in place. Rotation and scaling produce a new grid, since
//! they generally change the dimensions; the caller discards the old grid.
//!
//! # Coordinate System
//!
//! - Row-major grid, origin at the top-left corner
//! - Arbitrary rotation angles are in degrees, positive = counter-clockwise

mod mirror;
mod rotate;
mod scale;

pub use mirror::{mirror_horizontal, mirror_vertical};
pub use rotate::{compute_rotated_bounds, rotate_by, rotate_ccw, rotate_cw};
pub use scale::{scale_down, scale_up, UPSCALE_FACTOR};
