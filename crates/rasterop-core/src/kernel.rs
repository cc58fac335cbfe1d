//! Convolution kernels: the named catalog and custom matrices.
//!
//! A kernel is an odd-sized square matrix of coefficients. The engine in
//! [`crate::convolve`] computes correlation (no 180-degree flip at apply
//! time), so the catalog stores each mask in its conventional orientation.
//!
//! Kernels serialize as a list of rows (`[[0.0, -1.0, 0.0], ...]`), which
//! is also the on-disk format for user-supplied custom kernels.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An odd-sized square convolution mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f32>>", into = "Vec<Vec<f32>>")]
pub struct Kernel {
    size: usize,
    coeffs: Vec<f32>,
}

impl Kernel {
    /// Build a kernel from a row-major coefficient buffer.
    ///
    /// Fails with `InvalidArgument` when `size` is even or zero, or when
    /// the buffer does not hold exactly `size * size` coefficients.
    pub fn new(size: usize, coeffs: Vec<f32>) -> Result<Self, Error> {
        if size == 0 || size % 2 == 0 {
            return Err(Error::InvalidArgument(format!(
                "kernel size must be odd and positive, got {}",
                size
            )));
        }
        if coeffs.len() != size * size {
            return Err(Error::InvalidArgument(format!(
                "kernel of size {} needs {} coefficients, got {}",
                size,
                size * size,
                coeffs.len()
            )));
        }
        Ok(Self { size, coeffs })
    }

    /// Build a 3x3 kernel from its rows.
    pub fn from_3x3(rows: [[f32; 3]; 3]) -> Self {
        Self {
            size: 3,
            coeffs: rows.into_iter().flatten().collect(),
        }
    }

    /// Side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center element to the edge.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Coefficient at row `ky`, column `kx`.
    #[inline]
    pub fn coeff(&self, ky: usize, kx: usize) -> f32 {
        debug_assert!(ky < self.size && kx < self.size);
        self.coeffs[ky * self.size + kx]
    }

    /// Kernel that leaves the image unchanged.
    pub fn identity() -> Self {
        Self::from_3x3([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]])
    }

    /// 3x3 Gaussian blur.
    pub fn gaussian() -> Self {
        Self::from_3x3([
            [0.0625, 0.125, 0.0625],
            [0.125, 0.25, 0.125],
            [0.0625, 0.125, 0.0625],
        ])
    }

    /// Laplacian edge detector.
    pub fn laplacian() -> Self {
        Self::from_3x3([[0.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 0.0]])
    }

    /// High-pass filter.
    pub fn high_pass() -> Self {
        Self::from_3x3([[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]])
    }

    /// Prewitt horizontal gradient.
    pub fn prewitt_hx() -> Self {
        Self::from_3x3([[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]])
    }

    /// Prewitt vertical gradient.
    pub fn prewitt_hy() -> Self {
        Self::from_3x3([[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]])
    }

    /// Sobel horizontal gradient.
    pub fn sobel_hx() -> Self {
        Self::from_3x3([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]])
    }

    /// Sobel vertical gradient.
    pub fn sobel_hy() -> Self {
        Self::from_3x3([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]])
    }

    /// Look up a catalog kernel by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "identity" => Some(Self::identity()),
            "gaussian" => Some(Self::gaussian()),
            "laplacian" => Some(Self::laplacian()),
            "high-pass" => Some(Self::high_pass()),
            "prewitt-hx" => Some(Self::prewitt_hx()),
            "prewitt-hy" => Some(Self::prewitt_hy()),
            "sobel-hx" => Some(Self::sobel_hx()),
            "sobel-hy" => Some(Self::sobel_hy()),
            _ => None,
        }
    }

    /// Names accepted by [`Kernel::by_name`].
    pub fn names() -> &'static [&'static str] {
        &[
            "identity",
            "gaussian",
            "laplacian",
            "high-pass",
            "prewitt-hx",
            "prewitt-hy",
            "sobel-hx",
            "sobel-hy",
        ]
    }
}

impl TryFrom<Vec<Vec<f32>>> for Kernel {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f32>>) -> Result<Self, Error> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(Error::InvalidArgument(
                "kernel rows must all match the row count".to_string(),
            ));
        }
        Self::new(size, rows.into_iter().flatten().collect())
    }
}

impl From<Kernel> for Vec<Vec<f32>> {
    fn from(kernel: Kernel) -> Self {
        kernel
            .coeffs
            .chunks(kernel.size)
            .map(|row| row.to_vec())
            .collect()
    }
}
