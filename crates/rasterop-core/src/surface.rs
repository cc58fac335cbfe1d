//! Marshalling between external raster surfaces and the pixel grid.
//!
//! A raster surface is the toolkit- or codec-owned representation of a
//! decoded image: a byte buffer of `height * pitch` bytes plus the
//! per-channel bit shifts needed to compose and decompose a 24-bit color
//! word. Decoding reads with the *source* format's shifts and encoding
//! writes with the *target* format's shifts; mixing the two permutes the
//! color channels.
//!
//! Only 24-bit RGB surfaces are supported. A decode followed by an encode
//! in the same layout reproduces the pixel bytes exactly.

use crate::error::Error;
use crate::grid::{PixelGrid, Rgb};

/// Bit positions of the three channels inside a 24-bit color word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelLayout {
    pub r_shift: u8,
    pub g_shift: u8,
    pub b_shift: u8,
}

impl ChannelLayout {
    /// Red in the lowest byte, blue in the highest.
    pub const RGB: ChannelLayout = ChannelLayout {
        r_shift: 0,
        g_shift: 8,
        b_shift: 16,
    };

    /// Blue in the lowest byte, red in the highest.
    pub const BGR: ChannelLayout = ChannelLayout {
        r_shift: 16,
        g_shift: 8,
        b_shift: 0,
    };

    /// Split a 24-bit color word into its channels.
    #[inline]
    pub fn extract(self, word: u32) -> Rgb {
        Rgb::new(
            (word >> self.r_shift) as u8,
            (word >> self.g_shift) as u8,
            (word >> self.b_shift) as u8,
        )
    }

    /// Compose a 24-bit color word from a pixel.
    #[inline]
    pub fn compose(self, px: Rgb) -> u32 {
        (px.r as u32) << self.r_shift | (px.g as u32) << self.g_shift | (px.b as u32) << self.b_shift
    }

    fn validate(self) -> Result<(), Error> {
        let mut shifts = [self.r_shift, self.g_shift, self.b_shift];
        shifts.sort_unstable();
        if shifts != [0, 8, 16] {
            return Err(Error::UnsupportedLayout {
                r_shift: self.r_shift,
                g_shift: self.g_shift,
                b_shift: self.b_shift,
            });
        }
        Ok(())
    }
}

/// An opaque raster surface as handed over by the display toolkit.
///
/// The core only relies on the byte buffer, the pitch and the channel
/// shifts; everything else about the surface stays with its owner.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Bytes per row, at least `width * bytes_per_pixel`.
    pub pitch: usize,
    /// Bytes per pixel; must be 3.
    pub bytes_per_pixel: u8,
    /// Channel positions inside the color word.
    pub format: ChannelLayout,
    /// Pixel bytes, `height * pitch` of them.
    pub data: Vec<u8>,
}

impl RasterSurface {
    /// Copy every pixel out of the surface into a new grid.
    ///
    /// Each pixel's three bytes are assembled into a color word in memory
    /// order and split with the surface's channel shifts. Fails with
    /// `UnsupportedDepth` for anything but 3 bytes per pixel and
    /// `BufferSize` when the byte buffer is shorter than `height * pitch`.
    pub fn decode(&self) -> Result<PixelGrid, Error> {
        if self.bytes_per_pixel != 3 {
            return Err(Error::UnsupportedDepth {
                bytes_per_pixel: self.bytes_per_pixel,
            });
        }
        self.format.validate()?;

        let row_bytes = self.width as usize * 3;
        if self.pitch < row_bytes {
            return Err(Error::InvalidArgument(format!(
                "pitch {} is smaller than a {}-pixel row",
                self.pitch, self.width
            )));
        }
        let expected = self.height as usize * self.pitch;
        if self.data.len() < expected {
            return Err(Error::BufferSize {
                expected,
                actual: self.data.len(),
            });
        }

        let mut pixels = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                let base = y * self.pitch + x * 3;
                let word = self.data[base] as u32
                    | (self.data[base + 1] as u32) << 8
                    | (self.data[base + 2] as u32) << 16;
                pixels.push(self.format.extract(word));
            }
        }
        PixelGrid::from_pixels(self.width, self.height, pixels)
    }

    /// Write a grid back into a tightly packed surface of the given layout.
    pub fn from_grid(grid: &PixelGrid, format: ChannelLayout) -> Result<Self, Error> {
        Self::from_grid_with_pitch(grid, format, grid.width() as usize * 3)
    }

    /// Write a grid back into a surface with an explicit pitch.
    ///
    /// The color word of each pixel is composed with the target format's
    /// shifts and written byte by byte in memory order. Row padding beyond
    /// `width * 3` is zeroed.
    pub fn from_grid_with_pitch(
        grid: &PixelGrid,
        format: ChannelLayout,
        pitch: usize,
    ) -> Result<Self, Error> {
        format.validate()?;
        let row_bytes = grid.width() as usize * 3;
        if pitch < row_bytes {
            return Err(Error::InvalidArgument(format!(
                "pitch {} is smaller than a {}-pixel row",
                pitch,
                grid.width()
            )));
        }

        let size = grid.height() as usize * pitch;
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| Error::Allocation { bytes: size })?;
        data.resize(size, 0);

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let word = format.compose(grid.at(x, y));
                let base = y as usize * pitch + x as usize * 3;
                data[base] = word as u8;
                data[base + 1] = (word >> 8) as u8;
                data[base + 2] = (word >> 16) as u8;
            }
        }

        Ok(Self {
            width: grid.width(),
            height: grid.height(),
            pitch,
            bytes_per_pixel: 3,
            format,
            data,
        })
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
