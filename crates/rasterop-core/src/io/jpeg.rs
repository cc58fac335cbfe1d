//! JPEG decode and encode with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};

use crate::error::Error;
use crate::grid::PixelGrid;

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Decode a JPEG byte buffer into a pixel grid.
///
/// The EXIF orientation tag, when present, is applied so the grid comes
/// back upright.
///
/// # Errors
///
/// Returns `Error::Codec` when the bytes are not a decodable JPEG.
pub fn decode_jpeg(bytes: &[u8]) -> Result<PixelGrid, Error> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::Codec(e.to_string()))?;
    let img = reader.decode().map_err(|e| Error::Codec(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    Ok(PixelGrid::from_rgb_image(&oriented.into_rgb8()))
}

/// Encode a pixel grid as JPEG bytes.
///
/// # Arguments
///
/// * `grid` - The pixels to encode
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Errors
///
/// Returns `Error::Codec` when the encoder fails.
pub fn encode_jpeg(grid: &PixelGrid, quality: u8) -> Result<Vec<u8>, Error> {
    let quality = quality.clamp(1, 100);

    let mut bytes = Vec::new();
    for px in grid.pixels() {
        bytes.extend_from_slice(&[px.r, px.g, px.b]);
    }

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(&bytes, grid.width(), grid.height(), ExtendedColorType::Rgb8)
        .map_err(|e| Error::Codec(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Extract the EXIF orientation from a JPEG byte buffer.
///
/// Returns `Orientation::Normal` when there is no EXIF data or the tag is
/// absent.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
